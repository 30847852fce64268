//! The CPU interpreter: operand resolution and the fetch-decode-execute
//! loop built on top of the register file, RAM, and instruction codec.

mod cpu;
mod operand;

pub use cpu::{tick, Cpu, ProgramWord, TickResult};
pub use operand::{Operand, SpecialRegister};
