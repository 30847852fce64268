//! Word primitives, memory store, instruction codec and CPU interpreter for
//! the DCPU-16, a fictional 16-bit processor.
//!
//! The three components making up the interpreter live in their own
//! modules: [`word`] (integer parsing shared with the assembler),
//! [`memory`] (the [`WordStore`](memory::WordStore) trait and the `Ram`
//! built on it), [`instruction`] (encoding/decoding instruction words) and
//! [`processor`] (the [`Cpu`](processor::Cpu) itself). [`register`] and
//! [`opcode`] hold the name tables both the assembler and the interpreter
//! share.
//!
//! Assembling source text into the word sequence a [`Cpu`](processor::Cpu)
//! can load is the job of the sibling `dasm` crate.

pub mod constants;
pub mod error;
pub mod instruction;
pub mod memory;
pub mod opcode;
pub mod processor;
pub mod register;
pub mod word;


/// A single 16-bit memory/register cell.
pub type Word = u16;
