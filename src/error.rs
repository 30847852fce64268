//! Errors surfaced by the CPU interpreter.

use std::fmt;

use crate::memory::MemoryError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CpuError {
    Memory(MemoryError),
    /// An operand code outside `0x00..=0x3F`. Can only happen when decoding
    /// a malformed word, since the codec masks both operand fields to 6 bits.
    InvalidValueCode { code: u8 },
    /// A basic/non-basic opcode with no handler, e.g. a reserved basic op
    /// code or a non-basic sub-opcode other than `JSR`.
    OpCodeNotImplemented { code: u8 },
    /// A loaded instruction word failed to parse or didn't fit in 16 bits.
    InvalidInstruction { message: String },
    /// `Cpu::run` revisited a state fingerprint already seen this run.
    InfiniteLoopDetected,
}

impl fmt::Display for CpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CpuError::Memory(err) => write!(f, "{}", err),
            CpuError::InvalidValueCode { code } => {
                write!(f, "invalid value code: {:#04x}", code)
            }
            CpuError::OpCodeNotImplemented { code } => {
                write!(f, "opcode not implemented: {:#04x}", code)
            }
            CpuError::InvalidInstruction { message } => write!(f, "invalid instruction: {}", message),
            CpuError::InfiniteLoopDetected => write!(f, "infinite loop detected"),
        }
    }
}

impl std::error::Error for CpuError {}

impl From<MemoryError> for CpuError {
    fn from(err: MemoryError) -> Self {
        CpuError::Memory(err)
    }
}
