//! The errors `assemble` can raise, per the taxonomy shared with the
//! interpreter: per-line parsing failures are rewrapped in
//! `AssemblerSyntaxError` with the offending line text; failures that only
//! surface during the label-resolution emission pass propagate unwrapped.

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    AssemblerSyntaxError { line: String, reason: String },
    InvalidOperation { mnemonic: String },
    InvalidValueReference { token: String },
    ValueOutOfRange { value: i64 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AssemblerSyntaxError { line, reason } => {
                write!(f, "syntax error on line:\n\t{}\nerror: {}", line, reason)
            }
            Error::InvalidOperation { mnemonic } => {
                write!(f, "unrecognized operation: {}", mnemonic)
            }
            Error::InvalidValueReference { token } => {
                write!(f, "unrecognized value reference: {}", token)
            }
            Error::ValueOutOfRange { value } => write!(f, "value out of range: {:#x}", value),
        }
    }
}

impl std::error::Error for Error {}

/// Failures that can only happen while parsing a single line. `assemble`
/// catches these and rewraps every one as `Error::AssemblerSyntaxError`,
/// matching the Python reference's blanket per-line `try`/`except`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum LineError {
    Syntax(String),
    InvalidOperation(String),
    InvalidValueReference(String),
    ValueOutOfRange(i64),
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineError::Syntax(message) => write!(f, "{}", message),
            LineError::InvalidOperation(mnemonic) => {
                write!(f, "unrecognized operation: {}", mnemonic)
            }
            LineError::InvalidValueReference(token) => {
                write!(f, "unrecognized value reference: {}", token)
            }
            LineError::ValueOutOfRange(value) => write!(f, "value out of range: {:#x}", value),
        }
    }
}
