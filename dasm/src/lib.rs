//! Assembles `.dasm16` source text into a flat sequence of DCPU-16
//! instruction words.
//!
//! Single pass over source lines builds the AST and the label table
//! together (label addresses are the running word total of the
//! instructions accepted so far); a second pass resolves every label
//! reference and emits the final word sequence.

pub mod error;
mod line;
mod operand;


use std::collections::HashMap;

pub use error::Error;
use dcpu16::Word;
use line::{parse_line, ParsedLine};

/// Assembles `source` into its instruction words, or the first error
/// encountered.
pub fn assemble(source: &str) -> Result<Vec<Word>, Error> {
    let mut instructions = Vec::new();
    let mut labels = HashMap::new();
    let mut address: Word = 0;

    for line in source.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(';') {
            continue;
        }

        let parsed: ParsedLine = parse_line(trimmed).map_err(|err| Error::AssemblerSyntaxError {
            line: trimmed.to_string(),
            reason: err.to_string(),
        })?;

        if let Some(name) = &parsed.label {
            labels.insert(name.clone(), address);
        }

        address = address.wrapping_add(parsed.word_length());
        instructions.push(parsed);
    }

    let mut words = Vec::new();
    for instruction in &instructions {
        instruction.emit(&labels, &mut words)?;
    }

    Ok(words)
}
