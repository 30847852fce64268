//! Parses one source line into a [`ParsedLine`], and later emits it into
//! machine-code words once every label's address is known.

use std::collections::HashMap;

use dcpu16::instruction::{encode_basic, encode_non_basic};
use dcpu16::opcode::{BasicOp, NonBasicOp};
use dcpu16::Word;

use crate::error::{Error, LineError};
use crate::operand::{parse_value_code, ExtraWord};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum OpKind {
    Basic(BasicOp),
    NonBasic(NonBasicOp),
}

type Operand = (u8, Option<ExtraWord>);

/// One assembled line: an optional label definition, its operation, and
/// one or two operands (non-basic instructions have only `a`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ParsedLine {
    pub label: Option<String>,
    op: OpKind,
    a: Operand,
    b: Option<Operand>,
}

impl ParsedLine {
    /// Number of words this line occupies once emitted: one for the
    /// instruction itself, plus one per operand carrying an extra word.
    pub fn word_length(&self) -> u16 {
        let mut length = 1;
        if self.a.1.is_some() {
            length += 1;
        }
        if let Some((_, extra)) = &self.b {
            if extra.is_some() {
                length += 1;
            }
        }
        length
    }

    /// Resolves any label references against `labels` and appends this
    /// line's words to `out`.
    pub fn emit(&self, labels: &HashMap<String, Word>, out: &mut Vec<Word>) -> Result<(), Error> {
        let a_extra = resolve_extra(&self.a.1, labels)?;

        match (&self.op, &self.b) {
            (OpKind::Basic(op), Some(b)) => {
                let b_extra = resolve_extra(&b.1, labels)?;
                out.push(encode_basic(*op as u8, self.a.0, b.0));
                if let Some(word) = a_extra {
                    out.push(word);
                }
                if let Some(word) = b_extra {
                    out.push(word);
                }
            }
            (OpKind::NonBasic(op), None) => {
                out.push(encode_non_basic(*op as u8, self.a.0));
                if let Some(word) = a_extra {
                    out.push(word);
                }
            }
            _ => unreachable!("parse_line never pairs a basic op with one operand or vice versa"),
        }

        Ok(())
    }
}

fn resolve_extra(
    extra: &Option<ExtraWord>,
    labels: &HashMap<String, Word>,
) -> Result<Option<Word>, Error> {
    match extra {
        None => Ok(None),
        Some(ExtraWord::Value(word)) => Ok(Some(*word)),
        Some(ExtraWord::Label(name)) => labels
            .get(name)
            .copied()
            .map(Some)
            .ok_or_else(|| Error::InvalidValueReference { token: name.clone() }),
    }
}

/// Parses one already-trimmed, non-empty, non-comment source line. A label
/// definition is a leading `:name` token; any tokens past the operands
/// (such as a trailing `; comment`) are simply never consumed.
pub(crate) fn parse_line(line: &str) -> Result<ParsedLine, LineError> {
    let mut tokens = line.split_whitespace().peekable();

    let mut label = None;
    if let Some(token) = tokens.peek() {
        if let Some(name) = token.strip_prefix(':') {
            label = Some(name.to_string());
            tokens.next();
        }
    }

    let mnemonic = tokens
        .next()
        .ok_or_else(|| LineError::Syntax("missing operation".to_string()))?;

    let op = parse_op(mnemonic)?;

    let first = tokens
        .next()
        .ok_or_else(|| LineError::Syntax(format!("{} needs an operand", mnemonic)))?;
    let a = parse_value_code(first)?;

    match op {
        OpKind::Basic(basic_op) => {
            let second = tokens
                .next()
                .ok_or_else(|| LineError::Syntax(format!("{} needs two operands", mnemonic)))?;
            let b = parse_value_code(second)?;
            Ok(ParsedLine { label, op: OpKind::Basic(basic_op), a, b: Some(b) })
        }
        OpKind::NonBasic(_) => Ok(ParsedLine { label, op, a, b: None }),
    }
}

fn parse_op(mnemonic: &str) -> Result<OpKind, LineError> {
    if let Ok(op) = mnemonic.parse::<BasicOp>() {
        return Ok(OpKind::Basic(op));
    }
    if let Ok(op) = mnemonic.parse::<NonBasicOp>() {
        return Ok(OpKind::NonBasic(op));
    }
    Err(LineError::InvalidOperation(mnemonic.to_string()))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_a_label_and_two_operands() {
        let parsed = parse_line(":loop SET A, 0x10").unwrap();
        assert_eq!(parsed.label.as_deref(), Some("loop"));
        assert_eq!(parsed.a, (0x00, None));
        assert_eq!(parsed.b, Some((0x30, None)));
        assert_eq!(parsed.word_length(), 1);
    }

    #[test]
    fn trailing_comment_token_is_simply_never_consumed() {
        let parsed = parse_line("SET A, 0x10 ; load a constant").unwrap();
        assert_eq!(parsed.a, (0x00, None));
        assert_eq!(parsed.b, Some((0x30, None)));
    }

    #[test]
    fn non_basic_has_a_single_operand() {
        let parsed = parse_line("JSR loop").unwrap();
        assert_eq!(parsed.b, None);
        assert_eq!(parsed.word_length(), 2); // the unresolved label takes a word
    }

    #[test]
    fn unknown_mnemonic_is_an_invalid_operation() {
        let err = parse_line("FOO A, B").unwrap_err();
        assert_eq!(err, LineError::InvalidOperation("FOO".to_string()));
    }

    #[test]
    fn missing_operand_is_a_syntax_error() {
        let err = parse_line("SET A").unwrap_err();
        match err {
            LineError::Syntax(_) => {}
            other => panic!("expected a syntax error, got {:?}", other),
        }
    }

    #[test]
    fn emit_resolves_a_label_reference() {
        let parsed = parse_line("SET PC, loop").unwrap();
        let mut labels = HashMap::new();
        labels.insert("loop".to_string(), 0x1000);

        let mut out = Vec::new();
        parsed.emit(&labels, &mut out).unwrap();

        assert_eq!(out, vec![encode_basic(BasicOp::SET as u8, 0x1C, 0x1F), 0x1000]);
    }

    #[test]
    fn emit_fails_on_an_unresolved_label() {
        let parsed = parse_line("JSR missing").unwrap();
        let labels = HashMap::new();
        let mut out = Vec::new();
        let err = parsed.emit(&labels, &mut out).unwrap_err();
        assert_eq!(err, Error::InvalidValueReference { token: "missing".to_string() });
    }
}
