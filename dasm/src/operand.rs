//! Operand-code parsing: turns one already-whitespace-split token into a
//! `(value_code, extra_word?)` pair, per §4.D's ordered bracket/register/
//! literal/label cascade. Re-expressed as the ordered predicate-and-extract
//! steps the redesign flags call for rather than a chain of caught
//! exceptions.

use dcpu16::register::RegisterId;
use dcpu16::word::parse_int;
use dcpu16::Word;

use crate::error::LineError;

/// A resolved extra word: either already known, or a label name to look up
/// once every line has been seen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ExtraWord {
    Value(Word),
    Label(String),
}

/// The named, non-general-purpose operands: `SP`, `PC`, `O`, and the three
/// stack shorthands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Named {
    General(RegisterId),
    Sp,
    Pc,
    O,
    Pop,
    Peek,
    Push,
}

impl Named {
    fn code(self) -> u8 {
        match self {
            Named::General(id) => id.index(),
            Named::Sp => 0x1B,
            Named::Pc => 0x1C,
            Named::O => 0x1D,
            Named::Pop => 0x18,
            Named::Peek => 0x19,
            Named::Push => 0x1A,
        }
    }

    fn parse(token: &str) -> Option<Named> {
        match token {
            "SP" => Some(Named::Sp),
            "PC" => Some(Named::Pc),
            "O" => Some(Named::O),
            "POP" => Some(Named::Pop),
            "PEEK" => Some(Named::Peek),
            "PUSH" => Some(Named::Push),
            _ => token.parse::<RegisterId>().ok().map(Named::General),
        }
    }
}

/// Parses one operand token into its value code and, if the addressing
/// mode consumes one, an extra word (literal or still-unresolved label).
pub(crate) fn parse_value_code(token: &str) -> Result<(u8, Option<ExtraWord>), LineError> {
    let token = token.trim_matches(',');

    if let Some(rest) = token.strip_prefix('[') {
        parse_bracketed(rest)
    } else if let Some(named) = Named::parse(token) {
        Ok((named.code(), None))
    } else if let Some(value) = parse_int(token, &[10, 16]) {
        if (0..=0x1F).contains(&value) {
            Ok(((value as u8) + 0x20, None))
        } else {
            Ok((0x1F, Some(ExtraWord::Value(checked_word(value)?))))
        }
    } else {
        Ok((0x1F, Some(ExtraWord::Label(token.to_string()))))
    }
}

fn parse_bracketed(rest: &str) -> Result<(u8, Option<ExtraWord>), LineError> {
    let close = rest
        .find(']')
        .ok_or_else(|| LineError::Syntax("no closing bracket".to_string()))?;
    let inner = &rest[..close];

    if let Some(add_pos) = inner.find('+').filter(|&pos| pos > 0) {
        let offset_text = &inner[..add_pos];
        let base_text = &inner[add_pos + 1..];

        let offset = parse_int(offset_text, &[10, 16])
            .ok_or_else(|| LineError::InvalidValueReference(offset_text.to_string()))?;
        let base = base_text
            .parse::<RegisterId>()
            .map_err(|_| LineError::InvalidValueReference(base_text.to_string()))?;

        Ok((0x10 + base.index(), Some(ExtraWord::Value(checked_word(offset)?))))
    } else if let Ok(base) = inner.parse::<RegisterId>() {
        Ok((0x08 + base.index(), None))
    } else {
        let value = parse_int(inner, &[10, 16])
            .ok_or_else(|| LineError::InvalidValueReference(inner.to_string()))?;
        Ok((0x1E, Some(ExtraWord::Value(checked_word(value)?))))
    }
}

fn checked_word(value: i64) -> Result<Word, LineError> {
    if (0..=0xFFFF).contains(&value) {
        Ok(value as Word)
    } else {
        Err(LineError::ValueOutOfRange(value))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn general_register() {
        assert_eq!(parse_value_code("A").unwrap(), (0x00, None));
        assert_eq!(parse_value_code("J,").unwrap(), (0x07, None));
    }

    #[test]
    fn named_special_registers() {
        assert_eq!(parse_value_code("SP").unwrap(), (0x1B, None));
        assert_eq!(parse_value_code("PC").unwrap(), (0x1C, None));
        assert_eq!(parse_value_code("O").unwrap(), (0x1D, None));
        assert_eq!(parse_value_code("POP").unwrap(), (0x18, None));
        assert_eq!(parse_value_code("PEEK").unwrap(), (0x19, None));
        assert_eq!(parse_value_code("PUSH").unwrap(), (0x1A, None));
    }

    #[test]
    fn register_indirect() {
        assert_eq!(parse_value_code("[A]").unwrap(), (0x08, None));
    }

    #[test]
    fn next_word_plus_register() {
        let (code, extra) = parse_value_code("[0x1000+I]").unwrap();
        assert_eq!(code, 0x10 + RegisterId::I.index());
        assert_eq!(extra, Some(ExtraWord::Value(0x1000)));
    }

    #[test]
    fn bracketed_literal_address() {
        let (code, extra) = parse_value_code("[0x1234]").unwrap();
        assert_eq!(code, 0x1E);
        assert_eq!(extra, Some(ExtraWord::Value(0x1234)));
    }

    #[test]
    fn short_literal() {
        assert_eq!(parse_value_code("0x10").unwrap(), (0x30, None));
    }

    #[test]
    fn long_literal_takes_next_word() {
        let (code, extra) = parse_value_code("0x20").unwrap();
        assert_eq!(code, 0x1F);
        assert_eq!(extra, Some(ExtraWord::Value(0x20)));
    }

    #[test]
    fn unresolved_label_reference() {
        let (code, extra) = parse_value_code("loop").unwrap();
        assert_eq!(code, 0x1F);
        assert_eq!(extra, Some(ExtraWord::Label("loop".to_string())));
    }

    #[test]
    fn missing_closing_bracket_is_a_syntax_error() {
        let err = parse_value_code("[0x001").unwrap_err();
        match err {
            LineError::Syntax(message) => assert!(message.contains("closing bracket")),
            other => panic!("expected a syntax error, got {:?}", other),
        }
    }

    #[test]
    fn out_of_range_literal() {
        let err = parse_value_code("0x10000").unwrap_err();
        assert_eq!(err, LineError::ValueOutOfRange(0x10000));
    }

    #[test]
    fn negative_literal_in_the_short_literal_range_is_out_of_range() {
        // -5 is <= 0x1F but must not be mistaken for the short literal 0x1B.
        let err = parse_value_code("-5").unwrap_err();
        assert_eq!(err, LineError::ValueOutOfRange(-5));
    }

    #[test]
    fn negative_literal_below_the_short_literal_range_is_out_of_range() {
        let err = parse_value_code("-100").unwrap_err();
        assert_eq!(err, LineError::ValueOutOfRange(-100));
    }
}
