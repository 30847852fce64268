//! Basic and non-basic opcode tables.
//!
//! Unlike `RegisterId`, these carry explicit discriminants matching the
//! DCPU-16 wire encoding, so numeric conversion goes through
//! `num-derive`'s match-based `FromPrimitive`/`ToPrimitive` rather than
//! `InteropGetName`'s array-index trick (which only holds for gapless,
//! zero-based discriminants).

use num_derive::{FromPrimitive, ToPrimitive};
use util_derive::EnumFromStr;

/// Two-operand opcodes, encoded in the low 4 bits of a basic instruction
/// word (`op` in `1..15`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive, EnumFromStr)]
pub enum BasicOp {
    SET = 0x1,
    ADD = 0x2,
    SUB = 0x3,
    MUL = 0x4,
    DIV = 0x5,
    MOD = 0x6,
    SHL = 0x7,
    SHR = 0x8,
    AND = 0x9,
    BOR = 0xA,
    XOR = 0xB,
    IFE = 0xC,
    IFN = 0xD,
    IFG = 0xE,
    IFB = 0xF,
}

impl BasicOp {
    /// `2` for the conditional-skip family, the documented cost table
    /// otherwise. The skip opcodes charge one extra cycle when the test
    /// fails; that is the dispatcher's responsibility, not this table's.
    pub fn cycles(self) -> u64 {
        match self {
            BasicOp::SET => 1,
            BasicOp::ADD => 2,
            BasicOp::SUB => 2,
            BasicOp::MUL => 2,
            BasicOp::DIV => 3,
            BasicOp::MOD => 3,
            BasicOp::SHL => 2,
            BasicOp::SHR => 2,
            BasicOp::AND => 1,
            BasicOp::BOR => 1,
            BasicOp::XOR => 1,
            BasicOp::IFE | BasicOp::IFN | BasicOp::IFG | BasicOp::IFB => 2,
        }
    }

    pub fn is_conditional(self) -> bool {
        matches!(
            self,
            BasicOp::IFE | BasicOp::IFN | BasicOp::IFG | BasicOp::IFB
        )
    }
}

/// One-operand opcodes, encoded in bits `[9:4]` of a non-basic instruction
/// word (the instruction's low 4 bits are `0`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive, EnumFromStr)]
pub enum NonBasicOp {
    JSR = 0x1,
}

impl NonBasicOp {
    pub fn cycles(self) -> u64 {
        match self {
            NonBasicOp::JSR => 2,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use num_traits::{FromPrimitive, ToPrimitive};

    #[test]
    fn basic_op_numeric_roundtrip() {
        assert_eq!(BasicOp::from_u8(0x1), Some(BasicOp::SET));
        assert_eq!(BasicOp::from_u8(0xF), Some(BasicOp::IFB));
        assert_eq!(BasicOp::from_u8(0x0), None);
        assert_eq!(BasicOp::SET.to_u8(), Some(0x1));
    }

    #[test]
    fn non_basic_op_numeric_roundtrip() {
        assert_eq!(NonBasicOp::from_u8(0x1), Some(NonBasicOp::JSR));
        assert_eq!(NonBasicOp::from_u8(0x2), None);
    }

    #[test]
    fn basic_op_parses_by_mnemonic() {
        assert_eq!("SET".parse(), Ok(BasicOp::SET));
        assert_eq!("IFB".parse(), Ok(BasicOp::IFB));
        assert!("set".parse::<BasicOp>().is_err());
    }
}
