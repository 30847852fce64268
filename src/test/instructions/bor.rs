use super::run_op;
use crate::opcode::BasicOp;

#[test]
fn bitwise_or() {
    let out = run_op(BasicOp::BOR as u8, 0x0F0F, 0xAFAF);
    assert_eq!(out.a, 0xAFAF);
    assert_eq!(out.cycles, 2); // 1 fetch + 1 BOR
}
