use super::run_op;
use crate::opcode::BasicOp;

#[test]
fn bitwise_and() {
    let out = run_op(BasicOp::AND as u8, 0x0F0F, 0xAFAF);
    assert_eq!(out.a, 0x0F0F);
    assert_eq!(out.cycles, 2); // 1 fetch + 1 AND
}
