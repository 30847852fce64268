use super::run_op;
use crate::opcode::BasicOp;

#[test]
fn bitwise_xor() {
    let out = run_op(BasicOp::XOR as u8, 0x0F00, 0xAFAF);
    assert_eq!(out.a, 0xA0AF);
    assert_eq!(out.cycles, 2); // 1 fetch + 1 XOR
}
