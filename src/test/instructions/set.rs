use super::run_op;
use crate::opcode::BasicOp;

#[test]
fn overwrites_a_with_b() {
    let out = run_op(BasicOp::SET as u8, 0x00, 0x02);
    assert_eq!(out.a, 0x02);
    assert_eq!(out.cycles, 2); // 1 fetch + 1 SET
}
