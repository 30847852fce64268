use super::run_conditional;
use crate::opcode::BasicOp;

#[test]
fn shared_bits_run_the_next_instruction() {
    let (taken, cycles) = run_conditional(BasicOp::IFB as u8, 0xF1, 0x01);
    assert!(taken);
    assert_eq!(cycles, 3); // 1 fetch + 2 IFB
}

#[test]
fn disjoint_bits_skip_the_next_instruction() {
    let (taken, cycles) = run_conditional(BasicOp::IFB as u8, 0x0F1, 0xF00);
    assert!(!taken);
    assert_eq!(cycles, 4); // 1 fetch + 2 IFB + 1 skip
}
