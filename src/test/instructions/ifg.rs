use super::run_conditional;
use crate::opcode::BasicOp;

#[test]
fn greater_a_runs_the_next_instruction() {
    let (taken, cycles) = run_conditional(BasicOp::IFG as u8, 0x8, 0x2);
    assert!(taken);
    assert_eq!(cycles, 3); // 1 fetch + 2 IFG
}

#[test]
fn lesser_a_skips_the_next_instruction() {
    let (taken, cycles) = run_conditional(BasicOp::IFG as u8, 0x2, 0x8);
    assert!(!taken);
    assert_eq!(cycles, 4); // 1 fetch + 2 IFG + 1 skip
}
