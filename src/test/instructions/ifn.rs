use super::run_conditional;
use crate::opcode::BasicOp;

#[test]
fn unequal_operands_run_the_next_instruction() {
    let (taken, cycles) = run_conditional(BasicOp::IFN as u8, 0x2, 0x3);
    assert!(taken);
    assert_eq!(cycles, 3); // 1 fetch + 2 IFN
}

#[test]
fn equal_operands_skip_the_next_instruction() {
    let (taken, cycles) = run_conditional(BasicOp::IFN as u8, 0x2, 0x2);
    assert!(!taken);
    assert_eq!(cycles, 4); // 1 fetch + 2 IFN + 1 skip
}
