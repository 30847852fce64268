use crate::instruction::encode_non_basic;
use crate::opcode::NonBasicOp;
use crate::processor::{tick, Cpu};
use crate::register::RegisterId;

#[test]
fn pushes_return_address_and_jumps_to_a() {
    let mut cpu = Cpu::new();
    cpu.registers.pc = 0x77;
    cpu.registers.set(RegisterId::A, 0xA10);
    cpu.registers.sp = 0xFFFF;
    cpu.ram.write(0x77, encode_non_basic(NonBasicOp::JSR as u8, 0x00));

    tick(&mut cpu).unwrap();

    assert_eq!(cpu.ram.read(0xFFFE), 0x78);
    assert_eq!(cpu.registers.sp, 0xFFFE);
    assert_eq!(cpu.registers.pc, 0xA10);
    assert_eq!(cpu.cycles, 3); // 1 fetch + 2 JSR
}
