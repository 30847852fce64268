//! The fetch-decode-execute loop.
//!
//! `Cpu` owns all interpreter state, and a free `tick` function advances it
//! by one instruction, returning a `TickResult` the caller's `run` loop
//! matches on. Cycle accounting and loop detection are explicit
//! fields/steps rather than decorators wrapping the dispatch.

use std::collections::hash_map::DefaultHasher;
use std::collections::{HashSet, VecDeque};
use std::hash::{Hash, Hasher};

use crate::constants::{LOOP_DETECTION_WINDOW, MAX_ADDRESS, STOP_INSTRUCTION};
use crate::error::CpuError;
use crate::instruction::Decoded;
use crate::memory::Ram;
use crate::opcode::{BasicOp, NonBasicOp};
use crate::processor::operand::Operand;
use crate::register::RegisterFile;
use crate::Word;

use num_traits::FromPrimitive;

/// What happened on one `tick`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickResult {
    Continue,
    Halted,
}

/// Register file, RAM, and the cycle counter together: everything a
/// running program can observe or mutate.
#[derive(Clone, Debug)]
pub struct Cpu {
    pub registers: RegisterFile,
    pub ram: Ram,
    pub cycles: u64,
}

impl Cpu {
    pub fn new() -> Self {
        Self {
            registers: RegisterFile::new(),
            ram: Ram::new(),
            cycles: 0,
        }
    }

    pub fn reset(&mut self) {
        self.registers.reset();
        self.ram.reset();
        self.cycles = 0;
    }

    /// Reads `RAM[PC]`, advances `PC`, charges one cycle. Every operand
    /// addressing mode that consumes a trailing word goes through this.
    pub fn fetch_next_word(&mut self) -> Word {
        let word = self.ram.read(self.registers.pc);
        self.registers.pc = self.registers.pc.wrapping_add(1);
        self.cycles += 1;
        word
    }

    /// Resets the CPU, then loads `words` into `RAM[0], RAM[1], ...`.
    /// Every word is validated before anything is written, so a failure
    /// midway through never leaves a half-loaded program behind.
    pub fn load_program<W: ProgramWord>(
        &mut self,
        words: impl IntoIterator<Item = W>,
    ) -> Result<(), CpuError> {
        let words = words
            .into_iter()
            .map(ProgramWord::into_word)
            .collect::<Result<Vec<Word>, CpuError>>()?;

        if words.len() > MAX_ADDRESS as usize + 1 {
            return Err(CpuError::InvalidInstruction {
                message: format!("program has {} words, RAM holds {}", words.len(), MAX_ADDRESS as usize + 1),
            });
        }

        self.reset();
        for (addr, word) in words.into_iter().enumerate() {
            self.ram.write(addr as Word, word);
        }
        Ok(())
    }

    /// Runs until `STOP_INSTRUCTION` is fetched or an error (including
    /// `InfiniteLoopDetected`) is raised.
    pub fn run(&mut self) -> Result<(), CpuError> {
        let mut seen = HashSet::new();
        let mut order = VecDeque::new();

        loop {
            let fingerprint = self.fingerprint();
            if !seen.insert(fingerprint) {
                return Err(CpuError::InfiniteLoopDetected);
            }
            order.push_back(fingerprint);
            if order.len() > LOOP_DETECTION_WINDOW {
                if let Some(oldest) = order.pop_front() {
                    seen.remove(&oldest);
                }
            }

            match tick(self)? {
                TickResult::Continue => {}
                TickResult::Halted => return Ok(()),
            }
        }
    }

    /// Register file plus the set of written RAM cells, cycle count
    /// excluded — the state `run`'s loop-detection window hashes.
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.registers.hash(&mut hasher);
        let mut written: Vec<(u16, Word)> = self
            .ram
            .written_addresses()
            .map(|addr| (addr, self.ram.read(addr)))
            .collect();
        written.sort_unstable_by_key(|(addr, _)| *addr);
        written.hash(&mut hasher);
        hasher.finish()
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

/// A value a `load_program` caller can hand over as an instruction word:
/// either an integer or a hex string, per §4.E's "input words may arrive
/// as integers or as strings (radix-16)".
pub trait ProgramWord {
    fn into_word(self) -> Result<Word, CpuError>;
}

impl ProgramWord for i64 {
    fn into_word(self) -> Result<Word, CpuError> {
        if (0..=MAX_ADDRESS as i64).contains(&self) {
            Ok(self as Word)
        } else {
            Err(CpuError::InvalidInstruction {
                message: format!("{:#x} does not fit in a 16-bit word", self),
            })
        }
    }
}

impl ProgramWord for Word {
    fn into_word(self) -> Result<Word, CpuError> {
        Ok(self)
    }
}

impl ProgramWord for &str {
    fn into_word(self) -> Result<Word, CpuError> {
        let text = self.trim();
        let text = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
            .unwrap_or(text);
        let value = i64::from_str_radix(text, 16).map_err(|_| CpuError::InvalidInstruction {
            message: format!("{:?} is not a hexadecimal word", self),
        })?;
        value.into_word()
    }
}

/// Advances `cpu` by exactly one instruction.
pub fn tick(cpu: &mut Cpu) -> Result<TickResult, CpuError> {
    let pc_at_fetch = cpu.registers.pc;
    let ir = cpu.ram.read(pc_at_fetch);
    cpu.registers.pc = cpu.registers.pc.wrapping_add(1);
    cpu.cycles += 1;

    if ir == STOP_INSTRUCTION {
        return Ok(TickResult::Halted);
    }

    match Decoded::decode(ir) {
        Decoded::Basic { op, a, b } => execute_basic(cpu, op, a, b),
        Decoded::NonBasic { sub_op, a } => execute_non_basic(cpu, sub_op, a),
    }
}

fn execute_basic(cpu: &mut Cpu, op_code: u8, a_code: u8, b_code: u8) -> Result<TickResult, CpuError> {
    let op = BasicOp::from_u8(op_code).ok_or(CpuError::OpCodeNotImplemented { code: op_code })?;

    let a = Operand::resolve(cpu, a_code)?;
    let b = Operand::resolve(cpu, b_code)?;
    cpu.cycles += op.cycles();

    if op.is_conditional() {
        let taken = match op {
            BasicOp::IFE => a.read(cpu) == b.read(cpu),
            BasicOp::IFN => a.read(cpu) != b.read(cpu),
            BasicOp::IFG => a.read(cpu) > b.read(cpu),
            BasicOp::IFB => a.read(cpu) & b.read(cpu) != 0,
            _ => unreachable!(),
        };
        if !taken {
            skip_next_instruction(cpu);
        }
        return Ok(TickResult::Continue);
    }

    let av = a.read(cpu) as u32;
    let bv = b.read(cpu) as u32;

    match op {
        BasicOp::SET => a.write(cpu, bv as Word),
        BasicOp::ADD => {
            let r = av + bv;
            cpu.registers.o = if r > 0xFFFF { 1 } else { 0 };
            a.write(cpu, (r & 0xFFFF) as Word);
        }
        BasicOp::SUB => {
            if bv > av {
                cpu.registers.o = 0xFFFF;
                a.write(cpu, (av + 0x1_0000 - bv) as Word);
            } else {
                cpu.registers.o = 0;
                a.write(cpu, (av - bv) as Word);
            }
        }
        BasicOp::MUL => {
            let r = av.wrapping_mul(bv);
            cpu.registers.o = ((r >> 16) & 0xFFFF) as Word;
            a.write(cpu, (r & 0xFFFF) as Word);
        }
        BasicOp::DIV => {
            if bv == 0 {
                a.write(cpu, 0);
                cpu.registers.o = 0;
            } else {
                cpu.registers.o = ((((av as u64) << 16) / (bv as u64)) & 0xFFFF) as Word;
                a.write(cpu, (av / bv) as Word);
            }
        }
        BasicOp::MOD => {
            if bv == 0 {
                a.write(cpu, 0);
            } else {
                a.write(cpu, (av % bv) as Word);
            }
        }
        BasicOp::SHL => {
            let r = shl32(av, bv);
            a.write(cpu, (r & 0xFFFF) as Word);
            cpu.registers.o = ((r >> 16) & 0xFFFF) as Word;
        }
        BasicOp::SHR => {
            let shifted = shr32(av, bv);
            a.write(cpu, (shifted & 0xFFFF) as Word);
            cpu.registers.o = (shr64((av as u64) << 16, bv) & 0xFFFF) as Word;
        }
        BasicOp::AND => a.write(cpu, (av & bv) as Word),
        BasicOp::BOR => a.write(cpu, (av | bv) as Word),
        BasicOp::XOR => a.write(cpu, (av ^ bv) as Word),
        BasicOp::IFE | BasicOp::IFN | BasicOp::IFG | BasicOp::IFB => unreachable!(),
    }

    Ok(TickResult::Continue)
}

fn execute_non_basic(cpu: &mut Cpu, sub_op_code: u8, a_code: u8) -> Result<TickResult, CpuError> {
    let op = NonBasicOp::from_u8(sub_op_code)
        .ok_or(CpuError::OpCodeNotImplemented { code: sub_op_code })?;

    let a = Operand::resolve(cpu, a_code)?;
    cpu.cycles += op.cycles();

    match op {
        NonBasicOp::JSR => {
            let return_addr = cpu.registers.pc;
            cpu.registers.sp = cpu.registers.sp.wrapping_sub(1);
            cpu.ram.write(cpu.registers.sp, return_addr);
            cpu.registers.pc = a.read(cpu);
        }
    }

    Ok(TickResult::Continue)
}

/// Advances `PC` past the instruction it currently points at without
/// executing it, decoding just far enough to know its word length. Charges
/// the one extra cycle a failed conditional test costs.
fn skip_next_instruction(cpu: &mut Cpu) {
    let word = cpu.ram.read(cpu.registers.pc);
    let length = Decoded::decode(word).word_length();
    cpu.registers.pc = cpu.registers.pc.wrapping_add(length);
    cpu.cycles += 1;
}

/// `a << b` widened to 32 bits, without Rust's panic on `b >= 32` (unlike
/// register width, `b` here is an arbitrary 16-bit operand value).
fn shl32(a: u32, b: u32) -> u32 {
    if b >= 32 {
        0
    } else {
        ((a as u64) << b) as u32
    }
}

/// `a >> b`, same overflow-avoidance as [`shl32`].
fn shr32(a: u32, b: u32) -> u32 {
    if b >= 32 {
        0
    } else {
        a >> b
    }
}

/// `a >> b` widened to 64 bits, same overflow-avoidance as [`shl32`] but
/// guarding `b >= 64`: `SHR`'s overflow formula widens `a` into the upper
/// half of a 64-bit value before shifting, and `b` is an arbitrary 16-bit
/// operand value that can exceed 32.
fn shr64(a: u64, b: u32) -> u64 {
    if b >= 64 {
        0
    } else {
        a >> b
    }
}
