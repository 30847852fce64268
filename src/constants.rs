//! Fixed sizes and bit-layout constants for the DCPU-16 word format.

/// Width in bits of a single memory/register cell.
pub const WORD_SIZE: u32 = 16;

/// Highest addressable RAM word. The address space is `[0, MAX_ADDRESS]`.
pub const MAX_ADDRESS: u16 = 0xFFFF;

/// Width of the opcode field in a basic instruction word.
pub const BASIC_OP_BITS: u32 = 4;

/// Width of the sub-opcode field in a non-basic instruction word.
pub const NONBASIC_OP_BITS: u32 = 6;

/// Width of an operand (value) code field.
pub const OPERAND_BITS: u32 = 6;

/// The all-zero word: a non-basic instruction (`op == 0`) with `sub_op == 0`
/// and `a == 0`. Treated as the canonical halt.
pub const STOP_INSTRUCTION: u16 = 0x0000;

/// Number of words per row in a memory dump.
pub const DUMP_ROW_WORDS: usize = 8;

/// Upper bound on the number of fingerprints `Cpu::run` retains for
/// infinite-loop detection before the set is cleared and detection
/// continues from an empty window. See DESIGN.md.
pub const LOOP_DETECTION_WINDOW: usize = 4096;

/// Reported by both binaries' `--version` flag.
pub const DCPU_VERSION: &str = "1.1";

/// Conventional assembler-source file extension. Documentation only; the
/// CLIs accept any path.
pub const ASSEMBLER_FILE_EXT: &str = "dasm16";

/// Conventional machine-code file extension. Documentation only.
pub const MACHINE_FILE_EXT: &str = "dcpu";
