//! The `simulator` CLI: loads a `.dcpu` machine-code file and runs it,
//! then prints the final CPU state. Grounded on `vasm/src/main.rs`'s
//! file-handling/error-wrapping shape; the state-printing format matches
//! the reference implementation's `DCPU.get_state()` layout exactly.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{App, Arg};

use dcpu16::constants::DCPU_VERSION;
use dcpu16::error::CpuError;
use dcpu16::processor::Cpu;
use dcpu16::register::RegisterId;

#[derive(Debug)]
enum Error {
    Io(std::io::Error, PathBuf),
    Cpu(CpuError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err, path) => write!(f, "reading \"{}\" failed: {}", path.display(), err),
            Error::Cpu(err) => write!(f, "{}", err),
        }
    }
}

fn main() {
    // `--version` is handled ahead of clap so the printed string is the
    // bare "DCPU vX.Y" the reference CLI prints, not clap's "name version".
    if std::env::args().any(|arg| arg == "--version") {
        println!("DCPU v{}", DCPU_VERSION);
        return;
    }

    let matches = App::new("simulator")
        .about("Runs a DCPU-16 machine-code program")
        .arg(
            Arg::with_name("INPUT")
                .help("The file containing the instruction words to run")
                .required(true)
                .index(1),
        )
        .get_matches();

    let input = matches.value_of("INPUT").unwrap();

    if let Err(err) = run(input) {
        eprintln!("{}", err);
        process::exit(1);
    }
}

fn run(input: &str) -> Result<(), Error> {
    let input_path = Path::new(input);
    let source =
        fs::read_to_string(input_path).map_err(|err| Error::Io(err, input_path.to_owned()))?;

    let mut cpu = Cpu::new();
    let lines: Vec<&str> = source.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    cpu.load_program(lines).map_err(Error::Cpu)?;

    match cpu.run() {
        Ok(()) => {}
        Err(CpuError::InfiniteLoopDetected) => {
            println!("*****Infinite loop detected, stopping execution*****");
        }
        Err(err) => return Err(Error::Cpu(err)),
    }

    println!();
    println!("--------------------------");
    println!("DCPU State after execution");
    println!("--------------------------");
    println!("{}", format_state(&cpu));

    Ok(())
}

/// Reproduces `DCPU.get_state(show_cycles=True)`'s exact layout.
fn format_state(cpu: &Cpu) -> String {
    let mut lines = Vec::new();

    lines.push(format!("Ran {} cyles", cpu.cycles));
    lines.push(String::new());
    lines.push(format!("PC: {:#06x}", cpu.registers.pc));
    lines.push(format!("SP: {:#06x}", cpu.registers.sp));
    lines.push(format!("O:  {:#06x}", cpu.registers.o));
    lines.push(String::new());
    lines.push("Register values".to_string());
    lines.push("---------------".to_string());

    let register_lines: Vec<String> = [
        RegisterId::A,
        RegisterId::B,
        RegisterId::C,
        RegisterId::X,
        RegisterId::Y,
        RegisterId::Z,
        RegisterId::I,
        RegisterId::J,
    ]
    .iter()
    .map(|id| format!("{:?}: {:#06x}", id, cpu.registers.get(*id)))
    .collect();
    lines.push(register_lines.join("\n"));

    lines.push(String::new());
    lines.push("Memory dump".to_string());
    lines.push("-----------".to_string());
    lines.push(format_memory_dump(cpu));

    lines.join("\n")
}

fn format_memory_dump(cpu: &Cpu) -> String {
    cpu.ram
        .dump()
        .into_iter()
        .map(|(addr, words)| {
            let body = words
                .iter()
                .map(|w| format!("{:04x}", w))
                .collect::<Vec<_>>()
                .join(" ");
            format!("{:04x}: {}", addr, body)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
