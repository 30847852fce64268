//! The `assembler` CLI: reads a `.dasm16` source file and prints one
//! machine-code word per line to stdout, lowercase hex with a `0x` prefix.
//! Grounded on `vasm/src/main.rs`'s file-handling/error-wrapping shape.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{App, Arg};

use dcpu16::constants::DCPU_VERSION;

#[derive(Debug)]
enum Error {
    Io(std::io::Error, PathBuf),
    Assemble(dasm::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err, path) => write!(f, "reading \"{}\" failed: {}", path.display(), err),
            Error::Assemble(err) => write!(f, "{}", err),
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

    let matches = App::new("assembler")
        .about("Assembles DCPU-16 source into machine-code words")
        .arg(
            Arg::with_name("INPUT")
                .help("The .dasm16 source file to assemble")
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

    let words = dasm::assemble(&source).map_err(Error::Assemble)?;

    for word in words {
        println!("{:#x}", word);
    }

    Ok(())
}
