use std::env;
use std::error;
use std::fs;
use std::io::{self, stdin, BufRead, Write};
use std::process;
use std::result;

use program::perror;

extern crate loxpr;
use loxpr::core::Reporter;

type Error = Box<dyn error::Error>;
type Result<T> = result::Result<T, Error>;

/// sysexits(3): the command was used incorrectly
const EX_USAGE: i32 = 64;
/// sysexits(3): the input data was incorrect
const EX_DATAERR: i32 = 65;
/// sysexits(3): an input file did not exist or was not readable
const EX_NOINPUT: i32 = 66;

fn run_prompt() -> Result<()> {
    let stdin = stdin();
    let mut reporter = Reporter::new(io::stderr());
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut buf = String::with_capacity(1024);
        if stdin.lock().read_line(&mut buf)? == 0 {
            println!();
            return Ok(());
        }

        let line = buf.trim();
        if line == "exit" || line == "quit" {
            return Ok(());
        }

        if let Some(value) = loxpr::run(line.to_owned(), &mut reporter)? {
            println!("{}", value);
        }

        // A bad line shouldn't poison the rest of the session.
        reporter.reset();
    }
}

fn run_file(path: &str) -> Result<()> {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", path, e);
            process::exit(EX_NOINPUT);
        }
    };

    let mut reporter = Reporter::new(io::stderr());
    match loxpr::run(source, &mut reporter)? {
        Some(value) => println!("{}", value),
        None => process::exit(EX_DATAERR),
    }

    Ok(())
}

fn fail_if_err(r: Result<()>) {
    if let Err(e) = r {
        perror(e)
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    match args.as_slice() {
        [_] => fail_if_err(run_prompt()),
        [_, path] => fail_if_err(run_file(path)),
        _ => {
            eprintln!("Usage: loxpr [script]");
            process::exit(EX_USAGE);
        }
    }
}
