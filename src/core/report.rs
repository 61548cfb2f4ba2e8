//! Line oriented diagnostics.
use std::io::{self, Write};

use super::LoxError;

/// Writes one line per diagnostic to `out` and remembers whether anything
/// was reported.
///
/// The binary hands it stderr; tests hand it a `Vec<u8>`.
pub struct Reporter<W: Write> {
    out: W,
    had_error: bool,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Reporter {
            out,
            had_error: false,
        }
    }

    pub fn report(&mut self, error: &LoxError) -> io::Result<()> {
        self.had_error = true;
        writeln!(self.out, "{}", error)
    }

    #[must_use]
    pub fn had_error(&self) -> bool {
        self.had_error
    }

    /// Forgets earlier errors. The REPL calls this between lines.
    pub fn reset(&mut self) {
        self.had_error = false;
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
