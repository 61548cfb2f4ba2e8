//! `loxpr` is the library that powers the loxpr interpreter.
//!
//! `loxpr` evaluates single Lox expressions: arithmetic, comparison,
//! equality, string concatenation and logical not over numbers, strings,
//! booleans and `nil`. It is the front half of `jlox` and differs from it in
//! a number of ways namely:
//! - `loxpr` uses `std::result::Result` to report errors (`jlox` uses exceptions)
//! - `loxpr` uses an `Expr` sum type to represent expressions (`jlox` uses an
//!   abstract `Expr` class and specialized subclasses).
//! - `loxpr` matches on `Expr` in each consumer (`jlox` uses the visitor
//!   pattern)
//!
//! The pipeline is `Scanner` → `Parser` → `Interpreter`; [`run`] drives all
//! three and sends diagnostics to a [`Reporter`](crate::core::Reporter).
#![warn(clippy::pedantic)]

pub mod core;

use std::io::{self, Write};

use crate::core::{Interpreter, Object, Parser, Reporter, Scanner};

/// Runs one source unit through the whole pipeline.
///
/// Returns the value of the expression, or `None` if anything was reported.
/// Lexical errors are all reported and parsing still happens, so a syntax
/// error further along shows up in the same run; evaluation only happens if
/// nothing was reported at all.
///
/// # Errors
///
/// Only if writing to the reporter fails.
pub fn run<W: Write>(source: String, reporter: &mut Reporter<W>) -> io::Result<Option<Object>> {
    let (tokens, errors) = Scanner::new(source).scan_tokens();
    for error in &errors {
        reporter.report(error)?;
    }

    let expr = match Parser::new(tokens).parse() {
        Ok(expr) => expr,
        Err(e) => {
            reporter.report(&e)?;
            return Ok(None);
        }
    };

    if reporter.had_error() {
        return Ok(None);
    }

    match Interpreter::new().interpret(&expr) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            reporter.report(&e)?;
            Ok(None)
        }
    }
}
