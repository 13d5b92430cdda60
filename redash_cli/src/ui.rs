//! Terminal output helpers.
//!
//! Status messages go to stderr; stdout carries command output only (and the
//! MCP transport when serving).

use console::style;
use serde::Serialize;

use crate::errors::CliError;

pub fn header(msg: &str) {
    eprintln!("{}", style(msg).bold());
}

pub fn success(msg: &str) {
    eprintln!("{} {}", style("✓").green(), msg);
}

pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red(), style(msg).red());
}

pub fn error_with_details(msg: &str, details: &str) {
    eprintln!("{} {}: {}", style("✗").red(), style(msg).red(), details);
}

/// Prints a value as pretty JSON to stdout.
pub fn json_output<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints raw text to stdout.
pub fn raw_output(text: &str) {
    print!("{}", text);
    if !text.ends_with('\n') {
        println!();
    }
}
