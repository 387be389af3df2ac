//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use std::fmt::Display;
use std::io::{self, Write};

use colored::Colorize;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Write plain output (no color, for conversion results)
pub fn info(out: &mut dyn Write, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{}", msg)
}

/// Write a converted batch line (green checkmark)
pub fn success_line(out: &mut dyn Write, line: usize, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{:>4} {} {}", line, "✓".green(), msg)
}

/// Write a failed batch line (red X)
pub fn failure_line(out: &mut dyn Write, line: usize, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{:>4} {} {}", line, "✗".red(), msg)
}

/// Write section header (cyan bold)
pub fn header(out: &mut dyn Write, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{}", msg.to_string().cyan().bold())
}

/// Write indented detail (no color)
pub fn detail(out: &mut dyn Write, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "  {}", msg)
}
