//! Command implementations.

pub mod auth;
pub mod run;

use std::io::Write;

/// Writes lines, ignoring a closed stdout.
pub(crate) fn print_lines<I, S>(out: &mut dyn Write, lines: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for line in lines {
        let _ = writeln!(out, "{}", line.as_ref());
    }
}
