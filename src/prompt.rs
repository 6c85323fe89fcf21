//! Interactive confirmation gate for destructive operations.
use std::io::{self, BufRead, Write as _};

/// Ask the user a yes/no question.
///
/// Anything other than an explicit yes, including no answer at all, is a
/// decline.
#[cfg_attr(test, mockall::automock)]
pub trait Confirm {
    /// Show `prompt` and return `true` only on an explicit yes.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Confirmation read from the terminal's standard input.
///
/// Blocks until a line (or EOF) arrives; there is no timeout.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    #[allow(clippy::print_stdout)]
    fn confirm(&self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        io::stdout().flush().ok();
        read_answer(&mut io::stdin().lock())
    }
}

/// Read one line from `input` and interpret it with [`is_yes`].
///
/// EOF and read errors count as a decline.
#[must_use]
pub fn read_answer(input: &mut impl BufRead) -> bool {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => false,
        Ok(_) => is_yes(&line),
    }
}

/// Return `true` for `y` or `yes` (case-insensitive, surrounding whitespace
/// ignored).
#[must_use]
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
