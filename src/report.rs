//! Console output for a generation run.
//!
//! Informational lines go to stdout and are silenced by `--quiet`; warnings go
//! to stderr and are also silenced; errors are always printed.

use colored::Colorize;

#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    quiet: bool,
}

impl Reporter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn info(&self, message: impl std::fmt::Display) {
        if !self.quiet {
            println!("{message}");
        }
    }

    /// A step of the run, e.g. "Searching licenses...".
    pub fn step(&self, message: impl std::fmt::Display) {
        if !self.quiet {
            println!("{} {}", "→".cyan(), message);
        }
    }

    pub fn warn(&self, message: impl std::fmt::Display) {
        if !self.quiet {
            eprintln!("{} {}", "warning:".yellow().bold(), message);
        }
    }

    pub fn error(&self, message: impl std::fmt::Display) {
        eprintln!("{} {}", "error:".red().bold(), message);
    }
}
