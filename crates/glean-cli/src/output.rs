//! Console reporting

use colored::Colorize;
use glean_build::Reporter;

/// Writes progress and errors to stderr, colorized when the terminal
/// supports it. Stdout is reserved for emitted output so it can be
/// redirected cleanly.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn info(&self, message: &str) {
        eprintln!("{message}");
    }

    fn error(&self, message: &str) {
        eprintln!("{} {message}", "error:".red().bold());
    }
}
