//! Output sink the installers report through.

use std::io::Write;

use console::{style, Term};

/// Receiver for the installer's informational messages.
///
/// The host package manager usually adapts its own console abstraction to
/// this; [`ConsoleOutput`] is a ready-made terminal implementation.
pub trait OutputSink: Send + Sync {
    /// Write a single informational line.
    fn write(&self, message: &str);

    /// Write a line only shown in verbose mode. Default: discarded.
    fn write_verbose(&self, _message: &str) {}
}

/// Verbosity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

/// Terminal-backed output sink.
pub struct ConsoleOutput {
    term: Term,
    verbosity: Verbosity,
}

impl ConsoleOutput {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
            verbosity: Verbosity::Normal,
        }
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn is_quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }
}

impl Default for ConsoleOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputSink for ConsoleOutput {
    fn write(&self, message: &str) {
        if self.verbosity >= Verbosity::Normal {
            let _ = writeln!(&self.term, "{}", style(message).green());
        }
    }

    fn write_verbose(&self, message: &str) {
        if self.verbosity >= Verbosity::Verbose {
            let _ = writeln!(&self.term, "{}", style(message).dim());
        }
    }
}

/// Sink that discards everything.
pub struct NullOutput;

impl OutputSink for NullOutput {
    fn write(&self, _message: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_ordering() {
        assert!(Verbosity::Quiet < Verbosity::Normal);
        assert!(Verbosity::Normal < Verbosity::Verbose);
    }

    #[test]
    fn test_console_output_creation() {
        let output = ConsoleOutput::new();
        assert!(!output.is_quiet());

        let quiet = ConsoleOutput::new().with_verbosity(Verbosity::Quiet);
        assert!(quiet.is_quiet());
    }

    #[test]
    fn test_null_output_accepts_writes() {
        NullOutput.write("message");
        NullOutput.write_verbose("message");
    }
}
