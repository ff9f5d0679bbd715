//! Step outcome reporting.
//!
//! Every step ends with exactly one human-readable line, such as
//! `Warning: launchSettings.json not found.`. The pipeline writes those lines
//! through a [`Reporter`] so they can be printed or captured.

use colored::Colorize;

/// Outcome of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The step finished.
    Success,
    /// The step was skipped.
    Warning,
    /// The step failed.
    Error,
}

/// Sink for step outcome messages.
pub trait Reporter {
    /// Reports one complete output line.
    fn report(&mut self, status: Status, message: &str);

    /// Reports a finished step.
    fn success(&mut self, message: &str) {
        self.report(Status::Success, message);
    }

    /// Reports a skipped step.
    fn warning(&mut self, message: &str) {
        self.report(Status::Warning, message);
    }

    /// Reports a failed step.
    fn error(&mut self, message: &str) {
        self.report(Status::Error, message);
    }
}

/// Prints outcomes to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&mut self, status: Status, message: &str) {
        match status {
            Status::Success => println!("{}", message.green()),
            Status::Warning => println!("{}", message.yellow()),
            Status::Error => println!("{}", message.red()),
        }
    }
}

/// Keeps outcomes in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryReporter {
    /// Reported outcomes, oldest first.
    pub entries: Vec<(Status, String)>,
}

impl MemoryReporter {
    /// Creates an empty reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reported messages with the given status.
    pub fn messages(&self, status: Status) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(s, _)| *s == status)
            .map(|(_, m)| m.as_str())
            .collect()
    }
}

impl Reporter for MemoryReporter {
    fn report(&mut self, status: Status, message: &str) {
        self.entries.push((status, message.to_string()));
    }
}
