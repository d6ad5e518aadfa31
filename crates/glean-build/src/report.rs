//! Progress and error reporting
//!
//! The resolver and scheduler never write to stdout/stderr themselves; they
//! report through this trait so the CLI owns presentation and tests can
//! capture output.

use std::sync::Mutex;

pub trait Reporter {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// Discards everything
#[derive(Debug, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn info(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

/// Records messages in memory, used by tests
#[derive(Debug, Default)]
pub struct MemoryReporter {
    messages: Mutex<Vec<(Level, String)>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(Level, String)> {
        self.messages.lock().expect("reporter poisoned").clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|(level, _)| *level == Level::Error)
            .map(|(_, m)| m)
            .collect()
    }
}

impl Reporter for MemoryReporter {
    fn info(&self, message: &str) {
        self.messages
            .lock()
            .expect("reporter poisoned")
            .push((Level::Info, message.to_string()));
    }

    fn error(&self, message: &str) {
        self.messages
            .lock()
            .expect("reporter poisoned")
            .push((Level::Error, message.to_string()));
    }
}
