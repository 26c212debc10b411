//! Structured events reported during generation
//!
//! The core never writes to a global logger. Operations that have something to
//! say take a `&mut dyn DiagnosticSink`; callers decide whether to collect the
//! events ([`Diagnostics`]) or forward them somewhere else.

use crate::LogLevel;

/// One event raised while resolving, rendering or writing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: LogLevel,
    /// Schema path (`import.HEADER.ITEMS`) or output path the event refers to
    pub path: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(level: LogLevel, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}: {}", self.level, self.message)
        } else {
            write!(f, "{}: {}: {}", self.level, self.path, self.message)
        }
    }
}

/// Receiver for diagnostics
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);

    fn debug(&mut self, path: &str, message: String) {
        self.emit(Diagnostic::new(LogLevel::Debug, path, message));
    }

    fn info(&mut self, path: &str, message: String) {
        self.emit(Diagnostic::new(LogLevel::Info, path, message));
    }

    fn warn(&mut self, path: &str, message: String) {
        self.emit(Diagnostic::new(LogLevel::Warn, path, message));
    }
}

/// Collecting sink
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Entries at `level` or above
    pub fn at_least(&self, level: LogLevel) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |d| d.level >= level)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.at_least(LogLevel::Warn)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl DiagnosticSink for Diagnostics {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }
}
