//! Diagnostics sink that forwards to tracing

use fmgen_core::{Diagnostic, DiagnosticSink, LogLevel};

/// Target of every event the sink emits
pub const TARGET: &str = "fmgen";

/// Forwards each diagnostic as a `tracing` event at the matching level.
///
/// The schema or output path is attached as the `path` field.
#[derive(Debug, Default)]
pub struct TracingSink {
    emitted: usize,
    warnings: usize,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of diagnostics forwarded so far
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Number of diagnostics at warn level or above
    pub fn warnings(&self) -> usize {
        self.warnings
    }
}

impl DiagnosticSink for TracingSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        let Diagnostic {
            level,
            path,
            message,
        } = diagnostic;

        match level {
            LogLevel::Trace => tracing::trace!(target: TARGET, path = %path, "{message}"),
            LogLevel::Debug => tracing::debug!(target: TARGET, path = %path, "{message}"),
            LogLevel::Info => tracing::info!(target: TARGET, path = %path, "{message}"),
            LogLevel::Warn => tracing::warn!(target: TARGET, path = %path, "{message}"),
            LogLevel::Error => tracing::error!(target: TARGET, path = %path, "{message}"),
            LogLevel::Off => return,
        }

        self.emitted += 1;
        if level >= LogLevel::Warn {
            self.warnings += 1;
        }
    }
}
