//! fmgen-core - Schema-driven Java class generation
//!
//! This crate turns the parameter signature of a remote function module into
//! Java source:
//! - [`FieldSchema`] / [`GenerationRequest`] describe the signature
//! - [`naming`] and [`types`] derive identifiers and Java types
//! - [`emitter`] synthesizes one parameter class per non-empty group
//! - [`stubs`] composes the caller and handler stubs
//! - [`render`] stamps the final file text through templates
//! - [`Generator`] runs the whole pipeline and [`write_units`] persists it

pub mod config;
pub mod diagnostics;
pub mod emitter;
mod error;
mod generator;
pub mod model;
pub mod naming;
pub mod render;
pub mod schema;
pub mod stubs;
pub mod types;
mod writer;

pub use config::GeneratorConfig;
pub use diagnostics::{Diagnostic, DiagnosticSink, Diagnostics};
pub use error::{ConfigError, GenerateError, GenerateResult, NameError, RenderError, SchemaError};
pub use generator::{GeneratedUnit, GenerationOutput, Generator, UnitFailure, UnitKind};
pub use render::{JinjaRenderer, TemplateId, TemplateRenderer};
pub use schema::{FieldSchema, GenerationRequest, GroupKind, ParameterGroup, SchemaDocument, TypeTag};
pub use writer::write_units;

/// Severity of a diagnostic or log record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl LogLevel {
    /// Parse a level name as used in configuration files (case-insensitive)
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            "off" => Some(LogLevel::Off),
            _ => None,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        DiagnosticSink, Diagnostics, FieldSchema, GenerateError, GenerationRequest, Generator,
        GeneratorConfig, GroupKind, JinjaRenderer, LogLevel, ParameterGroup, TypeTag,
    };
}
