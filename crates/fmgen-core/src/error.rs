//! Error types for fmgen

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for generation operations
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Failure to derive a target identifier from a raw schema name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    /// The raw name was empty
    #[error("raw name is empty")]
    Empty,

    /// The raw name contained only separators
    #[error("raw name '{0}' contains no identifier characters")]
    NoWords(String),

    /// The derived identifier is not a valid Java identifier
    #[error("'{derived}' (from raw name '{raw}') is not a valid identifier")]
    InvalidIdentifier { raw: String, derived: String },
}

/// Structural problem in a schema document, reported with the offending field path
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A field name could not be turned into an identifier
    #[error("invalid field name at {path}: {source}")]
    InvalidName {
        path: String,
        #[source]
        source: NameError,
    },

    /// The type tag is not one the generator understands
    #[error("unknown type tag '{tag}' at {path}")]
    UnknownTypeTag { path: String, tag: String },

    /// A scalar field declared children
    #[error("scalar field at {path} ({tag}) cannot have child fields")]
    UnexpectedChildren { path: String, tag: String },

    /// Nesting exceeds the configured maximum depth
    #[error("schema nesting at {path} exceeds the maximum depth of {max_depth}")]
    TooDeep { path: String, max_depth: usize },

    /// The schema document itself could not be parsed
    #[error("malformed schema document: {0}")]
    Malformed(String),
}

impl SchemaError {
    /// The schema path of the offending field, if the error is tied to one
    pub fn path(&self) -> Option<&str> {
        match self {
            SchemaError::InvalidName { path, .. }
            | SchemaError::UnknownTypeTag { path, .. }
            | SchemaError::UnexpectedChildren { path, .. }
            | SchemaError::TooDeep { path, .. } => Some(path),
            SchemaError::Malformed(_) => None,
        }
    }
}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        SchemaError::Malformed(err.to_string())
    }
}

/// Failure to render a single output unit
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// No template is registered under the requested id
    #[error("template '{0}' not found")]
    TemplateMissing(String),

    /// The template referenced a context field that was not supplied
    #[error("template '{template}' requires a missing context field: {detail}")]
    MissingField { template: String, detail: String },

    /// The template failed to compile or evaluate
    #[error("template '{template}' failed: {detail}")]
    Template { template: String, detail: String },
}

/// Configuration could not be loaded
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Reading the configuration file failed
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::GeneratorConfig`]
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("invalid config value for '{key}': {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Top-level error for a generation run
#[derive(Error, Debug)]
pub enum GenerateError {
    /// The schema is not usable
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Rendering a unit failed
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Persisting generated text failed
    #[error("failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenerateError {
    /// Returns a stable numeric code, used as the CLI exit status
    pub fn error_code(&self) -> u8 {
        match self {
            GenerateError::Schema(_) => 2,
            GenerateError::Render(_) => 3,
            GenerateError::Config(_) => 4,
            GenerateError::Io { .. } => 5,
        }
    }
}
