//! Generator configuration
//!
//! Read from a TOML file; every key is optional.
//!
//! ```toml
//! package = "com.example.rfc"
//! extension = "java"
//! template_dir = "templates"
//! max_depth = 64
//! serial_version_uid = 337339270983782151
//! log_level = "info"
//! ```

use crate::LogLevel;
use crate::emitter::EmitOptions;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File looked up in the working directory when no config path is given
pub const DEFAULT_CONFIG_FILE: &str = "fmgen.toml";

/// Settings of a generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Java package of every generated file; no `package` line when unset
    #[serde(default)]
    pub package: Option<String>,

    /// File extension of generated files, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Directory with template overrides
    #[serde(default)]
    pub template_dir: Option<PathBuf>,

    /// Deepest Structure/Table nesting accepted in a schema
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// `serialVersionUID` of every generated class
    #[serde(default = "default_serial_version_uid")]
    pub serial_version_uid: i64,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_extension() -> String {
    "java".to_string()
}

fn default_max_depth() -> usize {
    64
}

fn default_serial_version_uid() -> i64 {
    EmitOptions::default().serial_version_uid
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            package: None,
            extension: default_extension(),
            template_dir: None,
            max_depth: default_max_depth(),
            serial_version_uid: default_serial_version_uid(),
            log_level: default_log_level(),
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load `path` if given, else `fmgen.toml` in `dir` when it exists, else
    /// the defaults
    pub fn discover(path: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let candidate = dir.join(DEFAULT_CONFIG_FILE);
                if candidate.is_file() {
                    Self::load(&candidate)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid {
                key: "max_depth",
                reason: "must be at least 1".to_string(),
            });
        }

        let extension = self.extension.trim_start_matches('.');
        if extension.is_empty() || extension.contains(['/', '\\']) {
            return Err(ConfigError::Invalid {
                key: "extension",
                reason: format!("'{}' is not a file extension", self.extension),
            });
        }

        if let Some(package) = &self.package
            && !is_package_name(package)
        {
            return Err(ConfigError::Invalid {
                key: "package",
                reason: format!("'{package}' is not a Java package name"),
            });
        }

        if LogLevel::parse(&self.log_level).is_none() {
            return Err(ConfigError::Invalid {
                key: "log_level",
                reason: format!("unknown level '{}'", self.log_level),
            });
        }

        Ok(())
    }

    /// Extension without a leading dot
    pub fn file_extension(&self) -> &str {
        self.extension.trim_start_matches('.')
    }

    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            serial_version_uid: self.serial_version_uid,
        }
    }

    /// Configured level, `Info` if it does not parse
    pub fn log_level(&self) -> LogLevel {
        LogLevel::parse(&self.log_level).unwrap_or(LogLevel::Info)
    }
}

fn is_package_name(value: &str) -> bool {
    !value.is_empty()
        && value.split('.').all(|segment| {
            let mut chars = segment.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}
