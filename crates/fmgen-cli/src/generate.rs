//! `fmgen generate`

use anyhow::{Context, Result, bail};
use fmgen_core::{
    GenerateError, Generator, GeneratorConfig, LogLevel, SchemaDocument, UnitFailure, write_units,
};
use fmgen_logging::{TracingSink, init_logging};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

static CLASS_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][A-Za-z0-9]*$").unwrap());

/// Arguments of the generate command
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub schema: PathBuf,
    pub class: String,
    pub output: PathBuf,
    pub function: Option<String>,
    pub package: Option<String>,
    pub config: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// What a generate run produced
#[derive(Debug, Default)]
pub struct GenerateReport {
    pub written: Vec<PathBuf>,
    pub failures: Vec<UnitFailure>,
    pub warnings: usize,
}

impl GenerateReport {
    /// 0 when every unit rendered, the render error code otherwise
    pub fn exit_status(&self) -> u8 {
        self.failures.first().map_or(0, |failure| {
            GenerateError::Render(failure.error.clone()).error_code()
        })
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}

/// Check a base class name against `^[A-Z][A-Za-z0-9]*$`
pub fn validate_class_name(name: &str) -> Result<()> {
    if !CLASS_NAME.is_match(name) {
        bail!(
            "Invalid class name '{name}': expected an upper-case letter followed by letters or digits"
        );
    }
    Ok(())
}

/// Trim and upper-case a function name; `None` when blank
pub fn normalize_function_name(name: Option<&str>) -> Option<String> {
    name.map(|n| n.trim().to_uppercase()).filter(|n| !n.is_empty())
}

/// Load the configuration and apply command-line overrides
pub fn resolve_config(options: &GenerateOptions, working_dir: &Path) -> Result<GeneratorConfig> {
    let mut config = GeneratorConfig::discover(options.config.as_deref(), working_dir)
        .map_err(GenerateError::from)
        .context("Failed to load configuration")?;

    if let Some(package) = &options.package {
        config.package = Some(package.clone());
    }
    if let Some(level) = &options.log_level {
        if LogLevel::parse(level).is_none() {
            bail!("Invalid log level '{level}'");
        }
        config.log_level = level.clone();
    }

    config
        .validate()
        .map_err(GenerateError::from)
        .context("Invalid configuration")?;
    Ok(config)
}

/// Generate command implementation
pub fn run(options: GenerateOptions) -> Result<GenerateReport> {
    validate_class_name(&options.class)?;

    let working_dir = std::env::current_dir().context("Failed to read working directory")?;
    let config = resolve_config(&options, &working_dir)?;
    init_logging(config.log_level());

    if !options.output.is_dir() {
        bail!(
            "Output directory does not exist: {}",
            options.output.display()
        );
    }

    let source = std::fs::read_to_string(&options.schema)
        .with_context(|| format!("Failed to read schema {}", options.schema.display()))?;
    let document = SchemaDocument::from_json(&source)
        .map_err(GenerateError::from)
        .with_context(|| format!("Invalid schema {}", options.schema.display()))?;

    let function = normalize_function_name(options.function.as_deref())
        .or_else(|| normalize_function_name(document.function.as_deref()));
    let Some(function) = function else {
        bail!("No function name: pass --function or set \"function\" in the schema");
    };

    let request = document
        .into_request(
            options.class.as_str(),
            Some(function),
            options.output.as_path(),
            config.max_depth,
        )
        .map_err(GenerateError::from)
        .context("Schema rejected")?;

    let generator = Generator::from_config(config).context("Failed to prepare templates")?;
    tracing::info!(
        function = request.function_name(),
        class = request.base_name(),
        package = generator.config().package.as_deref().unwrap_or(""),
        "generating"
    );

    let mut sink = TracingSink::new();
    let output = generator.generate(&request, &mut sink)?;
    let written = write_units(request.output_dir(), &output.units, &mut sink)?;

    for path in &written {
        println!("✓ {}", path.display());
    }
    for failure in &output.failures {
        tracing::error!("{failure}");
        println!("✗ {failure}");
    }

    Ok(GenerateReport {
        written,
        failures: output.failures,
        warnings: sink.warnings(),
    })
}
