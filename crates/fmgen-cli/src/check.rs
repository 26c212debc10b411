//! `fmgen check`

use anyhow::{Context, Result};
use fmgen_core::model::ClassModel;
use fmgen_core::{
    Diagnostic, Diagnostics, GenerateError, GeneratorConfig, GroupKind, LogLevel, SchemaDocument,
};
use std::path::Path;

/// Base name used to resolve classes when only checking
const CHECK_BASE: &str = "Schema";

/// Shape of one parameter group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupReport {
    pub kind: GroupKind,
    pub fields: usize,
    /// Nested classes that would be generated inside the group class
    pub nested_classes: usize,
}

#[derive(Debug, Default)]
pub struct CheckReport {
    pub function: Option<String>,
    pub groups: Vec<GroupReport>,
    pub warnings: Vec<Diagnostic>,
}

/// Validate a schema document and resolve every present group
pub fn inspect(source: &str, max_depth: usize) -> Result<CheckReport> {
    let document = SchemaDocument::from_json(source).map_err(GenerateError::from)?;
    let function = document.function.clone().filter(|f| !f.trim().is_empty());
    let request = document
        .into_request(CHECK_BASE, None, ".", max_depth)
        .map_err(GenerateError::from)?;

    let mut diagnostics = Diagnostics::new();
    let mut groups = Vec::new();
    for group in request.groups() {
        let kind = group.kind;
        let nested_classes = if group.is_present() {
            let model = ClassModel::resolve(
                request.class_name(kind),
                kind.key(),
                &group.fields,
                &mut diagnostics,
            )
            .map_err(GenerateError::from)?;
            model.all_classes().len() - 1
        } else {
            0
        };
        groups.push(GroupReport {
            kind,
            fields: group.fields.len(),
            nested_classes,
        });
    }

    Ok(CheckReport {
        function,
        groups,
        warnings: diagnostics
            .into_entries()
            .into_iter()
            .filter(|d| d.level >= LogLevel::Warn)
            .collect(),
    })
}

/// Check command implementation
pub fn run(schema: &Path, config: Option<&Path>) -> Result<CheckReport> {
    println!("Checking schema: {}", schema.display());

    let working_dir = std::env::current_dir().context("Failed to read working directory")?;
    let config = GeneratorConfig::discover(config, &working_dir)
        .map_err(GenerateError::from)
        .context("Failed to load configuration")?;
    let source = std::fs::read_to_string(schema)
        .with_context(|| format!("Failed to read schema {}", schema.display()))?;

    let report = inspect(&source, config.max_depth)
        .with_context(|| format!("Invalid schema {}", schema.display()))?;

    if let Some(function) = &report.function {
        println!("✓ Function: {}", function.trim().to_uppercase());
    }
    for group in &report.groups {
        if group.fields == 0 {
            println!("- {}: empty, no class", group.kind.key());
        } else {
            println!(
                "✓ {}: {} fields, {} nested classes",
                group.kind.key(),
                group.fields,
                group.nested_classes
            );
        }
    }
    for warning in &report.warnings {
        println!("! {warning}");
    }
    println!("\nSchema is valid!");

    Ok(report)
}
