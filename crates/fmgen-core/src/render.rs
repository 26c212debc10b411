//! Template rendering for generated files using minijinja
//!
//! Templates are keyed by stub kind. The built-in set is compiled into the
//! crate; any of them can be replaced from a directory holding files named
//! after [`TemplateId::file_name`].
//!
//! Undefined behaviour is strict: a template that references a context field
//! the caller did not supply fails with [`RenderError::MissingField`] instead
//! of rendering an empty string.

use crate::error::{GenerateError, RenderError};
use minijinja::{Environment, ErrorKind, UndefinedBehavior, Value};
use std::path::Path;

mod builtin {
    pub const CALLER: &str = include_str!("../templates/caller.java.j2");
    pub const HANDLER: &str = include_str!("../templates/handler.java.j2");
    pub const PARAMETER_CLASS: &str = include_str!("../templates/parameter_class.java.j2");
}

/// Templates the generator renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateId {
    Caller,
    Handler,
    ParameterClass,
}

impl TemplateId {
    pub const ALL: [TemplateId; 3] = [
        TemplateId::Caller,
        TemplateId::Handler,
        TemplateId::ParameterClass,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateId::Caller => "caller",
            TemplateId::Handler => "handler",
            TemplateId::ParameterClass => "parameter-class",
        }
    }

    /// File name an override template is loaded from
    pub fn file_name(&self) -> &'static str {
        match self {
            TemplateId::Caller => "caller.java.j2",
            TemplateId::Handler => "handler.java.j2",
            TemplateId::ParameterClass => "parameter_class.java.j2",
        }
    }

    fn builtin_source(&self) -> &'static str {
        match self {
            TemplateId::Caller => builtin::CALLER,
            TemplateId::Handler => builtin::HANDLER,
            TemplateId::ParameterClass => builtin::PARAMETER_CLASS,
        }
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text substitution engine the generator feeds its contexts into
pub trait TemplateRenderer {
    /// Render the template registered as `template` with `context`
    fn render(&self, template: &str, context: &Value) -> Result<String, RenderError>;
}

/// Default renderer backed by a minijinja environment
pub struct JinjaRenderer {
    env: Environment<'static>,
}

impl JinjaRenderer {
    /// Create a renderer with the built-in templates
    pub fn new() -> Result<Self, RenderError> {
        let mut renderer = Self::empty();
        for id in TemplateId::ALL {
            renderer.add_template(id.as_str(), id.builtin_source().to_string())?;
        }
        Ok(renderer)
    }

    /// An environment without any templates registered
    pub fn empty() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        Self { env }
    }

    /// Register or replace a template
    pub fn add_template(&mut self, name: &str, source: String) -> Result<(), RenderError> {
        self.env
            .add_template_owned(name.to_string(), source)
            .map_err(|e| RenderError::Template {
                template: name.to_string(),
                detail: e.to_string(),
            })
    }

    /// Replace built-in templates with the files present in `dir`.
    ///
    /// Returns the ids that were overridden. Missing files keep the built-in.
    pub fn load_overrides(&mut self, dir: &Path) -> Result<Vec<TemplateId>, GenerateError> {
        let mut loaded = Vec::new();
        for id in TemplateId::ALL {
            let path = dir.join(id.file_name());
            if !path.is_file() {
                continue;
            }
            let source = std::fs::read_to_string(&path)
                .map_err(|source| GenerateError::Io { path, source })?;
            self.add_template(id.as_str(), source)?;
            loaded.push(id);
        }
        Ok(loaded)
    }
}

impl TemplateRenderer for JinjaRenderer {
    fn render(&self, template: &str, context: &Value) -> Result<String, RenderError> {
        let tmpl = self
            .env
            .get_template(template)
            .map_err(|_| RenderError::TemplateMissing(template.to_string()))?;

        tmpl.render(context).map_err(|e| match e.kind() {
            ErrorKind::UndefinedError => RenderError::MissingField {
                template: template.to_string(),
                detail: e.to_string(),
            },
            _ => RenderError::Template {
                template: template.to_string(),
                detail: e.to_string(),
            },
        })
    }
}

#[cfg(test)]
#[path = "render/render_tests.rs"]
mod render_tests;
