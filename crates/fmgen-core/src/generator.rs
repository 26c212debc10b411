//! Generation pipeline
//!
//! For one [`GenerationRequest`] the generator
//! 1. resolves and emits a parameter class for every present group, in
//!    fixed group order,
//! 2. composes the caller and handler stubs,
//! 3. renders every unit through the configured [`TemplateRenderer`].
//!
//! Nothing is written here; see [`crate::write_units`]. A render failure is
//! recorded against its unit and the remaining units are still produced.

use crate::config::GeneratorConfig;
use crate::diagnostics::DiagnosticSink;
use crate::emitter::{self, EmitOptions};
use crate::error::{GenerateError, RenderError};
use crate::model::ClassModel;
use crate::render::{JinjaRenderer, TemplateId, TemplateRenderer};
use crate::schema::{GenerationRequest, GroupKind};
use crate::stubs;
use minijinja::{Value, context};

/// What a generated unit is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    Parameter(GroupKind),
    Caller,
    Handler,
}

impl UnitKind {
    pub fn template(&self) -> TemplateId {
        match self {
            UnitKind::Parameter(_) => TemplateId::ParameterClass,
            UnitKind::Caller => TemplateId::Caller,
            UnitKind::Handler => TemplateId::Handler,
        }
    }
}

impl std::fmt::Display for UnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitKind::Parameter(kind) => write!(f, "{} parameters", kind.key()),
            UnitKind::Caller => f.write_str("caller"),
            UnitKind::Handler => f.write_str("handler"),
        }
    }
}

/// Fully rendered text of one output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    pub kind: UnitKind,
    pub class_name: String,
    /// `<ClassName>.<ext>`
    pub file_name: String,
    pub contents: String,
}

/// A unit that could not be rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitFailure {
    pub kind: UnitKind,
    pub class_name: String,
    pub error: RenderError,
}

impl std::fmt::Display for UnitFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.class_name, self.kind, self.error)
    }
}

/// Result of a generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationOutput {
    pub units: Vec<GeneratedUnit>,
    pub failures: Vec<UnitFailure>,
}

impl GenerationOutput {
    /// True when every unit rendered
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn unit(&self, class_name: &str) -> Option<&GeneratedUnit> {
        self.units.iter().find(|u| u.class_name == class_name)
    }

    /// Units generated for parameter groups, in group order
    pub fn parameter_units(&self) -> impl Iterator<Item = &GeneratedUnit> {
        self.units
            .iter()
            .filter(|u| matches!(u.kind, UnitKind::Parameter(_)))
    }
}

/// Runs the generation pipeline with a renderer
pub struct Generator<R = JinjaRenderer> {
    config: GeneratorConfig,
    renderer: R,
}

impl Generator<JinjaRenderer> {
    /// Generator with the built-in templates, overridden from
    /// `config.template_dir` when set
    pub fn from_config(config: GeneratorConfig) -> Result<Self, GenerateError> {
        config.validate()?;
        let mut renderer = JinjaRenderer::new()?;
        if let Some(dir) = &config.template_dir {
            renderer.load_overrides(dir)?;
        }
        Ok(Self::new(config, renderer))
    }
}

impl<R: TemplateRenderer> Generator<R> {
    pub fn new(config: GeneratorConfig, renderer: R) -> Self {
        Self { config, renderer }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Produce the text of every unit for `request`.
    ///
    /// Schema errors abort the run. Render errors are collected in
    /// [`GenerationOutput::failures`].
    pub fn generate(
        &self,
        request: &GenerationRequest,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<GenerationOutput, GenerateError> {
        let options = self.config.emit_options();
        let mut output = GenerationOutput::default();
        let mut import_model = None;

        for group in request.groups() {
            let kind = group.kind;
            if !group.is_present() {
                sink.debug(kind.key(), "no fields, no class generated".to_string());
                continue;
            }

            let class_name = request.class_name(kind);
            let model = ClassModel::resolve(&class_name, kind.key(), &group.fields, sink)?;
            sink.debug(
                kind.key(),
                format!(
                    "resolved {class_name} with {} nested classes",
                    model.all_classes().len() - 1
                ),
            );

            let context = self.parameter_context(&model, &options);
            self.render_unit(UnitKind::Parameter(kind), class_name, &context, &mut output, sink);

            if kind == GroupKind::Import {
                import_model = Some(model);
            }
        }

        let stub = stubs::compose(request, import_model.as_ref(), self.config.package.as_deref());
        let context = Value::from_serialize(&stub);
        self.render_unit(UnitKind::Caller, stub.caller_class.clone(), &context, &mut output, sink);
        self.render_unit(UnitKind::Handler, stub.handler_class.clone(), &context, &mut output, sink);

        Ok(output)
    }

    fn parameter_context(&self, model: &ClassModel<'_>, options: &EmitOptions) -> Value {
        context! {
            package => self.config.package.as_deref(),
            imports => emitter::collect_imports(model),
            class_body => emitter::emit_class(model, options),
        }
    }

    fn render_unit(
        &self,
        kind: UnitKind,
        class_name: String,
        context: &Value,
        output: &mut GenerationOutput,
        sink: &mut dyn DiagnosticSink,
    ) {
        match self.renderer.render(kind.template().as_str(), context) {
            Ok(contents) => {
                output.units.push(GeneratedUnit {
                    kind,
                    file_name: format!("{class_name}.{}", self.config.file_extension()),
                    class_name,
                    contents,
                });
            }
            Err(error) => {
                sink.warn(&class_name, format!("{kind} not generated: {error}"));
                output.failures.push(UnitFailure {
                    kind,
                    class_name,
                    error,
                });
            }
        }
    }
}
