//! Resolved class model.
//!
//! Resolution walks a validated parameter group once and caches every derived
//! identifier: attribute name, getter name, accessor suffix, Java type and the
//! nested class for structure and table fields. The emitter and the stub
//! composer only read this model.
//!
//! Nested class names are unique per top-level class. A name that is already
//! taken (by the top-level class, an earlier nested class or a Java type the
//! file refers to) is qualified with its enclosing class name, then numbered
//! if it is still taken.

use crate::diagnostics::DiagnosticSink;
use crate::error::SchemaError;
use crate::naming;
use crate::schema::{FieldSchema, child_path};
use crate::types::{self, TargetType};
use std::collections::HashSet;

/// Constant every emitted class declares
pub const SERIAL_VERSION_FIELD: &str = "serialVersionUID";

/// One class to emit, with its nested classes inside its fields
#[derive(Debug, Clone)]
pub struct ClassModel<'s> {
    pub name: String,
    /// Schema path of the node that induced the class (`import`, `import.HEADER`)
    pub path: String,
    pub fields: Vec<ResolvedField<'s>>,
}

/// A schema field with its derived identifiers
#[derive(Debug, Clone)]
pub struct ResolvedField<'s> {
    pub schema: &'s FieldSchema,
    pub path: String,
    /// Attribute and constructor parameter name
    pub attribute_name: String,
    /// Getter name without the `get` prefix
    pub accessor_name: String,
    /// Record accessor token (`String` in `getString("NAME")`)
    pub accessor_suffix: &'static str,
    pub target: TargetType,
    pub nested: Option<ClassModel<'s>>,
}

impl<'s> ClassModel<'s> {
    /// Resolve a top-level class from a group's fields.
    ///
    /// The fields must already have passed request validation.
    pub fn resolve(
        name: impl Into<String>,
        path: impl Into<String>,
        fields: &'s [FieldSchema],
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Self, SchemaError> {
        let name = name.into();
        let mut registry = ClassNameRegistry::with_reserved(types::RESERVED_TYPE_NAMES);
        registry.reserve(&name);
        resolve_class(name, path.into(), fields, &mut registry, sink)
    }

    /// Nested classes directly inside this one, in field order
    pub fn nested_classes(&self) -> impl Iterator<Item = &ClassModel<'s>> {
        self.fields.iter().filter_map(|f| f.nested.as_ref())
    }

    /// This class and every class nested below it, pre-order
    pub fn all_classes(&self) -> Vec<&ClassModel<'s>> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(class) = stack.pop() {
            out.push(class);
            let nested: Vec<_> = class.nested_classes().collect();
            stack.extend(nested.into_iter().rev());
        }
        out
    }
}

fn resolve_class<'s>(
    name: String,
    path: String,
    fields: &'s [FieldSchema],
    registry: &mut ClassNameRegistry,
    sink: &mut dyn DiagnosticSink,
) -> Result<ClassModel<'s>, SchemaError> {
    let mut attributes = HashSet::from([SERIAL_VERSION_FIELD.to_string()]);
    let mut resolved = Vec::with_capacity(fields.len());

    for (index, field) in fields.iter().enumerate() {
        let field_path = child_path(&path, &field.raw_name, index);
        let invalid = |source| SchemaError::InvalidName {
            path: field_path.clone(),
            source,
        };

        let mut attribute_name =
            naming::to_attribute_name(&field.raw_name, field.type_tag).map_err(invalid)?;
        if !attributes.insert(attribute_name.clone()) {
            let unique = unique_name(&attribute_name, |candidate| attributes.contains(candidate));
            sink.warn(
                &field_path,
                format!("attribute '{attribute_name}' already declared in {name}; using '{unique}'"),
            );
            attributes.insert(unique.clone());
            attribute_name = unique;
        }

        let nested = if field.type_tag.is_nested() {
            let desired = naming::to_class_name(&field.raw_name).map_err(invalid)?;
            let class_name = registry.register(&desired, &name);
            if class_name != desired {
                sink.warn(
                    &field_path,
                    format!("nested class '{desired}' already exists; using '{class_name}'"),
                );
            }
            if field.children.is_empty() {
                sink.warn(
                    &field_path,
                    format!("{} has no fields; generating empty class {class_name}", field.type_tag),
                );
            }
            Some(resolve_class(
                class_name,
                field_path.clone(),
                &field.children,
                registry,
                sink,
            )?)
        } else {
            None
        };

        let target = types::map_type(field.type_tag, || {
            nested.as_ref().map(|c| c.name.clone()).unwrap_or_default()
        });

        resolved.push(ResolvedField {
            schema: field,
            accessor_name: naming::capitalize(&attribute_name),
            accessor_suffix: naming::to_accessor_suffix(field.type_tag),
            attribute_name,
            path: field_path,
            target,
            nested,
        });
    }

    Ok(ClassModel {
        name,
        path,
        fields: resolved,
    })
}

/// Class names already used within one top-level class
#[derive(Debug)]
struct ClassNameRegistry {
    used: HashSet<String>,
}

impl ClassNameRegistry {
    fn with_reserved<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            used: names.into_iter().map(str::to_string).collect(),
        }
    }

    fn reserve(&mut self, name: &str) {
        self.used.insert(name.to_string());
    }

    fn register(&mut self, desired: &str, enclosing: &str) -> String {
        let name = if !self.used.contains(desired) {
            desired.to_string()
        } else {
            let qualified = format!("{enclosing}{desired}");
            if self.used.contains(&qualified) {
                unique_name(&qualified, |candidate| self.used.contains(candidate))
            } else {
                qualified
            }
        };
        self.used.insert(name.clone());
        name
    }
}

fn unique_name(base: &str, taken: impl Fn(&str) -> bool) -> String {
    (2..)
        .map(|n| format!("{base}{n}"))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| base.to_string())
}
