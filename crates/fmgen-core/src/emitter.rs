//! Java parameter class generation from resolved class models.
//!
//! One top-level class is emitted per non-empty parameter group. Structure and
//! table fields induce `public static` member classes, emitted after the
//! getters of their enclosing class in field order, so nesting depth follows
//! schema depth.
//!
//! Constructors take one parameter per field in schema order. Structure and
//! table parameters arrive as remote records (`JCoStructure`, `JCoTable`) and
//! are converted inside the constructor by calling the nested class
//! constructor with one `record.get<Suffix>("RAW_NAME")` argument per child,
//! in child order.

use crate::model::{ClassModel, ResolvedField, SERIAL_VERSION_FIELD};
use crate::types::TargetType;
use std::collections::BTreeSet;

const INDENT: &str = "    ";

/// Loop counter used in table conversions; `$` never appears in derived
/// identifiers, so it cannot shadow a constructor parameter
const ROW_VAR: &str = "$row";

/// Settings that shape emitted classes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    pub serial_version_uid: i64,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            serial_version_uid: 337_339_270_983_782_151,
        }
    }
}

/// Emit the source of a top-level class and all its nested classes.
pub fn emit_class(model: &ClassModel<'_>, options: &EmitOptions) -> String {
    let mut code = String::new();
    write_class(&mut code, model, 0, options);
    code
}

/// Imports needed by a top-level class and everything nested in it, sorted
pub fn collect_imports(model: &ClassModel<'_>) -> Vec<&'static str> {
    let mut imports = BTreeSet::from(["java.io.Serializable"]);
    for class in model.all_classes() {
        for field in &class.fields {
            imports.extend(field.target.imports());
        }
    }
    imports.into_iter().collect()
}

fn write_class(code: &mut String, model: &ClassModel<'_>, depth: usize, options: &EmitOptions) {
    let modifiers = if depth == 0 {
        "public class"
    } else {
        "public static class"
    };
    push_line(
        code,
        depth,
        &format!("{modifiers} {} implements Serializable {{", model.name),
    );
    let inner = depth + 1;
    push_line(
        code,
        inner,
        &format!(
            "private static final long {SERIAL_VERSION_FIELD} = {}L;",
            options.serial_version_uid
        ),
    );

    // Attributes
    for field in &model.fields {
        code.push('\n');
        push_line(code, inner, &format!("/** {} */", field_doc(field)));
        push_line(
            code,
            inner,
            &format!(
                "private {} {};",
                field.target.java_type(),
                field.attribute_name
            ),
        );
    }

    write_constructor(code, model, inner);

    // Getters
    for field in &model.fields {
        code.push('\n');
        push_line(
            code,
            inner,
            &format!(
                "public {} get{}() {{",
                field.target.java_type(),
                field.accessor_name
            ),
        );
        push_line(code, inner + 1, &format!("return this.{};", field.attribute_name));
        push_line(code, inner, "}");
    }

    // Nested classes
    for nested in model.nested_classes() {
        code.push('\n');
        write_class(code, nested, inner, options);
    }

    push_line(code, depth, "}");
}

fn write_constructor(code: &mut String, model: &ClassModel<'_>, depth: usize) {
    let parameters: Vec<String> = model
        .fields
        .iter()
        .map(|f| format!("{} {}", f.target.parameter_type(), f.attribute_name))
        .collect();

    code.push('\n');
    push_line(
        code,
        depth,
        &format!("public {}({}) {{", model.name, parameters.join(", ")),
    );

    let body = depth + 1;
    for field in &model.fields {
        let name = &field.attribute_name;
        match (&field.target, &field.nested) {
            (TargetType::List(_), Some(nested)) => {
                push_line(code, body, &format!("this.{name} = new ArrayList<>();"));
                push_line(code, body, &format!("{name}.firstRow();"));
                push_line(
                    code,
                    body,
                    &format!(
                        "for (int {ROW_VAR} = 0; {ROW_VAR} < {name}.getNumRows(); {ROW_VAR}++, {name}.nextRow()) {{"
                    ),
                );
                push_line(
                    code,
                    body + 1,
                    &format!("this.{name}.add({});", build_nested_object(name, nested)),
                );
                push_line(code, body, "}");
            }
            (_, Some(nested)) => {
                push_line(
                    code,
                    body,
                    &format!("this.{name} = {};", build_nested_object(name, nested)),
                );
            }
            (_, None) => {
                push_line(code, body, &format!("this.{name} = {name};"));
            }
        }
    }

    push_line(code, depth, "}");
}

/// `new Child(record.getString("A"), record.getStructure("B"), ...)`, one
/// argument per child in child order
pub fn build_nested_object(record: &str, nested: &ClassModel<'_>) -> String {
    let arguments: Vec<String> = nested
        .fields
        .iter()
        .map(|child| {
            format!(
                "{record}.get{}(\"{}\")",
                child.accessor_suffix, child.schema.raw_name
            )
        })
        .collect();
    format!("new {}({})", nested.name, arguments.join(", "))
}

fn field_doc(field: &ResolvedField<'_>) -> String {
    let schema = field.schema;
    let mut shape = format!("{} {}", schema.raw_name, schema.type_tag);
    if schema.length > 0 {
        shape.push_str(&format!(" {}", schema.length));
        if schema.decimals > 0 {
            shape.push_str(&format!(",{}", schema.decimals));
        }
    }

    let doc = match schema.description.as_deref().map(str::trim) {
        Some(description) if !description.is_empty() => format!("{description} ({shape})"),
        _ => shape,
    };
    doc.replace("*/", "*&#47;")
}

fn push_line(code: &mut String, depth: usize, text: &str) {
    for _ in 0..depth {
        code.push_str(INDENT);
    }
    code.push_str(text);
    code.push('\n');
}

#[cfg(test)]
#[path = "emitter/emitter_tests.rs"]
mod emitter_tests;
