//! Caller and handler stub composition.
//!
//! Stubs carry no business logic: they only reference the generated
//! parameter classes. Absent groups (no fields) are left out of every stub,
//! and the caller's parameter list is filtered for presence before it is
//! joined, so no stray separators can appear.

use crate::model::ClassModel;
use crate::naming;
use crate::schema::{GenerationRequest, GroupKind};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

/// Presence and naming of one parameter group, as the stubs see it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSummary {
    pub kind: GroupKind,
    pub class_name: String,
    pub field_count: usize,
}

impl GroupSummary {
    pub fn of(request: &GenerationRequest, kind: GroupKind) -> Self {
        Self {
            kind,
            class_name: request.class_name(kind),
            field_count: request.group(kind).fields.len(),
        }
    }

    pub fn is_present(&self) -> bool {
        self.field_count > 0
    }

    /// Variable name for an instance of the group class
    pub fn object_name(&self) -> String {
        naming::decapitalize(&self.class_name)
    }
}

/// Summaries of all four groups, in fixed order
pub fn summarize(request: &GenerationRequest) -> Vec<GroupSummary> {
    GroupKind::ALL
        .iter()
        .map(|&kind| GroupSummary::of(request, kind))
        .collect()
}

/// `"<Class> <object>"` for each present group, joined with `", "`
pub fn caller_parameter_list(groups: &[GroupSummary]) -> String {
    groups
        .iter()
        .filter(|g| g.is_present())
        .map(|g| format!("{} {}", g.class_name, g.object_name()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// One value the handler extracts from the import parameter list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandlerField {
    /// Declared type of the local (`String`, `JCoStructure`, `JCoTable`)
    pub java_type: String,
    /// Local variable name
    pub local: String,
    /// Record accessor suffix (`getString`, `getStructure`, ...)
    pub accessor: String,
    pub raw_name: String,
}

/// Context handed to the caller and handler templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StubContext {
    pub package: Option<String>,
    pub base_class: String,
    pub function_name: String,
    pub caller_class: String,
    pub handler_class: String,

    pub has_import: bool,
    pub has_export: bool,
    pub has_changing: bool,
    pub has_table: bool,

    pub import_class: String,
    pub export_class: String,
    pub changing_class: String,
    pub table_class: String,

    pub import_object: String,
    pub export_object: String,
    pub changing_object: String,
    pub table_object: String,

    /// Pre-filtered, pre-joined parameter list of the caller's `call` method
    pub caller_parameters: String,

    /// Variable holding the import parameter list in the handler
    pub import_list: String,
    pub import_fields: Vec<HandlerField>,
    /// Locals passed to the import class constructor, in field order
    pub import_arguments: String,
    pub handler_imports: Vec<&'static str>,
}

/// Locals already taken inside `handleRequest`
const HANDLER_RESERVED: [&str; 2] = ["serverContext", "function"];

const HANDLER_BASE_IMPORTS: [&str; 6] = [
    "com.sap.conn.jco.AbapClassException",
    "com.sap.conn.jco.AbapException",
    "com.sap.conn.jco.JCoFunction",
    "com.sap.conn.jco.JCoParameterList",
    "com.sap.conn.jco.server.JCoServerContext",
    "com.sap.conn.jco.server.JCoServerFunctionHandler",
];

/// Build the stub context.
///
/// `import_model` is the resolved Import class, `None` when the group is
/// absent.
pub fn compose(
    request: &GenerationRequest,
    import_model: Option<&ClassModel<'_>>,
    package: Option<&str>,
) -> StubContext {
    let base = request.base_name();
    let import = GroupSummary::of(request, GroupKind::Import);
    let export = GroupSummary::of(request, GroupKind::Export);
    let changing = GroupSummary::of(request, GroupKind::Changing);
    let table = GroupSummary::of(request, GroupKind::Table);

    let mut taken: HashSet<String> = HANDLER_RESERVED.iter().map(|s| s.to_string()).collect();
    taken.insert(import.object_name());
    let import_list = claim_local("importParameters", &mut taken);

    let mut handler_imports: BTreeSet<&'static str> = HANDLER_BASE_IMPORTS.into_iter().collect();
    let mut import_fields = Vec::new();
    if let Some(model) = import_model.filter(|_| import.is_present()) {
        for field in &model.fields {
            // The handler only holds records, never the generated lists
            handler_imports.extend(
                field
                    .target
                    .imports()
                    .into_iter()
                    .filter(|i| !matches!(*i, "java.util.List" | "java.util.ArrayList")),
            );
            import_fields.push(HandlerField {
                java_type: field.target.parameter_type().to_string(),
                local: claim_local(&field.attribute_name, &mut taken),
                accessor: field.accessor_suffix.to_string(),
                raw_name: field.schema.raw_name.clone(),
            });
        }
    }
    let import_arguments = import_fields
        .iter()
        .map(|f| f.local.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    StubContext {
        package: package.map(str::to_string),
        base_class: base.to_string(),
        function_name: request.function_name().to_string(),
        caller_class: format!("{base}Caller"),
        handler_class: format!("{base}Handler"),

        has_import: import.is_present(),
        has_export: export.is_present(),
        has_changing: changing.is_present(),
        has_table: table.is_present(),

        import_class: import.class_name.clone(),
        export_class: export.class_name.clone(),
        changing_class: changing.class_name.clone(),
        table_class: table.class_name.clone(),

        import_object: import.object_name(),
        export_object: export.object_name(),
        changing_object: changing.object_name(),
        table_object: table.object_name(),

        caller_parameters: caller_parameter_list(&summarize(request)),

        import_list,
        import_fields,
        import_arguments,
        handler_imports: handler_imports.into_iter().collect(),
    }
}

/// Take `desired` as a local name, or `desired` + `Value` (numbered if
/// needed) when it is already used
fn claim_local(desired: &str, taken: &mut HashSet<String>) -> String {
    let mut name = desired.to_string();
    let mut n = 1;
    while taken.contains(&name) {
        name = if n == 1 {
            format!("{desired}Value")
        } else {
            format!("{desired}Value{n}")
        };
        n += 1;
    }
    taken.insert(name.clone());
    name
}

#[cfg(test)]
#[path = "stubs/stubs_tests.rs"]
mod stubs_tests;
