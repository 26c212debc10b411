#![allow(non_snake_case)]

use super::*;
use crate::diagnostics::Diagnostics;
use crate::render::{JinjaRenderer, TemplateRenderer};
use crate::schema::{FieldSchema, ParameterGroup, TypeTag};
use minijinja::Value;
use test_case::test_case;

fn request(groups: Vec<ParameterGroup>) -> GenerationRequest {
    GenerationRequest::new("GetMaterial", "z_get_material", "out", groups, 64).unwrap()
}

fn import_fields() -> Vec<FieldSchema> {
    vec![
        FieldSchema::scalar("MATERIAL-ID", TypeTag::Char),
        FieldSchema::structure("HEADER", vec![FieldSchema::scalar("PLANT", TypeTag::Char)]),
    ]
}

fn items() -> Vec<FieldSchema> {
    vec![FieldSchema::table(
        "ITEMS",
        vec![FieldSchema::scalar("POSNR", TypeTag::Num)],
    )]
}

fn compose_with_import(request: &GenerationRequest, package: Option<&str>) -> StubContext {
    let mut sink = Diagnostics::new();
    let fields = &request.group(GroupKind::Import).fields;
    let model = ClassModel::resolve(request.class_name(GroupKind::Import), "import", fields, &mut sink)
        .unwrap();
    compose(request, Some(&model), package)
}

#[test]
fn caller_parameter_list___skips_absent_groups() {
    let request = request(vec![
        ParameterGroup::new(GroupKind::Import, import_fields()),
        ParameterGroup::new(GroupKind::Table, items()),
    ]);

    let list = caller_parameter_list(&summarize(&request));

    assert_eq!(
        list,
        "GetMaterialImport getMaterialImport, GetMaterialTable getMaterialTable"
    );
}

#[test]
fn caller_parameter_list___all_groups___follow_fixed_order() {
    let request = request(vec![
        ParameterGroup::new(GroupKind::Table, items()),
        ParameterGroup::new(GroupKind::Changing, vec![FieldSchema::scalar("C", TypeTag::Char)]),
        ParameterGroup::new(GroupKind::Export, vec![FieldSchema::scalar("E", TypeTag::Char)]),
        ParameterGroup::new(GroupKind::Import, import_fields()),
    ]);

    let list = caller_parameter_list(&summarize(&request));

    assert_eq!(
        list,
        "GetMaterialImport getMaterialImport, GetMaterialExport getMaterialExport, \
         GetMaterialChanging getMaterialChanging, GetMaterialTable getMaterialTable"
    );
}

#[test]
fn caller_parameter_list___no_groups___is_empty() {
    let request = request(vec![]);

    assert_eq!(caller_parameter_list(&summarize(&request)), "");
}

#[test_case(GroupKind::Import)]
#[test_case(GroupKind::Export)]
#[test_case(GroupKind::Changing)]
#[test_case(GroupKind::Table)]
fn caller_parameter_list___single_group___has_no_separator(kind: GroupKind) {
    let request = request(vec![ParameterGroup::new(
        kind,
        vec![FieldSchema::scalar("A", TypeTag::Char)],
    )]);

    let list = caller_parameter_list(&summarize(&request));

    assert!(!list.contains(','));
    assert_eq!(list, format!("GetMaterial{0} getMaterial{0}", kind.class_suffix()));
}

#[test]
fn compose___flags_follow_group_presence() {
    let request = request(vec![
        ParameterGroup::new(GroupKind::Import, import_fields()),
        ParameterGroup::new(GroupKind::Table, items()),
    ]);

    let context = compose_with_import(&request, None);

    assert!(context.has_import);
    assert!(!context.has_export);
    assert!(!context.has_changing);
    assert!(context.has_table);
    assert_eq!(context.function_name, "Z_GET_MATERIAL");
    assert_eq!(context.caller_class, "GetMaterialCaller");
    assert_eq!(context.handler_class, "GetMaterialHandler");
}

#[test]
fn compose___import_fields___keep_schema_order_and_record_types() {
    let request = request(vec![ParameterGroup::new(GroupKind::Import, import_fields())]);

    let context = compose_with_import(&request, None);

    assert_eq!(
        context.import_fields,
        [
            HandlerField {
                java_type: "String".into(),
                local: "materialId".into(),
                accessor: "String".into(),
                raw_name: "MATERIAL-ID".into(),
            },
            HandlerField {
                java_type: "JCoStructure".into(),
                local: "header".into(),
                accessor: "Structure".into(),
                raw_name: "HEADER".into(),
            },
        ]
    );
    assert_eq!(context.import_arguments, "materialId, header");
    assert_eq!(context.import_list, "importParameters");
}

#[test]
fn compose___handler_imports___add_record_types_but_not_lists() {
    let request = request(vec![ParameterGroup::new(
        GroupKind::Import,
        vec![
            FieldSchema::scalar("VALID-FROM", TypeTag::Date),
            FieldSchema::table("ROWS", vec![FieldSchema::scalar("A", TypeTag::Char)]),
        ],
    )]);

    let context = compose_with_import(&request, None);

    assert!(context.handler_imports.contains(&"com.sap.conn.jco.JCoTable"));
    assert!(context.handler_imports.contains(&"java.util.Date"));
    assert!(!context.handler_imports.contains(&"java.util.List"));
    assert!(!context.handler_imports.contains(&"java.util.ArrayList"));
    let mut sorted = context.handler_imports.clone();
    sorted.sort_unstable();
    assert_eq!(context.handler_imports, sorted);
}

#[test]
fn compose___locals_colliding_with_handler_names___are_renamed() {
    let request = request(vec![ParameterGroup::new(
        GroupKind::Import,
        vec![
            FieldSchema::scalar("FUNCTION", TypeTag::Char),
            FieldSchema::scalar("IMPORT-PARAMETERS", TypeTag::Char),
            FieldSchema::scalar("GET-MATERIAL-IMPORT", TypeTag::Char),
        ],
    )]);

    let context = compose_with_import(&request, None);

    let locals: Vec<_> = context.import_fields.iter().map(|f| f.local.as_str()).collect();
    assert_eq!(
        locals,
        ["functionValue", "importParametersValue", "getMaterialImportValue"]
    );
    assert_eq!(
        context.import_arguments,
        "functionValue, importParametersValue, getMaterialImportValue"
    );
}

#[test]
fn compose___without_import_group___has_no_import_fields() {
    let request = request(vec![ParameterGroup::new(GroupKind::Export, import_fields())]);

    let context = compose(&request, None, Some("com.example"));

    assert!(!context.has_import);
    assert!(context.import_fields.is_empty());
    assert_eq!(context.import_arguments, "");
    assert_eq!(context.package.as_deref(), Some("com.example"));
}

#[test]
fn builtin_caller___renders_filtered_parameter_list() {
    let request = request(vec![
        ParameterGroup::new(GroupKind::Import, import_fields()),
        ParameterGroup::new(GroupKind::Table, items()),
    ]);
    let context = compose_with_import(&request, Some("com.example.rfc"));
    let renderer = JinjaRenderer::new().unwrap();

    let text = renderer
        .render("caller", &Value::from_serialize(&context))
        .unwrap();

    assert!(text.starts_with("package com.example.rfc;\n"));
    assert!(text.contains("public class GetMaterialCaller {"));
    assert!(text.contains("FUNCTION_NAME = \"Z_GET_MATERIAL\";"));
    assert!(text.contains(
        "public void call(GetMaterialImport getMaterialImport, GetMaterialTable getMaterialTable) throws JCoException {"
    ));
    assert!(text.contains("// copy getMaterialTable into function.getTableParameterList()"));
    assert!(!text.contains("getExportParameterList"));
}

#[test]
fn builtin_caller___no_groups___has_empty_parameter_list() {
    let request = request(vec![]);
    let context = compose(&request, None, None);
    let renderer = JinjaRenderer::new().unwrap();

    let text = renderer
        .render("caller", &Value::from_serialize(&context))
        .unwrap();

    assert!(text.contains("public void call() throws JCoException {"));
    assert!(!text.contains("package"));
}

#[test]
fn builtin_handler___builds_import_object_positionally() {
    let request = request(vec![ParameterGroup::new(GroupKind::Import, import_fields())]);
    let context = compose_with_import(&request, None);
    let renderer = JinjaRenderer::new().unwrap();

    let text = renderer
        .render("handler", &Value::from_serialize(&context))
        .unwrap();

    assert!(text.contains("import com.sap.conn.jco.JCoStructure;\n"));
    assert!(text.contains("public class GetMaterialHandler implements JCoServerFunctionHandler {"));
    assert!(text.contains(
        "        JCoParameterList importParameters = function.getImportParameterList();\n\
         \x20       String materialId = importParameters.getString(\"MATERIAL-ID\");\n\
         \x20       JCoStructure header = importParameters.getStructure(\"HEADER\");\n\
         \x20       GetMaterialImport getMaterialImport = new GetMaterialImport(materialId, header);\n"
    ));
}

#[test]
fn builtin_handler___without_import___has_empty_body() {
    let request = request(vec![ParameterGroup::new(GroupKind::Export, import_fields())]);
    let context = compose(&request, None, None);
    let renderer = JinjaRenderer::new().unwrap();

    let text = renderer
        .render("handler", &Value::from_serialize(&context))
        .unwrap();

    assert!(!text.contains("getImportParameterList"));
    assert!(text.contains("throws AbapException, AbapClassException {\n    }\n}\n"));
}
