#![allow(non_snake_case)]

use super::*;
use minijinja::context;
use std::fs;
use tempfile::TempDir;

fn parameter_context(package: Option<&str>) -> Value {
    context! {
        package => package,
        imports => vec!["java.io.Serializable", "java.util.Date"],
        class_body => "public class X implements Serializable {\n}\n",
    }
}

#[test]
fn JinjaRenderer___parameter_class___renders_package_and_imports() {
    let renderer = JinjaRenderer::new().unwrap();

    let text = renderer
        .render("parameter-class", &parameter_context(Some("com.example.rfc")))
        .unwrap();

    assert_eq!(
        text,
        "package com.example.rfc;\n\n\
         import java.io.Serializable;\n\
         import java.util.Date;\n\n\
         public class X implements Serializable {\n}\n"
    );
}

#[test]
fn JinjaRenderer___parameter_class_without_package___starts_with_imports() {
    let renderer = JinjaRenderer::new().unwrap();

    let text = renderer
        .render("parameter-class", &parameter_context(None))
        .unwrap();

    assert!(text.starts_with("import java.io.Serializable;\n"));
}

#[test]
fn JinjaRenderer___unknown_template___is_template_missing() {
    let renderer = JinjaRenderer::new().unwrap();

    let err = renderer.render("wrapper", &context! {}).unwrap_err();

    assert_eq!(err, RenderError::TemplateMissing("wrapper".into()));
}

#[test]
fn JinjaRenderer___missing_context_field___is_missing_field() {
    let renderer = JinjaRenderer::new().unwrap();

    let err = renderer
        .render("parameter-class", &context! { package => "x", imports => Vec::<String>::new() })
        .unwrap_err();

    assert!(matches!(err, RenderError::MissingField { ref template, .. } if template == "parameter-class"));
}

#[test]
fn JinjaRenderer___empty___has_no_templates() {
    let renderer = JinjaRenderer::empty();

    let err = renderer.render("caller", &context! {}).unwrap_err();

    assert!(matches!(err, RenderError::TemplateMissing(_)));
}

#[test]
fn JinjaRenderer___add_template_with_syntax_error___is_template_error() {
    let mut renderer = JinjaRenderer::empty();

    let err = renderer
        .add_template("caller", "{% if %}".to_string())
        .unwrap_err();

    assert!(matches!(err, RenderError::Template { .. }));
}

#[test]
fn JinjaRenderer___load_overrides___replaces_only_present_files() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("caller.java.j2"),
        "// custom caller for {{ function_name }}\n",
    )
    .unwrap();
    let mut renderer = JinjaRenderer::new().unwrap();

    let loaded = renderer.load_overrides(dir.path()).unwrap();

    assert_eq!(loaded, [TemplateId::Caller]);
    let caller = renderer
        .render("caller", &context! { function_name => "Z_TEST" })
        .unwrap();
    assert_eq!(caller, "// custom caller for Z_TEST\n");
    assert!(
        renderer
            .render("parameter-class", &parameter_context(None))
            .is_ok()
    );
}

#[test]
fn TemplateId___names___are_stable() {
    let ids: Vec<_> = TemplateId::ALL.iter().map(|id| id.as_str()).collect();

    assert_eq!(ids, ["caller", "handler", "parameter-class"]);
    assert_eq!(TemplateId::ParameterClass.file_name(), "parameter_class.java.j2");
}
