//! Integration tests for SVG grammar validation

use castsvg::svg::validate::Grammar;
use castsvg::{validate_svg, RenderError};

use crate::helpers::{header, line, render, BG, FG};

fn rendered() -> String {
    render(
        vec![
            header(80, 24),
            line(0, "hello", FG, "#ff0000", 0, 100),
            line(1, "world", FG, BG, 100, 100),
        ],
        "window",
    )
    .to_document_string()
}

#[test]
fn rendered_document_is_valid() {
    validate_svg(&rendered()).unwrap();
}

#[test]
fn dangling_reference_is_rejected() {
    let svg = rendered().replace("xlink:href=\"#g2\"", "xlink:href=\"#g9\"");
    let err = validate_svg(&svg).unwrap_err();
    assert!(matches!(err, RenderError::Validation(_)));
    assert!(err.to_string().contains("undefined id \"g9\""), "{}", err);
}

#[test]
fn duplicate_ids_are_rejected() {
    let svg = rendered().replace("id=\"g2\"", "id=\"g1\"");
    let err = validate_svg(&svg).unwrap_err();
    assert!(err.to_string().contains("duplicate id \"g1\""), "{}", err);
}

#[test]
fn leftover_template_metadata_is_rejected() {
    let source = castsvg::svg::template::builtin("plain").unwrap();
    let err = validate_svg(source).unwrap_err();
    assert!(err.to_string().contains("not in the SVG namespace"), "{}", err);
}

#[test]
fn violations_report_their_line() {
    let svg = "<svg xmlns=\"http://www.w3.org/2000/svg\">\n  <g>\n    <blink/>\n  </g>\n</svg>";
    let err = validate_svg(svg).unwrap_err();
    assert!(err.to_string().contains("line 3"), "{}", err);
    assert!(err.to_string().contains("<blink>"), "{}", err);
}

#[test]
fn custom_grammar_restricts_documents() {
    let grammar = Grammar::from_toml(
        r#"
        core_attributes = ["id"]
        presentation_attributes = []

        [content_models]
        root = ["rect"]
        empty = []

        [elements.svg]
        attributes = ["viewBox"]
        content = "root"

        [elements.rect]
        attributes = ["width", "height"]
        required = ["width"]
        content = "empty"
        "#,
    )
    .unwrap();

    let ns = "xmlns=\"http://www.w3.org/2000/svg\"";
    grammar
        .validate(&format!("<svg {} viewBox=\"0 0 1 1\"><rect width=\"1\"/></svg>", ns))
        .unwrap();

    let err = grammar
        .validate(&format!("<svg {}><rect height=\"1\"/></svg>", ns))
        .unwrap_err();
    assert!(err.to_string().contains("requires attribute \"width\""), "{}", err);

    let err = grammar
        .validate(&format!("<svg {}><rect width=\"1\" fill=\"red\"/></svg>", ns))
        .unwrap_err();
    assert!(err.to_string().contains("\"fill\" is not allowed"), "{}", err);
}

#[test]
fn grammar_with_unknown_content_model_is_rejected() {
    let err = Grammar::from_toml(
        r#"
        core_attributes = []
        presentation_attributes = []

        [content_models]

        [elements.svg]
        content = "missing"
        "#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("unknown content model"), "{}", err);
}
