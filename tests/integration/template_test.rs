//! Integration tests for template scaling

use castsvg::svg::template::{
    builtin, is_screen, read_geometry, resize_template, ScreenSize, TemplateGeometry,
    BUILTIN_TEMPLATES,
};
use castsvg::svg::parse_document;
use castsvg::{validate_svg, RenderError};

fn screen_size(columns: i64, rows: i64) -> ScreenSize {
    ScreenSize {
        columns,
        rows,
        cell_width: 8,
        cell_height: 17,
    }
}

#[test]
fn builtin_templates_declare_80x24() {
    for (name, source) in BUILTIN_TEMPLATES {
        let root = parse_document(source).unwrap();
        assert_eq!(
            read_geometry(&root).unwrap(),
            TemplateGeometry {
                columns: 80,
                rows: 24
            },
            "template {}",
            name
        );
    }
}

#[test]
fn plain_template_grows_with_the_screen() {
    let root = resize_template(builtin("plain").unwrap(), screen_size(100, 30)).unwrap();

    assert_eq!(root.attr("viewBox"), Some("0 0 800 510"));
    assert_eq!(root.attr("width"), Some("800"));
    assert_eq!(root.attr("height"), Some("510"));

    let screen = root.find(&is_screen).unwrap();
    assert_eq!(screen.attr("viewBox"), Some("0 0 800 510"));
}

#[test]
fn window_template_keeps_its_chrome_offset() {
    let root = resize_template(builtin("window").unwrap(), screen_size(100, 30)).unwrap();

    // 680x462 outer frame, grown by 20 columns and 6 rows
    assert_eq!(root.attr("viewBox"), Some("0 0 840 564"));
    let screen = root.find(&is_screen).unwrap();
    assert_eq!(screen.attr("viewBox"), Some("0 0 800 510"));
    assert_eq!(screen.attr("x"), Some("20"));
}

#[test]
fn template_can_shrink() {
    let root = resize_template(builtin("plain").unwrap(), screen_size(40, 12)).unwrap();
    assert_eq!(root.attr("viewBox"), Some("0 0 320 204"));
}

#[test]
fn resized_builtins_validate_without_metadata() {
    for (name, source) in BUILTIN_TEMPLATES {
        let root = resize_template(source, screen_size(120, 40)).unwrap();
        let xml = root.to_document_string();
        assert!(!xml.contains("castsvg"), "template {} kept metadata", name);
        if let Err(e) = validate_svg(&xml) {
            panic!("template {} does not validate: {}", name, e);
        }
    }
}

#[test]
fn template_without_settings_is_rejected() {
    let source = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"><defs/><svg id="screen" viewBox="0 0 10 10"/></svg>"#;
    let err = resize_template(source, screen_size(80, 24)).unwrap_err();
    assert!(matches!(err, RenderError::Template(_)));
    assert!(err.to_string().contains("template_settings"), "{}", err);
}

#[test]
fn template_without_viewbox_is_rejected() {
    let source = r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:castsvg="urn:castsvg:template">
  <defs>
    <castsvg:template_settings>
      <castsvg:screen_geometry columns="80" rows="24"/>
    </castsvg:template_settings>
  </defs>
  <svg id="screen" viewBox="0 0 640 408"/>
</svg>"#;
    let err = resize_template(source, screen_size(80, 24)).unwrap_err();
    assert!(matches!(err, RenderError::Template(_)));
}

#[test]
fn malformed_template_is_rejected() {
    let err = resize_template("<svg", screen_size(80, 24)).unwrap_err();
    assert!(matches!(err, RenderError::Template(_)));
}
