use gox_cli::{EmitMode, build_cmd, check_cmd, compile_source};
use gox_lower::RenderApi;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn build_writes_lowered_go() {
    let out = tempfile::tempdir().unwrap();
    let path = build_cmd(
        &fixture("App.gox"),
        Some(out.path()),
        EmitMode::Go,
        &RenderApi::default(),
    )
    .unwrap();

    assert_eq!(path, out.path().join("App.go"));
    let go = std::fs::read_to_string(&path).unwrap();
    assert!(go.starts_with("// Code generated by gox from "));
    assert!(go.contains("package main"));
    assert!(go.contains(r#"vecty.Tag("body""#));
    assert!(go.contains(r#"vecty.Property("class", "greeting")"#));
    assert!(go.contains(r#"&vecty.EventListener{Name: "click", Listener: a.onClick}"#));
    assert!(go.contains("&Counter{start: 3}"));
    assert!(!go.contains("</"));
}

#[test]
fn build_reports_mismatched_close_tag() {
    let out = tempfile::tempdir().unwrap();
    let err = build_cmd(
        &fixture("Broken.gox"),
        Some(out.path()),
        EmitMode::Go,
        &RenderApi::default(),
    )
    .unwrap_err();

    let msg = format!("{err:#}");
    assert!(msg.contains("Broken.gox:4:"), "{msg}");
    assert!(msg.contains("tag <p> closed by </div>"), "{msg}");
    assert!(!out.path().join("Broken.go").exists());
}

#[test]
fn missing_input_is_reported() {
    let err = check_cmd(&fixture("Nope.gox"), &RenderApi::default()).unwrap_err();
    assert!(err.to_string().contains("failed to read"));
}

#[test]
fn check_accepts_valid_file() {
    check_cmd(&fixture("App.gox"), &RenderApi::default()).unwrap();
}

#[test]
fn ast_mode_keeps_markup() {
    let src = "package p\n\nvar x = <b>{y}</b>\n";
    let out = compile_source(src, "x.gox", EmitMode::Ast, &RenderApi::default()).unwrap();
    assert!(out.contains("<b>{y}</b>"), "{out}");
}

#[test]
fn tokens_mode_lists_positions() {
    let src = "package p\nvar x = <b/>\n";
    let out = compile_source(src, "x.gox", EmitMode::Tokens, &RenderApi::default()).unwrap();
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines[0], "1:1\tpackage\t\"package\"");
    assert!(lines.iter().any(|l| l.starts_with("2:9\tTAG_OPEN")), "{out}");
}

#[test]
fn api_package_override() {
    let src = "package p\n\nvar x = <i/>\n";
    let out = compile_source(src, "x.gox", EmitMode::Go, &RenderApi::with_package("h")).unwrap();
    assert!(out.contains(r#"var x = h.Tag("i")"#), "{out}");
}
