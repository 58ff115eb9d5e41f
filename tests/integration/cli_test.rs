//! Integration tests for the castsvg CLI

use std::fs;
use std::process::Command;

use assert_cmd::Command as AssertCommand;
use predicates::prelude::*;

use crate::helpers::{fixture, temp_fixture};

/// Helper to run castsvg and capture output
fn run_castsvg(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_castsvg"))
        .args(args)
        .output()
        .expect("Failed to execute castsvg");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

fn castsvg() -> AssertCommand {
    AssertCommand::cargo_bin("castsvg").expect("castsvg binary not built")
}

// ============================================================================
// Help and listing
// ============================================================================

#[test]
fn help_lists_subcommands() {
    let (stdout, _stderr, exit_code) = run_castsvg(&["--help"]);
    assert_eq!(exit_code, 0);
    for command in ["render", "validate", "templates", "config"] {
        assert!(stdout.contains(command), "missing {} in help", command);
    }
}

#[test]
fn templates_marks_the_default() {
    let (stdout, _stderr, exit_code) = run_castsvg(&["templates"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("window (default)"));
    assert!(stdout.contains("plain"));
}

#[test]
fn config_show_prints_defaults() {
    let (stdout, _stderr, exit_code) = run_castsvg(&["config", "show"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("template = \"window\""));
    assert!(stdout.contains("[render]"));
    assert!(stdout.contains("[palette]"));
}

#[test]
fn config_show_reads_a_file() {
    let (_dir, path) = temp_fixture("small_palette.toml");
    let (stdout, _stderr, exit_code) =
        run_castsvg(&["config", "show", "-c", path.to_str().unwrap()]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("Fira Code"));
    assert!(stdout.contains("#202020"));
}

// ============================================================================
// Render
// ============================================================================

#[test]
fn render_writes_validated_output_file() {
    let (dir, input) = temp_fixture("session.jsonl");
    let output = dir.path().join("session.svg");

    castsvg()
        .args(["render", "--validate", "-o"])
        .arg(&output)
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let svg = fs::read_to_string(&output).unwrap();
    assert!(svg.starts_with("<?xml"));
    assert!(svg.contains("anim_last"));
}

#[test]
fn render_reads_stdin_and_writes_stdout() {
    let session = fs::read_to_string(fixture("session.jsonl")).unwrap();

    castsvg()
        .args(["render", "-t", "plain", "-"])
        .write_stdin(session)
        .assert()
        .success()
        .stdout(predicate::str::contains("<svg").and(predicate::str::contains("#g3")));
}

#[test]
fn render_uses_config_palette_and_template() {
    let (dir, config) = temp_fixture("small_palette.toml");
    let output = dir.path().join("out.svg");

    castsvg()
        .args(["render", "-c"])
        .arg(&config)
        .arg("-o")
        .arg(&output)
        .arg(fixture("session.jsonl"))
        .assert()
        .success();

    let svg = fs::read_to_string(&output).unwrap();
    // bold green on an 8 color palette falls back to the base color
    assert!(svg.contains("fill=\"#00aa00\""));
    assert!(svg.contains("\"Fira Code\", monospace"));
    assert!(svg.contains("--background-color: #202020"));
    assert!(!svg.contains("window-frame"));
}

#[test]
fn render_reports_invalid_colors() {
    castsvg()
        .args(["render"])
        .arg(fixture("bad_color.jsonl"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("chartreuse"));
}

#[test]
fn render_reports_unknown_template() {
    castsvg()
        .args(["render", "-t", "no-such-template"])
        .arg(fixture("session.jsonl"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no-such-template"));
}

#[test]
fn render_reports_missing_input() {
    let (_stdout, stderr, exit_code) = run_castsvg(&["render", "does-not-exist.jsonl"]);
    assert_ne!(exit_code, 0);
    assert!(stderr.contains("Failed to open file"));
}

// ============================================================================
// Validate
// ============================================================================

#[test]
fn validate_accepts_rendered_output() {
    let (dir, input) = temp_fixture("session.jsonl");
    let output = dir.path().join("session.svg");
    castsvg()
        .args(["render", "-o"])
        .arg(&output)
        .arg(&input)
        .assert()
        .success();

    castsvg()
        .arg("validate")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"));
}

#[test]
fn validate_rejects_foreign_elements() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.svg");
    fs::write(
        &path,
        "<svg xmlns=\"http://www.w3.org/2000/svg\"><marquee/></svg>",
    )
    .unwrap();

    castsvg()
        .arg("validate")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid SVG 1.1 document"));
}
