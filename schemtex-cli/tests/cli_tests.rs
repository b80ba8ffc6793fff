//! CLI integration tests

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

/// Build command for the schemtex-cli binary.
fn schemtex_cli() -> Command {
    cargo_bin_cmd!("schemtex-cli")
}

/// Path to schemtex library test fixtures (relative to workspace).
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("schemtex")
        .join("tests")
        .join("fixtures")
}

#[test]
fn test_cli_help() {
    let mut cmd = schemtex_cli();

    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("CircuiTikZ"));
}

#[test]
fn test_cli_version() {
    let mut cmd = schemtex_cli();

    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_convert_to_stdout() {
    let mut cmd = schemtex_cli();
    let path = fixtures_dir().join("series_loop.json");

    cmd.arg("convert").arg(path);

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("\\documentclass[border=5mm]{standalone}"))
        .stdout(predicate::str::contains("to[vsource, l^=5<\\volt>]"))
        .stdout(predicate::str::contains("\\draw (0.00,0.00) -- (1.35,0.00);"))
        .stdout(predicate::str::ends_with("\\end{document}\n"));
}

#[test]
fn test_cli_convert_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("loop.tex");

    let mut cmd = schemtex_cli();
    cmd.arg("convert")
        .arg(fixtures_dir().join("series_loop.json"))
        .arg("--output")
        .arg(&out);

    cmd.assert().success().stdout(predicate::str::is_empty());

    let tex = std::fs::read_to_string(&out).unwrap();
    assert!(tex.contains("\\begin{circuitikz}[american]"));
}

#[test]
fn test_cli_convert_from_stdin() {
    let record = std::fs::read_to_string(fixtures_dir().join("series_loop.json")).unwrap();

    let mut cmd = schemtex_cli();
    cmd.arg("convert").arg("-").arg("--fragment").write_stdin(record);

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("\\begin{circuitikz}[american]"))
        .stdout(predicate::str::contains("\\documentclass").not());
}

#[test]
fn test_cli_convert_json_output() {
    let mut cmd = schemtex_cli();
    let path = fixtures_dir().join("segmented.json");

    cmd.arg("convert")
        .arg(path)
        .arg("--format")
        .arg("json")
        .arg("--merge-collinear");

    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["stats"]["merged_wires"], 2);
    assert_eq!(value["stats"]["splits"], 1);
    assert!(value["markup"].as_str().unwrap().contains("circuitikz"));
}

#[test]
fn test_cli_no_normalize_keeps_wires_whole() {
    let mut cmd = schemtex_cli();
    let path = fixtures_dir().join("series_loop.json");

    cmd.arg("convert").arg(path).arg("--no-normalize");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\\draw (0.00,0.00) -- (0.00,-4.00);"))
        .stdout(predicate::str::contains("\\draw (0.00,0.00) -- (0.00,-1.50);").not());
}

#[test]
fn test_cli_malformed_input_fails() {
    let mut cmd = schemtex_cli();
    let path = fixtures_dir().join("malformed.json");

    cmd.arg("convert").arg(path);

    cmd.assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_cli_convert_nonexistent_file() {
    let mut cmd = schemtex_cli();

    cmd.arg("convert").arg("does_not_exist.json");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_cli_project_command() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::copy(
        fixtures_dir().join("series_loop.json"),
        dir.path().join("loop.json"),
    )
    .unwrap();

    let mut cmd = schemtex_cli();
    cmd.arg("project").arg(dir.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Splits:     2"));
    assert!(dir.path().join("loop.tex").exists());
}

#[test]
fn test_cli_project_json_summary() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::copy(
        fixtures_dir().join("segmented.json"),
        dir.path().join("line.json"),
    )
    .unwrap();

    let mut cmd = schemtex_cli();
    cmd.arg("project").arg(dir.path()).arg("--format").arg("json");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"total_files\": 1"));
}

#[test]
fn test_cli_primitives_command() {
    let mut cmd = schemtex_cli();

    cmd.arg("primitives");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("vsource"))
        .stdout(predicate::str::contains("resistor, european"));
}

#[test]
fn test_cli_primitives_long() {
    let mut cmd = schemtex_cli();

    cmd.arg("primitives").arg("--long");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\\ohm"))
        .stdout(predicate::str::contains("half-extent: 0.65"));
}
