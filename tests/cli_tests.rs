//! CLI integration tests
//!
//! These tests run the built binary, so they need the `cli` feature.

#![cfg(feature = "cli")]

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

fn xsd2avro_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_xsd2avro"))
}

fn fixtures_dir() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path
}

fn fixture(name: &str) -> String {
    fixtures_dir().join(name).to_str().unwrap().to_string()
}

// ============================================================================
// Convert Command Tests
// ============================================================================

#[test]
fn test_cli_convert_compact() {
    let output = Command::new(xsd2avro_bin())
        .args(["convert", &fixture("books.xsd")])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "convert should succeed");
    assert!(stdout.starts_with(r#"["null",{"type":"record","name":"BooksForm""#));
    assert_eq!(stdout.lines().count(), 1, "compact output is a single line");
}

#[test]
fn test_cli_convert_pretty_with_options() {
    let output = Command::new(xsd2avro_bin())
        .args([
            "convert",
            &fixture("books.xsd"),
            "--pretty",
            "--namespace",
            "org.library",
            "--no-connect-metadata",
        ])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.starts_with("[ \"null\", {\n"));
    assert!(stdout.contains("\"namespace\" : \"org.library\""));
    assert!(!stdout.contains("connect."));
}

#[test]
fn test_cli_convert_stdin() {
    let mut child = Command::new(xsd2avro_bin())
        .arg("convert")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to spawn command");

    let xsd = std::fs::read(fixture("books.xsd")).unwrap();
    child.stdin.take().unwrap().write_all(&xsd).unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("\"name\":\"BookForm\""));
}

#[test]
fn test_cli_convert_to_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("books.avsc");

    let output = Command::new(xsd2avro_bin())
        .args(["convert", &fixture("books.xsd"), "--output", out.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let written = std::fs::read_to_string(&out).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value[1]["name"], "BooksForm");
}

#[test]
fn test_cli_convert_errors() {
    for (name, message) in [
        (
            "bad_identifier.xsd",
            "Error while converting XSD to AVRO: Illegal character in: bo-ok",
        ),
        ("not_schema.xml", "Please provide a valid xml schema."),
        ("partial.xsd", "Please provide a valid xml file."),
    ] {
        let output = Command::new(xsd2avro_bin())
            .args(["convert", &fixture(name)])
            .output()
            .expect("Failed to execute command");

        assert_eq!(output.status.code(), Some(1), "{} should fail", name);
        assert!(output.stdout.is_empty());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains(message), "{}: {}", name, stderr);
    }
}

#[test]
fn test_cli_convert_missing_file() {
    let output = Command::new(xsd2avro_bin())
        .args(["convert", &fixture("does_not_exist.xsd")])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Please provide a valid xml file."));
}

// ============================================================================
// Inspect and Hello Command Tests
// ============================================================================

#[test]
fn test_cli_inspect() {
    let output = Command::new(xsd2avro_bin())
        .args(["inspect", &fixture("books.xsd")])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Target Namespace: urn:books"));
    assert!(stdout.contains("books : BooksForm"));
    assert!(stdout.contains("BookForm (complex)"));
}

#[test]
fn test_cli_inspect_json() {
    let output = Command::new(xsd2avro_bin())
        .args(["inspect", "--json", &fixture("catalog.xsd")])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["elements"][0]["name"], "catalog");
    let kinds: Vec<_> = value["types"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["kind"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(kinds, vec!["complex", "complex", "complex", "complex", "simple", "simple"]);
}

#[test]
fn test_cli_hello() {
    let output = Command::new(xsd2avro_bin())
        .arg("hello")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim_end(),
        "Hello! I can convert xsd to avro."
    );
}
