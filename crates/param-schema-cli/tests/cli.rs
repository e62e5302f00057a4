// crates/param-schema-cli/tests/cli.rs
// ============================================================================
// Module: CLI Command Tests
// Description: Integration tests that drive the param-schema binary.
// Purpose: Ensure compile, validate, and config commands behave end to end.
// Dependencies: param-schema-cli binary, serde_json, tempfile
// ============================================================================
//! ## Overview
//! Runs the compiled binary inside a scratch directory with a clean
//! environment so no ambient config or language setting leaks in.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;

use serde_json::Value;
use serde_json::json;
use tempfile::TempDir;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Browser-style document with a localized label.
const CHROME_DOCUMENT: &str = r#"
- name: url
  type: string
  label: "{{ 'URL' | i18n }}"
- name: password
  type: password
  required: true
- name: notes
  type: text
  required: false
"#;

/// Remote desktop document used by the validation tests.
const RDP_DOCUMENT: &str = r"
- name: host
  type: string
- name: port
  type: integer
  default: 3389
- name: password
  type: password
";

/// Translation table file contents.
const TABLE: &str = "en:\n  URL: Address\nzh:\n  URL: 网址\n";

fn param_schema_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_param-schema"))
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

/// Runs the binary in `dir` with no ambient configuration.
fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(param_schema_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("PARAM_SCHEMA_CONFIG")
        .env_remove("PARAM_SCHEMA_LANG")
        .env_remove("PARAM_SCHEMA_LOG")
        .env_remove("RUST_LOG")
        .output()
        .expect("run param-schema")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("utf-8 stdout")
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).expect("utf-8 stderr")
}

// ============================================================================
// SECTION: Compile
// ============================================================================

#[test]
fn compile_prints_canonical_description() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "chrome.yaml", CHROME_DOCUMENT);
    write(dir.path(), "table.yaml", TABLE);

    let output =
        run(dir.path(), &["compile", "chrome.yaml", "--i18n", "table.yaml", "--locale", "en"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.starts_with("{\"fields\":["), "keys must be sorted: {text}");
    assert!(text.ends_with("}\n"));

    let description: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(description["name"], json!("RemoteAppChromeSchema"));
    assert_eq!(description["fields"][0]["label"], json!("Address"));
    assert_eq!(description["fields"][0]["max_length"], json!(1024));
    assert_eq!(description["fields"][1]["write_only"], json!(true));
    assert_eq!(description["fields"][2]["required"], json!(false));
}

#[test]
fn compile_uses_default_locale_without_config() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "chrome.yaml", CHROME_DOCUMENT);
    write(dir.path(), "table.yaml", TABLE);

    let output = run(dir.path(), &["compile", "chrome.yaml", "--i18n", "table.yaml"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let description: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(description["fields"][0]["label"], json!("网址"));
}

#[test]
fn compile_text_format_lists_fields() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "chrome.yaml", CHROME_DOCUMENT);

    let output =
        run(dir.path(), &["compile", "chrome.yaml", "--name", "Browser", "--format", "text"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "Schema Browser (3 fields)\n  url: string [required]\n  password: password [required, \
         write-only]\n  notes: text [optional]\n"
    );
}

#[test]
fn compile_renders_variables() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "vars.yaml", "- name: {{ field }}\n  type: integer\n");

    let output = run(dir.path(), &["compile", "vars.yaml", "--var", "field=port"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let description: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(description["fields"][0]["name"], json!("port"));
}

#[test]
fn compile_rejects_malformed_variable() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "vars.yaml", "- name: port\n  type: integer\n");

    let output = run(dir.path(), &["compile", "vars.yaml", "--var", "novalue"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Expected NAME=VALUE"));
}

#[test]
fn compile_reports_template_errors() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "broken.yaml", "- name: url\n  type: string\n  label: {{ 'URL' | i18n\n");

    let output = run(dir.path(), &["compile", "broken.yaml"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("Failed to compile broken.yaml"));
}

#[test]
fn compile_refuses_documents_over_the_configured_limit() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "param-schema.toml", "[compiler]\nmax_document_bytes = 16\n");
    write(dir.path(), "chrome.yaml", CHROME_DOCUMENT);

    let output = run(dir.path(), &["compile", "chrome.yaml"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Refusing to read parameter document"));
}

// ============================================================================
// SECTION: Validate
// ============================================================================

#[test]
fn validate_prints_represented_data() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "rdp.yaml", RDP_DOCUMENT);
    write(dir.path(), "input.json", r#"{"host": " rdp.local ", "password": "s3cret"}"#);

    let output = run(dir.path(), &["validate", "rdp.yaml", "--input", "input.json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "{\"host\":\"rdp.local\",\"port\":3389}\n");
}

#[test]
fn validate_reports_field_errors_and_fails() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "rdp.yaml", RDP_DOCUMENT);
    write(dir.path(), "input.json", r#"{"host": "", "port": "http"}"#);

    let output = run(dir.path(), &["validate", "rdp.yaml", "--input", "input.json"]);
    assert_eq!(output.status.code(), Some(1));
    let errors: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(errors["field_errors"]["host"][0]["code"], json!("blank"));
    assert_eq!(errors["field_errors"]["port"][0]["code"], json!("invalid"));
    assert_eq!(errors["field_errors"]["password"][0]["code"], json!("required"));
    assert!(stderr(&output).contains("3 field error(s)"));
}

#[test]
fn validate_rejects_unparseable_input() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "rdp.yaml", RDP_DOCUMENT);
    write(dir.path(), "input.json", "{not json");

    let output = run(dir.path(), &["validate", "rdp.yaml", "--input", "input.json"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to parse input data JSON"));
}

// ============================================================================
// SECTION: Config
// ============================================================================

#[test]
fn config_validate_accepts_valid_config() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "table.yaml", TABLE);
    let config = write(
        dir.path(),
        "tool.toml",
        "[compiler]\ndefault_locale = \"en\"\n\n[localization]\ntable_path = \"table.yaml\"\n",
    );

    let output = run(dir.path(), &["config", "validate", "--config", config.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "Config valid.\n");
}

#[test]
fn config_validate_rejects_unknown_keys() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "param-schema.toml", "[compiler]\nlocale = \"en\"\n");

    let output = run(dir.path(), &["config", "validate"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to load config"));
}

#[test]
fn configured_locale_and_table_drive_compilation() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "table.yaml", TABLE);
    write(
        dir.path(),
        "param-schema.toml",
        "[compiler]\ndefault_locale = \"en\"\n\n[localization]\ntable_path = \"table.yaml\"\n",
    );
    write(dir.path(), "chrome.yaml", CHROME_DOCUMENT);

    let output = run(dir.path(), &["compile", "chrome.yaml"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let description: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(description["fields"][0]["label"], json!("Address"));
}

// ============================================================================
// SECTION: Language and Version
// ============================================================================

#[test]
fn chinese_output_carries_disclaimer() {
    let dir = TempDir::new().unwrap();
    let config = write(dir.path(), "tool.toml", "");

    let output = run(
        dir.path(),
        &["--lang", "zh", "config", "validate", "--config", config.to_str().unwrap()],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "配置有效。\n");
    assert!(stderr(&output).contains("机器翻译"));
}

#[test]
fn invalid_language_environment_fails() {
    let dir = TempDir::new().unwrap();
    let output = Command::new(param_schema_bin())
        .args(["--version"])
        .current_dir(dir.path())
        .env("PARAM_SCHEMA_LANG", "klingon")
        .output()
        .expect("run param-schema");
    assert!(!output.status.success());
    assert!(stderr(&output).contains("PARAM_SCHEMA_LANG"));
}

#[test]
fn version_flag_prints_package_version() {
    let dir = TempDir::new().unwrap();
    let output = run(dir.path(), &["--version"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), format!("param-schema {}\n", env!("CARGO_PKG_VERSION")));
}
