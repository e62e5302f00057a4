//! Config file loading tests for param-schema-config.
// crates/param-schema-config/tests/config_loading.rs
// =============================================================================
// Module: Config Loading Tests
// Description: Load configuration and localization tables from disk.
// Purpose: Ensure file resolution, size limits, and table parsing behave.
// =============================================================================

use param_schema_config::MAX_CONFIG_FILE_SIZE;
use param_schema_config::SchemaToolConfig;
use param_schema_config::parse_localization_table;
use param_schema_config::read_localization_table;
use param_schema_core::CompileRequest;
use param_schema_core::LocaleCode;

mod common;

use common::TestResult;
use common::assert_invalid;
use common::write_file;

#[test]
fn relative_table_path_resolves_against_config_directory() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    write_file(dir.path(), "i18n.yaml", "en:\n  URL: Address\nzh:\n  URL: 网址\n")?;
    let config_path = write_file(
        dir.path(),
        "param-schema.toml",
        "[compiler]\ndefault_locale = \"en\"\n\n[localization]\ntable_path = \"i18n.yaml\"\n",
    )?;

    let config = SchemaToolConfig::load(Some(&config_path)).map_err(|err| err.to_string())?;
    let table = config.load_localization_table().map_err(|err| err.to_string())?;
    if table.lookup(LocaleCode::En, "URL") != "Address" {
        return Err("table must load relative to the config file".to_string());
    }

    let compiler = config.build_compiler();
    let request = CompileRequest::new(
        "Configured",
        "- name: url\n  type: string\n  label: \"{{ 'URL' | i18n }}\"\n",
    )
    .with_table(table);
    let schema = compiler.compile(&request).map_err(|err| err.to_string())?;
    let label = schema.field("url").and_then(|field| field.options().label.clone());
    if label.as_deref() != Some("Address") {
        return Err(format!("configured default locale must apply, got {label:?}"));
    }
    Ok(())
}

#[test]
fn missing_explicit_file_is_an_io_error() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let missing = dir.path().join("absent.toml");
    assert_invalid(SchemaToolConfig::load(Some(&missing)), "config io error")?;
    assert_invalid(SchemaToolConfig::discover(Some(&missing)), "config io error")
}

#[test]
fn oversized_config_is_rejected() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let padding = "#".repeat(MAX_CONFIG_FILE_SIZE + 1);
    let path = write_file(dir.path(), "big.toml", &padding)?;
    assert_invalid(SchemaToolConfig::load(Some(&path)), "config file exceeds size limit")
}

#[test]
fn config_without_table_yields_empty_table() -> TestResult {
    let config = SchemaToolConfig::default();
    let table = config.load_localization_table().map_err(|err| err.to_string())?;
    if !table.is_empty() {
        return Err("expected empty table".to_string());
    }
    Ok(())
}

#[test]
fn json_tables_parse() -> TestResult {
    let table = parse_localization_table(r#"{"en": {"Port": "Port"}, "zh": {"Port": "端口"}}"#)
        .map_err(|err| err.to_string())?;
    if table.lookup(LocaleCode::Zh, "Port") != "端口" {
        return Err("json table must parse".to_string());
    }
    Ok(())
}

#[test]
fn malformed_table_is_a_parse_error() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = write_file(dir.path(), "bad.yaml", "- just\n- a list\n")?;
    assert_invalid(read_localization_table(&path), "config parse error")
}
