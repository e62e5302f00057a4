//! Schema pipeline property-based tests.
//!
//! ## Purpose
//! These tests check the pipeline-wide guarantees over randomized inputs:
//! locale resolution is total, absent tokens pass through, compilation is
//! idempotent, malformed entries never affect siblings, and the string,
//! password, and defaulting rules always hold.
// crates/param-schema-core/tests/proptest_pipeline.rs
// ============================================================================
// Module: Schema Pipeline Property-Based Tests
// Description: Randomized checks for locale, normalization, and assembly rules.
// Purpose: Ensure per-entry rules hold for every generated entry.
// ============================================================================

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
    reason = "Test-only assertions and helpers are permitted."
)]

use param_schema_core::LocaleCode;
use param_schema_core::LocaleResolver;
use param_schema_core::LocalizationTable;
use param_schema_core::SchemaCompiler;
use param_schema_core::normalize_parameter;
use proptest::prelude::*;
use serde_json::Value;
use serde_json::json;

/// Generates a valid parameter name.
fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,15}"
}

/// Generates an arbitrary scalar default value.
fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i32>().prop_map(Value::from),
        "[A-Za-z0-9 ]{1,12}".prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
    ]
}

/// Generates a well-formed entry with a supported type.
fn entry_strategy() -> impl Strategy<Value = Value> {
    (name_strategy(), prop::sample::select(vec!["string", "integer", "text", "password"]))
        .prop_map(|(name, kind)| json!({"name": name, "type": kind}))
}

proptest! {
    #[test]
    fn unmatched_locales_fall_back_to_default(identifier in "[a-df-y][a-z_-]{0,8}") {
        prop_assert_eq!(LocaleCode::resolve(&identifier), LocaleCode::DEFAULT);
    }

    #[test]
    fn absent_tokens_localize_unchanged(token in "[A-Za-z0-9 ]{0,32}", locale in "[a-z]{0,5}") {
        let table = LocalizationTable::new().with_entry("en", "__present__", "present");
        let resolver = LocaleResolver::new(&locale, table);
        prop_assert_eq!(resolver.localize(&token), token);
    }

    #[test]
    fn compilation_is_idempotent(entries in prop::collection::vec(entry_strategy(), 0..8)) {
        let compiler = SchemaCompiler::default();
        let table = LocalizationTable::new();
        let first = compiler.compile_parameters("Same", &entries, Some("en"), &table).unwrap();
        let second = compiler.compile_parameters("Same", &entries, Some("en"), &table).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn nameless_typeless_entries_do_not_affect_siblings(
        entries in prop::collection::vec(entry_strategy(), 0..6),
        junk in prop::collection::vec(scalar_strategy(), 0..4),
        insert_at in any::<prop::sample::Index>(),
    ) {
        let compiler = SchemaCompiler::default();
        let table = LocalizationTable::new();
        let clean = compiler.compile_parameters("Clean", &entries, None, &table).unwrap();

        let mut noisy = entries.clone();
        let position = insert_at.index(noisy.len() + 1);
        let bad = json!({"label": "orphan", "default": junk});
        noisy.insert(position, bad);
        let with_noise = compiler.compile_parameters("Clean", &noisy, None, &table).unwrap();
        prop_assert_eq!(clean, with_noise);
    }

    #[test]
    fn string_entries_without_max_length_get_1024(name in name_strategy()) {
        let cleaned = normalize_parameter(&json!({"name": name, "type": "string"})).unwrap();
        prop_assert_eq!(cleaned.options.max_length, Some(1024));
    }

    #[test]
    fn password_entries_are_always_write_only(name in name_strategy(), raw in any::<Option<bool>>()) {
        let mut entry = json!({"name": name, "type": "password"});
        if let (Some(flag), Some(map)) = (raw, entry.as_object_mut()) {
            map.insert("write_only".to_string(), Value::Bool(flag));
        }
        let cleaned = normalize_parameter(&entry).unwrap();
        prop_assert!(cleaned.options.write_only);
    }

    #[test]
    fn required_defaults_become_initial(name in name_strategy(), default in scalar_strategy()) {
        let entry = json!({"name": name, "type": "text", "required": true, "default": default.clone()});
        let cleaned = normalize_parameter(&entry).unwrap();
        prop_assert_eq!(cleaned.options.initial, Some(default));
        prop_assert_eq!(cleaned.options.default, None);
    }
}
