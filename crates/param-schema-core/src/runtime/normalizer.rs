// crates/param-schema-core/src/runtime/normalizer.rs
// ============================================================================
// Module: Parameter Normalizer
// Description: Whitelisting, rejection, and defaulting rules for raw entries.
// Purpose: Turn untrusted parameter descriptors into cleaned parameters.
// Dependencies: crate::core, serde_json, thiserror, tracing
// ============================================================================

//! ## Overview
//! Normalization is best effort per entry. An entry that cannot be cleaned is
//! skipped and logged; it never aborts the batch or affects its siblings.
//! Rules applied to every surviving entry:
//! - only recognized keys are kept; unknown keys and wrong-shaped values drop
//!   silently;
//! - a non-null `default` on a truthy `required` entry becomes `initial`;
//! - `string` entries without a `max_length` get [`DEFAULT_STRING_MAX_LENGTH`];
//! - `password` entries are always write-only.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use crate::core::CleanedParameter;
use crate::core::FieldOptions;
use crate::core::ParameterType;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// `max_length` applied to `string` entries that do not set one.
pub const DEFAULT_STRING_MAX_LENGTH: u64 = 1024;

// ============================================================================
// SECTION: Rejections
// ============================================================================

/// Reason a raw entry was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    /// Entry is not a mapping.
    #[error("entry is not a mapping")]
    NotAMapping,
    /// Entry has neither `name` nor `type`.
    #[error("entry has neither `name` nor `type`")]
    MissingNameAndType,
    /// Entry has no `name`.
    #[error("entry has no `name`")]
    MissingName,
    /// Entry has no `type`.
    #[error("entry has no `type`")]
    MissingType,
    /// `name` is not a non-empty string.
    #[error("`name` must be a non-empty string")]
    InvalidName,
    /// `type` is not a string.
    #[error("`type` must be a string")]
    InvalidType,
    /// `type` is not a supported tag.
    #[error("unsupported type `{0}`")]
    UnsupportedType(String),
}

/// Entry skipped during batch normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// Zero-based entry index in the source sequence.
    pub index: usize,
    /// Why the entry was skipped.
    pub reason: RejectReason,
}

/// Result of normalizing a batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizationReport {
    /// Cleaned parameters in source order.
    pub parameters: Vec<CleanedParameter>,
    /// Skipped entries in source order.
    pub skipped: Vec<SkippedEntry>,
}

// ============================================================================
// SECTION: Batch Normalization
// ============================================================================

/// Normalizes a batch, dropping entries that cannot be cleaned.
#[must_use]
pub fn normalize_parameters(entries: &[Value]) -> Vec<CleanedParameter> {
    normalize_with_report(entries).parameters
}

/// Normalizes a batch and reports which entries were skipped.
#[must_use]
pub fn normalize_with_report(entries: &[Value]) -> NormalizationReport {
    let mut report = NormalizationReport::default();
    for (index, entry) in entries.iter().enumerate() {
        match normalize_parameter(entry) {
            Ok(parameter) => report.parameters.push(parameter),
            Err(reason) => {
                tracing::debug!(index, reason = %reason, "skipping parameter entry");
                report.skipped.push(SkippedEntry {
                    index,
                    reason,
                });
            }
        }
    }
    report
}

// ============================================================================
// SECTION: Entry Normalization
// ============================================================================

/// Normalizes a single raw entry.
///
/// # Errors
///
/// Returns [`RejectReason`] when the entry must be skipped.
pub fn normalize_parameter(entry: &Value) -> Result<CleanedParameter, RejectReason> {
    let Value::Object(raw) = entry else {
        return Err(RejectReason::NotAMapping);
    };
    let (name, kind) = identify(raw)?;

    let mut options = FieldOptions::default();
    for (key, value) in raw {
        if !kind.accepts_key(key) {
            continue;
        }
        apply_option(&mut options, key, value);
    }

    if options.required == Some(true)
        && let Some(default) = options.default.take()
    {
        options.initial = Some(default);
    }
    match kind {
        ParameterType::String => {
            if matches!(options.max_length, None | Some(0)) {
                options.max_length = Some(DEFAULT_STRING_MAX_LENGTH);
            }
        }
        ParameterType::Password => options.write_only = true,
        ParameterType::Integer | ParameterType::Text => {}
    }

    Ok(CleanedParameter {
        name,
        kind,
        options,
    })
}

/// Extracts and checks `name` and `type`.
fn identify(raw: &Map<String, Value>) -> Result<(String, ParameterType), RejectReason> {
    let (name, tag) = match (raw.get("name"), raw.get("type")) {
        (None, None) => return Err(RejectReason::MissingNameAndType),
        (None, Some(_)) => return Err(RejectReason::MissingName),
        (Some(_), None) => return Err(RejectReason::MissingType),
        (Some(name), Some(tag)) => (name, tag),
    };
    let name = match name {
        Value::String(name) if !name.is_empty() => name.clone(),
        _ => return Err(RejectReason::InvalidName),
    };
    let Value::String(tag) = tag else {
        return Err(RejectReason::InvalidType);
    };
    let kind = ParameterType::parse(tag).ok_or_else(|| RejectReason::UnsupportedType(tag.clone()))?;
    Ok((name, kind))
}

/// Copies one recognized key into `options`; wrong-shaped values are ignored.
fn apply_option(options: &mut FieldOptions, key: &str, value: &Value) {
    match key {
        "label" => options.label = text(value),
        "help_text" => options.help_text = text(value),
        "placeholder" => options.placeholder = text(value),
        "default" => options.default = scalar(value),
        "required" => options.required = if value.is_null() { None } else { Some(flag(value)) },
        "max_length" => options.max_length = value.as_u64(),
        "min_length" => options.min_length = value.as_u64(),
        "min_value" => options.min_value = value.as_i64(),
        "max_value" => options.max_value = value.as_i64(),
        _ => {}
    }
}

/// Accepts strings and numbers as display text.
fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Accepts non-null scalars as default values.
fn scalar(value: &Value) -> Option<Value> {
    match value {
        Value::Bool(_) | Value::Number(_) | Value::String(_) => Some(value.clone()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Reads a flag, accepting YAML 1.1 boolean words before plain truthiness.
fn flag(value: &Value) -> bool {
    match value {
        Value::String(text) => yaml_bool(text).unwrap_or_else(|| truthy(value)),
        _ => truthy(value),
    }
}

/// Maps `y`/`yes`/`on`/`true` and `n`/`no`/`off`/`false` (any case) to a bool.
fn yaml_bool(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "on" | "true" => Some(true),
        "n" | "no" | "off" | "false" => Some(false),
        _ => None,
    }
}

/// Truthiness: false, zero, and empty containers are false.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|number| number != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(
        clippy::expect_used,
        clippy::unwrap_used,
        reason = "Test assertions use expect/unwrap for clarity."
    )]

    use serde_json::json;

    use super::DEFAULT_STRING_MAX_LENGTH;
    use super::RejectReason;
    use super::normalize_parameter;
    use super::normalize_with_report;
    use crate::core::ParameterType;

    #[test]
    fn unknown_keys_are_dropped() {
        let cleaned = normalize_parameter(&json!({
            "name": "port",
            "type": "integer",
            "min_value": 1,
            "max_length": 5,
            "widget": "slider",
        }));
        let cleaned = cleaned.unwrap();
        assert_eq!(cleaned.kind, ParameterType::Integer);
        assert_eq!(cleaned.options.min_value, Some(1));
        assert_eq!(cleaned.options.max_length, None);
    }

    #[test]
    fn wrong_shaped_values_drop_only_that_key() {
        let cleaned = normalize_parameter(&json!({
            "name": "url",
            "type": "string",
            "max_length": "long",
            "label": ["not", "text"],
        }))
        .unwrap();
        assert_eq!(cleaned.options.max_length, Some(DEFAULT_STRING_MAX_LENGTH));
        assert_eq!(cleaned.options.label, None);
    }

    #[test]
    fn identification_failures_are_distinguished() {
        assert_eq!(normalize_parameter(&json!("url")), Err(RejectReason::NotAMapping));
        assert_eq!(normalize_parameter(&json!({})), Err(RejectReason::MissingNameAndType));
        assert_eq!(normalize_parameter(&json!({"type": "integer"})), Err(RejectReason::MissingName));
        assert_eq!(normalize_parameter(&json!({"name": "x"})), Err(RejectReason::MissingType));
        assert_eq!(
            normalize_parameter(&json!({"name": "", "type": "string"})),
            Err(RejectReason::InvalidName)
        );
        assert_eq!(
            normalize_parameter(&json!({"name": "x", "type": 3})),
            Err(RejectReason::InvalidType)
        );
        assert_eq!(
            normalize_parameter(&json!({"name": "x", "type": "bogus"})),
            Err(RejectReason::UnsupportedType("bogus".to_string()))
        );
    }

    #[test]
    fn required_default_becomes_initial() {
        let cleaned = normalize_parameter(&json!({
            "name": "user",
            "type": "string",
            "required": true,
            "default": "root",
        }))
        .unwrap();
        assert_eq!(cleaned.options.initial, Some(json!("root")));
        assert_eq!(cleaned.options.default, None);
    }

    #[test]
    fn optional_default_stays_default() {
        let cleaned = normalize_parameter(&json!({
            "name": "user",
            "type": "string",
            "required": 0,
            "default": "root",
        }))
        .unwrap();
        assert_eq!(cleaned.options.required, Some(false));
        assert_eq!(cleaned.options.default, Some(json!("root")));
        assert_eq!(cleaned.options.initial, None);
    }

    #[test]
    fn yaml_boolean_words_set_required() {
        for (word, expected) in
            [("no", false), ("Off", false), ("N", false), ("YES", true), ("on", true), ("y", true)]
        {
            let cleaned = normalize_parameter(&json!({
                "name": "user",
                "type": "string",
                "required": word,
                "default": "root",
            }))
            .unwrap();
            assert_eq!(cleaned.options.required, Some(expected), "required: {word}");
        }
        let other = normalize_parameter(&json!({"name": "u", "type": "text", "required": "maybe"}))
            .unwrap();
        assert_eq!(other.options.required, Some(true));
    }

    #[test]
    fn password_is_write_only_and_unbounded() {
        let cleaned = normalize_parameter(&json!({
            "name": "password",
            "type": "password",
            "write_only": false,
        }))
        .unwrap();
        assert!(cleaned.options.write_only);
        assert_eq!(cleaned.options.max_length, None);
    }

    #[test]
    fn zero_max_length_on_string_is_replaced() {
        let cleaned =
            normalize_parameter(&json!({"name": "u", "type": "string", "max_length": 0})).unwrap();
        assert_eq!(cleaned.options.max_length, Some(DEFAULT_STRING_MAX_LENGTH));
    }

    #[test]
    fn report_lists_skipped_indexes() {
        let report = normalize_with_report(&[
            json!({"name": "a", "type": "string"}),
            json!({"type": "integer"}),
            json!({"name": "b", "type": "text"}),
        ]);
        let names: Vec<&str> = report.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].index, 1);
    }
}
