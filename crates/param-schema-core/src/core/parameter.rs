// crates/param-schema-core/src/core/parameter.rs
// ============================================================================
// Module: Parameter Model
// Description: Supported parameter types, cleaned parameters, and schema names.
// Purpose: Define the validated shapes produced by normalization.
// Dependencies: param-template, serde, serde_json
// ============================================================================

//! ## Overview
//! A raw parameter descriptor is an untrusted mapping. Normalization turns it
//! into a [`CleanedParameter`]: a name, a [`ParameterType`] from the closed
//! supported set, and a typed [`FieldOptions`] bag holding only recognized
//! options.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use param_template::title_case;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Parameter Types
// ============================================================================

/// Supported parameter type tags.
///
/// # Invariants
/// - Variants are stable; each maps 1:1 to a field spec in the standard registry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    /// Single-line string.
    String,
    /// Signed integer.
    Integer,
    /// Multi-line text.
    Text,
    /// Secret string; never echoed back.
    Password,
}

/// Every supported parameter type, in declaration order.
pub const PARAMETER_TYPES: &[ParameterType] =
    &[ParameterType::String, ParameterType::Integer, ParameterType::Text, ParameterType::Password];

/// Keys recognized for every parameter type.
pub const COMMON_KEYS: &[&str] = &["name", "label", "type", "default", "required", "help_text"];

impl ParameterType {
    /// Returns the canonical type tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Text => "text",
            Self::Password => "password",
        }
    }

    /// Parses an exact type tag.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        PARAMETER_TYPES.iter().copied().find(|kind| kind.as_str() == tag)
    }

    /// Returns the type-specific option keys accepted for this type.
    #[must_use]
    pub const fn option_keys(self) -> &'static [&'static str] {
        match self {
            Self::String | Self::Text | Self::Password => {
                &["max_length", "min_length", "placeholder"]
            }
            Self::Integer => &["min_value", "max_value"],
        }
    }

    /// Returns true when `key` is recognized for this type.
    #[must_use]
    pub fn accepts_key(self, key: &str) -> bool {
        COMMON_KEYS.contains(&key) || self.option_keys().contains(&key)
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Cleaned Parameters
// ============================================================================

/// Field-constructor options retained after normalization.
///
/// # Invariants
/// - `default` and `initial` are never both set by the normalizer.
/// - `label` and `help_text` are already rendered plain text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldOptions {
    /// Explicit `required` flag, after truthiness coercion.
    pub required: Option<bool>,
    /// Pre-filled value shown to the user.
    pub initial: Option<Value>,
    /// Value used when input omits the field.
    pub default: Option<Value>,
    /// Maximum character count.
    pub max_length: Option<u64>,
    /// Minimum character count.
    pub min_length: Option<u64>,
    /// Minimum integer value.
    pub min_value: Option<i64>,
    /// Maximum integer value.
    pub max_value: Option<i64>,
    /// Field accepted on input but never represented on output.
    pub write_only: bool,
    /// Display label.
    pub label: Option<String>,
    /// Help text.
    pub help_text: Option<String>,
    /// Input placeholder.
    pub placeholder: Option<String>,
}

/// Normalized parameter ready for field construction.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedParameter {
    /// Parameter name (non-empty).
    pub name: String,
    /// Supported type tag.
    pub kind: ParameterType,
    /// Recognized options.
    pub options: FieldOptions,
}

// ============================================================================
// SECTION: Schema Names
// ============================================================================

/// Name tag carried by a compiled schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaName(String);

impl SchemaName {
    /// Creates a schema name as given.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Derives a name from a caller label: `prefix + Title(label) + suffix`.
    ///
    /// ```
    /// use param_schema_core::SchemaName;
    ///
    /// let name = SchemaName::for_label("RemoteApp", "chrome", "Schema");
    /// assert_eq!(name.as_str(), "RemoteAppChromeSchema");
    /// ```
    #[must_use]
    pub fn for_label(prefix: &str, label: &str, suffix: &str) -> Self {
        Self(format!("{prefix}{}{suffix}", title_case(label)))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SchemaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for SchemaName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SchemaName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
