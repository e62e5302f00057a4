// crates/param-schema-core/src/core/field.rs
// ============================================================================
// Module: Fields
// Description: Typed input fields produced from cleaned parameters.
// Purpose: Validate and describe one named input value.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A [`Field`] is the executable form of one cleaned parameter. It validates a
//! single input value with form-framework semantics: missing values are
//! checked against `required` and `default`, `null` is rejected, character
//! fields trim and bound their input, integer fields coerce integral input and
//! bound it.
//!
//! Security posture: input values are untrusted; validation never panics and
//! every rejection is reported as a [`FieldError`] with a stable code.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::parameter::FieldOptions;
use crate::core::parameter::ParameterType;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum length of a string coerced into an integer.
pub const MAX_INTEGER_STRING_LENGTH: usize = 1000;

// ============================================================================
// SECTION: Field Kinds
// ============================================================================

/// Presentation style of a character field.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CharStyle {
    /// Single-line input.
    Plain,
    /// Multi-line input.
    Text,
    /// Masked input.
    Password,
}

impl CharStyle {
    /// Returns the input style label used in descriptions.
    #[must_use]
    pub const fn input_type(self) -> &'static str {
        match self {
            Self::Plain => "text",
            Self::Text => "textarea",
            Self::Password => "password",
        }
    }
}

/// Validation behavior of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Character input bounded by character count.
    Char {
        /// Presentation style.
        style: CharStyle,
        /// Maximum character count.
        max_length: Option<u64>,
        /// Minimum character count.
        min_length: Option<u64>,
    },
    /// Integer input bounded by value.
    Integer {
        /// Minimum accepted value.
        min_value: Option<i64>,
        /// Maximum accepted value.
        max_value: Option<i64>,
    },
}

// ============================================================================
// SECTION: Field Errors
// ============================================================================

/// Rejection reported for one field value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Value is missing and the field is required.
    #[error("This field is required.")]
    Required,
    /// Value is `null`.
    #[error("This field may not be null.")]
    Null,
    /// Value is empty after trimming.
    #[error("This field may not be blank.")]
    Blank,
    /// Value cannot be read as a string.
    #[error("Not a valid string.")]
    InvalidString,
    /// Value has too many characters.
    #[error("Ensure this field has no more than {max} characters.")]
    MaxLength {
        /// Configured maximum.
        max: u64,
    },
    /// Value has too few characters.
    #[error("Ensure this field has at least {min} characters.")]
    MinLength {
        /// Configured minimum.
        min: u64,
    },
    /// Value cannot be read as an integer.
    #[error("A valid integer is required.")]
    InvalidInteger,
    /// Integer string exceeds [`MAX_INTEGER_STRING_LENGTH`].
    #[error("String value too large.")]
    IntegerStringTooLong,
    /// Value is above the configured maximum.
    #[error("Ensure this value is less than or equal to {max}.")]
    MaxValue {
        /// Configured maximum.
        max: i64,
    },
    /// Value is below the configured minimum.
    #[error("Ensure this value is greater than or equal to {min}.")]
    MinValue {
        /// Configured minimum.
        min: i64,
    },
}

impl FieldError {
    /// Returns the stable machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Null => "null",
            Self::Blank => "blank",
            Self::InvalidString | Self::InvalidInteger => "invalid",
            Self::MaxLength {
                ..
            } => "max_length",
            Self::MinLength {
                ..
            } => "min_length",
            Self::IntegerStringTooLong => "max_string_length",
            Self::MaxValue {
                ..
            } => "max_value",
            Self::MinValue {
                ..
            } => "min_value",
        }
    }
}

// ============================================================================
// SECTION: Field
// ============================================================================

/// Named, typed input field.
///
/// # Invariants
/// - `kind` agrees with the type tag the field was constructed for.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Field name.
    name: String,
    /// Validation behavior.
    kind: FieldKind,
    /// Declared options.
    options: FieldOptions,
}

impl Field {
    /// Creates a field from its parts.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind, options: FieldOptions) -> Self {
        Self {
            name: name.into(),
            kind,
            options,
        }
    }

    /// Creates a character field whose bounds come from `options`.
    #[must_use]
    pub fn char(name: &str, style: CharStyle, options: &FieldOptions) -> Self {
        let kind = FieldKind::Char {
            style,
            max_length: options.max_length,
            min_length: options.min_length,
        };
        Self::new(name, kind, options.clone())
    }

    /// Creates an integer field whose bounds come from `options`.
    #[must_use]
    pub fn integer(name: &str, options: &FieldOptions) -> Self {
        let kind = FieldKind::Integer {
            min_value: options.min_value,
            max_value: options.max_value,
        };
        Self::new(name, kind, options.clone())
    }

    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the validation behavior.
    #[must_use]
    pub const fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Returns the declared options.
    #[must_use]
    pub const fn options(&self) -> &FieldOptions {
        &self.options
    }

    /// Returns the parameter type this field implements.
    #[must_use]
    pub const fn parameter_type(&self) -> ParameterType {
        match self.kind {
            FieldKind::Char {
                style: CharStyle::Plain,
                ..
            } => ParameterType::String,
            FieldKind::Char {
                style: CharStyle::Text,
                ..
            } => ParameterType::Text,
            FieldKind::Char {
                style: CharStyle::Password,
                ..
            } => ParameterType::Password,
            FieldKind::Integer {
                ..
            } => ParameterType::Integer,
        }
    }

    /// Returns true when input must supply this field.
    ///
    /// An explicit `required` wins; otherwise a field is required exactly
    /// when it has no default.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        match self.options.required {
            Some(required) => required,
            None => self.options.default.is_none(),
        }
    }

    /// Returns true when the field is never represented back to callers.
    #[must_use]
    pub const fn is_write_only(&self) -> bool {
        self.options.write_only
    }

    /// Validates one input value.
    ///
    /// Returns `Ok(None)` when the value is absent and may be omitted.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError`] when the value is rejected.
    pub fn validate(&self, value: Option<&Value>) -> Result<Option<Value>, FieldError> {
        let Some(value) = value else {
            if self.is_required() {
                return Err(FieldError::Required);
            }
            return Ok(self.options.default.clone());
        };
        if value.is_null() {
            return Err(FieldError::Null);
        }
        match &self.kind {
            FieldKind::Char {
                max_length,
                min_length,
                ..
            } => validate_char(value, *max_length, *min_length).map(|text| Some(Value::String(text))),
            FieldKind::Integer {
                min_value,
                max_value,
            } => validate_integer(value, *min_value, *max_value).map(|number| Some(Value::from(number))),
        }
    }

    /// Returns the serializable description of this field.
    #[must_use]
    pub fn describe(&self) -> FieldDescription {
        let input_type = match &self.kind {
            FieldKind::Char {
                style,
                ..
            } => Some(style.input_type()),
            FieldKind::Integer {
                ..
            } => None,
        };
        FieldDescription {
            name: self.name.clone(),
            kind: self.parameter_type(),
            required: self.is_required(),
            write_only: self.is_write_only(),
            input_type,
            label: self.options.label.clone(),
            help_text: self.options.help_text.clone(),
            placeholder: self.options.placeholder.clone(),
            initial: self.options.initial.clone(),
            default: self.options.default.clone(),
            max_length: self.options.max_length,
            min_length: self.options.min_length,
            min_value: self.options.min_value,
            max_value: self.options.max_value,
        }
    }
}

// ============================================================================
// SECTION: Description
// ============================================================================

/// Serializable description of one field's declared options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescription {
    /// Field name.
    pub name: String,
    /// Parameter type tag.
    #[serde(rename = "type")]
    pub kind: ParameterType,
    /// Whether input must supply the field.
    pub required: bool,
    /// Whether the field is withheld from representations.
    pub write_only: bool,
    /// Input style for character fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_type: Option<&'static str>,
    /// Display label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Help text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    /// Input placeholder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Pre-filled value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial: Option<Value>,
    /// Value used when input omits the field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Maximum character count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    /// Minimum character count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    /// Minimum integer value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<i64>,
    /// Maximum integer value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<i64>,
}

// ============================================================================
// SECTION: Validation Helpers
// ============================================================================

/// Validates character input and returns the trimmed text.
fn validate_char(
    value: &Value,
    max_length: Option<u64>,
    min_length: Option<u64>,
) -> Result<String, FieldError> {
    let text = match value {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) => number.to_string(),
        _ => return Err(FieldError::InvalidString),
    };
    if text.is_empty() {
        return Err(FieldError::Blank);
    }
    let count = u64::try_from(text.chars().count()).unwrap_or(u64::MAX);
    if let Some(max) = max_length
        && count > max
    {
        return Err(FieldError::MaxLength {
            max,
        });
    }
    if let Some(min) = min_length
        && count < min
    {
        return Err(FieldError::MinLength {
            min,
        });
    }
    Ok(text)
}

/// Validates integer input and returns the coerced value.
fn validate_integer(
    value: &Value,
    min_value: Option<i64>,
    max_value: Option<i64>,
) -> Result<i64, FieldError> {
    let number = match value {
        Value::Number(number) => coerce_number(number)?,
        Value::String(text) => coerce_integer_string(text)?,
        _ => return Err(FieldError::InvalidInteger),
    };
    if let Some(max) = max_value
        && number > max
    {
        return Err(FieldError::MaxValue {
            max,
        });
    }
    if let Some(min) = min_value
        && number < min
    {
        return Err(FieldError::MinValue {
            min,
        });
    }
    Ok(number)
}

/// Accepts JSON integers and integral floats within `i64` range.
fn coerce_number(number: &serde_json::Number) -> Result<i64, FieldError> {
    if let Some(value) = number.as_i64() {
        return Ok(value);
    }
    coerce_integer_string(&number.to_string())
}

/// Parses an integer string; a trailing `.0…` fraction is accepted.
fn coerce_integer_string(text: &str) -> Result<i64, FieldError> {
    if text.len() > MAX_INTEGER_STRING_LENGTH {
        return Err(FieldError::IntegerStringTooLong);
    }
    let trimmed = text.trim();
    let integral = match trimmed.split_once('.') {
        Some((whole, fraction)) if fraction.chars().all(|ch| ch == '0') => whole,
        Some(_) => return Err(FieldError::InvalidInteger),
        None => trimmed,
    };
    integral.parse::<i64>().map_err(|_| FieldError::InvalidInteger)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::CharStyle;
    use super::Field;
    use super::FieldError;
    use crate::core::parameter::FieldOptions;

    fn options() -> FieldOptions {
        FieldOptions::default()
    }

    #[test]
    fn missing_value_without_default_is_required() {
        let field = Field::char("url", CharStyle::Plain, &options());
        assert_eq!(field.validate(None), Err(FieldError::Required));
    }

    #[test]
    fn missing_value_uses_default_when_present() {
        let field = Field::integer(
            "port",
            &FieldOptions {
                default: Some(json!(22)),
                ..options()
            },
        );
        assert!(!field.is_required());
        assert_eq!(field.validate(None), Ok(Some(json!(22))));
    }

    #[test]
    fn optional_field_without_default_is_omitted() {
        let field = Field::char(
            "note",
            CharStyle::Text,
            &FieldOptions {
                required: Some(false),
                ..options()
            },
        );
        assert_eq!(field.validate(None), Ok(None));
    }

    #[test]
    fn char_field_trims_and_bounds_length() {
        let field = Field::char(
            "code",
            CharStyle::Plain,
            &FieldOptions {
                max_length: Some(3),
                min_length: Some(2),
                ..options()
            },
        );
        assert_eq!(field.validate(Some(&json!("  ab "))), Ok(Some(json!("ab"))));
        assert_eq!(field.validate(Some(&json!("abcd"))), Err(FieldError::MaxLength { max: 3 }));
        assert_eq!(field.validate(Some(&json!("a"))), Err(FieldError::MinLength { min: 2 }));
        assert_eq!(field.validate(Some(&json!("   "))), Err(FieldError::Blank));
        assert_eq!(field.validate(Some(&json!(true))), Err(FieldError::InvalidString));
        assert_eq!(field.validate(Some(&json!(12))), Ok(Some(json!("12"))));
    }

    #[test]
    fn char_length_counts_characters_not_bytes() {
        let field = Field::char(
            "name",
            CharStyle::Plain,
            &FieldOptions {
                max_length: Some(3),
                ..options()
            },
        );
        assert_eq!(field.validate(Some(&json!("用户名"))), Ok(Some(json!("用户名"))));
    }

    #[test]
    fn integer_field_coerces_integral_input() {
        let field = Field::integer(
            "port",
            &FieldOptions {
                min_value: Some(1),
                max_value: Some(65535),
                ..options()
            },
        );
        assert_eq!(field.validate(Some(&json!(22))), Ok(Some(json!(22))));
        assert_eq!(field.validate(Some(&json!(" 8080 "))), Ok(Some(json!(8080))));
        assert_eq!(field.validate(Some(&json!("443.00"))), Ok(Some(json!(443))));
        assert_eq!(field.validate(Some(&json!(80.0))), Ok(Some(json!(80))));
        assert_eq!(field.validate(Some(&json!(2.5))), Err(FieldError::InvalidInteger));
        assert_eq!(field.validate(Some(&json!("abc"))), Err(FieldError::InvalidInteger));
        assert_eq!(field.validate(Some(&json!(0))), Err(FieldError::MinValue { min: 1 }));
        assert_eq!(field.validate(Some(&json!(70000))), Err(FieldError::MaxValue { max: 65535 }));
    }

    #[test]
    fn null_is_rejected() {
        let field = Field::integer("port", &options());
        assert_eq!(field.validate(Some(&json!(null))), Err(FieldError::Null));
        assert_eq!(FieldError::Null.code(), "null");
    }
}
