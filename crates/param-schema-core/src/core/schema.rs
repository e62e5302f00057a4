// crates/param-schema-core/src/core/schema.rs
// ============================================================================
// Module: Compiled Schema
// Description: Named, ordered field collection with validation and description.
// Purpose: Provide the caller-facing result of one compilation.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A [`CompiledSchema`] is an immutable value: a [`SchemaName`] plus an ordered
//! list of `(name, Field)` pairs. It validates whole input objects, represents
//! validated data back to callers without write-only fields, and describes its
//! declared options in a serializable form.
//!
//! ## Invariants
//! - Field names are unique and keep the order they were assembled in.
//! - A schema never changes after assembly; callers may share it freely.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use crate::core::field::Field;
use crate::core::field::FieldDescription;
use crate::core::field::FieldError;
use crate::core::parameter::SchemaName;

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Named, ordered collection of validating fields.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledSchema {
    /// Schema name tag.
    name: SchemaName,
    /// Fields in declaration order.
    fields: Vec<(String, Field)>,
}

impl CompiledSchema {
    /// Creates a schema from already de-duplicated fields.
    #[must_use]
    pub(crate) const fn new(name: SchemaName, fields: Vec<(String, Field)>) -> Self {
        Self {
            name,
            fields,
        }
    }

    /// Returns the schema name.
    #[must_use]
    pub const fn name(&self) -> &SchemaName {
        &self.name
    }

    /// Returns field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Returns fields in order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().map(|(_, field)| field)
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|(candidate, _)| candidate == name).map(|(_, field)| field)
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true when the schema has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validates an input object against every field.
    ///
    /// Unknown input keys are ignored. All fields are checked so callers see
    /// every error at once.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] when the input is not an object or any
    /// field rejects its value.
    pub fn validate(&self, input: &Value) -> Result<ValidatedData, ValidationErrors> {
        let object = match input {
            Value::Object(object) => object,
            Value::Null => {
                return Err(ValidationErrors::non_field("null", "No data provided".to_string()));
            }
            other => {
                return Err(ValidationErrors::non_field(
                    "invalid",
                    format!("Invalid data. Expected a dictionary, but got {}.", json_type(other)),
                ));
            }
        };
        let mut data = Map::new();
        let mut errors = ValidationErrors::default();
        for (name, field) in &self.fields {
            match field.validate(object.get(name)) {
                Ok(Some(value)) => {
                    data.insert(name.clone(), value);
                }
                Ok(None) => {}
                Err(error) => errors.push_field(name, &error),
            }
        }
        if errors.is_empty() { Ok(ValidatedData(data)) } else { Err(errors) }
    }

    /// Represents validated data for output, omitting write-only fields.
    #[must_use]
    pub fn represent(&self, data: &ValidatedData) -> Map<String, Value> {
        self.fields
            .iter()
            .filter(|(_, field)| !field.is_write_only())
            .filter_map(|(name, _)| data.get(name).map(|value| (name.clone(), value.clone())))
            .collect()
    }

    /// Describes the schema and every field's declared options.
    #[must_use]
    pub fn describe(&self) -> SchemaDescription {
        SchemaDescription {
            name: self.name.clone(),
            fields: self.fields().map(Field::describe).collect(),
        }
    }
}

/// Returns the JSON type label used in non-field errors.
const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// SECTION: Validated Data
// ============================================================================

/// Ordered, validated field values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidatedData(Map<String, Value>);

impl ValidatedData {
    /// Returns the value stored for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Returns the underlying map.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consumes the data and returns the underlying map.
    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    /// Returns the number of validated values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when no values were validated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ============================================================================
// SECTION: Validation Errors
// ============================================================================

/// One reported error: stable code plus human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldErrorDetail {
    /// Machine-readable code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

/// Collected validation failures for one input object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[error(
    "input failed validation: {} field error(s), {} non-field error(s)",
    .field_errors.len(),
    .non_field_errors.len()
)]
pub struct ValidationErrors {
    /// Errors keyed by field name.
    pub field_errors: BTreeMap<String, Vec<FieldErrorDetail>>,
    /// Errors about the input as a whole.
    pub non_field_errors: Vec<FieldErrorDetail>,
}

impl ValidationErrors {
    /// Builds a single non-field error.
    fn non_field(code: &str, message: String) -> Self {
        Self {
            field_errors: BTreeMap::new(),
            non_field_errors: vec![FieldErrorDetail {
                code: code.to_string(),
                message,
            }],
        }
    }

    /// Records a field error.
    fn push_field(&mut self, name: &str, error: &FieldError) {
        self.field_errors.entry(name.to_string()).or_default().push(FieldErrorDetail {
            code: error.code().to_string(),
            message: error.to_string(),
        });
    }

    /// Returns true when nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.field_errors.is_empty() && self.non_field_errors.is_empty()
    }

    /// Returns the error codes recorded for `name`.
    pub fn codes_for<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a str> + use<'a> {
        self.field_errors
            .get(name)
            .into_iter()
            .flat_map(|details| details.iter().map(|detail| detail.code.as_str()))
    }
}

// ============================================================================
// SECTION: Description
// ============================================================================

/// Serializable description of a compiled schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaDescription {
    /// Schema name.
    pub name: SchemaName,
    /// Field descriptions in order.
    pub fields: Vec<FieldDescription>,
}
