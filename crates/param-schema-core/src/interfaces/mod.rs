// crates/param-schema-core/src/interfaces/mod.rs
// ============================================================================
// Module: Param Schema Interfaces
// Description: Document decoding and schema-provider contracts.
// Purpose: Define the seams between the compiler and its collaborators.
// Dependencies: crate::{core, runtime}, serde_json, serde_yaml, thiserror
// ============================================================================

//! ## Overview
//! The compiler never parses structured text itself; it calls a
//! [`DocumentDecoder`]. Components that own a parameter document expose it
//! through [`SchemaProvider`], an explicit capability replacing any lookup by
//! naming convention.
//!
//! Security posture: decoded documents are untrusted; decoders fail closed
//! with [`DocumentParseError`] on anything but a sequence of entries.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use thiserror::Error;

use crate::core::CompiledSchema;
use crate::core::LocalizationTable;
use crate::core::SchemaName;
use crate::runtime::CompileError;
use crate::runtime::CompileRequest;
use crate::runtime::SchemaCompiler;

// ============================================================================
// SECTION: Document Decoding
// ============================================================================

/// Structured-document decoding errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentParseError {
    /// Text is not well-formed structured data.
    #[error("malformed document: {message}")]
    Malformed {
        /// Decoder message.
        message: String,
        /// One-based line of the failure, when known.
        line: Option<usize>,
        /// One-based column of the failure, when known.
        column: Option<usize>,
    },
    /// Document root is not a sequence.
    #[error("document root must be a sequence of parameter entries, found {found}")]
    NotASequence {
        /// Kind of the root node that was found.
        found: &'static str,
    },
    /// An entry cannot be represented as a JSON value.
    #[error("entry {index} cannot be represented: {message}")]
    UnrepresentableEntry {
        /// Zero-based entry index.
        index: usize,
        /// Conversion message.
        message: String,
    },
}

/// Decodes rendered text into an ordered sequence of raw entries.
pub trait DocumentDecoder {
    /// Decodes `text`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentParseError`] when the text is not a well-formed
    /// sequence.
    fn decode(&self, text: &str) -> Result<Vec<Value>, DocumentParseError>;
}

/// YAML decoder; JSON documents decode too since JSON is valid YAML.
///
/// # Invariants
/// - An empty or `null` document decodes to zero entries.
/// - Entry order is preserved.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlDocumentDecoder;

impl DocumentDecoder for YamlDocumentDecoder {
    fn decode(&self, text: &str) -> Result<Vec<Value>, DocumentParseError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let root: serde_yaml::Value = serde_yaml::from_str(text).map_err(|err| {
            let location = err.location();
            DocumentParseError::Malformed {
                message: err.to_string(),
                line: location.as_ref().map(serde_yaml::Location::line),
                column: location.as_ref().map(serde_yaml::Location::column),
            }
        })?;
        let entries = match root {
            serde_yaml::Value::Null => return Ok(Vec::new()),
            serde_yaml::Value::Sequence(entries) => entries,
            other => {
                return Err(DocumentParseError::NotASequence {
                    found: yaml_kind(&other),
                });
            }
        };
        entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                serde_json::to_value(entry).map_err(|err| DocumentParseError::UnrepresentableEntry {
                    index,
                    message: err.to_string(),
                })
            })
            .collect()
    }
}

/// Returns a label for a YAML node kind.
const fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "boolean",
        serde_yaml::Value::Number(_) => "number",
        serde_yaml::Value::String(_) => "string",
        serde_yaml::Value::Sequence(_) => "sequence",
        serde_yaml::Value::Mapping(_) => "mapping",
        serde_yaml::Value::Tagged(_) => "tagged value",
    }
}

// ============================================================================
// SECTION: Schema Providers
// ============================================================================

/// Component that owns a parameter document and can produce its schema.
pub trait SchemaProvider {
    /// Returns the name the compiled schema carries.
    fn schema_name(&self) -> SchemaName;

    /// Returns the raw, unrendered parameter document.
    fn parameter_document(&self) -> &str;

    /// Returns the translation table used while rendering.
    fn localization(&self) -> &LocalizationTable;

    /// Compiles this provider's document for `locale`.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] when the document cannot be compiled.
    fn compile_schema(
        &self,
        compiler: &SchemaCompiler,
        locale: Option<&str>,
    ) -> Result<CompiledSchema, CompileError> {
        let mut request = CompileRequest::new(self.schema_name(), self.parameter_document())
            .with_table(self.localization().clone());
        if let Some(locale) = locale {
            request = request.with_locale(locale);
        }
        compiler.compile(&request)
    }
}

/// Prefix applied to packaged application schema names.
pub const APPLICATION_SCHEMA_PREFIX: &str = "RemoteApp";

/// Suffix applied to packaged application schema names.
pub const APPLICATION_SCHEMA_SUFFIX: &str = "Schema";

/// Packaged application definition held entirely in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticSchemaProvider {
    /// Application identifier; drives the schema name.
    pub name: String,
    /// Display label.
    pub label: String,
    /// Raw parameter document.
    pub document: String,
    /// Translation table for the document.
    pub table: LocalizationTable,
}

impl StaticSchemaProvider {
    /// Creates a provider with an empty translation table.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        document: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            document: document.into(),
            table: LocalizationTable::new(),
        }
    }

    /// Replaces the translation table.
    #[must_use]
    pub fn with_table(mut self, table: LocalizationTable) -> Self {
        self.table = table;
        self
    }
}

impl SchemaProvider for StaticSchemaProvider {
    fn schema_name(&self) -> SchemaName {
        SchemaName::for_label(APPLICATION_SCHEMA_PREFIX, &self.name, APPLICATION_SCHEMA_SUFFIX)
    }

    fn parameter_document(&self) -> &str {
        &self.document
    }

    fn localization(&self) -> &LocalizationTable {
        &self.table
    }
}
