// crates/param-schema-core/src/lib.rs
// ============================================================================
// Module: Param Schema Core Library
// Description: Public API surface for parameter-schema compilation.
// Purpose: Expose core types, interfaces, and the compiler.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! `param-schema-core` compiles a localized parameter document into a named,
//! ordered, validating schema. Documents are rendered through the
//! `param-template` language with an `i18n` locale filter, decoded into raw
//! entries, normalized best effort, and assembled from a fixed field registry.
//!
//! ```
//! use param_schema_core::LocalizationTable;
//! use param_schema_core::compile_schema;
//!
//! let table = LocalizationTable::new().with_entry("en", "URL", "Address");
//! let document = "- name: url\n  type: string\n  label: \"{{ 'URL' | i18n }}\"\n";
//! let schema = compile_schema("RemoteAppBrowserSchema", document, &table, Some("en"))?;
//! assert_eq!(schema.field_names().collect::<Vec<_>>(), vec!["url"]);
//! # Ok::<(), param_schema_core::CompileError>(())
//! ```

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use interfaces::APPLICATION_SCHEMA_PREFIX;
pub use interfaces::APPLICATION_SCHEMA_SUFFIX;
pub use interfaces::DocumentDecoder;
pub use interfaces::DocumentParseError;
pub use interfaces::SchemaProvider;
pub use interfaces::StaticSchemaProvider;
pub use interfaces::YamlDocumentDecoder;
pub use runtime::CompileError;
pub use runtime::CompileRequest;
pub use runtime::CompilerLimits;
pub use runtime::FieldRegistry;
pub use runtime::FieldSpec;
pub use runtime::FieldTypeNotFoundError;
pub use runtime::RejectReason;
pub use runtime::SchemaCompiler;
pub use runtime::compile_schema;
pub use runtime::normalize_parameter;
pub use runtime::normalize_parameters;
