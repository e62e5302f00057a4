// crates/param-schema-core/src/core/mod.rs
// ============================================================================
// Module: Param Schema Core Types
// Description: Locale, parameter, field, and compiled-schema types.
// Purpose: Provide the stable value types produced and consumed by compilation.
// Dependencies: param-template, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Core types describe what a compilation consumes (locale codes, translation
//! tables) and what it produces (cleaned parameters, fields, compiled schemas).
//! They carry no pipeline logic beyond validating a single input value.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod field;
pub mod locale;
pub mod parameter;
pub mod schema;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use field::CharStyle;
pub use field::Field;
pub use field::FieldDescription;
pub use field::FieldError;
pub use field::FieldKind;
pub use field::MAX_INTEGER_STRING_LENGTH;
pub use locale::LOCALE_FILTER;
pub use locale::LocaleCode;
pub use locale::LocaleResolver;
pub use locale::LocalizationTable;
pub use locale::SUPPORTED_LOCALES;
pub use parameter::COMMON_KEYS;
pub use parameter::CleanedParameter;
pub use parameter::FieldOptions;
pub use parameter::PARAMETER_TYPES;
pub use parameter::ParameterType;
pub use parameter::SchemaName;
pub use schema::CompiledSchema;
pub use schema::FieldErrorDetail;
pub use schema::SchemaDescription;
pub use schema::ValidatedData;
pub use schema::ValidationErrors;
