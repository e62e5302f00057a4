// crates/param-schema-core/src/runtime/mod.rs
// ============================================================================
// Module: Param Schema Runtime
// Description: Normalizer, field registry, and schema compiler.
// Purpose: Turn parameter documents into compiled schemas.
// Dependencies: crate::{core, interfaces}, param-template
// ============================================================================

//! ## Overview
//! Runtime modules hold the pipeline logic. Every entry point, text or
//! structured, runs through the same normalizer and assembler so both paths
//! produce identical schemas for identical entries.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod compiler;
pub mod normalizer;
pub mod registry;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use compiler::CompileError;
pub use compiler::CompileRequest;
pub use compiler::CompilerLimits;
pub use compiler::DEFAULT_MAX_PARAMETERS;
pub use compiler::SchemaCompiler;
pub use compiler::compile_schema;
pub use normalizer::DEFAULT_STRING_MAX_LENGTH;
pub use normalizer::NormalizationReport;
pub use normalizer::RejectReason;
pub use normalizer::SkippedEntry;
pub use normalizer::normalize_parameter;
pub use normalizer::normalize_parameters;
pub use normalizer::normalize_with_report;
pub use registry::FieldConstructor;
pub use registry::FieldRegistry;
pub use registry::FieldSpec;
pub use registry::FieldTypeNotFoundError;
