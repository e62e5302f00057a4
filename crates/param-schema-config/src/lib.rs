// crates/param-schema-config/src/lib.rs
// ============================================================================
// Module: Param Schema Config Library
// Description: Configuration model and validation for the schema compiler.
// Purpose: Single source of truth for param-schema.toml semantics.
// Dependencies: param-schema-core, serde, toml
// ============================================================================

//! ## Overview
//! `param-schema-config` defines the configuration model for the schema
//! compiler and its command-line tool. Validation is strict and fails closed;
//! a valid configuration converts directly into a ready
//! [`param_schema_core::SchemaCompiler`].
//!
//! Security posture: config inputs are untrusted; size and path limits apply
//! to every file read.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
