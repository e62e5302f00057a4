// crates/param-schema-cli/src/lib.rs
// ============================================================================
// Module: Param Schema CLI Library
// Description: Shared helpers for the param-schema command-line interface.
// Purpose: Provide reusable components (i18n) for the CLI binary and tests.
// Dependencies: Standard library.
// ============================================================================

//! ## Overview
//! This library module houses shared CLI utilities, including the localized
//! message catalog. The binary entry point (`src/main.rs`) imports these
//! helpers so all user-facing output stays consistent.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Internationalization helpers and message catalog.
pub mod i18n;
