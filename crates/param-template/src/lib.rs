// crates/param-template/src/lib.rs
// ============================================================================
// Module: Param Template Root
// Description: Public API surface for the template language.
// Purpose: Wire together the lexer, expression parser, filter registry, and
//          renderer used to localize parameter documents.
// Dependencies: crate::{error, filters, lexer, parser, template}
// ============================================================================

//! ## Overview
//! `param-template` is a small, closed template language: literal text with
//! `{{ operand | filter | filter }}` substitutions and `{# comments #}`. It is
//! not a scripting sandbox; the only behavior available to a template is the
//! set of pure string filters the caller registers.
//!
//! Security posture: template sources are semi-trusted configuration; size and
//! filter-chain limits apply, and malformed sources fail with
//! [`TemplateSyntaxError`] before any rendering happens.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod error;
pub mod filters;
mod lexer;
mod parser;
pub mod template;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use error::TemplateSyntaxError;
pub use filters::FilterFn;
pub use filters::FilterRegistry;
pub use filters::title_case;
pub use parser::MAX_FILTER_CHAIN;
pub use parser::Operand;
pub use template::MAX_TEMPLATE_BYTES;
pub use template::RenderContext;
pub use template::Template;
pub use template::render_str;
