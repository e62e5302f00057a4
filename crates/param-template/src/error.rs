// crates/param-template/src/error.rs
// ============================================================================
// Module: Template Errors
// Description: Structured syntax errors raised while parsing template text.
// Purpose: Give authors precise, position-tagged diagnostics for broken templates.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Parsing is the only fallible step of the template language. Rendering a
//! parsed [`Template`](crate::Template) is total, so every failure a caller can
//! observe is a [`TemplateSyntaxError`]. Positions are byte offsets into the
//! original source text.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors produced while lexing or parsing template source.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - `position` fields are byte offsets into the source passed to the parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateSyntaxError {
    /// Source exceeded the configured size limit.
    #[error("template exceeds size limit: {actual_bytes} bytes (max {max_bytes})")]
    InputTooLarge {
        /// Maximum allowed bytes.
        max_bytes: usize,
        /// Actual source length in bytes.
        actual_bytes: usize,
    },
    /// A `{{` was opened but never closed with `}}`.
    #[error("unterminated expression opened at {position}")]
    UnterminatedExpression {
        /// Byte offset of the opening delimiter.
        position: usize,
    },
    /// A `{#` was opened but never closed with `#}`.
    #[error("unterminated comment opened at {position}")]
    UnterminatedComment {
        /// Byte offset of the opening delimiter.
        position: usize,
    },
    /// A string literal inside an expression was never closed.
    #[error("unterminated string literal starting at {position}")]
    UnterminatedString {
        /// Byte offset of the opening quote.
        position: usize,
    },
    /// An expression contained no operand (`{{ }}`).
    #[error("empty expression at {position}")]
    EmptyExpression {
        /// Byte offset of the opening delimiter.
        position: usize,
    },
    /// Unexpected token encountered during parsing.
    #[error("unexpected token `{found}` at {position}, expected {expected}")]
    UnexpectedToken {
        /// Human-friendly expectation summary.
        expected: &'static str,
        /// The token that was actually seen.
        found: String,
        /// Byte offset in the original input.
        position: usize,
    },
    /// A filter name is not present in the filter registry.
    #[error("unknown filter `{name}` at {position}")]
    UnknownFilter {
        /// The unresolved filter name.
        name: String,
        /// Byte offset of the filter name.
        position: usize,
    },
    /// A `{% ... %}` statement block was found; only expressions are supported.
    #[error("statement blocks are not supported (opened at {position})")]
    UnsupportedStatement {
        /// Byte offset of the opening delimiter.
        position: usize,
    },
    /// An expression applied more filters than allowed.
    #[error("filter chain exceeds limit: {actual} filters (max {max}) at {position}")]
    FilterChainTooLong {
        /// Maximum filters per expression.
        max: usize,
        /// Filters seen when the limit tripped.
        actual: usize,
        /// Byte offset of the offending filter.
        position: usize,
    },
}

impl TemplateSyntaxError {
    /// Returns the byte offset associated with the error, when one exists.
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        match self {
            Self::InputTooLarge {
                ..
            } => None,
            Self::UnterminatedExpression {
                position,
            }
            | Self::UnterminatedComment {
                position,
            }
            | Self::UnterminatedString {
                position,
            }
            | Self::EmptyExpression {
                position,
            }
            | Self::UnexpectedToken {
                position,
                ..
            }
            | Self::UnknownFilter {
                position,
                ..
            }
            | Self::UnsupportedStatement {
                position,
            }
            | Self::FilterChainTooLong {
                position,
                ..
            } => Some(*position),
        }
    }
}
