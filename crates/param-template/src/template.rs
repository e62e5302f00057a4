// crates/param-template/src/template.rs
// ============================================================================
// Module: Templates
// Description: Parsed template representation and rendering.
// Purpose: Render literal text and filtered substitution expressions.
// Dependencies: crate::{error, filters, lexer, parser}
// ============================================================================

//! ## Overview
//! A [`Template`] is parsed once against a [`FilterRegistry`] and then rendered
//! any number of times. Rendering is pure and total: literals are copied,
//! expressions are evaluated to text, and bound filters run left to right.
//!
//! ### Example
//!
//! ```
//! use param_template::FilterRegistry;
//! use param_template::RenderContext;
//! use param_template::Template;
//!
//! let filters = FilterRegistry::new().with_filter("shout", |v: &str| v.to_uppercase());
//! let template = Template::parse("label: {{ 'url' | shout }}", &filters).unwrap();
//! assert_eq!(template.render(&RenderContext::new()), "label: URL");
//! ```

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::error::TemplateSyntaxError;
use crate::filters::FilterRegistry;
use crate::lexer::Lexer;
use crate::lexer::Piece;
use crate::parser::Expression;
use crate::parser::Operand;
use crate::parser::Parser;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum template source size in bytes.
pub const MAX_TEMPLATE_BYTES: usize = 1024 * 1024;

// ============================================================================
// SECTION: Render Context
// ============================================================================

/// Variables visible to identifier operands during rendering.
///
/// # Invariants
/// - Undefined variables render as empty text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    /// Variable values keyed by identifier.
    variables: BTreeMap<String, String>,
}

impl RenderContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variable insertion.
    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts or replaces a variable.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(name.into(), value.into());
    }

    /// Returns a variable value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }
}

impl From<BTreeMap<String, String>> for RenderContext {
    fn from(variables: BTreeMap<String, String>) -> Self {
        Self {
            variables,
        }
    }
}

// ============================================================================
// SECTION: Template
// ============================================================================

/// Parsed template segment.
#[derive(Debug, Clone)]
enum Segment {
    /// Literal text.
    Literal(String),
    /// Substitution expression.
    Substitution(Expression),
}

/// Parsed template ready for rendering.
#[derive(Debug, Clone)]
pub struct Template {
    /// Segments in source order.
    segments: Vec<Segment>,
}

impl Template {
    /// Parses template source, binding filters from `filters`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateSyntaxError`] when the source exceeds the size limit,
    /// delimiters are unbalanced, an expression is malformed, or a filter is
    /// not registered.
    pub fn parse(source: &str, filters: &FilterRegistry) -> Result<Self, TemplateSyntaxError> {
        if source.len() > MAX_TEMPLATE_BYTES {
            return Err(TemplateSyntaxError::InputTooLarge {
                max_bytes: MAX_TEMPLATE_BYTES,
                actual_bytes: source.len(),
            });
        }
        let pieces = Lexer::new(source).lex()?;
        let mut segments = Vec::with_capacity(pieces.len());
        for piece in pieces {
            match piece {
                Piece::Literal(text) => match segments.last_mut() {
                    Some(Segment::Literal(previous)) => previous.push_str(text),
                    _ => segments.push(Segment::Literal(text.to_string())),
                },
                Piece::Expression {
                    open,
                    tokens,
                } => {
                    let expression = Parser::new(tokens, open, filters).parse()?;
                    segments.push(Segment::Substitution(expression));
                }
            }
        }
        Ok(Self {
            segments,
        })
    }

    /// Renders the template against `context`.
    #[must_use]
    pub fn render(&self, context: &RenderContext) -> String {
        let mut output = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => output.push_str(text),
                Segment::Substitution(expression) => {
                    output.push_str(&evaluate(expression, context));
                }
            }
        }
        output
    }

    /// Returns the number of substitution expressions in the template.
    #[must_use]
    pub fn substitution_count(&self) -> usize {
        self.segments.iter().filter(|segment| matches!(segment, Segment::Substitution(_))).count()
    }

    /// Returns the operands of every substitution in source order.
    pub fn operands(&self) -> impl Iterator<Item = &Operand> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Substitution(expression) => Some(&expression.operand),
            Segment::Literal(_) => None,
        })
    }
}

/// Parses and renders `source` in one step.
///
/// # Errors
///
/// Returns [`TemplateSyntaxError`] when parsing fails.
pub fn render_str(
    source: &str,
    filters: &FilterRegistry,
    context: &RenderContext,
) -> Result<String, TemplateSyntaxError> {
    Ok(Template::parse(source, filters)?.render(context))
}

// ============================================================================
// SECTION: Evaluation
// ============================================================================

/// Evaluates an expression: operand first, then each filter in order.
fn evaluate(expression: &Expression, context: &RenderContext) -> String {
    let value = match &expression.operand {
        Operand::Str(value) | Operand::Number(value) => value.clone(),
        Operand::Bool(true) => "True".to_string(),
        Operand::Bool(false) => "False".to_string(),
        Operand::None => String::new(),
        Operand::Variable(name) => context.get(name).unwrap_or_default().to_string(),
    };
    expression.filters.iter().fold(value, |acc, bound| (bound.filter)(&acc))
}
