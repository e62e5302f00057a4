// crates/param-template/src/parser.rs
// ============================================================================
// Module: Expression Parser
// Description: Turns expression tokens into operands with bound filter chains.
// Purpose: Validate expression structure and resolve filter names at parse time.
// Dependencies: crate::{error, filters, lexer}
// ============================================================================

//! ## Overview
//! Expressions follow a deliberately small grammar:
//!
//! ```text
//! expression := operand ( '|' filter_name )* '}}'
//! operand    := string | number | 'true' | 'false' | 'none' | identifier
//! ```
//!
//! Filter names are looked up in the [`FilterRegistry`] while parsing, so a
//! parsed template carries its filter functions and renders without a registry.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use crate::error::TemplateSyntaxError;
use crate::filters::FilterFn;
use crate::filters::FilterRegistry;
use crate::lexer::SpannedToken;
use crate::lexer::Token;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum number of filters applied by a single expression.
pub const MAX_FILTER_CHAIN: usize = 16;

// ============================================================================
// SECTION: Syntax Tree
// ============================================================================

/// Value an expression evaluates before filters apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// Quoted string literal.
    Str(String),
    /// Numeric literal, rendered as written.
    Number(String),
    /// Boolean literal.
    Bool(bool),
    /// The `none` literal; renders as empty text.
    None,
    /// Variable looked up in the render context.
    Variable(String),
}

/// Filter resolved from the registry at parse time.
#[derive(Clone)]
pub(crate) struct BoundFilter {
    /// Registered filter name.
    pub(crate) name: String,
    /// Filter function.
    pub(crate) filter: FilterFn,
}

impl fmt::Debug for BoundFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Parsed substitution expression.
#[derive(Debug, Clone)]
pub(crate) struct Expression {
    /// Operand evaluated first.
    pub(crate) operand: Operand,
    /// Filters applied left to right.
    pub(crate) filters: Vec<BoundFilter>,
}

// ============================================================================
// SECTION: Parser
// ============================================================================

/// Recursive-descent parser for a single expression.
pub(crate) struct Parser<'input, 'registry> {
    /// Token stream with source positions, ending with [`Token::Close`].
    tokens: Vec<SpannedToken<'input>>,
    /// Current token index.
    index: usize,
    /// Byte offset of the opening delimiter.
    open: usize,
    /// Registry used to bind filter names.
    registry: &'registry FilterRegistry,
}

impl<'input, 'registry> Parser<'input, 'registry> {
    /// Creates a parser over one expression's tokens.
    pub(crate) const fn new(
        tokens: Vec<SpannedToken<'input>>,
        open: usize,
        registry: &'registry FilterRegistry,
    ) -> Self {
        Self {
            tokens,
            index: 0,
            open,
            registry,
        }
    }

    /// Parses the full expression, including the closing delimiter.
    pub(crate) fn parse(mut self) -> Result<Expression, TemplateSyntaxError> {
        let operand = self.parse_operand()?;
        let mut filters = Vec::new();

        loop {
            let Some(current) = self.current() else {
                return Err(TemplateSyntaxError::UnterminatedExpression {
                    position: self.open,
                });
            };
            match &current.token {
                Token::Close => break,
                Token::Pipe => {
                    self.index += 1;
                    let filter = self.parse_filter_name()?;
                    if filters.len() == MAX_FILTER_CHAIN {
                        return Err(TemplateSyntaxError::FilterChainTooLong {
                            max: MAX_FILTER_CHAIN,
                            actual: filters.len() + 1,
                            position: current.position,
                        });
                    }
                    filters.push(filter);
                }
                other => {
                    return Err(TemplateSyntaxError::UnexpectedToken {
                        expected: "`|` or `}}`",
                        found: describe(other),
                        position: current.position,
                    });
                }
            }
        }

        Ok(Expression {
            operand,
            filters,
        })
    }

    /// Parses the leading operand.
    fn parse_operand(&mut self) -> Result<Operand, TemplateSyntaxError> {
        let Some(current) = self.current() else {
            return Err(TemplateSyntaxError::UnterminatedExpression {
                position: self.open,
            });
        };
        let operand = match &current.token {
            Token::Str(value) => Operand::Str(value.clone()),
            Token::Number(raw) => Operand::Number((*raw).to_string()),
            Token::Ident("true" | "True") => Operand::Bool(true),
            Token::Ident("false" | "False") => Operand::Bool(false),
            Token::Ident("none" | "None") => Operand::None,
            Token::Ident(name) => Operand::Variable((*name).to_string()),
            Token::Close => {
                return Err(TemplateSyntaxError::EmptyExpression {
                    position: self.open,
                });
            }
            Token::Pipe => {
                return Err(TemplateSyntaxError::UnexpectedToken {
                    expected: "literal or identifier",
                    found: "|".to_string(),
                    position: current.position,
                });
            }
        };
        self.index += 1;
        Ok(operand)
    }

    /// Parses a filter name following a pipe and binds it from the registry.
    fn parse_filter_name(&mut self) -> Result<BoundFilter, TemplateSyntaxError> {
        let Some(current) = self.current() else {
            return Err(TemplateSyntaxError::UnterminatedExpression {
                position: self.open,
            });
        };
        let Token::Ident(name) = &current.token else {
            return Err(TemplateSyntaxError::UnexpectedToken {
                expected: "filter name",
                found: describe(&current.token),
                position: current.position,
            });
        };
        let filter = self.registry.get(name).cloned().ok_or_else(|| {
            TemplateSyntaxError::UnknownFilter {
                name: (*name).to_string(),
                position: current.position,
            }
        })?;
        let bound = BoundFilter {
            name: (*name).to_string(),
            filter,
        };
        self.index += 1;
        Ok(bound)
    }

    /// Returns the current token, if any remain.
    fn current(&self) -> Option<SpannedToken<'input>> {
        self.tokens.get(self.index).cloned()
    }
}

/// Formats a token for diagnostics.
fn describe(token: &Token<'_>) -> String {
    match token {
        Token::Ident(name) => (*name).to_string(),
        Token::Number(raw) => (*raw).to_string(),
        Token::Str(value) => format!("'{value}'"),
        Token::Pipe => "|".to_string(),
        Token::Close => "}}".to_string(),
    }
}
