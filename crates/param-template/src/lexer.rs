// crates/param-template/src/lexer.rs
// ============================================================================
// Module: Template Lexer
// Description: Splits template source into literal text and expression tokens.
// Purpose: Provide a single-pass, position-tracking scanner for the parser.
// Dependencies: crate::error
// ============================================================================

//! ## Overview
//! The lexer walks the source once. Outside delimiters it collects literal
//! text; inside `{{ ... }}` it emits expression tokens; `{# ... #}` comments
//! are dropped. String literals are scanned inside expressions so a `}}`
//! between quotes never closes the expression.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::error::TemplateSyntaxError;

// ============================================================================
// SECTION: Tokens
// ============================================================================

/// Token produced inside an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// Identifier (variable, keyword, or filter name).
    Ident(&'a str),
    /// Numeric literal, kept as written.
    Number(&'a str),
    /// String literal with escapes resolved.
    Str(String),
    /// Filter pipe `|`.
    Pipe,
    /// Closing delimiter `}}`.
    Close,
}

/// Token paired with its byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SpannedToken<'a> {
    /// Token value.
    pub(crate) token: Token<'a>,
    /// Byte offset into the source.
    pub(crate) position: usize,
}

/// Lexed unit of template source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Piece<'a> {
    /// Literal text copied verbatim.
    Literal(&'a str),
    /// Expression tokens ending with [`Token::Close`].
    Expression {
        /// Byte offset of the `{{` delimiter.
        open: usize,
        /// Tokens between the delimiters, including the closing token.
        tokens: Vec<SpannedToken<'a>>,
    },
}

// ============================================================================
// SECTION: Lexer
// ============================================================================

/// Scanner over template source.
pub(crate) struct Lexer<'a> {
    /// Source text being scanned.
    input: &'a str,
    /// Current byte offset into the input.
    offset: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer for the given source.
    pub(crate) const fn new(input: &'a str) -> Self {
        Self {
            input,
            offset: 0,
        }
    }

    /// Lexes the whole source into pieces.
    pub(crate) fn lex(&mut self) -> Result<Vec<Piece<'a>>, TemplateSyntaxError> {
        let mut pieces = Vec::new();
        let bytes = self.input.as_bytes();
        let mut literal_start = self.offset;

        while self.offset < bytes.len() {
            if bytes[self.offset] != b'{' {
                self.offset += 1;
                continue;
            }
            let open = self.offset;
            match bytes.get(open + 1) {
                Some(b'{') => {
                    push_literal(&mut pieces, &self.input[literal_start .. open]);
                    self.offset = open + 2;
                    let tokens = self.lex_expression(open)?;
                    pieces.push(Piece::Expression {
                        open,
                        tokens,
                    });
                    literal_start = self.offset;
                }
                Some(b'#') => {
                    push_literal(&mut pieces, &self.input[literal_start .. open]);
                    let Some(end) = self.input[open + 2 ..].find("#}") else {
                        return Err(TemplateSyntaxError::UnterminatedComment {
                            position: open,
                        });
                    };
                    self.offset = open + 2 + end + 2;
                    literal_start = self.offset;
                }
                Some(b'%') => {
                    return Err(TemplateSyntaxError::UnsupportedStatement {
                        position: open,
                    });
                }
                _ => {
                    self.offset += 1;
                }
            }
        }

        push_literal(&mut pieces, &self.input[literal_start ..]);
        Ok(pieces)
    }

    /// Lexes expression tokens up to and including the closing `}}`.
    fn lex_expression(&mut self, open: usize) -> Result<Vec<SpannedToken<'a>>, TemplateSyntaxError> {
        let mut tokens = Vec::new();
        let bytes = self.input.as_bytes();

        while self.offset < bytes.len() {
            let ch = bytes[self.offset];
            match ch {
                b' ' | b'\t' | b'\n' | b'\r' => {
                    self.offset += 1;
                }
                b'}' => {
                    if bytes.get(self.offset + 1) == Some(&b'}') {
                        tokens.push(SpannedToken {
                            token: Token::Close,
                            position: self.offset,
                        });
                        self.offset += 2;
                        return Ok(tokens);
                    }
                    return Err(TemplateSyntaxError::UnexpectedToken {
                        expected: "`}}`",
                        found: "}".to_string(),
                        position: self.offset,
                    });
                }
                b'|' => {
                    tokens.push(SpannedToken {
                        token: Token::Pipe,
                        position: self.offset,
                    });
                    self.offset += 1;
                }
                b'\'' | b'"' => {
                    let start = self.offset;
                    let value = self.lex_string(ch)?;
                    tokens.push(SpannedToken {
                        token: Token::Str(value),
                        position: start,
                    });
                }
                b'0' ..= b'9' => {
                    tokens.push(self.lex_number(self.offset));
                }
                b'-' if bytes.get(self.offset + 1).is_some_and(u8::is_ascii_digit) => {
                    let start = self.offset;
                    self.offset += 1;
                    tokens.push(self.lex_number(start));
                }
                b'a' ..= b'z' | b'A' ..= b'Z' | b'_' => {
                    let start = self.offset;
                    self.consume_while(|b| b.is_ascii_alphanumeric() || b == b'_');
                    tokens.push(SpannedToken {
                        token: Token::Ident(&self.input[start .. self.offset]),
                        position: start,
                    });
                }
                _ => {
                    let found = self.input[self.offset ..].chars().next().unwrap_or('?');
                    return Err(TemplateSyntaxError::UnexpectedToken {
                        expected: "literal, identifier, `|`, or `}}`",
                        found: found.to_string(),
                        position: self.offset,
                    });
                }
            }
        }

        Err(TemplateSyntaxError::UnterminatedExpression {
            position: open,
        })
    }

    /// Lexes a quoted string literal, resolving escapes.
    fn lex_string(&mut self, quote: u8) -> Result<String, TemplateSyntaxError> {
        let start = self.offset;
        let mut value = String::new();
        let mut chars = self.input[start + 1 ..].char_indices();

        while let Some((index, ch)) = chars.next() {
            if ch == char::from(quote) {
                self.offset = start + 1 + index + ch.len_utf8();
                return Ok(value);
            }
            if ch != '\\' {
                value.push(ch);
                continue;
            }
            match chars.next() {
                Some((_, 'n')) => value.push('\n'),
                Some((_, 't')) => value.push('\t'),
                Some((_, 'r')) => value.push('\r'),
                Some((_, escaped @ ('\\' | '\'' | '"'))) => value.push(escaped),
                // Unknown escapes are kept verbatim.
                Some((_, other)) => {
                    value.push('\\');
                    value.push(other);
                }
                None => break,
            }
        }

        Err(TemplateSyntaxError::UnterminatedString {
            position: start,
        })
    }

    /// Lexes a numeric literal beginning at `start` (the offset may sit past a sign).
    fn lex_number(&mut self, start: usize) -> SpannedToken<'a> {
        self.consume_while(|b| b.is_ascii_digit());
        let bytes = self.input.as_bytes();
        if bytes.get(self.offset) == Some(&b'.')
            && bytes.get(self.offset + 1).is_some_and(u8::is_ascii_digit)
        {
            self.offset += 1;
            self.consume_while(|b| b.is_ascii_digit());
        }
        SpannedToken {
            token: Token::Number(&self.input[start .. self.offset]),
            position: start,
        }
    }

    /// Advances while the condition matches the current byte.
    fn consume_while<F>(&mut self, condition: F)
    where
        F: Fn(u8) -> bool,
    {
        let bytes = self.input.as_bytes();
        while let Some(&b) = bytes.get(self.offset) {
            if condition(b) {
                self.offset += 1;
            } else {
                break;
            }
        }
    }
}

/// Appends a literal piece, skipping empty slices.
fn push_literal<'a>(pieces: &mut Vec<Piece<'a>>, text: &'a str) {
    if !text.is_empty() {
        pieces.push(Piece::Literal(text));
    }
}
