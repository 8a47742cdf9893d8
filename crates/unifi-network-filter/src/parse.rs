// crates/unifi-network-filter/src/parse.rs
// ============================================================================
// Module: Filter Expression Parser
// Description: Lexer and recursive-descent parser for the filter language.
// Purpose: Turn a filter string into an expression AST with structured,
//          position-carrying diagnostics.
// Dependencies: crate::expr, crate::literal, bigdecimal, uuid
// ============================================================================

//! ## Overview
//!
//! Grammar (informal):
//!
//! ```text
//! expr          := compound | not_expr | property_expr
//! compound      := ("and"|"or") "(" expr {"," expr} ")"
//! not_expr      := "not" "(" expr ")"
//! property_expr := path "." function "(" [literal {"," literal}] ")"
//! path          := identifier {"." identifier}
//! literal       := string | number | timestamp | boolean | uuid
//! ```
//!
//! String literals are single-quoted with `''` as the escape for an embedded
//! quote; the lexer unescapes on read. Numbers parse to exact decimals.
//! Timestamps accept the date-only and the RFC 3339 date-time forms and keep
//! them distinct. UUIDs are unquoted 8-4-4-4-12 hexadecimal. Booleans are
//! exactly `true`/`false`.
//!
//! Argument arity is enforced syntactically here; field existence and type
//! legality are the validator's job. On failure the parser returns a
//! [`ParseError`] with the byte offset and an expected-token description, and
//! no AST is produced.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::str::FromStr;

use bigdecimal::BigDecimal;
use thiserror::Error;
use uuid::Uuid;

use crate::expr::Arity;
use crate::expr::Expression;
use crate::expr::FilterFunction;
use crate::expr::PropertyExpression;
use crate::expr::PropertyPath;
use crate::literal::Literal;
use crate::literal::Timestamp;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum allowed filter input size in bytes.
const MAX_FILTER_INPUT_BYTES: usize = 64 * 1024;
/// Maximum supported nesting depth for filter expressions.
const MAX_FILTER_NESTING: usize = 32;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors that can occur while parsing a filter string.
///
/// # Invariants
/// - `position` fields are byte offsets into the original input.
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input was empty or contained only whitespace.
    #[error("filter input is empty")]
    EmptyInput,
    /// Input exceeded the configured size limit.
    #[error("filter input exceeds size limit: {actual_bytes} bytes (max {max_bytes})")]
    InputTooLarge {
        /// Maximum allowed bytes.
        max_bytes: usize,
        /// Actual input length in bytes.
        actual_bytes: usize,
    },
    /// Input exceeded the configured nesting depth.
    #[error("filter nesting exceeds limit: depth {actual_depth} (max {max_depth}) at {position}")]
    NestingTooDeep {
        /// Maximum allowed nesting depth.
        max_depth: usize,
        /// Actual nesting depth when the error occurred.
        actual_depth: usize,
        /// Byte offset in the original input.
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
    /// A string literal was not closed before end of input.
    #[error("unterminated string literal starting at {position}")]
    UnterminatedString {
        /// Byte offset of the opening quote.
        position: usize,
    },
    /// Filter function name was not recognized.
    #[error("unknown filter function `{name}` at {position}")]
    UnknownFunction {
        /// The unknown function identifier.
        name: String,
        /// Byte offset in the original input.
        position: usize,
    },
    /// Property path failed identifier validation.
    #[error("invalid property path `{raw}` at {position}")]
    InvalidPath {
        /// The raw path text.
        raw: String,
        /// Byte offset in the original input.
        position: usize,
    },
    /// Numeric literal failed to parse exactly.
    #[error("invalid number `{raw}` at {position}")]
    InvalidNumber {
        /// The raw numeric text.
        raw: String,
        /// Byte offset in the original input.
        position: usize,
    },
    /// UUID-shaped literal failed to parse.
    #[error("invalid UUID `{raw}` at {position}")]
    InvalidUuid {
        /// The raw UUID text.
        raw: String,
        /// Byte offset in the original input.
        position: usize,
    },
    /// Timestamp-shaped literal failed to parse.
    #[error("invalid timestamp `{raw}` at {position}")]
    InvalidTimestamp {
        /// The raw timestamp text.
        raw: String,
        /// Byte offset in the original input.
        position: usize,
    },
    /// Bare token matched none of the literal kinds.
    #[error("unrecognized literal `{raw}` at {position}")]
    InvalidLiteral {
        /// The raw literal text.
        raw: String,
        /// Byte offset in the original input.
        position: usize,
    },
    /// Function received the wrong number of arguments.
    #[error("`{function}` takes {expected} argument(s), found {found} at {position}")]
    WrongArity {
        /// Wire name of the function.
        function: &'static str,
        /// Required argument count.
        expected: Arity,
        /// Actual argument count.
        found: usize,
        /// Byte offset of the function name.
        position: usize,
    },
    /// Unexpected trailing input after a complete expression.
    #[error("unexpected trailing input at {position}")]
    TrailingInput {
        /// Byte offset where unexpected input begins.
        position: usize,
    },
}

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Parses a filter string into an expression tree.
///
/// # Errors
///
/// Returns [`ParseError`] for malformed tokens, unbalanced parentheses,
/// unknown function names, syntactic arity violations, unterminated strings,
/// or trailing input. Field and type legality are checked separately by the
/// validator.
pub fn parse_filter(input: &str) -> Result<Expression, ParseError> {
    if input.len() > MAX_FILTER_INPUT_BYTES {
        return Err(ParseError::InputTooLarge {
            max_bytes: MAX_FILTER_INPUT_BYTES,
            actual_bytes: input.len(),
        });
    }
    let tokens = Lexer::new(input).lex()?;

    let mut parser = Parser::new(tokens);
    let expression = parser.parse_expression()?;
    parser.expect_eof()?;
    Ok(expression)
}

// ============================================================================
// SECTION: Lexer
// ============================================================================

/// Lexer token produced from the filter input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token<'a> {
    /// Maximal run of bare literal/identifier characters, including dots.
    Bare(&'a str),
    /// Single-quoted string with escapes already removed.
    Quoted(String),
    /// Left parenthesis.
    LParen,
    /// Right parenthesis.
    RParen,
    /// Comma separator.
    Comma,
    /// End-of-input marker.
    Eof,
}

/// Token paired with its byte offset.
#[derive(Debug, Clone)]
struct SpannedToken<'a> {
    /// Token value.
    token: Token<'a>,
    /// Byte offset into the input.
    position: usize,
}

/// Lexer for the filter language.
struct Lexer<'a> {
    /// Source input being tokenized.
    input: &'a str,
    /// Current byte offset into the input.
    offset: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    const fn new(input: &'a str) -> Self {
        Self {
            input,
            offset: 0,
        }
    }

    /// Lexes the input into a sequence of tokens.
    fn lex(&mut self) -> Result<Vec<SpannedToken<'a>>, ParseError> {
        let mut tokens = Vec::new();
        let bytes = self.input.as_bytes();

        while self.offset < bytes.len() {
            let ch = bytes[self.offset];
            match ch {
                b' ' | b'\t' | b'\n' | b'\r' => {
                    self.offset += 1;
                }
                b'(' => {
                    tokens.push(self.simple(Token::LParen));
                    self.offset += 1;
                }
                b')' => {
                    tokens.push(self.simple(Token::RParen));
                    self.offset += 1;
                }
                b',' => {
                    tokens.push(self.simple(Token::Comma));
                    self.offset += 1;
                }
                b'\'' => {
                    let token = self.lex_quoted(bytes)?;
                    tokens.push(token);
                }
                _ if is_bare_byte(ch) => {
                    let start = self.offset;
                    self.consume_while(bytes, is_bare_byte);
                    tokens.push(SpannedToken {
                        token: Token::Bare(&self.input[start .. self.offset]),
                        position: start,
                    });
                }
                _ => {
                    return Err(ParseError::UnexpectedToken {
                        expected: "literal, identifier, or punctuation",
                        found: char::from(ch).to_string(),
                        position: self.offset,
                    });
                }
            }
        }

        if tokens.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        tokens.push(SpannedToken {
            token: Token::Eof,
            position: self.offset,
        });
        Ok(tokens)
    }

    /// Lexes a single-quoted string, unescaping doubled quotes.
    fn lex_quoted(&mut self, bytes: &[u8]) -> Result<SpannedToken<'a>, ParseError> {
        let start = self.offset;
        self.offset += 1;
        let mut text = String::new();

        loop {
            let Some(&ch) = bytes.get(self.offset) else {
                return Err(ParseError::UnterminatedString {
                    position: start,
                });
            };
            if ch == b'\'' {
                // A doubled quote is an escaped quote; a lone quote closes.
                if bytes.get(self.offset + 1) == Some(&b'\'') {
                    text.push('\'');
                    self.offset += 2;
                    continue;
                }
                self.offset += 1;
                return Ok(SpannedToken {
                    token: Token::Quoted(text),
                    position: start,
                });
            }
            let rest = &self.input[self.offset ..];
            let Some(first) = rest.chars().next() else {
                return Err(ParseError::UnterminatedString {
                    position: start,
                });
            };
            text.push(first);
            self.offset += first.len_utf8();
        }
    }

    /// Builds a token at the current offset.
    const fn simple(&self, token: Token<'a>) -> SpannedToken<'a> {
        SpannedToken {
            token,
            position: self.offset,
        }
    }

    /// Advances while the condition matches the current byte.
    fn consume_while<F>(&mut self, bytes: &[u8], condition: F)
    where
        F: Fn(u8) -> bool,
    {
        while let Some(&b) = bytes.get(self.offset) {
            if condition(b) {
                self.offset += 1;
            } else {
                break;
            }
        }
    }
}

/// Returns whether a byte may appear in a bare token.
///
/// The set covers identifiers and paths (`a-z`, `0-9`, `_`, `.`), signed
/// decimals (`+`, `-`, `.`), UUIDs (`-`), and timestamps (`-`, `:`, `+`,
/// `.`, `T`, `Z`).
const fn is_bare_byte(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, b'_' | b'.' | b'+' | b'-' | b':')
}

// ============================================================================
// SECTION: Parser
// ============================================================================

/// Recursive-descent parser for the filter language.
struct Parser<'input> {
    /// Token stream with source positions.
    tokens: Vec<SpannedToken<'input>>,
    /// Current token index.
    index: usize,
    /// Current nesting depth for parenthesized expressions.
    nesting: usize,
}

impl<'input> Parser<'input> {
    /// Creates a parser over the token stream.
    const fn new(tokens: Vec<SpannedToken<'input>>) -> Self {
        Self {
            tokens,
            index: 0,
            nesting: 0,
        }
    }

    /// Parses a full expression.
    fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        let SpannedToken {
            token,
            position,
        } = self.current().clone();

        let Token::Bare(head) = token else {
            return Err(ParseError::UnexpectedToken {
                expected: "`and`, `or`, `not`, or a property path",
                found: self.describe_current(),
                position,
            });
        };
        self.advance();

        match head {
            "and" => self.parse_compound(position, Expression::and),
            "or" => self.parse_compound(position, Expression::or),
            "not" => self.parse_not(position),
            _ => self.parse_property(head, position),
        }
    }

    /// Parses the argument list of an `and`/`or` compound.
    fn parse_compound(
        &mut self,
        head_pos: usize,
        build: fn(Vec<Expression>) -> Result<Expression, crate::expr::ExpressionError>,
    ) -> Result<Expression, ParseError> {
        self.expect(&Token::LParen, "`(`")?;
        self.with_nesting(head_pos, |parser| {
            if parser.check(&Token::RParen) {
                return Err(ParseError::UnexpectedToken {
                    expected: "at least one child expression",
                    found: ")".to_string(),
                    position: parser.current().position,
                });
            }

            let mut children = Vec::new();
            loop {
                children.push(parser.parse_expression()?);
                if parser.matches(&Token::Comma) {
                    continue;
                }
                parser.expect(&Token::RParen, "`)` after child expressions")?;
                break;
            }

            build(children).map_err(|_| ParseError::UnexpectedToken {
                expected: "at least one child expression",
                found: ")".to_string(),
                position: head_pos,
            })
        })
    }

    /// Parses a `not(expr)` negation.
    fn parse_not(&mut self, head_pos: usize) -> Result<Expression, ParseError> {
        self.expect(&Token::LParen, "`(`")?;
        self.with_nesting(head_pos, |parser| {
            let child = parser.parse_expression()?;
            parser.expect(&Token::RParen, "`)` after `not(...)`")?;
            Ok(Expression::negate(child))
        })
    }

    /// Parses a property expression from its combined `path.function` head.
    fn parse_property(&mut self, head: &str, head_pos: usize) -> Result<Expression, ParseError> {
        let Some((path_raw, function_raw)) = head.rsplit_once('.') else {
            return Err(ParseError::UnexpectedToken {
                expected: "`path.function(...)`",
                found: head.to_string(),
                position: head_pos,
            });
        };
        let function_pos = head_pos + path_raw.len() + 1;

        let Some(function) = FilterFunction::from_name(function_raw) else {
            return Err(ParseError::UnknownFunction {
                name: function_raw.to_string(),
                position: function_pos,
            });
        };

        let path = PropertyPath::parse(path_raw).map_err(|_| ParseError::InvalidPath {
            raw: path_raw.to_string(),
            position: head_pos,
        })?;

        self.expect(&Token::LParen, "`(`")?;
        let arguments =
            self.with_nesting(head_pos, |parser| parser.parse_literal_arguments())?;

        if !function.arity().accepts(arguments.len()) {
            return Err(ParseError::WrongArity {
                function: function.name(),
                expected: function.arity(),
                found: arguments.len(),
                position: function_pos,
            });
        }

        Ok(Expression::Property(PropertyExpression::new(path, function, arguments)))
    }

    /// Parses a possibly-empty comma-separated literal argument list.
    fn parse_literal_arguments(&mut self) -> Result<Vec<Literal>, ParseError> {
        let mut arguments = Vec::new();
        if self.matches(&Token::RParen) {
            return Ok(arguments);
        }

        loop {
            arguments.push(self.parse_literal()?);
            if self.matches(&Token::Comma) {
                continue;
            }
            self.expect(&Token::RParen, "`)` after arguments")?;
            break;
        }
        Ok(arguments)
    }

    /// Parses a single literal argument.
    fn parse_literal(&mut self) -> Result<Literal, ParseError> {
        let SpannedToken {
            token,
            position,
        } = self.current().clone();

        match token {
            Token::Quoted(text) => {
                self.advance();
                Ok(Literal::String(text))
            }
            Token::Bare(raw) => {
                self.advance();
                classify_bare_literal(raw, position)
            }
            Token::LParen | Token::RParen | Token::Comma | Token::Eof => {
                Err(ParseError::UnexpectedToken {
                    expected: "a literal value",
                    found: self.describe_current(),
                    position,
                })
            }
        }
    }

    /// Runs a parser step while enforcing the nesting limit.
    fn with_nesting<T>(
        &mut self,
        position: usize,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let next_depth = self.nesting + 1;
        if next_depth > MAX_FILTER_NESTING {
            return Err(ParseError::NestingTooDeep {
                max_depth: MAX_FILTER_NESTING,
                actual_depth: next_depth,
                position,
            });
        }
        self.nesting = next_depth;
        let result = f(self);
        self.nesting = self.nesting.saturating_sub(1);
        result
    }

    /// Consumes the expected token or returns an error.
    fn expect(&mut self, token: &Token<'_>, expected: &'static str) -> Result<(), ParseError> {
        if std::mem::discriminant(&self.current().token) == std::mem::discriminant(token) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::UnexpectedToken {
                expected,
                found: self.describe_current(),
                position: self.current().position,
            })
        }
    }

    /// Ensures the parser is at end-of-input.
    fn expect_eof(&self) -> Result<(), ParseError> {
        if matches!(self.current().token, Token::Eof) {
            Ok(())
        } else {
            Err(ParseError::TrailingInput {
                position: self.current().position,
            })
        }
    }

    /// Consumes the token if it matches the expected kind.
    fn matches(&mut self, kind: &Token<'_>) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Returns whether the current token matches the expected kind.
    fn check(&self, kind: &Token<'_>) -> bool {
        std::mem::discriminant(&self.current().token) == std::mem::discriminant(kind)
    }

    /// Returns the current token.
    fn current(&self) -> &SpannedToken<'input> {
        debug_assert!(self.index < self.tokens.len(), "parser index out of bounds");
        &self.tokens[self.index]
    }

    /// Advances to the next token.
    fn advance(&mut self) {
        if self.index < self.tokens.len() - 1 {
            self.index += 1;
        }
    }

    /// Formats the current token for diagnostics.
    fn describe_current(&self) -> String {
        match &self.current().token {
            Token::Bare(raw) => (*raw).to_string(),
            Token::Quoted(text) => format!("'{text}'"),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::Comma => ",".to_string(),
            Token::Eof => "end of input".to_string(),
        }
    }
}

// ============================================================================
// SECTION: Literal Classification
// ============================================================================

/// Classifies an unquoted token into its literal kind and parses it.
///
/// Classification is shape-first: a token that looks like a UUID or a
/// timestamp must parse as one, rather than falling through to a weaker kind.
fn classify_bare_literal(raw: &str, position: usize) -> Result<Literal, ParseError> {
    match raw {
        "true" => return Ok(Literal::Boolean(true)),
        "false" => return Ok(Literal::Boolean(false)),
        _ => {}
    }

    if has_uuid_shape(raw) {
        return Uuid::parse_str(raw).map(Literal::Uuid).map_err(|_| ParseError::InvalidUuid {
            raw: raw.to_string(),
            position,
        });
    }

    if has_timestamp_shape(raw) {
        return Timestamp::parse(raw).map(Literal::Timestamp).map_err(|_| {
            ParseError::InvalidTimestamp {
                raw: raw.to_string(),
                position,
            }
        });
    }

    if has_number_shape(raw) {
        return BigDecimal::from_str(raw).map(Literal::Number).map_err(|_| {
            ParseError::InvalidNumber {
                raw: raw.to_string(),
                position,
            }
        });
    }

    Err(ParseError::InvalidLiteral {
        raw: raw.to_string(),
        position,
    })
}

/// Returns whether a token has the 8-4-4-4-12 UUID grouping.
fn has_uuid_shape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    if bytes.len() != 36 {
        return false;
    }
    bytes.iter().enumerate().all(|(index, &b)| {
        if matches!(index, 8 | 13 | 18 | 23) {
            b == b'-'
        } else {
            b.is_ascii_hexdigit()
        }
    })
}

/// Returns whether a token has a `YYYY-MM-DD` prefix.
fn has_timestamp_shape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() >= 10
        && bytes[.. 4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-'
        && bytes[5 .. 7].iter().all(u8::is_ascii_digit)
        && bytes[7] == b'-'
        && bytes[8 .. 10].iter().all(u8::is_ascii_digit)
}

/// Returns whether a token matches the strict decimal grammar: an optional
/// sign, digits, and an optional fractional part. Exponent notation is not
/// part of the filter language.
fn has_number_shape(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    let (integral, fraction) = match unsigned.split_once('.') {
        Some((integral, fraction)) => (integral, Some(fraction)),
        None => (unsigned, None),
    };
    if integral.is_empty() || !integral.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    match fraction {
        Some(fraction) => !fraction.is_empty() && fraction.bytes().all(|b| b.is_ascii_digit()),
        None => true,
    }
}
