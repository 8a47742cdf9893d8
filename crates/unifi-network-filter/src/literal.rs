// crates/unifi-network-filter/src/literal.rs
// ============================================================================
// Module: Filter Literal Type System
// Description: Typed literal values for the filter-expression language.
// Purpose: Classify, parse, and render the five literal kinds with exact
//          internal representations.
// Dependencies: bigdecimal, time, uuid
// ============================================================================

//! ## Overview
//! The filter language carries five literal kinds: STRING, NUMBER, TIMESTAMP,
//! BOOLEAN, and UUID. Literals are immutable once constructed and hold exact
//! internal representations: numbers are arbitrary-precision decimals (never
//! binary floats, since values are compared for equality against server-held
//! integers and decimals), timestamps preserve the distinction between a
//! date-only form and a full date-time form so round-trips do not alter
//! representation, and strings hold unescaped text.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use bigdecimal::BigDecimal;
use serde::Deserialize;
use serde::Serialize;
use time::Date;
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use uuid::Uuid;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Format description for the date-only timestamp form (`YYYY-MM-DD`).
const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

// ============================================================================
// SECTION: Literal Kinds
// ============================================================================

/// Classification of a filter literal.
///
/// # Invariants
/// - Variants are stable for schema typing and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LiteralKind {
    /// Single-quoted text.
    String,
    /// Exact decimal number.
    Number,
    /// ISO-8601 date or date-time.
    Timestamp,
    /// `true` or `false`.
    Boolean,
    /// Unquoted 8-4-4-4-12 hexadecimal UUID.
    Uuid,
}

impl LiteralKind {
    /// Returns a stable label for diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Number => "NUMBER",
            Self::Timestamp => "TIMESTAMP",
            Self::Boolean => "BOOLEAN",
            Self::Uuid => "UUID",
        }
    }
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Timestamps
// ============================================================================

/// A timestamp literal in one of its two accepted forms.
///
/// # Invariants
/// - A date-only literal is never coerced to midnight-with-timezone; the two
///   forms serialize back to their original shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    /// Date-only form (`YYYY-MM-DD`).
    Date(Date),
    /// Full RFC 3339 date-time with `Z` or numeric offset.
    DateTime(OffsetDateTime),
}

impl Timestamp {
    /// Parses a timestamp from its textual filter form.
    ///
    /// A ten-byte input is treated as the date-only form; anything longer must
    /// be a full RFC 3339 date-time with an explicit offset.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampError::Malformed`] when neither form parses.
    pub fn parse(raw: &str) -> Result<Self, TimestampError> {
        if raw.len() == 10 {
            return Date::parse(raw, DATE_FORMAT).map(Self::Date).map_err(|_| {
                TimestampError::Malformed {
                    raw: raw.to_string(),
                }
            });
        }
        OffsetDateTime::parse(raw, &Rfc3339).map(Self::DateTime).map_err(|_| {
            TimestampError::Malformed {
                raw: raw.to_string(),
            }
        })
    }

    /// Renders the timestamp in the exact shape it was parsed from.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampError::Unrepresentable`] for directly constructed
    /// values outside the formattable RFC 3339 range (years beyond 9999 or
    /// sub-minute offsets). Values produced by [`Timestamp::parse`] always
    /// render successfully.
    pub fn render(&self) -> Result<String, TimestampError> {
        match self {
            Self::Date(date) => {
                date.format(DATE_FORMAT).map_err(|_| TimestampError::Unrepresentable)
            }
            Self::DateTime(instant) => {
                instant.format(&Rfc3339).map_err(|_| TimestampError::Unrepresentable)
            }
        }
    }
}

/// Timestamp parse and render failures.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimestampError {
    /// Input matched neither the date-only nor the date-time form.
    #[error("malformed timestamp `{raw}`")]
    Malformed {
        /// The raw timestamp text.
        raw: String,
    },
    /// Value cannot be rendered in its canonical textual form.
    #[error("timestamp is outside the representable range")]
    Unrepresentable,
}

// ============================================================================
// SECTION: Literal Values
// ============================================================================

/// A typed literal value inside a filter expression.
///
/// # Invariants
/// - Immutable once constructed.
/// - `String` holds unescaped text; escaping is applied only at serialization
///   and removed only at parse time.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Unescaped string text.
    String(String),
    /// Exact decimal number.
    Number(BigDecimal),
    /// Date or date-time instant.
    Timestamp(Timestamp),
    /// Boolean value.
    Boolean(bool),
    /// 128-bit UUID.
    Uuid(Uuid),
}

impl Literal {
    /// Returns the kind of this literal.
    #[must_use]
    pub const fn kind(&self) -> LiteralKind {
        match self {
            Self::String(_) => LiteralKind::String,
            Self::Number(_) => LiteralKind::Number,
            Self::Timestamp(_) => LiteralKind::Timestamp,
            Self::Boolean(_) => LiteralKind::Boolean,
            Self::Uuid(_) => LiteralKind::Uuid,
        }
    }

    /// Builds a string literal from unescaped text.
    #[must_use]
    pub fn string(text: impl Into<String>) -> Self {
        Self::String(text.into())
    }

    /// Builds a boolean literal.
    #[must_use]
    pub const fn boolean(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// Escapes a string literal body by doubling embedded single quotes.
///
/// The inverse transformation is performed by the lexer when it reads a
/// quoted literal, so escape/unescape round-trips are byte-for-byte exact.
#[must_use]
pub fn escape_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch == '\'' {
            escaped.push('\'');
        }
        escaped.push(ch);
    }
    escaped
}
