// crates/unifi-network-filter/src/serialize.rs
// ============================================================================
// Module: Filter Expression Serializer
// Description: Canonical rendering of expression trees to filter strings.
// Purpose: Produce the exact byte sequence the API receives, as the inverse
//          of the parser.
// Dependencies: crate::expr, crate::literal
// ============================================================================

//! ## Overview
//! Serialization is deterministic: the same tree always yields the identical
//! byte sequence, child order equals insertion order, and no whitespace is
//! emitted. String escaping and timestamp formatting are the exact inverse of
//! the parser's unescaping, so `parse(serialize(t))` structurally equals `t`
//! for every well-formed tree and `serialize(parse(s)) == s` for every string
//! the serializer itself produced. Inputs with non-canonical whitespace or
//! uppercase UUID hex re-serialize to canonical form.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::expr::CompoundExpression;
use crate::expr::Expression;
use crate::expr::PropertyExpression;
use crate::literal::Literal;
use crate::literal::escape_string;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while rendering an expression tree.
///
/// # Invariants
/// - Only directly constructed timestamps outside the RFC 3339 formattable
///   range can fail; parsed trees always serialize.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerializeError {
    /// A timestamp literal cannot be rendered in its textual form.
    #[error("timestamp literal is outside the representable range")]
    UnrepresentableTimestamp,
}

// ============================================================================
// SECTION: Serialization
// ============================================================================

/// Renders an expression tree to its canonical filter-string form.
///
/// # Errors
///
/// Returns [`SerializeError`] when a directly constructed timestamp cannot be
/// formatted; trees produced by the parser always serialize.
pub fn serialize_filter(expression: &Expression) -> Result<String, SerializeError> {
    let mut out = String::new();
    write_expression(expression, &mut out)?;
    Ok(out)
}

/// Appends an expression node to the output buffer.
fn write_expression(expression: &Expression, out: &mut String) -> Result<(), SerializeError> {
    match expression {
        Expression::Property(property) => write_property(property, out),
        Expression::Compound(compound) => write_compound(compound, out),
        Expression::Not(child) => {
            out.push_str("not(");
            write_expression(child, out)?;
            out.push(')');
            Ok(())
        }
    }
}

/// Appends a property node: `path.function(arg,...)`.
fn write_property(property: &PropertyExpression, out: &mut String) -> Result<(), SerializeError> {
    out.push_str(&property.path().dotted());
    out.push('.');
    out.push_str(property.function().name());
    out.push('(');
    for (index, argument) in property.arguments().iter().enumerate() {
        if index > 0 {
            out.push(',');
        }
        write_literal(argument, out)?;
    }
    out.push(')');
    Ok(())
}

/// Appends a compound node: `and(child,...)` / `or(child,...)`.
fn write_compound(compound: &CompoundExpression, out: &mut String) -> Result<(), SerializeError> {
    out.push_str(compound.operator().name());
    out.push('(');
    for (index, child) in compound.children().iter().enumerate() {
        if index > 0 {
            out.push(',');
        }
        write_expression(child, out)?;
    }
    out.push(')');
    Ok(())
}

/// Appends a literal in its canonical textual form.
fn write_literal(literal: &Literal, out: &mut String) -> Result<(), SerializeError> {
    match literal {
        Literal::String(text) => {
            out.push('\'');
            out.push_str(&escape_string(text));
            out.push('\'');
        }
        Literal::Number(number) => {
            out.push_str(&number.to_string());
        }
        Literal::Timestamp(timestamp) => {
            let rendered =
                timestamp.render().map_err(|_| SerializeError::UnrepresentableTimestamp)?;
            out.push_str(&rendered);
        }
        Literal::Boolean(value) => {
            out.push_str(if *value { "true" } else { "false" });
        }
        Literal::Uuid(uuid) => {
            let mut buffer = uuid::Uuid::encode_buffer();
            out.push_str(uuid.hyphenated().encode_lower(&mut buffer));
        }
    }
    Ok(())
}
