// crates/unifi-network-filter/src/validate.rs
// ============================================================================
// Module: Filter Expression Validator
// Description: Schema-directed validation of parsed filter expressions.
// Purpose: Reject filters that reference unknown fields, disallowed
//          functions, or mistyped literals before they reach the wire.
// Dependencies: crate::expr, crate::literal, crate::schema
// ============================================================================

//! ## Overview
//! The validator walks an expression tree against a resource schema. For every
//! property node it checks that the field exists, that the function is in the
//! field's allowed set, that the argument count satisfies the function's
//! arity, and that every literal argument matches the field's declared type.
//! `in`/`notIn` accept multiple arguments but the list must be type-homogeneous
//! with the field type.
//!
//! Validation is a pure function over immutable inputs: no side effects, safe
//! to call repeatedly and concurrently on shared schemas. The first violation
//! wins; there is no partial recovery.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::expr::Arity;
use crate::expr::Expression;
use crate::expr::PropertyExpression;
use crate::literal::LiteralKind;
use crate::schema::ResourceKind;
use crate::schema::ResourceSchema;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when an expression violates a resource schema.
///
/// # Invariants
/// - Variants name the offending field, function, or type pair.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The property path is not filterable on this resource.
    #[error("field `{field}` is not filterable on resource `{resource}`")]
    UnknownField {
        /// Resource whose schema was consulted.
        resource: ResourceKind,
        /// Dotted path of the unknown field.
        field: String,
    },
    /// The function is not allowed on this field.
    #[error("function `{function}` is not allowed on field `{field}` of resource `{resource}`")]
    FunctionNotAllowed {
        /// Resource whose schema was consulted.
        resource: ResourceKind,
        /// Dotted path of the field.
        field: String,
        /// Wire name of the rejected function.
        function: &'static str,
    },
    /// The argument count violates the function's arity.
    #[error("`{function}` on field `{field}` takes {expected} argument(s), found {found}")]
    ArityMismatch {
        /// Dotted path of the field.
        field: String,
        /// Wire name of the function.
        function: &'static str,
        /// Required argument count.
        expected: Arity,
        /// Actual argument count.
        found: usize,
    },
    /// A literal argument does not match the field's declared type.
    #[error("field `{field}` is typed {expected}, but `{function}` received a {actual} literal")]
    TypeMismatch {
        /// Dotted path of the field.
        field: String,
        /// Wire name of the function.
        function: &'static str,
        /// Field type declared by the schema.
        expected: LiteralKind,
        /// Kind of the offending literal.
        actual: LiteralKind,
    },
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates an expression tree against a resource schema.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered in a depth-first,
/// left-to-right walk of the tree.
pub fn validate_filter(
    expression: &Expression,
    schema: &ResourceSchema,
) -> Result<(), ValidationError> {
    match expression {
        Expression::Property(property) => validate_property(property, schema),
        Expression::Compound(compound) => {
            for child in compound.children() {
                validate_filter(child, schema)?;
            }
            Ok(())
        }
        Expression::Not(child) => validate_filter(child, schema),
    }
}

/// Validates a single property node.
fn validate_property(
    property: &PropertyExpression,
    schema: &ResourceSchema,
) -> Result<(), ValidationError> {
    let field = property.path().dotted();
    let function = property.function();

    let Some(rule) = schema.rule(&field) else {
        return Err(ValidationError::UnknownField {
            resource: schema.resource(),
            field,
        });
    };

    if !rule.allows(function) {
        return Err(ValidationError::FunctionNotAllowed {
            resource: schema.resource(),
            field,
            function: function.name(),
        });
    }

    let found = property.arguments().len();
    if !function.arity().accepts(found) {
        return Err(ValidationError::ArityMismatch {
            field,
            function: function.name(),
            expected: function.arity(),
            found,
        });
    }

    for argument in property.arguments() {
        if argument.kind() != rule.kind() {
            return Err(ValidationError::TypeMismatch {
                field,
                function: function.name(),
                expected: rule.kind(),
                actual: argument.kind(),
            });
        }
    }

    Ok(())
}
