// crates/unifi-network-filter/src/lib.rs
// ============================================================================
// Module: Filter Compiler Root
// Description: Public API surface for the filter-expression compiler.
// Purpose: Wire together literals, AST, parser, schemas, validation, and
//          serialization.
// Dependencies: crate::{expr, literal, parse, schema, serialize, validate,
//              wildcard}
// ============================================================================

//! ## Overview
//! This crate compiles the filter-expression language accepted by the UniFi
//! Network Integration API's list endpoints: a caller builds an expression
//! tree (directly or via [`parse_filter`]), validates it against the target
//! resource's schema with [`validate_filter`], and renders the canonical
//! query-parameter string with [`serialize_filter`].

// ============================================================================
// SECTION: Core Modules
// ============================================================================

pub mod expr;
pub mod literal;
pub mod parse;
pub mod schema;
pub mod serialize;
pub mod validate;
pub mod wildcard;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use expr::Arity;
pub use expr::CompoundExpression;
pub use expr::Expression;
pub use expr::ExpressionError;
pub use expr::FilterFunction;
pub use expr::LogicalOperator;
pub use expr::PropertyExpression;
pub use expr::PropertyPath;
pub use literal::Literal;
pub use literal::LiteralKind;
pub use literal::Timestamp;
pub use literal::TimestampError;
pub use parse::ParseError;
pub use parse::parse_filter;
pub use schema::FieldRule;
pub use schema::ResourceKind;
pub use schema::ResourceSchema;
pub use serialize::SerializeError;
pub use serialize::serialize_filter;
pub use validate::ValidationError;
pub use validate::validate_filter;
pub use wildcard::PatternError;
pub use wildcard::wildcard_match;
