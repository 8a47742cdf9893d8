// crates/unifi-network-filter/src/expr.rs
// ============================================================================
// Module: Filter Expression AST
// Description: In-memory tree of property, compound, and not expressions.
// Purpose: Provide a closed sum type with construction invariants enforced at
//          the boundaries.
// Dependencies: crate::literal
// ============================================================================

//! ## Overview
//! A filter is a pure tree built top-down from three node variants: a property
//! test (`path.function(args)`), a logical combination (`and`/`or` with one or
//! more children), and a negation (`not` with exactly one child). The enum is
//! closed and consumers match exhaustively, so adding a variant forces a
//! compile-time update in the validator and the serializer.
//!
//! Compound child order is irrelevant to semantics but preserved verbatim for
//! stable serialization.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use thiserror::Error;

use crate::literal::Literal;

// ============================================================================
// SECTION: Filter Functions
// ============================================================================

/// The closed set of filter functions accepted by the API.
///
/// # Invariants
/// - Wire names are stable; `name` and `from_name` are exact inverses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterFunction {
    /// Equality test.
    Eq,
    /// Inequality test.
    Ne,
    /// Strictly-greater comparison.
    Gt,
    /// Greater-or-equal comparison.
    Ge,
    /// Strictly-less comparison.
    Lt,
    /// Less-or-equal comparison.
    Le,
    /// Wildcard pattern match.
    Like,
    /// Membership in a literal set.
    In,
    /// Non-membership in a literal set.
    NotIn,
    /// Null check, no arguments.
    IsNull,
    /// Non-null check, no arguments.
    IsNotNull,
}

impl FilterFunction {
    /// Resolves a wire-form function name, or `None` if unknown.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "eq" => Some(Self::Eq),
            "ne" => Some(Self::Ne),
            "gt" => Some(Self::Gt),
            "ge" => Some(Self::Ge),
            "lt" => Some(Self::Lt),
            "le" => Some(Self::Le),
            "like" => Some(Self::Like),
            "in" => Some(Self::In),
            "notIn" => Some(Self::NotIn),
            "isNull" => Some(Self::IsNull),
            "isNotNull" => Some(Self::IsNotNull),
            _ => None,
        }
    }

    /// Returns the wire-form function name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Gt => "gt",
            Self::Ge => "ge",
            Self::Lt => "lt",
            Self::Le => "le",
            Self::Like => "like",
            Self::In => "in",
            Self::NotIn => "notIn",
            Self::IsNull => "isNull",
            Self::IsNotNull => "isNotNull",
        }
    }

    /// Returns the argument count this function accepts.
    #[must_use]
    pub const fn arity(self) -> Arity {
        match self {
            Self::IsNull | Self::IsNotNull => Arity::Exactly(0),
            Self::Eq | Self::Ne | Self::Gt | Self::Ge | Self::Lt | Self::Le | Self::Like => {
                Arity::Exactly(1)
            }
            Self::In | Self::NotIn => Arity::AtLeast(1),
        }
    }
}

impl fmt::Display for FilterFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Argument-count constraint for a filter function.
///
/// # Invariants
/// - `accepts` is the single source of truth for arity checks in both the
///   parser and the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many arguments.
    Exactly(usize),
    /// At least this many arguments.
    AtLeast(usize),
}

impl Arity {
    /// Returns whether the given argument count satisfies this constraint.
    #[must_use]
    pub const fn accepts(self, count: usize) -> bool {
        match self {
            Self::Exactly(expected) => count == expected,
            Self::AtLeast(minimum) => count >= minimum,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exactly(expected) => write!(f, "exactly {expected}"),
            Self::AtLeast(minimum) => write!(f, "at least {minimum}"),
        }
    }
}

// ============================================================================
// SECTION: Logical Operators
// ============================================================================

/// Logical operator for compound expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    /// All children must hold.
    And,
    /// At least one child must hold.
    Or,
}

impl LogicalOperator {
    /// Returns the wire-form operator name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// SECTION: Property Paths
// ============================================================================

/// A non-empty dot-separated property path (e.g. `access.authorized`).
///
/// # Invariants
/// - Holds at least one segment.
/// - Every segment is a valid identifier (`[A-Za-z_][A-Za-z0-9_]*`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyPath(Vec<String>);

impl PropertyPath {
    /// Builds a path from pre-split segments.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError`] when the segment list is empty or any
    /// segment is not a valid identifier.
    pub fn new(segments: Vec<String>) -> Result<Self, ExpressionError> {
        if segments.is_empty() {
            return Err(ExpressionError::EmptyPath);
        }
        for segment in &segments {
            if !is_identifier(segment) {
                return Err(ExpressionError::InvalidPathSegment {
                    segment: segment.clone(),
                });
            }
        }
        Ok(Self(segments))
    }

    /// Parses a dotted path string such as `access.authorized`.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError`] when the input is empty or contains an
    /// invalid segment.
    pub fn parse(raw: &str) -> Result<Self, ExpressionError> {
        Self::new(raw.split('.').map(str::to_string).collect())
    }

    /// Returns the path segments in order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Renders the dotted form of the path.
    #[must_use]
    pub fn dotted(&self) -> String {
        self.0.join(".")
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted())
    }
}

/// Returns whether a path segment is a valid identifier.
fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_ascii_alphabetic() && first != '_' {
        return false;
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

// ============================================================================
// SECTION: Expression Nodes
// ============================================================================

/// A property test node: path, function, and literal arguments.
///
/// # Invariants
/// - The path is non-empty and identifier-valid (enforced by
///   [`PropertyPath`]).
/// - Argument arity against the function is checked by the parser
///   syntactically and re-checked by the validator.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyExpression {
    /// Property path under test.
    path: PropertyPath,
    /// Filter function applied to the property.
    function: FilterFunction,
    /// Literal arguments in declaration order.
    arguments: Vec<Literal>,
}

impl PropertyExpression {
    /// Builds a property expression.
    #[must_use]
    pub const fn new(path: PropertyPath, function: FilterFunction, arguments: Vec<Literal>) -> Self {
        Self {
            path,
            function,
            arguments,
        }
    }

    /// Returns the property path.
    #[must_use]
    pub const fn path(&self) -> &PropertyPath {
        &self.path
    }

    /// Returns the filter function.
    #[must_use]
    pub const fn function(&self) -> FilterFunction {
        self.function
    }

    /// Returns the literal arguments in order.
    #[must_use]
    pub fn arguments(&self) -> &[Literal] {
        &self.arguments
    }
}

/// A logical combination node with one or more children.
///
/// # Invariants
/// - Holds at least one child; an empty `and()`/`or()` is invalid.
/// - Child order is preserved verbatim for stable serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundExpression {
    /// Logical operator joining the children.
    operator: LogicalOperator,
    /// Ordered, non-empty child expressions.
    children: Vec<Expression>,
}

impl CompoundExpression {
    /// Builds a compound expression.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::EmptyCompound`] when `children` is empty.
    pub fn new(
        operator: LogicalOperator,
        children: Vec<Expression>,
    ) -> Result<Self, ExpressionError> {
        if children.is_empty() {
            return Err(ExpressionError::EmptyCompound {
                operator,
            });
        }
        Ok(Self {
            operator,
            children,
        })
    }

    /// Returns the logical operator.
    #[must_use]
    pub const fn operator(&self) -> LogicalOperator {
        self.operator
    }

    /// Returns the child expressions in order.
    #[must_use]
    pub fn children(&self) -> &[Expression] {
        &self.children
    }
}

/// A filter expression tree node.
///
/// # Invariants
/// - Pure tree, no cycles; nodes are built top-down and never mutated after
///   construction.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Property test.
    Property(PropertyExpression),
    /// Logical combination of one or more children.
    Compound(CompoundExpression),
    /// Negation of exactly one child.
    Not(Box<Expression>),
}

impl Expression {
    /// Builds a property test expression.
    #[must_use]
    pub const fn property(
        path: PropertyPath,
        function: FilterFunction,
        arguments: Vec<Literal>,
    ) -> Self {
        Self::Property(PropertyExpression::new(path, function, arguments))
    }

    /// Builds an `and` combination over one or more children.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::EmptyCompound`] when `children` is empty.
    pub fn and(children: Vec<Self>) -> Result<Self, ExpressionError> {
        CompoundExpression::new(LogicalOperator::And, children).map(Self::Compound)
    }

    /// Builds an `or` combination over one or more children.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::EmptyCompound`] when `children` is empty.
    pub fn or(children: Vec<Self>) -> Result<Self, ExpressionError> {
        CompoundExpression::new(LogicalOperator::Or, children).map(Self::Compound)
    }

    /// Wraps an expression in a negation.
    #[must_use]
    pub fn negate(child: Self) -> Self {
        Self::Not(Box::new(child))
    }
}

// ============================================================================
// SECTION: Construction Errors
// ============================================================================

/// Errors raised by direct AST construction.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpressionError {
    /// A compound expression requires at least one child.
    #[error("`{operator}` requires at least one child expression")]
    EmptyCompound {
        /// Operator of the offending compound.
        operator: LogicalOperator,
    },
    /// A property path requires at least one segment.
    #[error("property path must not be empty")]
    EmptyPath,
    /// A path segment is not a valid identifier.
    #[error("invalid property path segment `{segment}`")]
    InvalidPathSegment {
        /// The offending segment text.
        segment: String,
    },
}
