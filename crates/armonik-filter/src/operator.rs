//! Generic comparison operators.
//!
//! [`Operator`] is the type-independent vocabulary used while building
//! expressions. It is mapped to the per-payload wire enums only when an
//! expression is compiled (see [`crate::compile`]).

use std::fmt;
use std::str::FromStr;

/// A comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Equal,
    NotEqual,
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    Is,
}

impl Operator {
    /// Every operator, in declaration order.
    pub const ALL: &'static [Operator] = &[
        Operator::Equal,
        Operator::NotEqual,
        Operator::LessThan,
        Operator::LessOrEqual,
        Operator::GreaterThan,
        Operator::GreaterOrEqual,
        Operator::Contains,
        Operator::NotContains,
        Operator::StartsWith,
        Operator::EndsWith,
        Operator::Is,
    ];

    /// Returns the logical complement of this operator, if it has one.
    ///
    /// `STARTS_WITH`, `ENDS_WITH` and `IS` have no complement in the operator
    /// set. Boolean leaves are inverted by flipping their value instead.
    pub const fn inverse(self) -> Option<Operator> {
        match self {
            Operator::Equal => Some(Operator::NotEqual),
            Operator::NotEqual => Some(Operator::Equal),
            Operator::LessThan => Some(Operator::GreaterOrEqual),
            Operator::GreaterOrEqual => Some(Operator::LessThan),
            Operator::LessOrEqual => Some(Operator::GreaterThan),
            Operator::GreaterThan => Some(Operator::LessOrEqual),
            Operator::Contains => Some(Operator::NotContains),
            Operator::NotContains => Some(Operator::Contains),
            Operator::StartsWith | Operator::EndsWith | Operator::Is => None,
        }
    }

    /// Returns the upper-case operator name, e.g. `GREATER_OR_EQUAL`.
    pub const fn name(self) -> &'static str {
        match self {
            Operator::Equal => "EQUAL",
            Operator::NotEqual => "NOT_EQUAL",
            Operator::LessThan => "LESS_THAN",
            Operator::LessOrEqual => "LESS_OR_EQUAL",
            Operator::GreaterThan => "GREATER_THAN",
            Operator::GreaterOrEqual => "GREATER_OR_EQUAL",
            Operator::Contains => "CONTAINS",
            Operator::NotContains => "NOT_CONTAINS",
            Operator::StartsWith => "STARTS_WITH",
            Operator::EndsWith => "ENDS_WITH",
            Operator::Is => "IS",
        }
    }

    /// Returns the infix spelling used by the expression syntax.
    pub const fn symbol(self) -> &'static str {
        match self {
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
            Operator::LessThan => "<",
            Operator::LessOrEqual => "<=",
            Operator::GreaterThan => ">",
            Operator::GreaterOrEqual => ">=",
            Operator::Contains => "contains",
            Operator::NotContains => "not_contains",
            Operator::StartsWith => "starts_with",
            Operator::EndsWith => "ends_with",
            Operator::Is => "is",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when an operator name or symbol is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operator: {0}")]
pub struct ParseOperatorError(pub String);

impl FromStr for Operator {
    type Err = ParseOperatorError;

    /// Accepts both the symbol (`<=`, `contains`) and the name (`LESS_OR_EQUAL`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Operator::ALL
            .iter()
            .copied()
            .find(|op| op.symbol() == trimmed || op.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseOperatorError(trimmed.to_string()))
    }
}
