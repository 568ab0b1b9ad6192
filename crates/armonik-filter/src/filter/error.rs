//! Error types for the filter expression parser.

use thiserror::Error;

use crate::error::FilterError;

/// A specialized Result type for filter parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Errors that can occur while parsing a filter expression.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The filter expression is empty.
    #[error("filter expression is empty")]
    EmptyExpression,

    /// An unexpected token was encountered during parsing.
    #[error("unexpected token '{token}' at position {position}")]
    UnexpectedToken {
        /// The unexpected token, as written.
        token: String,
        /// Byte offset of the token in the input.
        position: usize,
    },

    /// An unexpected end of input was encountered.
    #[error("unexpected end of expression")]
    UnexpectedEndOfInput,

    /// An unclosed parenthesis was found.
    #[error("unclosed parenthesis")]
    UnclosedParenthesis,

    /// A character that is not part of the syntax.
    #[error("unexpected character '{character}' at position {position}")]
    UnexpectedCharacter { character: char, position: usize },

    /// A quoted string without its closing quote.
    #[error("unterminated string starting at position {position}")]
    UnterminatedString { position: usize },

    /// A non-boolean field was used without a comparison.
    #[error("field '{field}' needs a comparison (only boolean fields can stand alone)")]
    MissingComparison { field: String },

    /// A literal that cannot be read as the field's type.
    #[error("invalid {expected} literal for {field}: {literal}")]
    InvalidLiteral {
        field: String,
        literal: String,
        expected: &'static str,
    },

    /// The expression parsed, but building the filter failed.
    #[error(transparent)]
    Filter(#[from] FilterError),
}

impl ParseError {
    /// Creates an unexpected token error.
    pub fn unexpected_token(token: impl Into<String>, position: usize) -> Self {
        ParseError::UnexpectedToken {
            token: token.into(),
            position,
        }
    }

    /// Creates an invalid literal error.
    pub fn invalid_literal(
        field: impl Into<String>,
        literal: impl Into<String>,
        expected: &'static str,
    ) -> Self {
        ParseError::InvalidLiteral {
            field: field.into(),
            literal: literal.into(),
            expected,
        }
    }

    /// Returns a stable snake_case code, used by the CLI's JSON errors.
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::EmptyExpression => "empty_expression",
            ParseError::UnexpectedToken { .. } => "unexpected_token",
            ParseError::UnexpectedEndOfInput => "unexpected_end_of_input",
            ParseError::UnclosedParenthesis => "unclosed_parenthesis",
            ParseError::UnexpectedCharacter { .. } => "unexpected_character",
            ParseError::UnterminatedString { .. } => "unterminated_string",
            ParseError::MissingComparison { .. } => "missing_comparison",
            ParseError::InvalidLiteral { .. } => "invalid_literal",
            ParseError::Filter(inner) => inner.code(),
        }
    }
}
