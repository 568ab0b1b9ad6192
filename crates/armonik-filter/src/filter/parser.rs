//! Recursive descent parser for filter expressions.

use armonik_api_rs::models::{Duration, ResultStatus, SessionStatus, TaskStatus, Timestamp};
use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

use super::error::{ParseError, ParseResult};
use super::lexer::{FilterToken, Lexer, LexerError, PositionedToken};
use crate::error::FilterError;
use crate::expr::Filter;
use crate::field::{Entity, FieldRef, FieldType};
use crate::registry::FieldRegistry;
use crate::value::Value;

/// Parser for textual filter expressions over one entity kind.
///
/// Field paths are resolved through the entity's [`FieldRegistry`] and the
/// expression is built with the checked combinators, so the result is always
/// in normal form.
///
/// # Grammar
///
/// ```text
/// expression ::= or_expr
/// or_expr    ::= xor_expr (("|" | "+") xor_expr)*
/// xor_expr   ::= and_expr ("^" and_expr)*
/// and_expr   ::= unary_expr (("&" | "*") unary_expr)*
/// unary_expr ::= ("!" | "~" | "-") unary_expr | primary
/// primary    ::= "(" expression ")" | comparison
/// comparison ::= path [operator literal]
/// operator   ::= "==" | "!=" | "<" | "<=" | ">" | ">=" | "contains"
///              | "not_contains" | "starts_with" | "ends_with" | "is"
/// literal    ::= string | ["-"] integer | "true" | "false" | word
/// ```
///
/// A bare path is only accepted for boolean fields and reads as `path is true`.
///
/// # Operator Precedence (highest to lowest)
///
/// 1. `!` `~` `-` (NOT) - unary
/// 2. `&` `*` (AND) - binary, left-associative
/// 3. `^` (XOR) - binary, left-associative
/// 4. `|` `+` (OR) - binary, left-associative
///
/// # Example
///
/// ```
/// use armonik_filter_rs::{Entity, FilterParser};
///
/// let filter = FilterParser::parse(Entity::Task, "status == COMPLETED & options.priority > 3").unwrap();
/// assert_eq!(filter.conjunction_count(), 1);
/// assert_eq!(filter.leaf_count(), 2);
/// ```
pub struct FilterParser {
    registry: &'static FieldRegistry,
    tokens: Vec<PositionedToken>,
    position: usize,
}

impl FilterParser {
    /// Parses a filter expression over `entity`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::EmptyExpression` if the input is empty, a syntax
    /// error variant if the expression is malformed, and `ParseError::Filter`
    /// when a field lookup, a comparison or a combination is rejected.
    pub fn parse(entity: Entity, input: &str) -> ParseResult<Filter> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyExpression);
        }

        let lexed = Lexer::new(trimmed).tokenize_with_errors();
        if let Some(error) = lexed.errors.into_iter().next() {
            return Err(error.into());
        }
        if lexed.tokens.is_empty() {
            return Err(ParseError::EmptyExpression);
        }

        let mut parser = Self {
            registry: FieldRegistry::of(entity),
            tokens: lexed.tokens,
            position: 0,
        };
        let filter = parser.parse_expression()?;

        // Check that we consumed all tokens
        if let Some(remaining) = parser.tokens.get(parser.position) {
            if let FilterToken::BooleanKeyword(_) = remaining.token {
                return Err(FilterError::NotBoolean.into());
            }
            return Err(ParseError::unexpected_token(
                remaining.token.to_string(),
                remaining.position,
            ));
        }

        debug!(
            entity = %entity,
            conjunctions = filter.conjunction_count(),
            "parsed filter expression"
        );
        Ok(filter)
    }

    /// Returns the current token without consuming it.
    fn peek(&self) -> Option<&FilterToken> {
        self.tokens.get(self.position).map(|pt| &pt.token)
    }

    /// Consumes and returns the current token.
    fn advance(&mut self) -> Option<PositionedToken> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn check(&self, expected: &FilterToken) -> bool {
        self.peek() == Some(expected)
    }

    fn parse_expression(&mut self) -> ParseResult<Filter> {
        self.parse_or_expr()
    }

    /// Parses OR expressions: `xor_expr ("|" xor_expr)*`
    fn parse_or_expr(&mut self) -> ParseResult<Filter> {
        let mut left = self.parse_xor_expr()?;

        while self.check(&FilterToken::Or) {
            self.advance();
            let right = self.parse_xor_expr()?;
            left = left.or(&right)?;
        }

        Ok(left)
    }

    /// Parses XOR expressions: `and_expr ("^" and_expr)*`
    fn parse_xor_expr(&mut self) -> ParseResult<Filter> {
        let mut left = self.parse_and_expr()?;

        while self.check(&FilterToken::Xor) {
            self.advance();
            let right = self.parse_and_expr()?;
            left = left.xor(&right)?;
        }

        Ok(left)
    }

    /// Parses AND expressions: `unary_expr ("&" unary_expr)*`
    fn parse_and_expr(&mut self) -> ParseResult<Filter> {
        let mut left = self.parse_unary_expr()?;

        while self.check(&FilterToken::And) {
            self.advance();
            let right = self.parse_unary_expr()?;
            left = left.and(&right)?;
        }

        Ok(left)
    }

    /// Parses unary expressions: `"!" unary_expr | primary`
    fn parse_unary_expr(&mut self) -> ParseResult<Filter> {
        if self.check(&FilterToken::Not) || self.check(&FilterToken::Minus) {
            self.advance();
            let inner = self.parse_unary_expr()?;
            return Ok(inner.negate()?);
        }

        self.parse_primary()
    }

    /// Parses primary expressions: `"(" expression ")" | comparison`
    fn parse_primary(&mut self) -> ParseResult<Filter> {
        let PositionedToken { token, position } =
            self.advance().ok_or(ParseError::UnexpectedEndOfInput)?;

        match token {
            FilterToken::OpenParen => {
                let inner = self.parse_expression()?;
                if let Some(FilterToken::BooleanKeyword(_)) = self.peek() {
                    return Err(FilterError::NotBoolean.into());
                }
                if !self.check(&FilterToken::CloseParen) {
                    return Err(ParseError::UnclosedParenthesis);
                }
                self.advance();
                Ok(inner)
            }

            FilterToken::Word(path) => self.parse_comparison(&path),

            // Plain booleans and boolean words cannot stand in for filters
            FilterToken::Bool(_) | FilterToken::BooleanKeyword(_) => {
                Err(FilterError::NotBoolean.into())
            }

            other => Err(ParseError::unexpected_token(other.to_string(), position)),
        }
    }

    /// Parses `path [operator literal]`.
    fn parse_comparison(&mut self, path: &str) -> ParseResult<Filter> {
        let field = self.registry.lookup(path)?;

        let operator = match self.peek() {
            Some(FilterToken::Compare(op)) => *op,
            Some(FilterToken::BooleanKeyword(_)) => return Err(FilterError::NotBoolean.into()),
            _ if field.field_type() == FieldType::Boolean => return Ok(field.is(true)?),
            _ => {
                return Err(ParseError::MissingComparison {
                    field: path.to_string(),
                })
            }
        };
        self.advance();

        let value = self.parse_literal(&field)?;
        Ok(field.compare(operator, value)?)
    }

    /// Parses a literal and converts it according to the field's type.
    ///
    /// Literals of the wrong kind are passed through unchanged so the leaf
    /// constructor reports them as type mismatches.
    fn parse_literal(&mut self, field: &FieldRef) -> ParseResult<Value> {
        let PositionedToken { token, position } =
            self.advance().ok_or(ParseError::UnexpectedEndOfInput)?;

        let value = match token {
            FilterToken::Minus => match self.advance() {
                Some(PositionedToken {
                    token: FilterToken::Integer(n),
                    ..
                }) => Value::Number(-n),
                Some(other) => {
                    return Err(ParseError::unexpected_token(
                        other.token.to_string(),
                        other.position,
                    ))
                }
                None => return Err(ParseError::UnexpectedEndOfInput),
            },
            FilterToken::Integer(n) => Value::Number(n),
            FilterToken::Bool(b) => Value::Boolean(b),
            FilterToken::Str(s) | FilterToken::Word(s) => Value::String(s),
            other => return Err(ParseError::unexpected_token(other.to_string(), position)),
        };

        convert_literal(field, value)
    }
}

fn convert_literal(field: &FieldRef, value: Value) -> ParseResult<Value> {
    match (field.field_type(), value) {
        (FieldType::Date, Value::String(s)) => parse_date(&s)
            .map(Value::Date)
            .ok_or_else(|| ParseError::invalid_literal(field.name(), s, "date")),
        (FieldType::Duration, Value::Number(seconds)) => {
            Ok(Value::Duration(Duration::from_secs(seconds)))
        }
        (FieldType::Duration, Value::String(s)) => parse_duration(&s)
            .map(Value::Duration)
            .ok_or_else(|| ParseError::invalid_literal(field.name(), s, "duration")),
        (FieldType::Status, Value::String(s)) => parse_status(field.entity(), &s)
            .ok_or_else(|| ParseError::invalid_literal(field.name(), s, "status")),
        (_, value) => Ok(value),
    }
}

/// Reads an RFC 3339 timestamp or a plain `YYYY-MM-DD` date (midnight UTC).
fn parse_date(s: &str) -> Option<Timestamp> {
    if let Ok(date) = DateTime::parse_from_rfc3339(s) {
        return Some(date.with_timezone(&Utc).into());
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().into())
}

/// Reads a duration such as `90`, `90s`, `1h30m` or `250ms`.
fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(seconds) = s.parse::<i64>() {
        return Some(Duration::from_secs(seconds));
    }

    let mut total_nanos: i128 = 0;
    let mut rest = s;
    while !rest.is_empty() {
        let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        if digits == 0 {
            return None;
        }
        let amount: i128 = rest[..digits].parse().ok()?;
        rest = &rest[digits..];
        let unit_len = rest.find(|c: char| c.is_ascii_digit()).unwrap_or(rest.len());
        let nanos_per_unit: i128 = match &rest[..unit_len] {
            "d" => 86_400_000_000_000,
            "h" => 3_600_000_000_000,
            "m" => 60_000_000_000,
            "s" => 1_000_000_000,
            "ms" => 1_000_000,
            "us" => 1_000,
            "ns" => 1,
            _ => return None,
        };
        rest = &rest[unit_len..];
        total_nanos = total_nanos.checked_add(amount.checked_mul(nanos_per_unit)?)?;
    }

    let seconds = i64::try_from(total_nanos / 1_000_000_000).ok()?;
    let nanos = i64::try_from(total_nanos % 1_000_000_000).ok()?;
    Some(Duration::new(seconds, nanos))
}

/// Reads a status name of the given entity (`COMPLETED`, `completed`,
/// `TASK_STATUS_COMPLETED`).
fn parse_status(entity: Entity, s: &str) -> Option<Value> {
    match entity {
        Entity::Task => s.parse::<TaskStatus>().ok().map(Value::from),
        Entity::Session => s.parse::<SessionStatus>().ok().map(Value::from),
        Entity::Result => s.parse::<ResultStatus>().ok().map(Value::from),
        Entity::Partition | Entity::Application => None,
    }
}

impl From<LexerError> for ParseError {
    fn from(error: LexerError) -> Self {
        match error {
            LexerError::UnexpectedCharacter {
                character,
                position,
            } => ParseError::UnexpectedCharacter {
                character,
                position,
            },
            LexerError::UnterminatedString { position } => {
                ParseError::UnterminatedString { position }
            }
        }
    }
}
