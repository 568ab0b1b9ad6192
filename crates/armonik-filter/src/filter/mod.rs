//! Textual filter expressions.
//!
//! This module parses a small expression language into [`Filter`]s, so that
//! filters can be written on a command line or stored in configuration.
//!
//! # Supported Syntax
//!
//! ## Comparisons
//! - `path == value`, `!=`, `<`, `<=`, `>`, `>=`
//! - `path contains value`, `not_contains`, `starts_with`, `ends_with`
//! - `path is true` / `path is false`, or a bare `path` for boolean fields
//!
//! Paths are field names of the entity (`status`, `created_at`) or dotted
//! composite names (`options.priority`, `options.my_key`, `output.error`).
//!
//! ## Literals
//! - Strings: `"double"` or `'single'` quoted, or a bare word
//! - Numbers: `42`, `-1`
//! - Dates: `"2024-01-01"` or `"2024-01-01T12:00:00Z"`
//! - Durations: seconds (`90`) or `"1h30m"`, `"250ms"`
//! - Statuses: `COMPLETED`, `completed` or `TASK_STATUS_COMPLETED`
//!
//! ## Boolean Operators
//! - `&` or `*` - AND
//! - `|` or `+` - OR
//! - `^` - XOR
//! - `!`, `~` or `-` - NOT
//! - `()` - Grouping
//!
//! # Example
//!
//! ```
//! use armonik_filter_rs::{Entity, FilterParser};
//!
//! let filter = FilterParser::parse(
//!     Entity::Session,
//!     "(status == RUNNING | status == PAUSED) & !worker_submission",
//! )
//! .unwrap();
//! assert_eq!(filter.conjunction_count(), 2);
//!
//! let message = filter.to_message().unwrap();
//! assert_eq!(message.or.len(), 2);
//! ```
//!
//! [`Filter`]: crate::Filter

mod error;
mod lexer;
mod parser;

pub use error::{ParseError, ParseResult};
pub use lexer::{FilterToken, Lexer, LexerError, LexerResult, PositionedToken};
pub use parser::FilterParser;

#[cfg(test)]
mod tests;
