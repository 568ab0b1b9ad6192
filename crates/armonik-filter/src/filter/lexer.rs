//! Lexer (tokenizer) for filter expressions.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use crate::operator::Operator;

/// Error encountered during lexical analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexerError {
    /// A character that cannot start any token.
    UnexpectedCharacter { character: char, position: usize },
    /// A quoted string without its closing quote.
    UnterminatedString { position: usize },
}

impl fmt::Display for LexerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexerError::UnexpectedCharacter {
                character,
                position,
            } => write!(
                f,
                "unexpected character '{}' at position {}",
                character, position
            ),
            LexerError::UnterminatedString { position } => {
                write!(f, "unterminated string starting at position {}", position)
            }
        }
    }
}

impl std::error::Error for LexerError {}

/// Result of tokenizing a filter expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerResult {
    /// The tokens successfully parsed, with their positions.
    pub tokens: Vec<PositionedToken>,
    /// Any errors encountered.
    pub errors: Vec<LexerError>,
}

/// A token with its position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedToken {
    /// The token.
    pub token: FilterToken,
    /// The byte position where the token starts (0-indexed).
    pub position: usize,
}

/// A token in a filter expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterToken {
    // ==================== Operands ====================
    /// A bare word: a field path (`options.priority`) or an unquoted literal
    /// (`COMPLETED`, `1h30m`).
    Word(String),

    /// A quoted string.
    Str(String),

    /// An unsigned integer literal.
    Integer(i64),

    /// `true` or `false`.
    Bool(bool),

    /// `and`, `or` or `not` written as words.
    BooleanKeyword(String),

    // ==================== Comparisons ====================
    /// A comparison operator (`==`, `<=`, `contains`, `is`, ...).
    Compare(Operator),

    // ==================== Logical Operators ====================
    /// `&` or `*`.
    And,

    /// `|` or `+`.
    Or,

    /// `^`.
    Xor,

    /// `!` or `~`.
    Not,

    /// `-`: negation, or the sign of an integer literal.
    Minus,

    /// Opening parenthesis `(`.
    OpenParen,

    /// Closing parenthesis `)`.
    CloseParen,
}

impl fmt::Display for FilterToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterToken::Word(word) | FilterToken::BooleanKeyword(word) => f.write_str(word),
            FilterToken::Str(s) => write!(f, "{s:?}"),
            FilterToken::Integer(n) => write!(f, "{n}"),
            FilterToken::Bool(b) => write!(f, "{b}"),
            FilterToken::Compare(op) => f.write_str(op.symbol()),
            FilterToken::And => f.write_str("&"),
            FilterToken::Or => f.write_str("|"),
            FilterToken::Xor => f.write_str("^"),
            FilterToken::Not => f.write_str("!"),
            FilterToken::Minus => f.write_str("-"),
            FilterToken::OpenParen => f.write_str("("),
            FilterToken::CloseParen => f.write_str(")"),
        }
    }
}

/// Lexer for tokenizing filter expressions.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    /// Current byte position in the input string.
    position: usize,
    /// Errors encountered during tokenization.
    errors: Vec<LexerError>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input string.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            position: 0,
            errors: Vec::new(),
        }
    }

    fn peek(&mut self) -> Option<&char> {
        self.chars.peek()
    }

    /// Consumes and returns the next character, updating position.
    fn next_char(&mut self) -> Option<char> {
        let c = self.chars.next();
        if let Some(ch) = c {
            self.position += ch.len_utf8();
        }
        c
    }

    /// Consumes the next character if it is `expected`.
    fn next_if(&mut self, expected: char) -> bool {
        if self.peek() == Some(&expected) {
            self.next_char();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|c| c.is_whitespace()) {
            self.next_char();
        }
    }

    /// Reads a word: letters, digits, `_` and `.`.
    fn read_word(&mut self) -> String {
        let mut word = String::new();
        while let Some(&c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '.' {
                word.push(c);
                self.next_char();
            } else {
                break;
            }
        }
        word
    }

    /// Reads a quoted string (single or double quotes), the opening quote
    /// not yet consumed. Returns `None` if the closing quote is missing.
    fn read_quoted_string(&mut self, quote_char: char) -> Option<String> {
        self.next_char();

        let mut result = String::new();
        while let Some(c) = self.next_char() {
            if c == quote_char {
                return Some(result);
            }
            if c == '\\' {
                if let Some(escaped) = self.next_char() {
                    result.push(escaped);
                }
            } else {
                result.push(c);
            }
        }
        None
    }

    /// Classifies a bare word.
    fn word_token(word: String) -> FilterToken {
        if word.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(n) = word.parse::<i64>() {
                return FilterToken::Integer(n);
            }
        }
        match word.to_lowercase().as_str() {
            "true" => FilterToken::Bool(true),
            "false" => FilterToken::Bool(false),
            "and" | "or" | "not" => FilterToken::BooleanKeyword(word),
            "contains" => FilterToken::Compare(Operator::Contains),
            "not_contains" => FilterToken::Compare(Operator::NotContains),
            "starts_with" => FilterToken::Compare(Operator::StartsWith),
            "ends_with" => FilterToken::Compare(Operator::EndsWith),
            "is" => FilterToken::Compare(Operator::Is),
            _ => FilterToken::Word(word),
        }
    }

    /// Returns the next token with its position, or None if at end of input.
    pub fn next_token(&mut self) -> Option<PositionedToken> {
        self.skip_whitespace();

        let c = *self.peek()?;
        let position = self.position;
        let positioned = |token| Some(PositionedToken { token, position });

        match c {
            '&' | '*' => {
                self.next_char();
                positioned(FilterToken::And)
            }
            '|' | '+' => {
                self.next_char();
                positioned(FilterToken::Or)
            }
            '^' => {
                self.next_char();
                positioned(FilterToken::Xor)
            }
            '~' => {
                self.next_char();
                positioned(FilterToken::Not)
            }
            '-' => {
                self.next_char();
                positioned(FilterToken::Minus)
            }
            '(' => {
                self.next_char();
                positioned(FilterToken::OpenParen)
            }
            ')' => {
                self.next_char();
                positioned(FilterToken::CloseParen)
            }
            '!' => {
                self.next_char();
                if self.next_if('=') {
                    positioned(FilterToken::Compare(Operator::NotEqual))
                } else {
                    positioned(FilterToken::Not)
                }
            }
            '=' => {
                self.next_char();
                if self.next_if('=') {
                    positioned(FilterToken::Compare(Operator::Equal))
                } else {
                    self.errors.push(LexerError::UnexpectedCharacter {
                        character: '=',
                        position,
                    });
                    self.next_token()
                }
            }
            '<' => {
                self.next_char();
                if self.next_if('=') {
                    positioned(FilterToken::Compare(Operator::LessOrEqual))
                } else {
                    positioned(FilterToken::Compare(Operator::LessThan))
                }
            }
            '>' => {
                self.next_char();
                if self.next_if('=') {
                    positioned(FilterToken::Compare(Operator::GreaterOrEqual))
                } else {
                    positioned(FilterToken::Compare(Operator::GreaterThan))
                }
            }
            '"' | '\'' => match self.read_quoted_string(c) {
                Some(s) => positioned(FilterToken::Str(s)),
                None => {
                    self.errors.push(LexerError::UnterminatedString { position });
                    None
                }
            },
            _ if c.is_alphanumeric() || c == '_' => {
                let word = self.read_word();
                positioned(Self::word_token(word))
            }
            _ => {
                self.next_char();
                self.errors.push(LexerError::UnexpectedCharacter {
                    character: c,
                    position,
                });
                self.next_token()
            }
        }
    }

    /// Collects all tokens and any errors encountered.
    pub fn tokenize_with_errors(mut self) -> LexerResult {
        let mut tokens = Vec::new();
        while let Some(positioned_token) = self.next_token() {
            tokens.push(positioned_token);
        }
        LexerResult {
            tokens,
            errors: self.errors,
        }
    }

    /// Collects all tokens into a vector (without positions).
    #[cfg(test)]
    pub fn tokenize(self) -> Vec<FilterToken> {
        self.tokenize_with_errors()
            .tokens
            .into_iter()
            .map(|pt| pt.token)
            .collect()
    }
}
