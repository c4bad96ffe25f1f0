//! Error types returned by the lexer, the parser and the checker.
//!
//! Every error carries a [`Position`] (0-based byte offset plus 1-based line
//! and column) and a human-readable message. Only the first problem found is
//! ever reported.

use std::fmt;

use thiserror::Error;

use crate::lexer::token::Span;

/// A location in the query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Byte offset from the start of the query (0-based)
    pub offset: usize,
    /// Line number (1-based)
    pub line: usize,
    /// Column number in characters (1-based)
    pub column: usize,
}

impl Position {
    pub const fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Malformed token
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{position}: lex error: {message}")]
pub struct LexError {
    pub position: Position,
    pub message: String,
}

impl LexError {
    pub fn new(position: Position, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

/// Grammar violation, including lexer failures surfaced through the parser
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The lexer rejected the input
    #[error(transparent)]
    Lex(#[from] LexError),

    /// Unexpected token, unterminated bracket, invalid modifier placement...
    #[error("{position}: parse error: {message}")]
    Syntax {
        position: Position,
        message: String,
        /// Token descriptions that would have been accepted, if known
        expected: Vec<&'static str>,
    },

    /// Nesting of parentheses, calls or unary operators exceeded the limit
    #[error("{position}: parse error: query exceeds the maximum nesting depth of {limit}")]
    NestingTooDeep { position: Position, limit: usize },
}

impl ParseError {
    pub(crate) fn syntax(span: Span, message: impl Into<String>) -> Self {
        ParseError::Syntax {
            position: span.position(),
            message: message.into(),
            expected: Vec::new(),
        }
    }

    pub(crate) fn unexpected(span: Span, message: impl Into<String>, expected: &[&'static str]) -> Self {
        ParseError::Syntax {
            position: span.position(),
            message: message.into(),
            expected: expected.to_vec(),
        }
    }

    pub fn position(&self) -> Position {
        match self {
            ParseError::Lex(e) => e.position,
            ParseError::Syntax { position, .. } => *position,
            ParseError::NestingTooDeep { position, .. } => *position,
        }
    }

    pub fn offset(&self) -> usize {
        self.position().offset
    }

    pub fn line(&self) -> usize {
        self.position().line
    }

    pub fn column(&self) -> usize {
        self.position().column
    }

    pub fn message(&self) -> String {
        match self {
            ParseError::Lex(e) => e.message.clone(),
            ParseError::Syntax { message, .. } => message.clone(),
            ParseError::NestingTooDeep { limit, .. } => {
                format!("query exceeds the maximum nesting depth of {}", limit)
            }
        }
    }

    /// The tokens that would have been accepted at the error position
    pub fn expected(&self) -> &[&'static str] {
        match self {
            ParseError::Syntax { expected, .. } => expected,
            _ => &[],
        }
    }
}

/// Value-type or matching-clause violation found by the checker
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: type error: {}", .span.position(), .message)]
pub struct TypeError {
    /// Source span of the offending node
    pub span: Span,
    pub message: String,
}

impl TypeError {
    pub(crate) fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }

    pub fn position(&self) -> Position {
        self.span.position()
    }

    pub fn offset(&self) -> usize {
        self.span.start
    }

    pub fn line(&self) -> usize {
        self.span.line
    }

    pub fn column(&self) -> usize {
        self.span.column
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Any failure of [`check_query`](crate::check_query)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Type(#[from] TypeError),
}

impl Error {
    pub fn position(&self) -> Position {
        match self {
            Error::Parse(e) => e.position(),
            Error::Type(e) => e.position(),
        }
    }

    pub fn offset(&self) -> usize {
        self.position().offset
    }

    pub fn line(&self) -> usize {
        self.position().line
    }

    pub fn column(&self) -> usize {
        self.position().column
    }

    pub fn message(&self) -> String {
        match self {
            Error::Parse(e) => e.message(),
            Error::Type(e) => e.message.clone(),
        }
    }
}
