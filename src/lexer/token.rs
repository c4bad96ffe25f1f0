//! Tokens produced by the [`Lexer`](super::Lexer).

use std::fmt;

use crate::error::Position;
use crate::lexer::identifier::Keyword;

/// Source location of a token or AST node.
///
/// `start` and `end` are byte offsets into the query; `line` and `column` are
/// the 1-based location of `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub const fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// Span starting at `self` and ending where `other` ends
    pub fn to(self, other: Span) -> Span {
        Span {
            end: self.end.max(other.end),
            ..self
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.start, self.line, self.column)
    }
}

impl Default for Span {
    fn default() -> Self {
        Span::new(0, 0, 1, 1)
    }
}

/// Token categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Metric or label name: `http_requests_total`, `job:rate:5m`
    Identifier,
    /// Reserved word, including the keyword operators `and`, `or`, `unless`, `atan2`
    Keyword(Keyword),
    Number,
    Duration,
    String,

    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Eql,
    Neq,
    Lss,
    Lte,
    Gtr,
    Gte,
    EqlRegex,
    NeqRegex,
    Assign,

    LeftBrace,
    RightBrace,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    Colon,
    Comma,
    At,

    Eof,
}

impl TokenKind {
    /// Description used in error messages
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Keyword(kw) => kw.as_str(),
            TokenKind::Number => "number",
            TokenKind::Duration => "duration",
            TokenKind::String => "string",
            TokenKind::Add => "\"+\"",
            TokenKind::Sub => "\"-\"",
            TokenKind::Mul => "\"*\"",
            TokenKind::Div => "\"/\"",
            TokenKind::Mod => "\"%\"",
            TokenKind::Pow => "\"^\"",
            TokenKind::Eql => "\"==\"",
            TokenKind::Neq => "\"!=\"",
            TokenKind::Lss => "\"<\"",
            TokenKind::Lte => "\"<=\"",
            TokenKind::Gtr => "\">\"",
            TokenKind::Gte => "\">=\"",
            TokenKind::EqlRegex => "\"=~\"",
            TokenKind::NeqRegex => "\"!~\"",
            TokenKind::Assign => "\"=\"",
            TokenKind::LeftBrace => "\"{\"",
            TokenKind::RightBrace => "\"}\"",
            TokenKind::LeftParen => "\"(\"",
            TokenKind::RightParen => "\")\"",
            TokenKind::LeftBracket => "\"[\"",
            TokenKind::RightBracket => "\"]\"",
            TokenKind::Colon => "\":\"",
            TokenKind::Comma => "\",\"",
            TokenKind::At => "\"@\"",
            TokenKind::Eof => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// Operator and punctuation table, longest spellings first
pub(crate) const SYMBOLS: &[(&str, TokenKind)] = &[
    ("==", TokenKind::Eql),
    ("!=", TokenKind::Neq),
    ("<=", TokenKind::Lte),
    (">=", TokenKind::Gte),
    ("=~", TokenKind::EqlRegex),
    ("!~", TokenKind::NeqRegex),
    ("+", TokenKind::Add),
    ("-", TokenKind::Sub),
    ("*", TokenKind::Mul),
    ("/", TokenKind::Div),
    ("%", TokenKind::Mod),
    ("^", TokenKind::Pow),
    ("<", TokenKind::Lss),
    (">", TokenKind::Gtr),
    ("=", TokenKind::Assign),
    ("{", TokenKind::LeftBrace),
    ("}", TokenKind::RightBrace),
    ("(", TokenKind::LeftParen),
    (")", TokenKind::RightParen),
    ("[", TokenKind::LeftBracket),
    ("]", TokenKind::RightBracket),
    (":", TokenKind::Colon),
    (",", TokenKind::Comma),
    ("@", TokenKind::At),
];

/// A single lexeme with its raw text and location
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Raw source text of the token (quotes included for strings)
    pub text: &'a str,
    pub span: Span,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str, span: Span) -> Self {
        Self { kind, text, span }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "end of input"),
            TokenKind::Identifier | TokenKind::Number | TokenKind::Duration => {
                write!(f, "{} \"{}\"", self.kind, self.text)
            }
            TokenKind::String => write!(f, "string {}", self.text),
            _ => write!(f, "\"{}\"", self.text),
        }
    }
}
