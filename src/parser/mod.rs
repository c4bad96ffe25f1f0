//! PromQL expression parser.
//!
//! A recursive descent parser over the token stream produced by the
//! [`Lexer`](crate::lexer::Lexer), using precedence climbing for binary
//! operators. The main entry points are [`parse`] and [`parse_with_options`].
//!
//! # Submodules
//!
//! - [`aggregation`] - Aggregation operators and grouping clauses (`by`, `without`)
//! - [`binary`] - Binary operators and vector matching modifiers
//! - [`mod@expr`] - Precedence climbing, primaries and postfix brackets
//! - [`function`] - Built-in function signatures
//! - [`selector`] - Vector and matrix selectors, `@` and `offset`
//! - [`subquery`] - Range and subquery brackets
//! - [`unary`] - Unary operators
//!
//! # Example
//!
//! ```rust
//! use promql_ast::parser::parse;
//!
//! let ast = parse("sum by (job) (rate(http_requests[5m]))").unwrap();
//! assert_eq!(ast.to_string(), "sum by (job) (rate(http_requests[5m]))");
//! ```

pub mod aggregation;
pub mod binary;
pub mod expr;
pub mod function;
pub mod selector;
pub mod subquery;
pub mod unary;

use tracing::debug;

use crate::ast::Expr;
use crate::error::ParseError;
use crate::lexer::duration::{Duration, duration};
use crate::lexer::number::number;
use crate::lexer::string::string_literal;
use crate::lexer::{Lexer, Span, Token, TokenKind};

/// Default limit on nesting: parentheses, calls, aggregations, unary
/// operators and binary operators all take a level.
///
/// Low enough that parsing, checking, printing and dropping a tree at the
/// limit fit on a 2 MiB thread in a debug build.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Parser settings.
///
/// ```
/// use promql_ast::parser::{ParserOptions, parse_with_options};
///
/// let options = ParserOptions::new().experimental_functions(true);
/// assert!(parse_with_options("limitk(2, foo)", &options).is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Maximum expression nesting depth
    pub max_depth: usize,
    /// Accept functions and aggregations marked experimental
    pub experimental_functions: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            experimental_functions: false,
        }
    }
}

impl ParserOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn experimental_functions(mut self, enabled: bool) -> Self {
        self.experimental_functions = enabled;
        self
    }
}

/// Parse a PromQL query with default options.
pub fn parse(query: &str) -> Result<Expr, ParseError> {
    parse_with_options(query, &ParserOptions::default())
}

/// Parse a PromQL query.
///
/// Returns the first syntax error found; no partial tree is produced.
pub fn parse_with_options(query: &str, options: &ParserOptions) -> Result<Expr, ParseError> {
    debug!(len = query.len(), "parsing query");
    let result = Parser::new(query, *options).parse();
    match &result {
        Ok(expr) => debug!(kind = expr.kind_name(), "parsed query"),
        Err(err) => debug!(error = %err, "failed to parse query"),
    }
    result
}

/// Single-use parser state for one query
#[derive(Debug)]
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    peeked: Option<Token<'a>>,
    /// Span of the most recently consumed token
    prev: Span,
    depth: usize,
    options: ParserOptions,
}

impl<'a> Parser<'a> {
    pub fn new(query: &'a str, options: ParserOptions) -> Self {
        Self {
            lexer: Lexer::new(query),
            peeked: None,
            prev: Span::default(),
            depth: 0,
            options,
        }
    }

    /// Parse the whole input as one expression
    pub fn parse(mut self) -> Result<Expr, ParseError> {
        let first = self.peek()?;
        if first.is_eof() {
            return Err(ParseError::syntax(first.span, "no expression found in input"));
        }
        let expr = self.parse_expr(0)?;
        let tok = self.next()?;
        if !tok.is_eof() {
            return Err(self.unexpected(tok, "expression", &["end of input"]));
        }
        Ok(expr)
    }

    pub(crate) fn options(&self) -> &ParserOptions {
        &self.options
    }

    fn pull(&mut self) -> Result<Token<'a>, ParseError> {
        match self.lexer.next() {
            Some(Ok(tok)) => Ok(tok),
            Some(Err(err)) => Err(err.into()),
            // the lexer is fused after its single end-of-input token
            None => {
                let end = self.lexer.source().len();
                Ok(Token::new(
                    TokenKind::Eof,
                    "",
                    Span::new(end, end, self.prev.line, self.prev.column),
                ))
            }
        }
    }

    /// Look at the next token without consuming it
    pub(crate) fn peek(&mut self) -> Result<Token<'a>, ParseError> {
        match self.peeked {
            Some(tok) => Ok(tok),
            None => {
                let tok = self.pull()?;
                self.peeked = Some(tok);
                Ok(tok)
            }
        }
    }

    pub(crate) fn next(&mut self) -> Result<Token<'a>, ParseError> {
        let tok = match self.peeked.take() {
            Some(tok) => tok,
            None => self.pull()?,
        };
        self.prev = tok.span;
        Ok(tok)
    }

    pub(crate) fn prev_span(&self) -> Span {
        self.prev
    }

    /// Consume the next token if it has the given kind
    pub(crate) fn eat(&mut self, kind: TokenKind) -> Result<Option<Token<'a>>, ParseError> {
        if self.peek()?.kind == kind {
            self.next().map(Some)
        } else {
            Ok(None)
        }
    }

    pub(crate) fn expect(&mut self, kind: TokenKind, context: &str) -> Result<Token<'a>, ParseError> {
        let tok = self.next()?;
        if tok.kind == kind {
            Ok(tok)
        } else {
            Err(self.unexpected(tok, context, &[kind.describe()]))
        }
    }

    pub(crate) fn unexpected(&self, tok: Token<'_>, context: &str, expected: &[&'static str]) -> ParseError {
        let mut message = format!("unexpected {} in {}", tok, context);
        if !expected.is_empty() {
            message.push_str(", expected ");
            message.push_str(&expected.join(" or "));
        }
        ParseError::unexpected(tok.span, message, expected)
    }

    /// Take one nesting level, failing at the next token once the limit is
    /// reached. The caller gives the level back.
    pub(crate) fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= self.options.max_depth {
            let span = self.peek()?.span;
            return Err(ParseError::NestingTooDeep {
                position: span.position(),
                limit: self.options.max_depth,
            });
        }
        self.depth += 1;
        tracing::trace!(depth = self.depth, "enter");
        Ok(())
    }

    /// Run `f` one nesting level deeper
    pub(crate) fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.enter()?;
        let result = f(self);
        self.depth -= 1;
        result
    }

    pub(crate) fn number_value(&self, tok: Token<'_>) -> Result<f64, ParseError> {
        match number(tok.text) {
            Ok(("", value)) => Ok(value),
            _ => Err(ParseError::syntax(tok.span, format!("invalid number {:?}", tok.text))),
        }
    }

    pub(crate) fn duration_value(&self, tok: Token<'_>) -> Result<Duration, ParseError> {
        match duration(tok.text) {
            Ok(("", value)) => Ok(value),
            _ => Err(ParseError::syntax(tok.span, format!("invalid duration {:?}", tok.text))),
        }
    }

    pub(crate) fn string_value(&self, tok: Token<'_>) -> Result<String, ParseError> {
        match string_literal(tok.text) {
            Ok(("", value)) => Ok(value),
            _ => Err(ParseError::syntax(tok.span, format!("invalid string {}", tok.text))),
        }
    }
}
