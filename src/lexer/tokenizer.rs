//! Lazy tokenizer driving the lexeme parsers.

use std::iter::FusedIterator;

use tracing::trace;

use super::duration::duration;
use super::identifier::{Keyword, identifier, is_ident_start};
use super::number::{is_special_float, number};
use super::string::{is_quote, string_literal};
use super::token::{SYMBOLS, Span, Token, TokenKind};
use super::whitespace::skipped;
use crate::error::{LexError, Position};

/// Characters that glue onto a number and make it malformed (`5x`, `1e`)
#[inline]
fn continues_word(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

/// Iterator over the tokens of a query.
///
/// Yields exactly one [`TokenKind::Eof`] token at the end, or stops after the
/// first error.
///
/// ```
/// use promql_ast::lexer::{TokenKind, tokenize};
///
/// let kinds: Vec<_> = tokenize("rate(foo[5m])")
///     .map(|t| t.unwrap().kind)
///     .collect();
/// assert_eq!(kinds.len(), 8);
/// assert_eq!(kinds[4], TokenKind::Duration);
/// ```
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    source: &'a str,
    offset: usize,
    line: usize,
    column: usize,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
            column: 1,
            done: false,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    fn rest(&self) -> &'a str {
        &self.source[self.offset..]
    }

    fn position(&self) -> Position {
        Position::new(self.offset, self.line, self.column)
    }

    fn advance(&mut self, len: usize) {
        let consumed = &self.source[self.offset..self.offset + len];
        for c in consumed.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset += len;
    }

    /// Emit a token covering the next `len` bytes and move past it
    fn emit(&mut self, kind: TokenKind, len: usize) -> Token<'a> {
        let span = Span::new(self.offset, self.offset + len, self.line, self.column);
        let text = &self.source[span.start..span.end];
        self.advance(len);
        trace!(kind = ?kind, text, offset = span.start, "token");
        Token::new(kind, text, span)
    }

    fn error(&self, message: impl Into<String>) -> LexError {
        LexError::new(self.position(), message)
    }

    /// Scan the next token
    pub fn next_token(&mut self) -> Result<Token<'a>, LexError> {
        if let Ok((_, ws)) = skipped(self.rest()) {
            self.advance(ws.len());
        }

        let rest = self.rest();
        let Some(c) = rest.chars().next() else {
            return Ok(self.emit(TokenKind::Eof, 0));
        };

        if is_ident_start(c) {
            return self.lex_word(rest);
        }
        if c.is_ascii_digit() || (c == '.' && rest[1..].starts_with(|n: char| n.is_ascii_digit())) {
            return self.lex_number(rest);
        }
        if is_quote(c) {
            return self.lex_string(rest);
        }
        if let Some((sym, kind)) = SYMBOLS.iter().find(|(sym, _)| rest.starts_with(sym)) {
            return Ok(self.emit(*kind, sym.len()));
        }
        Err(self.error(format!("unexpected character {:?}", c)))
    }

    fn lex_word(&mut self, rest: &'a str) -> Result<Token<'a>, LexError> {
        let (_, word) = identifier(rest)
            .map_err(|_| self.error("invalid identifier"))?;
        let kind = if is_special_float(word) {
            TokenKind::Number
        } else if let Some(kw) = Keyword::lookup(word) {
            TokenKind::Keyword(kw)
        } else {
            TokenKind::Identifier
        };
        Ok(self.emit(kind, word.len()))
    }

    /// Durations win over numbers when the whole unit suffix is well formed
    fn lex_number(&mut self, rest: &'a str) -> Result<Token<'a>, LexError> {
        if let Ok((after, _)) = duration(rest)
            && !after.starts_with(continues_word)
        {
            return Ok(self.emit(TokenKind::Duration, rest.len() - after.len()));
        }

        match number(rest) {
            Ok((after, _)) if !after.starts_with(|c: char| continues_word(c) || c == '.') => {
                Ok(self.emit(TokenKind::Number, rest.len() - after.len()))
            }
            _ => {
                let end = rest
                    .find(|c: char| !(continues_word(c) || c == '.'))
                    .unwrap_or(rest.len());
                Err(self.error(format!(
                    "bad number or duration syntax: {:?}",
                    &rest[..end]
                )))
            }
        }
    }

    fn lex_string(&mut self, rest: &'a str) -> Result<Token<'a>, LexError> {
        match string_literal(rest) {
            Ok((after, _)) => Ok(self.emit(TokenKind::String, rest.len() - after.len())),
            Err(_) if is_unterminated(rest) => Err(self.error("unterminated quoted string")),
            Err(_) => Err(self.error("invalid escape sequence in quoted string")),
        }
    }
}

/// Whether the string starting at `rest` never reaches its closing quote
fn is_unterminated(rest: &str) -> bool {
    let mut chars = rest.chars();
    let Some(quote) = chars.next() else {
        return true;
    };
    if quote == '`' {
        return !chars.any(|c| c == '`');
    }
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '\n' => return true,
            c if c == quote => return false,
            _ => {}
        }
    }
    true
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.next_token();
        match &result {
            Ok(token) if !token.is_eof() => {}
            _ => self.done = true,
        }
        Some(result)
    }
}

impl FusedIterator for Lexer<'_> {}
