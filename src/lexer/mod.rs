// Lexer for PromQL
// Lexeme recognizers built from nom combinators, and the tokenizer that
// drives them over a whole query

pub mod duration;
pub mod identifier;
pub mod number;
pub mod string;
pub mod token;
pub mod tokenizer;
pub mod whitespace;

pub use duration::Duration;
pub use identifier::Keyword;
pub use token::{Span, Token, TokenKind};
pub use tokenizer::Lexer;

/// Lazily tokenize `query`.
pub fn tokenize(query: &str) -> Lexer<'_> {
    Lexer::new(query)
}
