//! Whitespace and comment skipping.
//!
//! Whitespace is space, tab, newline or carriage return. Comments start with
//! `#` and run to the end of the line. Neither produces a token.
//!
//! ```rust
//! use promql_ast::lexer::whitespace::skipped;
//!
//! let (rest, _) = skipped("  # rate of requests\n  foo").unwrap();
//! assert_eq!(rest, "foo");
//! ```

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{take_till, take_while1},
    character::complete::char,
    combinator::recognize,
    multi::many0,
    sequence::preceded,
};

#[inline]
pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// One or more whitespace characters. Does not consume comments.
pub fn whitespace1(input: &str) -> IResult<&str, &str> {
    take_while1(is_whitespace)(input)
}

/// A `#` comment up to, but not including, the next newline.
/// Returns the comment text without the `#`.
pub fn line_comment(input: &str) -> IResult<&str, &str> {
    preceded(char('#'), take_till(|c: char| c == '\n')).parse(input)
}

/// Skip any mix of whitespace and comments, returning what was skipped.
pub fn skipped(input: &str) -> IResult<&str, &str> {
    recognize(many0(alt((whitespace1, line_comment)))).parse(input)
}
