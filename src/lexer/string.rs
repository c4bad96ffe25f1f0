//! String literal lexemes.
//!
//! Three quoting styles are accepted:
//!
//! - **Double-quoted**: `"hello \"world\""`
//! - **Single-quoted**: `'hello \'world\''`
//! - **Raw/backtick**: `` `no escapes here` ``
//!
//! Quoted strings may not span lines and support these escapes:
//!
//! | Escape | Description        |
//! |--------|--------------------|
//! | `\a`   | Bell               |
//! | `\b`   | Backspace          |
//! | `\f`   | Form feed          |
//! | `\n`   | Newline            |
//! | `\r`   | Carriage return    |
//! | `\t`   | Tab                |
//! | `\v`   | Vertical tab       |
//! | `\\`   | Backslash          |
//! | `\"`   | Double quote       |
//! | `\'`   | Single quote       |
//! | `\xNN` | Hex (2 digits)     |
//! | `\NNN` | Octal (3 digits)   |
//! | `\uNNNN` | Unicode (4 hex)  |
//! | `\UNNNNNNNN` | Unicode (8 hex) |
//!
//! ```rust
//! use promql_ast::lexer::string::string_literal;
//!
//! let (_, s) = string_literal(r"'line\nbreak'").unwrap();
//! assert_eq!(s, "line\nbreak");
//!
//! let (_, s) = string_literal(r"`\n is literal`").unwrap();
//! assert_eq!(s, r"\n is literal");
//! ```

use std::fmt::Write;

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{take_while, take_while_m_n},
    character::complete::{anychar, char},
    combinator::{map, map_opt, value, verify},
    multi::many0,
    sequence::{delimited, preceded},
};

/// Parse a string literal in any quoting style and return the unescaped value.
pub fn string_literal(input: &str) -> IResult<&str, String> {
    alt((quoted('"'), quoted('\''), raw_string)).parse(input)
}

/// Whether `c` opens a string literal
pub fn is_quote(c: char) -> bool {
    matches!(c, '"' | '\'' | '`')
}

/// A string delimited by `quote` with escape processing
fn quoted(quote: char) -> impl FnMut(&str) -> IResult<&str, String> {
    move |input: &str| {
        delimited(
            char(quote),
            map(many0(quoted_char(quote)), |chars| chars.into_iter().collect()),
            char(quote),
        )
        .parse(input)
    }
}

/// `` `no escapes` ``; may span lines
fn raw_string(input: &str) -> IResult<&str, String> {
    map(
        delimited(char('`'), take_while(|c: char| c != '`'), char('`')),
        str::to_owned,
    )
    .parse(input)
}

fn quoted_char(quote: char) -> impl FnMut(&str) -> IResult<&str, char> {
    move |input: &str| {
        alt((
            preceded(char('\\'), escape_char),
            verify(anychar, |&c| c != quote && c != '\\' && c != '\n'),
        ))
        .parse(input)
    }
}

/// The escape sequence after a backslash
fn escape_char(input: &str) -> IResult<&str, char> {
    alt((
        value('\x07', char('a')),
        value('\x08', char('b')),
        value('\x0c', char('f')),
        value('\n', char('n')),
        value('\r', char('r')),
        value('\t', char('t')),
        value('\x0b', char('v')),
        value('\\', char('\\')),
        value('"', char('"')),
        value('\'', char('\'')),
        preceded(char('x'), hex_code_point(2)),
        preceded(char('u'), hex_code_point(4)),
        preceded(char('U'), hex_code_point(8)),
        octal_escape,
    ))
    .parse(input)
}

/// Exactly `digits` hex digits naming a valid scalar value (no surrogates)
fn hex_code_point(digits: usize) -> impl FnMut(&str) -> IResult<&str, char> {
    move |input: &str| {
        map_opt(
            take_while_m_n(digits, digits, |c: char| c.is_ascii_hexdigit()),
            |hex: &str| u32::from_str_radix(hex, 16).ok().and_then(char::from_u32),
        )
        .parse(input)
    }
}

/// `\NNN`: exactly three octal digits, at most `\377`
fn octal_escape(input: &str) -> IResult<&str, char> {
    map_opt(
        take_while_m_n(3, 3, |c: char| matches!(c, '0'..='7')),
        |oct: &str| u8::from_str_radix(oct, 8).ok().map(char::from),
    )
    .parse(input)
}

/// Render `s` as a double-quoted literal that [`string_literal`] reads back
/// unchanged.
pub fn quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x07' => out.push_str("\\a"),
            '\x08' => out.push_str("\\b"),
            '\x0c' => out.push_str("\\f"),
            '\x0b' => out.push_str("\\v"),
            c if c.is_control() && (c as u32) < 0x100 => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\U{:08x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
