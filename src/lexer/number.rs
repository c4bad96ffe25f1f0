// Number literal lexemes
//
// Supports:
// - Integers: 42, 0
// - Floats: 3.14, .5, 5.
// - Hexadecimal: 0x1F, 0X2A
// - Octal: 0755 (leading zero), 0o755
// - Scientific notation: 1e10, 2.5E-3
// - Special values: Inf, NaN (case-insensitive)
//
// Numbers are unsigned; a leading sign is a unary operator.

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag_no_case, take_while1},
    character::complete::{char, one_of},
    combinator::{map_opt, map_res, opt, recognize, value},
    sequence::{pair, preceded},
};

use super::identifier::is_ident_char;

/// Parse an unsigned number literal and return its value.
///
/// ```
/// use promql_ast::lexer::number::number;
///
/// assert_eq!(number("0x1F"), Ok(("", 31.0)));
/// assert_eq!(number("2.5e3 "), Ok((" ", 2500.0)));
/// assert!(number("Inf").unwrap().1.is_infinite());
/// ```
pub fn number(input: &str) -> IResult<&str, f64> {
    alt((special_float, hexadecimal, octal_prefixed, octal_legacy, decimal)).parse(input)
}

/// Whether an identifier spells one of the special float values
pub fn is_special_float(ident: &str) -> bool {
    ident.eq_ignore_ascii_case("inf") || ident.eq_ignore_ascii_case("nan")
}

/// `Inf` or `NaN`, not followed by an identifier character (`info` is a name)
fn special_float(input: &str) -> IResult<&str, f64> {
    let (rest, val) = alt((
        value(f64::INFINITY, tag_no_case("inf")),
        value(f64::NAN, tag_no_case("nan")),
    ))
    .parse(input)?;

    if rest.chars().next().is_some_and(is_ident_char) {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Tag,
        )));
    }
    Ok((rest, val))
}

fn radix_value(digits: &str, radix: u32) -> Option<f64> {
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * radix as f64 + d as f64)
    })
}

/// `0x1F`, `0X2A`
fn hexadecimal(input: &str) -> IResult<&str, f64> {
    map_opt(
        preceded(
            pair(char('0'), one_of("xX")),
            take_while1(|c: char| c.is_ascii_hexdigit()),
        ),
        |digits: &str| radix_value(digits, 16),
    )
    .parse(input)
}

/// `0o755`, `0O755`
fn octal_prefixed(input: &str) -> IResult<&str, f64> {
    map_opt(
        preceded(
            pair(char('0'), one_of("oO")),
            take_while1(|c: char| matches!(c, '0'..='7')),
        ),
        |digits: &str| radix_value(digits, 8),
    )
    .parse(input)
}

/// `0755`: a leading zero followed by octal digits, not continuing as a
/// decimal float (`0.5`, `0e3`, `089`)
fn octal_legacy(input: &str) -> IResult<&str, f64> {
    let (rest, digits) = preceded(
        char('0'),
        take_while1(|c: char| matches!(c, '0'..='7')),
    )
    .parse(input)?;

    if rest
        .chars()
        .next()
        .is_some_and(|c| c == '.' || c == 'e' || c == 'E' || c.is_ascii_digit())
    {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Digit,
        )));
    }

    match radix_value(digits, 8) {
        Some(v) => Ok((rest, v)),
        None => Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::MapOpt,
        ))),
    }
}

/// Decimal integer or float with optional exponent
fn decimal(input: &str) -> IResult<&str, f64> {
    map_res(
        alt((
            // .42, .42e10
            recognize((char('.'), decimal_digits, opt(exponent))),
            // 42e10, 42.e10, 42.42e10
            recognize((
                decimal_digits,
                opt(pair(char('.'), opt(decimal_digits))),
                exponent,
            )),
            // 42., 42.42
            recognize((decimal_digits, char('.'), opt(decimal_digits))),
            recognize(decimal_digits),
        )),
        |s: &str| s.parse::<f64>(),
    )
    .parse(input)
}

fn decimal_digits(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_digit())(input)
}

/// `e10`, `E-3`, `e+5`
fn exponent(input: &str) -> IResult<&str, &str> {
    recognize((one_of("eE"), opt(one_of("+-")), decimal_digits)).parse(input)
}
