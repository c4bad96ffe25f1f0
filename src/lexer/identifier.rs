//! Identifiers and reserved words.
//!
//! Identifiers match `[a-zA-Z_][a-zA-Z0-9_:]*`. Colons are allowed after the
//! first character so recording-rule names such as `job:rate5m:sum` lex as a
//! single identifier. Label names are the colon-free subset.
//!
//! Reserved words are recognized by an exact, case-sensitive lookup: `sum` is
//! a keyword, `Sum` is an ordinary identifier.

use nom::{
    IResult, Parser,
    bytes::complete::{take_while, take_while_m_n},
    combinator::recognize,
    sequence::pair,
};

/// Can start an identifier
#[inline]
pub fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

/// Can continue an identifier
#[inline]
pub fn is_ident_char(c: char) -> bool {
    c == '_' || c == ':' || c.is_ascii_alphanumeric()
}

/// Parse an identifier: `[a-zA-Z_][a-zA-Z0-9_:]*`
///
/// ```
/// use promql_ast::lexer::identifier::identifier;
///
/// assert_eq!(identifier("job:rate5m:sum{"), Ok(("{", "job:rate5m:sum")));
/// assert!(identifier(":foo").is_err());
/// ```
pub fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while_m_n(1, 1, is_ident_start),
        take_while(is_ident_char),
    ))
    .parse(input)
}

/// Whether `s` is a valid label name (`[a-zA-Z_][a-zA-Z0-9_]*`)
pub fn is_label_name(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(is_ident_start) && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// Reserved words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    // aggregation operators
    Sum,
    Avg,
    Count,
    Min,
    Max,
    Group,
    Stddev,
    Stdvar,
    Topk,
    Bottomk,
    CountValues,
    Quantile,
    Limitk,
    LimitRatio,

    // keyword operators
    And,
    Or,
    Unless,
    Atan2,

    // modifiers
    Offset,
    By,
    Without,
    On,
    Ignoring,
    GroupLeft,
    GroupRight,
    Bool,
}

const KEYWORDS: &[(&str, Keyword)] = &[
    ("sum", Keyword::Sum),
    ("avg", Keyword::Avg),
    ("count", Keyword::Count),
    ("min", Keyword::Min),
    ("max", Keyword::Max),
    ("group", Keyword::Group),
    ("stddev", Keyword::Stddev),
    ("stdvar", Keyword::Stdvar),
    ("topk", Keyword::Topk),
    ("bottomk", Keyword::Bottomk),
    ("count_values", Keyword::CountValues),
    ("quantile", Keyword::Quantile),
    ("limitk", Keyword::Limitk),
    ("limit_ratio", Keyword::LimitRatio),
    ("and", Keyword::And),
    ("or", Keyword::Or),
    ("unless", Keyword::Unless),
    ("atan2", Keyword::Atan2),
    ("offset", Keyword::Offset),
    ("by", Keyword::By),
    ("without", Keyword::Without),
    ("on", Keyword::On),
    ("ignoring", Keyword::Ignoring),
    ("group_left", Keyword::GroupLeft),
    ("group_right", Keyword::GroupRight),
    ("bool", Keyword::Bool),
];

impl Keyword {
    /// Exact, case-sensitive lookup
    pub fn lookup(s: &str) -> Option<Keyword> {
        KEYWORDS.iter().find(|(text, _)| *text == s).map(|(_, kw)| *kw)
    }

    pub fn as_str(&self) -> &'static str {
        KEYWORDS
            .iter()
            .find(|(_, kw)| kw == self)
            .map(|(text, _)| *text)
            .unwrap_or_default()
    }

    pub fn is_aggregation(&self) -> bool {
        matches!(
            self,
            Keyword::Sum
                | Keyword::Avg
                | Keyword::Count
                | Keyword::Min
                | Keyword::Max
                | Keyword::Group
                | Keyword::Stddev
                | Keyword::Stdvar
                | Keyword::Topk
                | Keyword::Bottomk
                | Keyword::CountValues
                | Keyword::Quantile
                | Keyword::Limitk
                | Keyword::LimitRatio
        )
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
