//! Vector selector parsing for PromQL
//!
//! A vector selector selects a set of time series and a single sample value
//! for each at a given timestamp (instant).
//!
//! Syntax:
//! ```text
//! metric_name
//! metric_name{label_matchers}
//! {label_matchers}
//! {"metric.name", label_matchers}
//! ```
//!
//! Label matchers:
//! - `=`  : equality
//! - `!=` : inequality
//! - `=~` : regex match
//! - `!~` : regex not match
//!
//! Selectors, matrix selectors and subqueries may be followed by the `@`
//! and `offset` modifiers, parsed here by [`Parser::parse_modifier`].

use std::fmt;

use regex::Regex;

use crate::ast::Expr;
use crate::error::ParseError;
use crate::lexer::identifier::is_label_name;
use crate::lexer::string::quote_string;
use crate::lexer::{Duration, Keyword, Span, Token, TokenKind};
use crate::parser::Parser;

/// Label holding the metric name
pub const METRIC_NAME_LABEL: &str = "__name__";

/// @ modifier for timestamp pinning
///
/// The @ modifier allows pinning a query to a specific timestamp,
/// or to the start/end of the evaluation range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtModifier {
    /// Pin to a specific Unix timestamp (in milliseconds)
    Timestamp(i64),
    /// Pin to the start of the evaluation range: `@ start()`
    Start,
    /// Pin to the end of the evaluation range: `@ end()`
    End,
}

impl AtModifier {
    /// Timestamp from fractional seconds, rounded to the millisecond.
    /// `None` for non-finite values and values outside the `i64` range.
    pub fn from_secs_f64(secs: f64) -> Option<Self> {
        let ms = (secs * 1000.0).round();
        if ms.is_finite() && ms >= i64::MIN as f64 && ms < i64::MAX as f64 {
            Some(AtModifier::Timestamp(ms as i64))
        } else {
            None
        }
    }
}

impl fmt::Display for AtModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtModifier::Timestamp(ts) => {
                // integer arithmetic keeps large timestamps exact
                let sign = if *ts < 0 { "-" } else { "" };
                let abs = ts.unsigned_abs();
                write!(f, "@ {}{}.{:03}", sign, abs / 1000, abs % 1000)
            }
            AtModifier::Start => write!(f, "@ start()"),
            AtModifier::End => write!(f, "@ end()"),
        }
    }
}

/// Label matching operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelMatchOp {
    /// `=` - Exact string equality
    Equal,
    /// `!=` - String inequality
    NotEqual,
    /// `=~` - Regex match
    RegexMatch,
    /// `!~` - Regex not match
    RegexNotMatch,
}

impl LabelMatchOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelMatchOp::Equal => "=",
            LabelMatchOp::NotEqual => "!=",
            LabelMatchOp::RegexMatch => "=~",
            LabelMatchOp::RegexNotMatch => "!~",
        }
    }

    fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Assign => Some(LabelMatchOp::Equal),
            TokenKind::Neq => Some(LabelMatchOp::NotEqual),
            TokenKind::EqlRegex => Some(LabelMatchOp::RegexMatch),
            TokenKind::NeqRegex => Some(LabelMatchOp::RegexNotMatch),
            _ => None,
        }
    }

    /// Check if this is a negative matcher (!=, !~)
    pub fn is_negative(&self) -> bool {
        matches!(self, LabelMatchOp::NotEqual | LabelMatchOp::RegexNotMatch)
    }

    /// Check if this is a regex matcher (=~, !~)
    pub fn is_regex(&self) -> bool {
        matches!(self, LabelMatchOp::RegexMatch | LabelMatchOp::RegexNotMatch)
    }
}

impl fmt::Display for LabelMatchOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single label matcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMatcher {
    /// Label name (e.g., "job", "__name__")
    pub name: String,
    pub op: LabelMatchOp,
    /// Value to match against; a pattern for the regex operators
    pub value: String,
}

impl LabelMatcher {
    pub fn new(name: impl Into<String>, op: LabelMatchOp, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            op,
            value: value.into(),
        }
    }

    /// Compile the value as a fully anchored regular expression.
    /// `.` also matches newlines.
    pub fn regex(&self) -> Result<Regex, regex::Error> {
        Regex::new(&format!("^(?s:{})$", self.value))
    }

    /// Whether a label with value `value` satisfies this matcher. Fails only
    /// when a regex matcher holds an invalid pattern.
    pub fn matches(&self, value: &str) -> Result<bool, regex::Error> {
        Ok(match self.op {
            LabelMatchOp::Equal => self.value == value,
            LabelMatchOp::NotEqual => self.value != value,
            LabelMatchOp::RegexMatch => self.regex()?.is_match(value),
            LabelMatchOp::RegexNotMatch => !self.regex()?.is_match(value),
        })
    }

    /// Check if this matcher matches the empty string, i.e. also selects
    /// series that lack the label. Invalid patterns match nothing.
    pub fn matches_empty(&self) -> bool {
        self.matches("").unwrap_or(false)
    }
}

impl fmt::Display for LabelMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if is_label_name(&self.name) {
            write!(f, "{}", self.name)?;
        } else {
            write!(f, "{}", quote_string(&self.name))?;
        }
        write!(f, "{}{}", self.op, quote_string(&self.value))
    }
}

/// A vector selector expression
#[derive(Debug, Clone)]
pub struct VectorSelector {
    /// Metric name written before the braces
    pub name: Option<String>,
    pub matchers: Vec<LabelMatcher>,
    /// Offset modifier (e.g., `offset 5m`, `offset -1h`)
    pub offset: Option<Duration>,
    pub at: Option<AtModifier>,
    pub span: Span,
}

impl VectorSelector {
    /// Create a new vector selector with just a metric name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::with_matchers(Vec::new())
        }
    }

    /// Create a new vector selector with only label matchers
    pub fn with_matchers(matchers: Vec<LabelMatcher>) -> Self {
        Self {
            name: None,
            matchers,
            offset: None,
            at: None,
            span: Span::default(),
        }
    }

    /// Get all matchers including the implicit __name__ matcher
    pub fn all_matchers(&self) -> Vec<LabelMatcher> {
        let mut result = self.matchers.clone();
        if let Some(ref name) = self.name {
            result.push(LabelMatcher::new(
                METRIC_NAME_LABEL,
                LabelMatchOp::Equal,
                name.clone(),
            ));
        }
        result
    }

    /// At least one matcher that does not match the empty string. A metric
    /// name counts as such a matcher.
    pub fn has_non_empty_matcher(&self) -> bool {
        self.name.is_some() || self.matchers.iter().any(|m| !m.matches_empty())
    }

    fn fmt_body(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref name) = self.name {
            write!(f, "{}", name)?;
        }
        if !self.matchers.is_empty() {
            write!(f, "{{")?;
            for (i, m) in self.matchers.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", m)?;
            }
            write!(f, "}}")?;
        } else if self.name.is_none() {
            write!(f, "{{}}")?;
        }
        Ok(())
    }

    fn fmt_modifiers(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // @ comes before offset in canonical PromQL
        if let Some(ref at) = self.at {
            write!(f, " {}", at)?;
        }
        if let Some(ref offset) = self.offset {
            write!(f, " offset {}", offset)?;
        }
        Ok(())
    }
}

impl PartialEq for VectorSelector {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.matchers == other.matchers
            && self.offset == other.offset
            && self.at == other.at
    }
}

impl fmt::Display for VectorSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_body(f)?;
        self.fmt_modifiers(f)
    }
}

/// A matrix selector expression (range vector)
///
/// Extends a vector selector with a range duration in square brackets. The
/// `@` and `offset` modifiers written after the range are stored on the
/// inner selector.
///
/// ```text
/// metric_name[5m]
/// metric_name{label="value"}[1h] offset 1d
/// ```
#[derive(Debug, Clone)]
pub struct MatrixSelector {
    pub selector: VectorSelector,
    pub range: Duration,
    pub span: Span,
}

impl MatrixSelector {
    pub fn new(selector: VectorSelector, range: Duration) -> Self {
        Self {
            selector,
            range,
            span: Span::default(),
        }
    }
}

impl PartialEq for MatrixSelector {
    fn eq(&self, other: &Self) -> bool {
        self.selector == other.selector && self.range == other.range
    }
}

impl fmt::Display for MatrixSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.selector.fmt_body(f)?;
        write!(f, "[{}]", self.range)?;
        self.selector.fmt_modifiers(f)
    }
}

/// The modifier slots of a node that accepts `@` and `offset`
fn modifier_slots(
    expr: &mut Expr,
) -> Option<(&mut Option<AtModifier>, &mut Option<Duration>, &mut Span)> {
    match expr {
        Expr::VectorSelector(v) => Some((&mut v.at, &mut v.offset, &mut v.span)),
        Expr::MatrixSelector(m) => Some((&mut m.selector.at, &mut m.selector.offset, &mut m.span)),
        Expr::Subquery(s) => Some((&mut s.at, &mut s.offset, &mut s.span)),
        _ => None,
    }
}

impl<'a> Parser<'a> {
    /// Parse a selector. `name` is the already consumed metric name, if any;
    /// otherwise the next token is the opening brace.
    pub(crate) fn parse_vector_selector(&mut self, name: Option<Token<'a>>) -> Result<Expr, ParseError> {
        let start = match name {
            Some(tok) => tok.span,
            None => self.peek()?.span,
        };
        let mut selector = VectorSelector::with_matchers(Vec::new());
        selector.name = name.map(|tok| tok.text.to_string());

        if self.eat(TokenKind::LeftBrace)?.is_some() {
            selector.matchers = self.parse_label_matchers()?;
        }

        selector.span = start.to(self.prev_span());
        Ok(Expr::VectorSelector(selector))
    }

    /// Matchers up to and including the closing brace
    fn parse_label_matchers(&mut self) -> Result<Vec<LabelMatcher>, ParseError> {
        const CONTEXT: &str = "label matching";
        let mut matchers = Vec::new();

        loop {
            let tok = self.next()?;
            let name = match tok.kind {
                TokenKind::RightBrace => break,
                TokenKind::String => {
                    let text = self.string_value(tok)?;
                    if LabelMatchOp::from_token(self.peek()?.kind).is_none() {
                        // a lone string is the metric name
                        matchers.push(LabelMatcher::new(METRIC_NAME_LABEL, LabelMatchOp::Equal, text));
                        if !self.matcher_separator()? {
                            break;
                        }
                        continue;
                    }
                    text
                }
                TokenKind::Identifier | TokenKind::Keyword(_) | TokenKind::Number
                    if is_label_name(tok.text) =>
                {
                    tok.text.to_string()
                }
                TokenKind::Identifier => {
                    return Err(ParseError::syntax(
                        tok.span,
                        format!("invalid label name {:?} in {}", tok.text, CONTEXT),
                    ));
                }
                _ => return Err(self.unexpected(tok, CONTEXT, &["label name", "\"}\""])),
            };

            let tok = self.next()?;
            let Some(op) = LabelMatchOp::from_token(tok.kind) else {
                return Err(self.unexpected(tok, CONTEXT, &["\"=\"", "\"!=\"", "\"=~\"", "\"!~\""]));
            };
            let value = self.expect(TokenKind::String, CONTEXT)?;
            let value = self.string_value(value)?;
            matchers.push(LabelMatcher::new(name, op, value));

            if !self.matcher_separator()? {
                break;
            }
        }

        Ok(matchers)
    }

    /// `true` after a comma, `false` after the closing brace
    fn matcher_separator(&mut self) -> Result<bool, ParseError> {
        let tok = self.next()?;
        match tok.kind {
            TokenKind::Comma => Ok(true),
            TokenKind::RightBrace => Ok(false),
            _ => Err(self.unexpected(tok, "label matching", &["\",\"", "\"}\""])),
        }
    }

    /// Parse one `@` or `offset` modifier and attach it to `expr`
    pub(crate) fn parse_modifier(&mut self, mut expr: Expr) -> Result<Expr, ParseError> {
        let tok = self.next()?;
        let is_at = tok.kind == TokenKind::At;
        let name = if is_at { "@" } else { "offset" };

        let Some((at_slot, offset_slot, span)) = modifier_slots(&mut expr) else {
            return Err(ParseError::syntax(
                tok.span,
                format!(
                    "{} modifier must be preceded by an instant vector selector or range vector selector or a subquery",
                    name
                ),
            ));
        };

        if is_at {
            if at_slot.is_some() {
                return Err(ParseError::syntax(tok.span, "@ <timestamp> may not be set multiple times"));
            }
            *at_slot = Some(self.parse_at_value()?);
        } else {
            if offset_slot.is_some() {
                return Err(ParseError::syntax(tok.span, "offset may not be set multiple times"));
            }
            *offset_slot = Some(self.parse_offset_value()?);
        }
        *span = span.to(self.prev_span());

        Ok(expr)
    }

    /// `[+-] number`, `start()` or `end()`
    fn parse_at_value(&mut self) -> Result<AtModifier, ParseError> {
        const CONTEXT: &str = "@ modifier";
        let tok = self.next()?;
        match tok.kind {
            TokenKind::Identifier if tok.text == "start" || tok.text == "end" => {
                self.expect(TokenKind::LeftParen, CONTEXT)?;
                self.expect(TokenKind::RightParen, CONTEXT)?;
                Ok(if tok.text == "start" {
                    AtModifier::Start
                } else {
                    AtModifier::End
                })
            }
            TokenKind::Number | TokenKind::Add | TokenKind::Sub => {
                let (negative, number) = match tok.kind {
                    TokenKind::Number => (false, tok),
                    kind => (kind == TokenKind::Sub, self.expect(TokenKind::Number, CONTEXT)?),
                };
                let value = self.number_value(number)?;
                let value = if negative { -value } else { value };
                AtModifier::from_secs_f64(value)
                    .ok_or_else(|| ParseError::syntax(tok.span, format!("timestamp out of bounds for @ modifier: {}", value)))
            }
            _ => Err(self.unexpected(tok, CONTEXT, &["number", "\"start()\"", "\"end()\""])),
        }
    }

    /// `[+-] duration`
    fn parse_offset_value(&mut self) -> Result<Duration, ParseError> {
        const CONTEXT: &str = "offset modifier";
        let sign = self.peek()?;
        let negative = match sign.kind {
            TokenKind::Sub => {
                self.next()?;
                true
            }
            TokenKind::Add => {
                self.next()?;
                false
            }
            _ => false,
        };
        let tok = self.expect(TokenKind::Duration, CONTEXT)?;
        let duration = self.duration_value(tok)?;
        if negative {
            duration
                .checked_neg()
                .ok_or_else(|| ParseError::syntax(sign.span, "offset out of bounds"))
        } else {
            Ok(duration)
        }
    }
}

/// Tokens that start an `@` or `offset` modifier
pub(crate) fn is_modifier(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::At | TokenKind::Keyword(Keyword::Offset))
}
