//! Aggregation expressions and their grouping clauses.
//!
//! ```text
//! op [by|without (labels)] ( [param,] expr ) [by|without (labels)]
//! ```
//!
//! The grouping clause may be written before or after the arguments, but
//! not both:
//!
//! - `by (label1, label2)` - Group by specific labels, dropping all others
//! - `without (label1, label2)` - Drop specific labels, keeping all others
//!
//! # Supported Aggregation Operators
//!
//! `sum`, `avg`, `count`, `min`, `max`, `group`, `stddev`, `stdvar`,
//! `topk`, `bottomk`, `count_values`, `quantile`, and the experimental
//! `limitk` and `limit_ratio`.
//!
//! # Examples
//!
//! ```rust
//! use promql_ast::ast::Expr;
//! use promql_ast::parser::aggregation::{AggregateOp, GroupingAction};
//! use promql_ast::parser::parse;
//!
//! let Expr::Aggregate(agg) = parse("topk by (job) (5, http_requests)").unwrap() else {
//!     panic!("not an aggregation");
//! };
//! assert_eq!(agg.op, AggregateOp::Topk);
//! assert_eq!(agg.grouping.unwrap().action, GroupingAction::By);
//! assert_eq!(agg.param, Some(Expr::NumberLiteral(5.0)));
//! ```

use std::fmt;

use crate::ast::{AggregateExpr, Expr, ValueType, write_label_list};
use crate::error::ParseError;
use crate::lexer::{Keyword, TokenKind};
use crate::parser::Parser;

/// Aggregation operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateOp {
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
}

impl AggregateOp {
    pub fn from_keyword(kw: Keyword) -> Option<Self> {
        let op = match kw {
            Keyword::Sum => AggregateOp::Sum,
            Keyword::Avg => AggregateOp::Avg,
            Keyword::Count => AggregateOp::Count,
            Keyword::Min => AggregateOp::Min,
            Keyword::Max => AggregateOp::Max,
            Keyword::Group => AggregateOp::Group,
            Keyword::Stddev => AggregateOp::Stddev,
            Keyword::Stdvar => AggregateOp::Stdvar,
            Keyword::Topk => AggregateOp::Topk,
            Keyword::Bottomk => AggregateOp::Bottomk,
            Keyword::CountValues => AggregateOp::CountValues,
            Keyword::Quantile => AggregateOp::Quantile,
            Keyword::Limitk => AggregateOp::Limitk,
            Keyword::LimitRatio => AggregateOp::LimitRatio,
            _ => return None,
        };
        Some(op)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateOp::Sum => "sum",
            AggregateOp::Avg => "avg",
            AggregateOp::Count => "count",
            AggregateOp::Min => "min",
            AggregateOp::Max => "max",
            AggregateOp::Group => "group",
            AggregateOp::Stddev => "stddev",
            AggregateOp::Stdvar => "stdvar",
            AggregateOp::Topk => "topk",
            AggregateOp::Bottomk => "bottomk",
            AggregateOp::CountValues => "count_values",
            AggregateOp::Quantile => "quantile",
            AggregateOp::Limitk => "limitk",
            AggregateOp::LimitRatio => "limit_ratio",
        }
    }

    /// Only accepted with experimental functions enabled
    pub fn is_experimental(&self) -> bool {
        matches!(self, AggregateOp::Limitk | AggregateOp::LimitRatio)
    }

    /// Type of the leading parameter, `None` if the operator takes none
    pub fn param_type(&self) -> Option<ValueType> {
        match self {
            AggregateOp::Topk
            | AggregateOp::Bottomk
            | AggregateOp::Quantile
            | AggregateOp::Limitk
            | AggregateOp::LimitRatio => Some(ValueType::Scalar),
            AggregateOp::CountValues => Some(ValueType::String),
            _ => None,
        }
    }
}

impl fmt::Display for AggregateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The action for aggregation grouping: `by` or `without`.
///
/// - [`GroupingAction::By`]: Group results by the specified labels only
/// - [`GroupingAction::Without`]: Group results by all labels except those specified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupingAction {
    /// Group by specific labels, dropping all others.
    ///
    /// Example: `sum by (job) (http_requests)` groups by `job` label only.
    By,
    /// Drop specific labels, keeping all others.
    ///
    /// Example: `sum without (instance) (http_requests)` keeps all labels except `instance`.
    Without,
}

impl fmt::Display for GroupingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupingAction::By => write!(f, "by"),
            GroupingAction::Without => write!(f, "without"),
        }
    }
}

/// Grouping clause for aggregation expressions.
///
/// ```rust
/// use promql_ast::parser::aggregation::{Grouping, GroupingAction};
///
/// let g = Grouping {
///     action: GroupingAction::By,
///     labels: vec!["job".to_string(), "instance".to_string()],
/// };
/// assert_eq!(g.to_string(), "by (job, instance)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grouping {
    pub action: GroupingAction,
    pub labels: Vec<String>,
}

impl fmt::Display for Grouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.action)?;
        write_label_list(f, &self.labels)
    }
}

impl<'a> Parser<'a> {
    /// Parse an aggregation; the next token is its operator keyword
    pub(crate) fn parse_aggregation(&mut self) -> Result<Expr, ParseError> {
        const CONTEXT: &str = "aggregation";
        let tok = self.next()?;
        let op = match tok.kind {
            TokenKind::Keyword(kw) => AggregateOp::from_keyword(kw),
            _ => None,
        };
        let Some(op) = op else {
            return Err(self.unexpected(tok, CONTEXT, &["aggregation operator"]));
        };
        if op.is_experimental() && !self.options().experimental_functions {
            return Err(ParseError::syntax(
                tok.span,
                format!("aggregation {:?} is experimental and not enabled", op.as_str()),
            ));
        }

        let mut grouping = self.parse_grouping()?;

        self.expect(TokenKind::LeftParen, CONTEXT)?;
        let mut args = self.parse_arguments(CONTEXT)?;

        if let Some(after) = self.parse_grouping()? {
            if grouping.is_some() {
                return Err(ParseError::syntax(
                    self.prev_span(),
                    "aggregation may only have one grouping clause",
                ));
            }
            grouping = Some(after);
        }

        let expected = if op.param_type().is_some() { 2 } else { 1 };
        if args.is_empty() {
            return Err(ParseError::syntax(tok.span, "no arguments for aggregate expression provided"));
        }
        if args.len() != expected {
            return Err(ParseError::syntax(
                tok.span,
                format!(
                    "wrong number of arguments for aggregate expression provided, expected {}, got {}",
                    expected,
                    args.len()
                ),
            ));
        }

        let expr = args.pop().ok_or_else(|| ParseError::syntax(tok.span, "no arguments for aggregate expression provided"))?;
        let mut agg = match args.pop() {
            Some(param) => AggregateExpr::with_param(op, param, expr),
            None => AggregateExpr::new(op, expr),
        };
        agg.grouping = grouping;
        agg.span = tok.span.to(self.prev_span());
        Ok(Expr::Aggregate(Box::new(agg)))
    }

    /// Optional `by (...)` or `without (...)`
    fn parse_grouping(&mut self) -> Result<Option<Grouping>, ParseError> {
        let action = match self.peek()?.kind {
            TokenKind::Keyword(Keyword::By) => GroupingAction::By,
            TokenKind::Keyword(Keyword::Without) => GroupingAction::Without,
            _ => return Ok(None),
        };
        self.next()?;
        let labels = self.parse_label_list("grouping")?;
        Ok(Some(Grouping { action, labels }))
    }

    /// Comma separated expressions up to and including the closing
    /// parenthesis. A trailing comma is allowed.
    pub(crate) fn parse_arguments(&mut self, context: &str) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();
        if self.eat(TokenKind::RightParen)?.is_some() {
            return Ok(args);
        }
        loop {
            args.push(self.parse_expr(0)?);
            let tok = self.next()?;
            match tok.kind {
                TokenKind::Comma => {
                    if self.eat(TokenKind::RightParen)?.is_some() {
                        break;
                    }
                }
                TokenKind::RightParen => break,
                _ => return Err(self.unexpected(tok, context, &["\",\"", "\")\""])),
            }
        }
        Ok(args)
    }
}
