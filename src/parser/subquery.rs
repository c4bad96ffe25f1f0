//! Range and subquery brackets
//!
//! A bracket after an expression is either a range, turning a vector
//! selector into a matrix selector, or a subquery range with an optional
//! resolution step:
//!
//! - `some_metric[5m]` - Matrix selector
//! - `some_metric[5m:1m]` - Evaluate every minute over 5 minutes
//! - `some_metric[5m:]` - Evaluate at the default interval over 5 minutes
//! - `rate(http_requests[5m])[30m:1m]` - Rate over 5m, sampled every minute for 30m
//!
//! Ranges apply only to plain vector selectors. Neither form applies to an
//! expression that already yields a range vector.

use crate::ast::{Expr, SubqueryExpr};
use crate::error::ParseError;
use crate::lexer::{Span, TokenKind};
use crate::parser::Parser;
use crate::parser::selector::MatrixSelector;

impl<'a> Parser<'a> {
    /// Parse `[range]` or `[range:step?]` applied to `expr`, which started
    /// at `start`
    pub(crate) fn parse_range_suffix(&mut self, expr: Expr, start: Span) -> Result<Expr, ParseError> {
        let open = self.expect(TokenKind::LeftBracket, "range")?;

        if expr.is_range_vector() {
            return Err(ParseError::syntax(
                open.span,
                format!(
                    "range or subquery cannot be applied to a range vector ({})",
                    expr.unwrap_parens().kind_name()
                ),
            ));
        }

        let tok = self.expect(TokenKind::Duration, "range")?;
        let range = self.duration_value(tok)?;
        if range.is_zero() {
            return Err(ParseError::syntax(tok.span, "duration must be greater than 0"));
        }

        let tok = self.next()?;
        match tok.kind {
            TokenKind::RightBracket => {
                let selector = match expr {
                    Expr::VectorSelector(selector) => selector,
                    other => {
                        return Err(ParseError::syntax(
                            open.span,
                            format!("ranges only allowed for vector selectors, got {}", other.kind_name()),
                        ));
                    }
                };
                if selector.at.is_some() || selector.offset.is_some() {
                    return Err(ParseError::syntax(
                        open.span,
                        "no offset or @ modifiers allowed before range",
                    ));
                }
                let mut matrix = MatrixSelector::new(selector, range);
                matrix.span = start.to(self.prev_span());
                Ok(Expr::MatrixSelector(matrix))
            }
            TokenKind::Colon => {
                let step = match self.eat(TokenKind::Duration)? {
                    Some(tok) => Some(self.duration_value(tok)?),
                    None => None,
                };
                self.expect(TokenKind::RightBracket, "subquery")?;
                let mut subquery = SubqueryExpr::new(expr, range);
                subquery.step = step;
                subquery.span = start.to(self.prev_span());
                Ok(Expr::Subquery(Box::new(subquery)))
            }
            _ => Err(self.unexpected(tok, "range", &["\"]\"", "\":\""])),
        }
    }
}
