//! Main expression grammar
//!
//! Binary operators are parsed by precedence climbing; everything else is
//! recursive descent.
//!
//! ```text
//! expr          = unary_expr (binary_op bin_modifiers expr)*
//! unary_expr    = ("+" | "-") expr<^> | postfix_expr
//! postfix_expr  = primary_expr ( range | subquery | "@" at | "offset" duration )*
//! primary_expr  = number | string | selector | "(" expr ")" | call | aggregation
//! ```
//!
//! Unary operators bind tighter than `*` but looser than `^`, so `-2^2` is
//! `-(2^2)` while `-a * b` is `(-a) * b`.

use crate::ast::{BinaryExpr, BinaryOp, Expr, UnaryExpr};
use crate::error::ParseError;
use crate::lexer::{Span, TokenKind};
use crate::parser::Parser;
use crate::parser::binary::binary_op;
use crate::parser::selector::is_modifier;
use crate::parser::unary::unary_op;

impl<'a> Parser<'a> {
    /// Parse operators binding at least as tightly as `min_precedence`
    pub(crate) fn parse_expr(&mut self, min_precedence: u8) -> Result<Expr, ParseError> {
        let depth = self.depth;
        let result = self.parse_operator_chain(min_precedence);
        self.depth = depth;
        result
    }

    /// Each operator holds a nesting level until the whole chain is built, so
    /// the tree grows no deeper than the limit on either side.
    fn parse_operator_chain(&mut self, min_precedence: u8) -> Result<Expr, ParseError> {
        let start = self.peek()?.span;
        let mut lhs = self.parse_unary_expr()?;

        loop {
            let tok = self.peek()?;
            let Some(op) = binary_op(tok.kind) else {
                break;
            };
            let precedence = op.precedence();
            if precedence < min_precedence {
                break;
            }
            self.enter()?;
            self.next()?;
            check_operand(&lhs, op, tok.span)?;

            let (return_bool, matching) = self.parse_binary_modifiers()?;

            let next_min_precedence = if op.is_right_associative() {
                precedence
            } else {
                precedence + 1
            };
            let rhs = self.parse_expr(next_min_precedence)?;
            check_operand(&rhs, op, tok.span)?;

            lhs = Expr::Binary(Box::new(BinaryExpr {
                op,
                lhs,
                rhs,
                matching,
                return_bool,
                span: start.to(self.prev_span()),
            }));
        }

        Ok(lhs)
    }

    fn parse_unary_expr(&mut self) -> Result<Expr, ParseError> {
        self.nested(|p| {
            let tok = p.peek()?;
            match unary_op(tok.kind) {
                Some(op) => {
                    p.next()?;
                    let expr = p.parse_expr(BinaryOp::Pow.precedence())?;
                    Ok(Expr::Unary(Box::new(UnaryExpr {
                        op,
                        expr,
                        span: tok.span.to(p.prev_span()),
                    })))
                }
                None => p.parse_postfix_expr(),
            }
        })
    }

    fn parse_postfix_expr(&mut self) -> Result<Expr, ParseError> {
        let start = self.peek()?.span;
        let mut expr = self.parse_primary_expr()?;

        loop {
            match self.peek()?.kind {
                TokenKind::LeftBracket => expr = self.parse_range_suffix(expr, start)?,
                kind if is_modifier(kind) => expr = self.parse_modifier(expr)?,
                _ => break,
            }
        }

        Ok(expr)
    }

    fn parse_primary_expr(&mut self) -> Result<Expr, ParseError> {
        let tok = self.peek()?;
        match tok.kind {
            TokenKind::LeftParen => {
                self.next()?;
                let inner = self.parse_expr(0)?;
                self.expect(TokenKind::RightParen, "parenthesized expression")?;
                Ok(Expr::Paren(Box::new(inner)))
            }
            TokenKind::Number => {
                self.next()?;
                Ok(Expr::NumberLiteral(self.number_value(tok)?))
            }
            TokenKind::String => {
                self.next()?;
                Ok(Expr::StringLiteral(self.string_value(tok)?))
            }
            TokenKind::LeftBrace => self.parse_vector_selector(None),
            TokenKind::Identifier => {
                self.next()?;
                if self.peek()?.kind == TokenKind::LeftParen {
                    self.parse_call(tok)
                } else {
                    self.parse_vector_selector(Some(tok))
                }
            }
            TokenKind::Keyword(kw) if kw.is_aggregation() => self.parse_aggregation(),
            _ => {
                self.next()?;
                Err(self.unexpected(
                    tok,
                    "expression",
                    &["number", "string", "identifier", "\"(\"", "\"{\""],
                ))
            }
        }
    }
}

/// Matrix selectors and subqueries cannot be binary operands
fn check_operand(operand: &Expr, op: BinaryOp, at: Span) -> Result<(), ParseError> {
    if operand.is_range_vector() {
        return Err(ParseError::syntax(
            at,
            format!(
                "binary operator \"{}\" cannot take a range vector operand ({})",
                op,
                operand.unwrap_parens().kind_name()
            ),
        ));
    }
    Ok(())
}
