//! Unary expression parsing for PromQL
//!
//! This module handles the prefix operators:
//! - `-expr` - Negation
//! - `+expr` - No-op (identity)
//!
//! Unary operators bind tighter than every binary operator except `^`.
//! The operand is parsed by the expression parser at power precedence.
//!
//! Examples:
//! - `-some_metric`
//! - `+1`
//! - `-rate(some_metric[5m])`
//! - `--some_metric` (double negation)

use crate::ast::UnaryOp;
use crate::lexer::TokenKind;

/// Map a token to the unary operator it introduces, if any
///
/// # Examples
///
/// ```
/// use promql_ast::parser::unary::unary_op;
/// use promql_ast::ast::UnaryOp;
/// use promql_ast::lexer::TokenKind;
///
/// assert_eq!(unary_op(TokenKind::Sub), Some(UnaryOp::Minus));
/// assert_eq!(unary_op(TokenKind::Add), Some(UnaryOp::Plus));
/// assert_eq!(unary_op(TokenKind::Mul), None);
/// ```
pub fn unary_op(kind: TokenKind) -> Option<UnaryOp> {
    match kind {
        TokenKind::Sub => Some(UnaryOp::Minus),
        TokenKind::Add => Some(UnaryOp::Plus),
        _ => None,
    }
}
