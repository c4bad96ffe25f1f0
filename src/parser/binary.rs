//! Binary operators and vector matching modifiers
//!
//! Binary operators in PromQL (lowest to highest precedence):
//! 1. `or` - Set union
//! 2. `and`, `unless` - Set intersection/difference
//! 3. `==`, `!=`, `<`, `<=`, `>`, `>=` - Comparison
//! 4. `+`, `-` - Addition/subtraction
//! 5. `*`, `/`, `%`, `atan2` - Multiplication/division
//! 6. `^` - Power (right-associative)
//!
//! Vector matching modifiers, written between the operator and the right
//! operand:
//! - `bool` - Return 0/1 instead of filtering (for comparisons)
//! - `on(label, ...)` - Match only on specified labels
//! - `ignoring(label, ...)` - Match ignoring specified labels
//! - `group_left(label, ...)` - Many-to-one matching
//! - `group_right(label, ...)` - One-to-many matching
//!
//! Whether a modifier makes sense for the operator and operand types is
//! decided by the [checker](crate::checker), not here.

use crate::ast::{BinaryOp, GroupModifier, GroupSide, VectorMatching, VectorMatchingOp};
use crate::error::ParseError;
use crate::lexer::identifier::is_label_name;
use crate::lexer::{Keyword, TokenKind};
use crate::parser::Parser;

/// Map a token to the binary operator it denotes, if any
///
/// ```
/// use promql_ast::ast::BinaryOp;
/// use promql_ast::lexer::{Keyword, TokenKind};
/// use promql_ast::parser::binary::binary_op;
///
/// assert_eq!(binary_op(TokenKind::Gte), Some(BinaryOp::Ge));
/// assert_eq!(binary_op(TokenKind::Keyword(Keyword::Unless)), Some(BinaryOp::Unless));
/// assert_eq!(binary_op(TokenKind::Assign), None);
/// ```
pub fn binary_op(kind: TokenKind) -> Option<BinaryOp> {
    let op = match kind {
        TokenKind::Add => BinaryOp::Add,
        TokenKind::Sub => BinaryOp::Sub,
        TokenKind::Mul => BinaryOp::Mul,
        TokenKind::Div => BinaryOp::Div,
        TokenKind::Mod => BinaryOp::Mod,
        TokenKind::Pow => BinaryOp::Pow,
        TokenKind::Eql => BinaryOp::Eq,
        TokenKind::Neq => BinaryOp::Ne,
        TokenKind::Lss => BinaryOp::Lt,
        TokenKind::Lte => BinaryOp::Le,
        TokenKind::Gtr => BinaryOp::Gt,
        TokenKind::Gte => BinaryOp::Ge,
        TokenKind::Keyword(Keyword::And) => BinaryOp::And,
        TokenKind::Keyword(Keyword::Or) => BinaryOp::Or,
        TokenKind::Keyword(Keyword::Unless) => BinaryOp::Unless,
        TokenKind::Keyword(Keyword::Atan2) => BinaryOp::Atan2,
        _ => return None,
    };
    Some(op)
}

impl<'a> Parser<'a> {
    /// Parse `[bool] [(on|ignoring) (labels) [(group_left|group_right) [(labels)]]]`
    pub(crate) fn parse_binary_modifiers(
        &mut self,
    ) -> Result<(bool, Option<VectorMatching>), ParseError> {
        let return_bool = self.eat(TokenKind::Keyword(Keyword::Bool))?.is_some();

        let op = match self.peek()?.kind {
            TokenKind::Keyword(Keyword::On) => VectorMatchingOp::On,
            TokenKind::Keyword(Keyword::Ignoring) => VectorMatchingOp::Ignoring,
            _ => return Ok((return_bool, None)),
        };
        self.next()?;
        let labels = self.parse_label_list("vector matching")?;

        let side = match self.peek()?.kind {
            TokenKind::Keyword(Keyword::GroupLeft) => Some(GroupSide::Left),
            TokenKind::Keyword(Keyword::GroupRight) => Some(GroupSide::Right),
            _ => None,
        };
        let group = match side {
            Some(side) => {
                self.next()?;
                // the label list after group_x is optional
                let labels = if self.peek()?.kind == TokenKind::LeftParen {
                    self.parse_label_list("grouping modifier")?
                } else {
                    Vec::new()
                };
                Some(GroupModifier { side, labels })
            }
            None => None,
        };

        Ok((return_bool, Some(VectorMatching { op, labels, group })))
    }

    /// Parse a parenthesized, comma separated label list. Keywords and
    /// quoted strings are accepted as label names; a trailing comma is
    /// allowed.
    pub(crate) fn parse_label_list(&mut self, context: &str) -> Result<Vec<String>, ParseError> {
        self.expect(TokenKind::LeftParen, context)?;
        let mut labels = Vec::new();

        loop {
            let tok = self.next()?;
            let label = match tok.kind {
                TokenKind::RightParen => break,
                TokenKind::String => self.string_value(tok)?,
                TokenKind::Identifier | TokenKind::Keyword(_) | TokenKind::Number
                    if is_label_name(tok.text) =>
                {
                    tok.text.to_string()
                }
                TokenKind::Identifier => {
                    return Err(ParseError::syntax(
                        tok.span,
                        format!("invalid label name {:?} in {}", tok.text, context),
                    ));
                }
                _ => {
                    return Err(self.unexpected(tok, context, &["label name", "\")\""]));
                }
            };
            labels.push(label);

            let tok = self.next()?;
            match tok.kind {
                TokenKind::Comma => {}
                TokenKind::RightParen => break,
                _ => return Err(self.unexpected(tok, context, &["\",\"", "\")\""])),
            }
        }

        Ok(labels)
    }
}
