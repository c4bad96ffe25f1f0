//! # promql-ast
//!
//! A lexer, parser and type checker for the Prometheus Query Language
//! (PromQL). Lexemes are recognized with the
//! [nom](https://github.com/rust-bakery/nom) parser combinator library; a
//! precedence-climbing parser builds an Abstract Syntax Tree from the token
//! stream, and the checker infers the value type of every node.
//!
//! ## Quick Start
//!
//! ```rust
//! use promql_ast::{ValueType, check, parse};
//!
//! let ast = parse(r#"http_requests_total{job="api"}"#).expect("failed to parse");
//! assert_eq!(check(&ast), Ok(ValueType::InstantVector));
//! ```
//!
//! [`check_query`] does both steps:
//!
//! ```rust
//! use promql_ast::{ValueType, check_query};
//!
//! let (ast, ty) = check_query(r#"sum by (app, proc) (
//!   instance_memory_limit_bytes - instance_memory_usage_bytes
//! ) / 1024 / 1024"#).unwrap();
//! assert_eq!(ty, ValueType::InstantVector);
//! println!("{:#?}", ast);
//! ```
//!
//! ## Errors
//!
//! Every error carries the byte offset, line and column of the offending
//! token or node:
//!
//! ```rust
//! use promql_ast::check_query;
//!
//! let err = check_query("rate(foo[5m] + bar[5m])").unwrap_err();
//! assert_eq!(err.offset(), 13);
//! assert_eq!((err.line(), err.column()), (1, 14));
//! ```
//!
//! ## AST Types
//!
//! The parser produces an [`Expr`] enum which can be one of:
//!
//! - [`Expr::NumberLiteral`] - Numeric literals (`42`, `3.14`, `Inf`, `NaN`)
//! - [`Expr::StringLiteral`] - String literals (`"hello"`, `'world'`)
//! - [`Expr::VectorSelector`] - Instant vector selectors (`metric{label="value"}`)
//! - [`Expr::MatrixSelector`] - Range vector selectors (`metric[5m]`)
//! - [`Expr::Call`] - Function calls (`rate(...)`, `histogram_quantile(...)`)
//! - [`Expr::Aggregate`] - Aggregation expressions (`sum by (job) (...)`)
//! - [`Expr::Binary`] - Binary operations (`a + b`, `foo and bar`)
//! - [`Expr::Unary`] - Unary operations (`-metric`)
//! - [`Expr::Paren`] - Parenthesized expressions (`(a + b)`)
//! - [`Expr::Subquery`] - Subqueries (`metric[5m:1m]`)
//!
//! ## Modules
//!
//! - [`ast`] - Abstract Syntax Tree type definitions
//! - [`checker`] - Value-type inference and validation
//! - [`error`] - Lex, parse and type errors
//! - [`lexer`] - Lexeme parsers and the tokenizer
//! - [`parser`] - Expression parser
//!
//! ## Display
//!
//! All AST types implement [`std::fmt::Display`], rendering canonical PromQL
//! that parses back to an equal tree:
//!
//! ```rust
//! use promql_ast::parse;
//!
//! let ast = parse("1 + 2 * 3").unwrap();
//! assert_eq!(ast.to_string(), "1 + 2 * 3");
//! assert_eq!(parse(&ast.to_string()).unwrap(), ast);
//! ```

pub mod ast;
pub mod checker;
pub mod error;
pub mod lexer;
pub mod parser;

pub use ast::{
    AggregateExpr, BinaryExpr, BinaryOp, Call, Expr, GroupModifier, GroupSide, SubqueryExpr,
    UnaryExpr, UnaryOp, ValueType, VectorMatching, VectorMatchingOp,
};
pub use checker::check;
pub use error::{Error, LexError, ParseError, Position, TypeError};
pub use lexer::{Duration, Span, Token, TokenKind, tokenize};
pub use parser::aggregation::{AggregateOp, Grouping, GroupingAction};
pub use parser::selector::{AtModifier, LabelMatchOp, LabelMatcher, MatrixSelector, VectorSelector};
pub use parser::{ParserOptions, parse, parse_with_options};

/// Check `expr` and hand it back on success.
pub fn check_ast(expr: Expr) -> Result<Expr, TypeError> {
    check(&expr)?;
    Ok(expr)
}

/// Parse and check `query`, returning the tree and its value type.
pub fn check_query(query: &str) -> Result<(Expr, ValueType), Error> {
    let expr = parse(query)?;
    let ty = check(&expr)?;
    Ok((expr, ty))
}
