//! AST type definitions for PromQL expressions
//!
//! The main entry point is the [`Expr`] enum which represents any valid PromQL
//! expression. Composite nodes carry the [`Span`] they were parsed from; spans
//! are ignored by equality so trees compare structurally.
//!
//! `Display` renders every node back to PromQL. Parsing the rendered text
//! yields a tree equal to the original.

use std::fmt;

use crate::lexer::duration::Duration;
use crate::lexer::identifier::is_label_name;
use crate::lexer::string::quote_string;
use crate::lexer::token::Span;
use crate::parser::aggregation::{AggregateOp, Grouping};
use crate::parser::selector::{AtModifier, MatrixSelector, VectorSelector};

/// The four PromQL value types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Single number
    Scalar,
    /// Set of series with one sample each
    InstantVector,
    /// Set of series with samples over a time range
    RangeVector,
    String,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Scalar => write!(f, "scalar"),
            ValueType::InstantVector => write!(f, "instant vector"),
            ValueType::RangeVector => write!(f, "range vector"),
            ValueType::String => write!(f, "string"),
        }
    }
}

/// Root expression type for PromQL AST
#[derive(Debug, Clone)]
pub enum Expr {
    /// `42`, `3.14`, `0x1F`, `1e-10`, `Inf`, `NaN`
    NumberLiteral(f64),

    /// `"hello"`, `'world'`, `` `raw` ``
    StringLiteral(String),

    /// `http_requests{job="api"}`
    VectorSelector(VectorSelector),

    /// `http_requests{job="api"}[5m]`
    MatrixSelector(MatrixSelector),

    /// `rate(http_requests[5m])[30m:1m]`
    Subquery(Box<SubqueryExpr>),

    /// `-foo`, `+bar`
    Unary(Box<UnaryExpr>),

    /// `foo + bar`, `foo / on(job) bar`
    Binary(Box<BinaryExpr>),

    /// `(foo + bar)`
    Paren(Box<Expr>),

    /// `rate(http_requests[5m])`
    Call(Call),

    /// `sum by (job) (http_requests)`
    Aggregate(Box<AggregateExpr>),
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            // NaN literals are the same node
            (Expr::NumberLiteral(a), Expr::NumberLiteral(b)) => {
                a == b || (a.is_nan() && b.is_nan())
            }
            (Expr::StringLiteral(a), Expr::StringLiteral(b)) => a == b,
            (Expr::VectorSelector(a), Expr::VectorSelector(b)) => a == b,
            (Expr::MatrixSelector(a), Expr::MatrixSelector(b)) => a == b,
            (Expr::Subquery(a), Expr::Subquery(b)) => a == b,
            (Expr::Unary(a), Expr::Unary(b)) => a == b,
            (Expr::Binary(a), Expr::Binary(b)) => a == b,
            (Expr::Paren(a), Expr::Paren(b)) => a == b,
            (Expr::Call(a), Expr::Call(b)) => a == b,
            (Expr::Aggregate(a), Expr::Aggregate(b)) => a == b,
            _ => false,
        }
    }
}

impl Expr {
    /// Source span, if the node records one. Literals do not; parentheses
    /// report the span of their content.
    pub fn span(&self) -> Option<Span> {
        match self {
            Expr::NumberLiteral(_) | Expr::StringLiteral(_) => None,
            Expr::VectorSelector(v) => Some(v.span),
            Expr::MatrixSelector(m) => Some(m.span),
            Expr::Subquery(s) => Some(s.span),
            Expr::Unary(u) => Some(u.span),
            Expr::Binary(b) => Some(b.span),
            Expr::Paren(e) => e.span(),
            Expr::Call(c) => Some(c.span),
            Expr::Aggregate(a) => Some(a.span),
        }
    }

    /// Unwrap parentheses to get the inner expression
    pub fn unwrap_parens(&self) -> &Expr {
        match self {
            Expr::Paren(inner) => inner.unwrap_parens(),
            other => other,
        }
    }

    /// Matrix selectors and subqueries, possibly parenthesized
    pub fn is_range_vector(&self) -> bool {
        matches!(
            self.unwrap_parens(),
            Expr::MatrixSelector(_) | Expr::Subquery(_)
        )
    }

    /// Short node name used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::NumberLiteral(_) => "number literal",
            Expr::StringLiteral(_) => "string literal",
            Expr::VectorSelector(_) => "vector selector",
            Expr::MatrixSelector(_) => "matrix selector",
            Expr::Subquery(_) => "subquery",
            Expr::Unary(_) => "unary expression",
            Expr::Binary(_) => "binary expression",
            Expr::Paren(_) => "parenthesized expression",
            Expr::Call(_) => "function call",
            Expr::Aggregate(_) => "aggregation",
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::NumberLiteral(n) => {
                if n.is_nan() {
                    write!(f, "NaN")
                } else if n.is_infinite() {
                    if *n > 0.0 {
                        write!(f, "Inf")
                    } else {
                        write!(f, "-Inf")
                    }
                } else {
                    write!(f, "{}", n)
                }
            }
            Expr::StringLiteral(s) => write!(f, "{}", quote_string(s)),
            Expr::VectorSelector(v) => write!(f, "{}", v),
            Expr::MatrixSelector(m) => write!(f, "{}", m),
            Expr::Subquery(s) => write!(f, "{}", s),
            Expr::Unary(u) => write!(f, "{}", u),
            Expr::Binary(b) => write!(f, "{}", b),
            Expr::Paren(e) => write!(f, "({})", e),
            Expr::Call(c) => write!(f, "{}", c),
            Expr::Aggregate(a) => write!(f, "{}", a),
        }
    }
}

/// Comma separated label list in parentheses. Names that are not plain
/// identifiers are quoted.
pub(crate) fn write_label_list(f: &mut fmt::Formatter<'_>, labels: &[String]) -> fmt::Result {
    write!(f, "(")?;
    for (i, label) in labels.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        if is_label_name(label) {
            write!(f, "{}", label)?;
        } else {
            write!(f, "{}", quote_string(label))?;
        }
    }
    write!(f, ")")
}

/// Function call expression
#[derive(Debug, Clone)]
pub struct Call {
    pub name: String,
    pub args: Vec<Expr>,
    pub span: Span,
}

impl Call {
    pub fn new(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self {
            name: name.into(),
            args,
            span: Span::default(),
        }
    }
}

impl PartialEq for Call {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.args == other.args
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}

/// Aggregation expression
#[derive(Debug, Clone)]
pub struct AggregateExpr {
    pub op: AggregateOp,
    /// The expression to aggregate
    pub expr: Expr,
    /// Parameter of `topk`, `bottomk`, `quantile`, `count_values`, `limitk`
    /// and `limit_ratio`
    pub param: Option<Expr>,
    /// `by (...)` or `without (...)`
    pub grouping: Option<Grouping>,
    pub span: Span,
}

impl AggregateExpr {
    pub fn new(op: AggregateOp, expr: Expr) -> Self {
        Self {
            op,
            expr,
            param: None,
            grouping: None,
            span: Span::default(),
        }
    }

    pub fn with_param(op: AggregateOp, param: Expr, expr: Expr) -> Self {
        Self {
            param: Some(param),
            ..Self::new(op, expr)
        }
    }

    pub fn with_grouping(mut self, grouping: Grouping) -> Self {
        self.grouping = Some(grouping);
        self
    }
}

impl PartialEq for AggregateExpr {
    fn eq(&self, other: &Self) -> bool {
        self.op == other.op
            && self.expr == other.expr
            && self.param == other.param
            && self.grouping == other.grouping
    }
}

impl fmt::Display for AggregateExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.op)?;
        if let Some(ref grouping) = self.grouping {
            write!(f, " {} ", grouping)?;
        }
        write!(f, "(")?;
        if let Some(ref param) = self.param {
            write!(f, "{}, ", param)?;
        }
        write!(f, "{})", self.expr)
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Atan2,

    // comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,

    // set
    And,
    Or,
    Unless,
}

impl BinaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "^",
            BinaryOp::Atan2 => "atan2",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
            BinaryOp::Unless => "unless",
        }
    }

    /// Binding strength, higher binds tighter
    pub fn precedence(&self) -> u8 {
        match self {
            BinaryOp::Or => 1,
            BinaryOp::And | BinaryOp::Unless => 2,
            BinaryOp::Eq
            | BinaryOp::Ne
            | BinaryOp::Lt
            | BinaryOp::Le
            | BinaryOp::Gt
            | BinaryOp::Ge => 3,
            BinaryOp::Add | BinaryOp::Sub => 4,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod | BinaryOp::Atan2 => 5,
            BinaryOp::Pow => 6,
        }
    }

    pub fn is_right_associative(&self) -> bool {
        matches!(self, BinaryOp::Pow)
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge
        )
    }

    pub fn is_set_operator(&self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or | BinaryOp::Unless)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `on` or `ignoring`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorMatchingOp {
    On,
    Ignoring,
}

impl fmt::Display for VectorMatchingOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorMatchingOp::On => write!(f, "on"),
            VectorMatchingOp::Ignoring => write!(f, "ignoring"),
        }
    }
}

/// Which side of a many-to-one match has the higher cardinality
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupSide {
    Left,
    Right,
}

impl fmt::Display for GroupSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupSide::Left => write!(f, "group_left"),
            GroupSide::Right => write!(f, "group_right"),
        }
    }
}

/// `group_left (labels)` / `group_right (labels)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupModifier {
    pub side: GroupSide,
    /// Labels copied over from the "one" side
    pub labels: Vec<String>,
}

impl fmt::Display for GroupModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.side)?;
        if !self.labels.is_empty() {
            write!(f, " ")?;
            write_label_list(f, &self.labels)?;
        }
        Ok(())
    }
}

/// Vector matching clause of a binary expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorMatching {
    pub op: VectorMatchingOp,
    pub labels: Vec<String>,
    pub group: Option<GroupModifier>,
}

impl fmt::Display for VectorMatching {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.op)?;
        write_label_list(f, &self.labels)?;
        if let Some(ref group) = self.group {
            write!(f, " {}", group)?;
        }
        Ok(())
    }
}

/// Binary expression. A missing `matching` clause means default one-to-one
/// matching on all labels.
#[derive(Debug, Clone)]
pub struct BinaryExpr {
    pub op: BinaryOp,
    pub lhs: Expr,
    pub rhs: Expr,
    pub matching: Option<VectorMatching>,
    /// `bool` modifier on a comparison
    pub return_bool: bool,
    pub span: Span,
}

impl BinaryExpr {
    pub fn new(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Self {
            op,
            lhs,
            rhs,
            matching: None,
            return_bool: false,
            span: Span::default(),
        }
    }

    pub fn with_bool(mut self) -> Self {
        self.return_bool = true;
        self
    }

    pub fn with_matching(mut self, matching: VectorMatching) -> Self {
        self.matching = Some(matching);
        self
    }
}

impl PartialEq for BinaryExpr {
    fn eq(&self, other: &Self) -> bool {
        self.op == other.op
            && self.lhs == other.lhs
            && self.rhs == other.rhs
            && self.matching == other.matching
            && self.return_bool == other.return_bool
    }
}

impl fmt::Display for BinaryExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.lhs, self.op)?;
        if self.return_bool {
            write!(f, " bool")?;
        }
        if let Some(ref matching) = self.matching {
            write!(f, " {}", matching)?;
        }
        write!(f, " {}", self.rhs)
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
}

impl UnaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub expr: Expr,
    pub span: Span,
}

impl UnaryExpr {
    pub fn new(op: UnaryOp, expr: Expr) -> Self {
        Self {
            op,
            expr,
            span: Span::default(),
        }
    }
}

impl PartialEq for UnaryExpr {
    fn eq(&self, other: &Self) -> bool {
        self.op == other.op && self.expr == other.expr
    }
}

impl fmt::Display for UnaryExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op, self.expr)
    }
}

/// Subquery expression: `<expr>[<range>:<step>]`
#[derive(Debug, Clone)]
pub struct SubqueryExpr {
    pub expr: Expr,
    pub range: Duration,
    /// Resolution; `None` means the evaluation interval
    pub step: Option<Duration>,
    pub offset: Option<Duration>,
    pub at: Option<AtModifier>,
    pub span: Span,
}

impl SubqueryExpr {
    pub fn new(expr: Expr, range: Duration) -> Self {
        Self {
            expr,
            range,
            step: None,
            offset: None,
            at: None,
            span: Span::default(),
        }
    }

    pub fn with_step(expr: Expr, range: Duration, step: Duration) -> Self {
        Self {
            step: Some(step),
            ..Self::new(expr, range)
        }
    }
}

impl PartialEq for SubqueryExpr {
    fn eq(&self, other: &Self) -> bool {
        self.expr == other.expr
            && self.range == other.range
            && self.step == other.step
            && self.offset == other.offset
            && self.at == other.at
    }
}

impl fmt::Display for SubqueryExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}:", self.expr, self.range)?;
        if let Some(ref step) = self.step {
            write!(f, "{}", step)?;
        }
        write!(f, "]")?;
        if let Some(ref at) = self.at {
            write!(f, " {}", at)?;
        }
        if let Some(ref offset) = self.offset {
            write!(f, " offset {}", offset)?;
        }
        Ok(())
    }
}
