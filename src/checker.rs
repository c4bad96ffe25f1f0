//! Value-type checking of a parsed AST.
//!
//! [`check`] walks the tree bottom-up and infers the [`ValueType`] of every
//! node, rejecting combinations PromQL cannot evaluate: range vectors under
//! binary operators, string operands, misplaced `bool` and vector matching
//! modifiers, function arguments of the wrong type, and selectors that would
//! match every series. The first violation found is returned.
//!
//! ```
//! use promql_ast::{ValueType, check, parse};
//!
//! let ast = parse("sum by (job) (rate(http_requests_total[5m]))").unwrap();
//! assert_eq!(check(&ast), Ok(ValueType::InstantVector));
//!
//! let ast = parse("1 > 2").unwrap();
//! assert!(check(&ast).is_err());
//! ```

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::ast::{AggregateExpr, BinaryExpr, Call, Expr, ValueType, VectorMatchingOp};
use crate::error::TypeError;
use crate::lexer::Span;
use crate::parser::function::{Variadic, get_function};
use crate::parser::selector::{METRIC_NAME_LABEL, VectorSelector};

/// Infer the value type of `expr`, validating every node below it.
pub fn check(expr: &Expr) -> Result<ValueType, TypeError> {
    let result = check_expr(expr, expr.span().unwrap_or_default());
    match &result {
        Ok(ty) => debug!(kind = expr.kind_name(), result = %ty, "checked expression"),
        Err(err) => debug!(error = %err, "expression failed type check"),
    }
    result
}

/// `fallback` locates nodes without a span of their own (literals)
fn check_expr(expr: &Expr, fallback: Span) -> Result<ValueType, TypeError> {
    let span = expr.span().unwrap_or(fallback);
    let ty = match expr {
        Expr::NumberLiteral(_) => ValueType::Scalar,
        Expr::StringLiteral(_) => ValueType::String,
        Expr::VectorSelector(v) => {
            check_selector(v)?;
            ValueType::InstantVector
        }
        Expr::MatrixSelector(m) => {
            check_selector(&m.selector)?;
            ValueType::RangeVector
        }
        Expr::Subquery(s) => {
            let inner = check_expr(&s.expr, span)?;
            if inner != ValueType::InstantVector {
                return Err(TypeError::new(
                    span,
                    format!("subquery is only allowed on instant vector, got {} instead", inner),
                ));
            }
            ValueType::RangeVector
        }
        Expr::Paren(inner) => check_expr(inner, span)?,
        Expr::Unary(u) => {
            let ty = check_expr(&u.expr, span)?;
            if !is_scalar_or_vector(ty) {
                return Err(TypeError::new(
                    span,
                    format!(
                        "unary expression only allowed on expressions of type scalar or instant vector, got {}",
                        ty
                    ),
                ));
            }
            ty
        }
        Expr::Binary(b) => check_binary(b)?,
        Expr::Call(c) => check_call(c)?,
        Expr::Aggregate(a) => check_aggregate(a)?,
    };
    trace!(kind = expr.kind_name(), result = %ty, offset = span.start, "inferred type");
    Ok(ty)
}

fn is_scalar_or_vector(ty: ValueType) -> bool {
    matches!(ty, ValueType::Scalar | ValueType::InstantVector)
}

fn check_selector(selector: &VectorSelector) -> Result<(), TypeError> {
    let span = selector.span;

    if let Some(ref name) = selector.name
        && let Some(m) = selector.matchers.iter().find(|m| m.name == METRIC_NAME_LABEL)
    {
        return Err(TypeError::new(
            span,
            format!("metric name must not be set twice: {:?} or {:?}", name, m.value),
        ));
    }

    for m in selector.matchers.iter().filter(|m| m.op.is_regex()) {
        if m.regex().is_err() {
            return Err(TypeError::new(
                span,
                format!("invalid regular expression {:?} in label matcher for {:?}", m.value, m.name),
            ));
        }
    }

    if !selector.has_non_empty_matcher() {
        return Err(TypeError::new(
            span,
            "vector selector must contain at least one non-empty matcher",
        ));
    }
    Ok(())
}

fn check_binary(b: &BinaryExpr) -> Result<ValueType, TypeError> {
    let span = b.span;
    let lhs = check_expr(&b.lhs, span)?;
    let rhs = check_expr(&b.rhs, span)?;

    if !is_scalar_or_vector(lhs) || !is_scalar_or_vector(rhs) {
        return Err(TypeError::new(
            span,
            format!(
                "binary expression must contain only scalar and instant vector types, got {} {} {}",
                lhs, b.op, rhs
            ),
        ));
    }

    if b.return_bool && !b.op.is_comparison() {
        return Err(TypeError::new(
            span,
            "bool modifier can only be used on comparison operators",
        ));
    }

    let both_scalar = lhs == ValueType::Scalar && rhs == ValueType::Scalar;
    if b.op.is_comparison() && both_scalar && !b.return_bool {
        return Err(TypeError::new(
            span,
            "comparisons between scalars must use bool modifier",
        ));
    }

    if b.op.is_set_operator() && (lhs == ValueType::Scalar || rhs == ValueType::Scalar) {
        return Err(TypeError::new(
            span,
            format!("set operator {:?} not allowed in binary scalar expression", b.op.as_str()),
        ));
    }

    if let Some(ref matching) = b.matching {
        if lhs != ValueType::InstantVector || rhs != ValueType::InstantVector {
            return Err(TypeError::new(
                span,
                "vector matching only allowed between instant vectors",
            ));
        }
        if let Some(ref group) = matching.group {
            if b.op.is_set_operator() {
                return Err(TypeError::new(
                    span,
                    format!("no grouping allowed for {:?} operation", b.op.as_str()),
                ));
            }
            if matching.op == VectorMatchingOp::On
                && let Some(label) = group.labels.iter().find(|l| matching.labels.contains(*l))
            {
                return Err(TypeError::new(
                    span,
                    format!("label {:?} must not occur in ON and GROUP clause at once", label),
                ));
            }
        }
    }

    Ok(if both_scalar {
        ValueType::Scalar
    } else {
        ValueType::InstantVector
    })
}

fn check_call(call: &Call) -> Result<ValueType, TypeError> {
    let span = call.span;
    let Some(function) = get_function(&call.name) else {
        return Err(TypeError::new(span, format!("unknown function {:?}", call.name)));
    };

    let arg_types = call
        .args
        .iter()
        .map(|arg| check_expr(arg, span))
        .collect::<Result<Vec<_>, _>>()?;

    let got = arg_types.len();
    let min = function.min_args();
    let arity_error = match function.max_args() {
        _ if function.variadic == Variadic::None && got != min => Some(format!("expected {}", min)),
        _ if got < min => Some(format!("expected at least {}", min)),
        Some(max) if got > max => Some(format!("expected at most {}", max)),
        _ => None,
    };
    if let Some(expected) = arity_error {
        return Err(TypeError::new(
            span,
            format!(
                "{} argument(s) in call to {:?}, got {}; signature is {}",
                expected, function.name, got, function
            ),
        ));
    }

    for (i, (arg, ty)) in call.args.iter().zip(&arg_types).enumerate() {
        let Some(expected) = function.arg_type(i) else {
            continue;
        };
        if *ty != expected {
            return Err(TypeError::new(
                arg.span().unwrap_or(span),
                format!(
                    "expected type {} in call to function {:?}, got {}",
                    expected, function.name, ty
                ),
            ));
        }
    }

    Ok(function.return_type)
}

fn check_aggregate(agg: &AggregateExpr) -> Result<ValueType, TypeError> {
    let span = agg.span;
    let param = match agg.param {
        Some(ref param) => Some((param, check_expr(param, span)?)),
        None => None,
    };
    let ty = check_expr(&agg.expr, span)?;

    if ty != ValueType::InstantVector {
        return Err(TypeError::new(
            agg.expr.span().unwrap_or(span),
            format!("expected type instant vector in aggregation expression, got {}", ty),
        ));
    }

    match (agg.op.param_type(), param) {
        (Some(expected), Some((param, got))) if got != expected => {
            return Err(TypeError::new(
                param.span().unwrap_or(span),
                format!(
                    "expected type {} in aggregation parameter of {:?}, got {}",
                    expected,
                    agg.op.as_str(),
                    got
                ),
            ));
        }
        (Some(_), None) => {
            return Err(TypeError::new(
                span,
                format!("aggregation {:?} requires a parameter", agg.op.as_str()),
            ));
        }
        (None, Some(_)) => {
            return Err(TypeError::new(
                span,
                format!("aggregation {:?} does not take a parameter", agg.op.as_str()),
            ));
        }
        _ => {}
    }

    if let Some(ref grouping) = agg.grouping {
        let mut seen = HashSet::new();
        if let Some(label) = grouping.labels.iter().find(|l| !seen.insert(l.as_str())) {
            return Err(TypeError::new(
                span,
                format!("duplicate label {:?} in grouping clause", label),
            ));
        }
    }

    Ok(ValueType::InstantVector)
}
