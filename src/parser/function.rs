//! Function definitions for PromQL
//!
//! This module defines the built-in PromQL functions and their signatures,
//! and parses function calls. Argument counts and types are validated by the
//! [checker](crate::checker) against these signatures.

use std::collections::HashMap;
use std::fmt;

use lazy_static::lazy_static;

use crate::ast::ValueType::{self, InstantVector as V, RangeVector as M, Scalar as S, String as Str};
use crate::ast::{Call, Expr};
use crate::error::ParseError;
use crate::lexer::{Token, TokenKind};
use crate::parser::Parser;

/// Variadic argument specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variadic {
    /// Fixed number of arguments (only those specified in arg_types)
    None,
    /// The last argument type may be omitted or repeated
    Repeat,
    /// Number of trailing arg_types that may be omitted
    Optional(u8),
}

/// Function signature definition
#[derive(Debug, Clone)]
pub struct Function {
    pub name: &'static str,
    pub arg_types: &'static [ValueType],
    pub variadic: Variadic,
    pub return_type: ValueType,
    /// Rejected unless experimental functions are enabled
    pub experimental: bool,
}

impl Function {
    const fn new(name: &'static str, arg_types: &'static [ValueType], return_type: ValueType) -> Self {
        Self {
            name,
            arg_types,
            variadic: Variadic::None,
            return_type,
            experimental: false,
        }
    }

    const fn optional(self, n: u8) -> Self {
        Self {
            variadic: Variadic::Optional(n),
            ..self
        }
    }

    const fn repeat(self) -> Self {
        Self {
            variadic: Variadic::Repeat,
            ..self
        }
    }

    const fn experimental(self) -> Self {
        Self {
            experimental: true,
            ..self
        }
    }

    /// Get the minimum number of arguments
    pub fn min_args(&self) -> usize {
        match self.variadic {
            Variadic::None => self.arg_types.len(),
            Variadic::Repeat => self.arg_types.len().saturating_sub(1),
            Variadic::Optional(n) => self.arg_types.len().saturating_sub(n as usize),
        }
    }

    /// Get the maximum number of arguments (None means unlimited)
    pub fn max_args(&self) -> Option<usize> {
        match self.variadic {
            Variadic::Repeat => None,
            Variadic::None | Variadic::Optional(_) => Some(self.arg_types.len()),
        }
    }

    /// Expected type of the argument at `index`, `None` past the last one
    pub fn arg_type(&self, index: usize) -> Option<ValueType> {
        match self.variadic {
            Variadic::Repeat if index >= self.arg_types.len() => self.arg_types.last().copied(),
            _ => self.arg_types.get(index).copied(),
        }
    }
}

impl fmt::Display for Function {
    /// `round(instant vector, [scalar]) -> instant vector`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        let min = self.min_args();
        for (i, ty) in self.arg_types.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match self.variadic {
                Variadic::Repeat if i + 1 == self.arg_types.len() => write!(f, "{}...", ty)?,
                _ if i >= min => write!(f, "[{}]", ty)?,
                _ => write!(f, "{}", ty)?,
            }
        }
        write!(f, ") -> {}", self.return_type)
    }
}

/// All built-in PromQL functions
pub static FUNCTIONS: &[Function] = &[
    // math
    Function::new("abs", &[V], V),
    Function::new("ceil", &[V], V),
    Function::new("floor", &[V], V),
    Function::new("exp", &[V], V),
    Function::new("sqrt", &[V], V),
    Function::new("ln", &[V], V),
    Function::new("log2", &[V], V),
    Function::new("log10", &[V], V),
    Function::new("sgn", &[V], V),
    Function::new("deg", &[V], V),
    Function::new("rad", &[V], V),
    Function::new("round", &[V, S], V).optional(1),
    Function::new("clamp", &[V, S, S], V),
    Function::new("clamp_min", &[V, S], V),
    Function::new("clamp_max", &[V, S], V),
    // trigonometry
    Function::new("acos", &[V], V),
    Function::new("acosh", &[V], V),
    Function::new("asin", &[V], V),
    Function::new("asinh", &[V], V),
    Function::new("atan", &[V], V),
    Function::new("atanh", &[V], V),
    Function::new("cos", &[V], V),
    Function::new("cosh", &[V], V),
    Function::new("sin", &[V], V),
    Function::new("sinh", &[V], V),
    Function::new("tan", &[V], V),
    Function::new("tanh", &[V], V),
    // sorting
    Function::new("sort", &[V], V),
    Function::new("sort_desc", &[V], V),
    Function::new("sort_by_label", &[V, Str], V).repeat().experimental(),
    Function::new("sort_by_label_desc", &[V, Str], V).repeat().experimental(),
    // counters and gauges over a range
    Function::new("rate", &[M], V),
    Function::new("irate", &[M], V),
    Function::new("increase", &[M], V),
    Function::new("delta", &[M], V),
    Function::new("idelta", &[M], V),
    Function::new("deriv", &[M], V),
    Function::new("changes", &[M], V),
    Function::new("resets", &[M], V),
    Function::new("predict_linear", &[M, S], V),
    Function::new("double_exponential_smoothing", &[M, S, S], V).experimental(),
    // <aggregation>_over_time
    Function::new("avg_over_time", &[M], V),
    Function::new("sum_over_time", &[M], V),
    Function::new("count_over_time", &[M], V),
    Function::new("min_over_time", &[M], V),
    Function::new("max_over_time", &[M], V),
    Function::new("stddev_over_time", &[M], V),
    Function::new("stdvar_over_time", &[M], V),
    Function::new("last_over_time", &[M], V),
    Function::new("present_over_time", &[M], V),
    Function::new("absent_over_time", &[M], V),
    Function::new("quantile_over_time", &[S, M], V),
    Function::new("first_over_time", &[M], V).experimental(),
    Function::new("mad_over_time", &[M], V).experimental(),
    Function::new("ts_of_first_over_time", &[M], V).experimental(),
    Function::new("ts_of_last_over_time", &[M], V).experimental(),
    Function::new("ts_of_max_over_time", &[M], V).experimental(),
    Function::new("ts_of_min_over_time", &[M], V).experimental(),
    // time
    Function::new("time", &[], S),
    Function::new("timestamp", &[V], V),
    Function::new("hour", &[V], V).optional(1),
    Function::new("minute", &[V], V).optional(1),
    Function::new("month", &[V], V).optional(1),
    Function::new("year", &[V], V).optional(1),
    Function::new("day_of_week", &[V], V).optional(1),
    Function::new("day_of_month", &[V], V).optional(1),
    Function::new("day_of_year", &[V], V).optional(1),
    Function::new("days_in_month", &[V], V).optional(1),
    // labels
    Function::new("label_replace", &[V, Str, Str, Str, Str], V),
    Function::new("label_join", &[V, Str, Str, Str], V).repeat(),
    Function::new("info", &[V, V], V).optional(1).experimental(),
    // type conversion
    Function::new("absent", &[V], V),
    Function::new("scalar", &[V], S),
    Function::new("vector", &[S], V),
    Function::new("pi", &[], S),
    // histograms
    Function::new("histogram_quantile", &[S, V], V),
    Function::new("histogram_avg", &[V], V),
    Function::new("histogram_count", &[V], V),
    Function::new("histogram_sum", &[V], V),
    Function::new("histogram_stddev", &[V], V),
    Function::new("histogram_stdvar", &[V], V),
    Function::new("histogram_fraction", &[S, S, V], V),
];

lazy_static! {
    static ref FUNCTIONS_BY_NAME: HashMap<&'static str, &'static Function> =
        FUNCTIONS.iter().map(|f| (f.name, f)).collect();
}

/// Look up a function by name
pub fn get_function(name: &str) -> Option<&'static Function> {
    FUNCTIONS_BY_NAME.get(name).copied()
}

impl<'a> Parser<'a> {
    /// Parse a call to the function named by the already consumed `name`
    pub(crate) fn parse_call(&mut self, name: Token<'a>) -> Result<Expr, ParseError> {
        let Some(function) = get_function(name.text) else {
            return Err(ParseError::syntax(
                name.span,
                format!("unknown function with name {:?}", name.text),
            ));
        };
        if function.experimental && !self.options().experimental_functions {
            return Err(ParseError::syntax(
                name.span,
                format!("function {:?} is experimental and not enabled", function.name),
            ));
        }

        self.expect(TokenKind::LeftParen, "function call")?;
        let args = self.nested(|p| p.parse_arguments("function call"))?;

        let mut call = Call::new(function.name, args);
        call.span = name.span.to(self.prev_span());
        Ok(Expr::Call(call))
    }
}
