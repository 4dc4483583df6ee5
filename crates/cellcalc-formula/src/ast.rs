//! Expression trees
//!
//! Formula text is parsed elsewhere; the evaluator consumes these trees with
//! references already resolved to values.

use cellcalc_core::ScalarValue;

use crate::argument::FunctionArgument;

/// Expression node
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Literal value or resolved single-cell reference
    Value(ScalarValue),
    /// Resolved range reference
    Range(FunctionArgument),
    /// Inline array constant `{1,2;3,4}`, as rows
    Array(Vec<Vec<Expr>>),
    /// Function call
    Function { name: String, args: Vec<Expr> },
}

impl Expr {
    /// Literal value
    pub fn value(value: impl Into<ScalarValue>) -> Self {
        Expr::Value(value.into())
    }

    /// Resolved range
    pub fn range(range: FunctionArgument) -> Self {
        Expr::Range(range)
    }

    /// Function call
    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Function {
            name: name.into(),
            args,
        }
    }
}

impl From<f64> for Expr {
    fn from(n: f64) -> Self {
        Expr::value(n)
    }
}

impl From<&str> for Expr {
    fn from(s: &str) -> Self {
        Expr::value(s)
    }
}

impl From<bool> for Expr {
    fn from(b: bool) -> Self {
        Expr::value(b)
    }
}
