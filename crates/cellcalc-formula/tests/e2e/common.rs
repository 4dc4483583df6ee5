//! Common utilities for E2E tests.

use cellcalc_core::ErrorKind;
use cellcalc_formula::{evaluate, CompileResult, Expr, FunctionArgument, ParsingContext, Repository};

/// Evaluate an expression with an en-US context.
pub fn eval(expr: &Expr) -> CompileResult {
    evaluate(expr, &ParsingContext::simple())
}

/// Shorthand for a function call node.
pub fn call(name: &str, args: Vec<Expr>) -> Expr {
    Expr::call(name, args)
}

/// Execute a built-in function directly on evaluated arguments.
pub fn execute(name: &str, args: &[FunctionArgument]) -> CompileResult {
    execute_with(name, args, &ParsingContext::simple())
}

/// Execute a built-in function with the given context.
pub fn execute_with(name: &str, args: &[FunctionArgument], ctx: &ParsingContext) -> CompileResult {
    Repository::global()
        .require(name)
        .expect("function should be registered")
        .execute(args, ctx)
}

/// Round to the given number of decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Assert that a result is the given error.
pub fn assert_error(result: &CompileResult, kind: ErrorKind) {
    assert_eq!(result.error_kind(), Some(kind), "expected {kind}, got {result:?}");
}
