//! Logical functions
//!
//! IF, IFERROR and IFNA are implementation types of their own so that the
//! repository can attach compilers that skip evaluating untaken branches.

use cellcalc_core::{ErrorKind, ScalarValue};

use super::coerce;
use super::{FnResult, Function, FunctionDef, FunctionModule};
use crate::argument::FunctionArgument;
use crate::ast::Expr;
use crate::context::ParsingContext;
use crate::evaluator::{Evaluator, FunctionCompiler};
use crate::result::CompileResult;

/// IF(condition, value_if_true, [value_if_false])
#[derive(Debug, Default, Clone, Copy)]
pub struct IfFunction;

impl IfFunction {
    fn run(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
        if args.len() < 2 {
            return Err(ErrorKind::Value);
        }
        if args.len() > 3 {
            return Err(ErrorKind::Na);
        }
        let branch = if coerce::boolean(&args[0], ctx)? { 1 } else { 2 };
        Ok(match args.get(branch) {
            Some(arg) => CompileResult::from_argument(arg),
            None => CompileResult::boolean(false),
        })
    }
}

impl Function for IfFunction {
    fn name(&self) -> &str {
        "IF"
    }

    fn execute(&self, args: &[FunctionArgument], context: &ParsingContext) -> CompileResult {
        Self::run(args, context).unwrap_or_else(CompileResult::from)
    }
}

/// Evaluates the condition, then only the branch it selects
#[derive(Debug, Default, Clone, Copy)]
pub struct IfCompiler;

impl FunctionCompiler for IfCompiler {
    fn compile(
        &self,
        function: &dyn Function,
        args: &[Expr],
        evaluator: &Evaluator<'_>,
    ) -> CompileResult {
        let ctx = evaluator.context();
        let mut evaluated = vec![FunctionArgument::blank(); args.len()];
        if let Some(condition) = args.first() {
            let condition = evaluator.evaluate_argument(condition);
            let branch = match coerce::boolean(&condition, ctx) {
                Ok(true) => Some(1),
                Ok(false) => Some(2),
                Err(_) => None,
            };
            if let Some(index) = branch.filter(|i| *i < args.len()) {
                evaluated[index] = evaluator.evaluate_argument(&args[index]);
            }
            evaluated[0] = condition;
        }
        function.execute(&evaluated, ctx)
    }
}

/// Which errors an [`ErrorFallback`] function replaces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaughtErrors {
    Any,
    NotAvailable,
}

impl CaughtErrors {
    fn catches(self, kind: ErrorKind) -> bool {
        match self {
            CaughtErrors::Any => true,
            CaughtErrors::NotAvailable => kind == ErrorKind::Na,
        }
    }
}

/// IFERROR(value, value_if_error) and IFNA(value, value_if_na)
#[derive(Debug, Clone, Copy)]
pub struct ErrorFallback {
    name: &'static str,
    caught: CaughtErrors,
}

impl ErrorFallback {
    pub const IFERROR: ErrorFallback = ErrorFallback {
        name: "IFERROR",
        caught: CaughtErrors::Any,
    };

    pub const IFNA: ErrorFallback = ErrorFallback {
        name: "IFNA",
        caught: CaughtErrors::NotAvailable,
    };

    pub fn caught(&self) -> CaughtErrors {
        self.caught
    }
}

impl Function for ErrorFallback {
    fn name(&self) -> &str {
        self.name
    }

    fn execute(&self, args: &[FunctionArgument], _context: &ParsingContext) -> CompileResult {
        match args.len() {
            0 | 1 => return CompileResult::error(ErrorKind::Value),
            2 => {}
            _ => return CompileResult::error(ErrorKind::Na),
        }
        match args[0].error() {
            Some(kind) if self.caught.catches(kind) => CompileResult::from_argument(&args[1]),
            _ => CompileResult::from_argument(&args[0]),
        }
    }
}

/// Evaluates the fallback only when the value is an error
#[derive(Debug, Default, Clone, Copy)]
pub struct ErrorFallbackCompiler;

impl FunctionCompiler for ErrorFallbackCompiler {
    fn compile(
        &self,
        function: &dyn Function,
        args: &[Expr],
        evaluator: &Evaluator<'_>,
    ) -> CompileResult {
        let mut evaluated = vec![FunctionArgument::blank(); args.len()];
        if let Some(value) = args.first() {
            let value = evaluator.evaluate_argument(value);
            if value.error().is_some() {
                for (slot, expr) in evaluated.iter_mut().zip(args).skip(1) {
                    *slot = evaluator.evaluate_argument(expr);
                }
            }
            evaluated[0] = value;
        }
        function.execute(&evaluated, evaluator.context())
    }
}

/// Truth values of the arguments of AND, OR and XOR
///
/// Direct arguments must be logical; inside ranges text and blanks are
/// ignored. `#VALUE!` when nothing logical is found.
fn logical_values(args: &[FunctionArgument], ctx: &ParsingContext) -> Result<Vec<bool>, ErrorKind> {
    let mut out = Vec::new();
    for arg in args {
        if arg.is_range() {
            for cell in arg.cells() {
                match cell.as_scalar() {
                    Some(ScalarValue::Error(e)) => return Err(*e),
                    Some(ScalarValue::Boolean(b)) => out.push(*b),
                    Some(ScalarValue::Number(n)) => out.push(*n != 0.0),
                    _ => {}
                }
            }
        } else if !arg.is_blank() {
            out.push(coerce::boolean(arg, ctx)?);
        }
    }
    if out.is_empty() {
        return Err(ErrorKind::Value);
    }
    Ok(out)
}

/// AND(logical1, [logical2], ...)
pub fn fn_and(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    let values = logical_values(args, ctx)?;
    Ok(CompileResult::boolean(values.iter().all(|b| *b)))
}

/// OR(logical1, [logical2], ...)
pub fn fn_or(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    let values = logical_values(args, ctx)?;
    Ok(CompileResult::boolean(values.iter().any(|b| *b)))
}

/// XOR(logical1, [logical2], ...) - TRUE when an odd number are TRUE
pub fn fn_xor(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    let values = logical_values(args, ctx)?;
    let trues = values.iter().filter(|b| **b).count();
    Ok(CompileResult::boolean(trues % 2 == 1))
}

/// NOT(logical)
pub fn fn_not(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    Ok(CompileResult::boolean(!coerce::boolean(&args[0], ctx)?))
}

/// TRUE()
pub fn fn_true(_args: &[FunctionArgument], _ctx: &ParsingContext) -> FnResult {
    Ok(CompileResult::boolean(true))
}

/// FALSE()
pub fn fn_false(_args: &[FunctionArgument], _ctx: &ParsingContext) -> FnResult {
    Ok(CompileResult::boolean(false))
}

/// Logical function module
pub fn module() -> FunctionModule {
    let mut module = FunctionModule::new();

    module
        .add(IfFunction)
        .add(ErrorFallback::IFERROR)
        .add(ErrorFallback::IFNA)
        .add_compiler::<IfFunction>(IfCompiler)
        .add_compiler::<ErrorFallback>(ErrorFallbackCompiler);

    // AND
    module.add(FunctionDef {
        name: "AND",
        min_args: 1,
        max_args: None,
        implementation: fn_and,
        volatile: false,
    });

    // OR
    module.add(FunctionDef {
        name: "OR",
        min_args: 1,
        max_args: None,
        implementation: fn_or,
        volatile: false,
    });

    // XOR
    module.add(FunctionDef {
        name: "XOR",
        min_args: 1,
        max_args: None,
        implementation: fn_xor,
        volatile: false,
    });

    // NOT
    module.add(FunctionDef {
        name: "NOT",
        min_args: 1,
        max_args: Some(1),
        implementation: fn_not,
        volatile: false,
    });

    // TRUE
    module.add(FunctionDef {
        name: "TRUE",
        min_args: 0,
        max_args: Some(0),
        implementation: fn_true,
        volatile: false,
    });

    // FALSE
    module.add(FunctionDef {
        name: "FALSE",
        min_args: 0,
        max_args: Some(0),
        implementation: fn_false,
        volatile: false,
    });

    module
}
