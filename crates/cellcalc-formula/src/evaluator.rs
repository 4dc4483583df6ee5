//! Expression evaluator
//!
//! Walks an [`Expr`] tree, resolving each function node through a
//! [`Repository`]. Functions without a custom compiler get their arguments
//! evaluated eagerly by [`DefaultCompiler`].

use cellcalc_core::ErrorKind;
use log::debug;

use crate::argument::FunctionArgument;
use crate::ast::Expr;
use crate::context::ParsingContext;
use crate::functions::{Function, Repository};
use crate::result::CompileResult;

/// Custom argument handling for a function implementation type
///
/// A compiler decides which argument expressions get evaluated before the
/// function runs. Compilers are registered per implementation type; see
/// [`Repository::register_compiler`].
pub trait FunctionCompiler: Send + Sync {
    fn compile(&self, function: &dyn Function, args: &[Expr], evaluator: &Evaluator<'_>)
        -> CompileResult;
}

/// Evaluates every argument, then executes the function
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultCompiler;

impl FunctionCompiler for DefaultCompiler {
    fn compile(
        &self,
        function: &dyn Function,
        args: &[Expr],
        evaluator: &Evaluator<'_>,
    ) -> CompileResult {
        let args: Vec<FunctionArgument> =
            args.iter().map(|a| evaluator.evaluate_argument(a)).collect();
        function.execute(&args, evaluator.context())
    }
}

/// Expression evaluator bound to a repository and context
pub struct Evaluator<'a> {
    repository: &'a Repository,
    context: &'a ParsingContext,
}

impl<'a> Evaluator<'a> {
    pub fn new(repository: &'a Repository, context: &'a ParsingContext) -> Self {
        Self {
            repository,
            context,
        }
    }

    pub fn repository(&self) -> &'a Repository {
        self.repository
    }

    pub fn context(&self) -> &'a ParsingContext {
        self.context
    }

    /// Evaluate an expression
    pub fn evaluate(&self, expr: &Expr) -> CompileResult {
        match expr {
            Expr::Value(v) => CompileResult::from_scalar(v.clone()),
            Expr::Range(range) => CompileResult::array(range.clone()),
            Expr::Array(rows) => {
                let rows = rows
                    .iter()
                    .map(|row| row.iter().map(|e| self.evaluate_argument(e)));
                CompileResult::array(FunctionArgument::rows(rows))
            }
            Expr::Function { name, args } => self.call(name, args),
        }
    }

    /// Evaluate an expression into an argument for an enclosing call
    pub fn evaluate_argument(&self, expr: &Expr) -> FunctionArgument {
        match expr {
            Expr::Range(range) => range.clone(),
            _ => self.evaluate(expr).into_argument(),
        }
    }

    fn call(&self, name: &str, args: &[Expr]) -> CompileResult {
        let function = match self.repository.get_function(name) {
            Some(f) => f,
            None => {
                debug!("unknown function {:?}, returning #NAME?", name);
                return CompileResult::error(ErrorKind::Name);
            }
        };

        match self.repository.get_compiler(function) {
            Some(compiler) => compiler.compile(function, args, self),
            None => DefaultCompiler.compile(function, args, self),
        }
    }
}

/// Evaluate an expression with the built-in functions
pub fn evaluate(expr: &Expr, context: &ParsingContext) -> CompileResult {
    Evaluator::new(Repository::global(), context).evaluate(expr)
}
