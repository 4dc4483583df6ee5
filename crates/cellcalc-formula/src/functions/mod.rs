//! Built-in functions and the function repository

pub mod aggregate;
pub mod coerce;
pub mod date;
pub mod info;
pub mod logical;
pub mod lookup;
pub mod math;
pub mod repository;
pub mod statistical;
pub mod text;
pub mod workday;

use std::any::TypeId;
use std::sync::Arc;

use ahash::AHashMap;
use cellcalc_core::ErrorKind;

use crate::argument::FunctionArgument;
use crate::context::ParsingContext;
use crate::evaluator::FunctionCompiler;
use crate::result::CompileResult;

pub use repository::Repository;

/// A callable spreadsheet function
///
/// `execute` never fails: invalid input produces a result tagged
/// [`DataType::ExcelError`](crate::DataType::ExcelError).
pub trait Function: Send + Sync + 'static {
    /// Canonical uppercase name
    fn name(&self) -> &str;

    /// Run the function on evaluated arguments
    fn execute(&self, args: &[FunctionArgument], context: &ParsingContext) -> CompileResult;

    /// Volatile functions recalculate on every evaluation
    fn is_volatile(&self) -> bool {
        false
    }

    /// Implementation type, used to find a custom compiler
    fn type_key(&self) -> TypeId {
        TypeId::of::<Self>()
    }
}

/// Function implementation signature
///
/// `Err(kind)` is turned into an error result by [`FunctionDef::execute`], so
/// implementations can pass input errors through with `?`.
pub type FunctionImpl = fn(&[FunctionArgument], &ParsingContext) -> FnResult;

/// Return type of a [`FunctionImpl`]
pub type FnResult = Result<CompileResult, ErrorKind>;

/// Table-driven function definition
#[derive(Debug, Clone, Copy)]
pub struct FunctionDef {
    /// Function name (uppercase)
    pub name: &'static str,
    /// Minimum arguments
    pub min_args: usize,
    /// Maximum arguments (None = unlimited)
    pub max_args: Option<usize>,
    /// Implementation
    pub implementation: FunctionImpl,
    /// Is volatile (recalculates every time)
    pub volatile: bool,
}

impl FunctionDef {
    /// Check the argument count: too few is `#VALUE!`, too many `#N/A`
    pub fn check_arity(&self, count: usize) -> Result<(), ErrorKind> {
        if count < self.min_args {
            return Err(ErrorKind::Value);
        }
        match self.max_args {
            Some(max) if count > max => Err(ErrorKind::Na),
            _ => Ok(()),
        }
    }
}

impl Function for FunctionDef {
    fn name(&self) -> &str {
        self.name
    }

    fn execute(&self, args: &[FunctionArgument], context: &ParsingContext) -> CompileResult {
        self.check_arity(args.len())
            .and_then(|_| (self.implementation)(args, context))
            .unwrap_or_else(CompileResult::from)
    }

    fn is_volatile(&self) -> bool {
        self.volatile
    }
}

/// A bundle of functions and compilers loaded into a [`Repository`] together
#[derive(Default, Clone)]
pub struct FunctionModule {
    functions: AHashMap<String, Arc<dyn Function>>,
    compilers: AHashMap<TypeId, Arc<dyn FunctionCompiler>>,
}

impl FunctionModule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a function under its uppercase name
    pub fn add(&mut self, function: impl Function) -> &mut Self {
        self.functions
            .insert(function.name().to_uppercase(), Arc::new(function));
        self
    }

    /// Add a compiler for the implementation type `F`
    pub fn add_compiler<F: Function>(
        &mut self,
        compiler: impl FunctionCompiler + 'static,
    ) -> &mut Self {
        self.compilers.insert(TypeId::of::<F>(), Arc::new(compiler));
        self
    }

    pub fn functions(&self) -> impl Iterator<Item = (&str, &Arc<dyn Function>)> {
        self.functions.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn compilers(&self) -> impl Iterator<Item = (&TypeId, &Arc<dyn FunctionCompiler>)> {
        self.compilers.iter()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fn_one(_args: &[FunctionArgument], _ctx: &ParsingContext) -> Result<CompileResult, ErrorKind> {
        Ok(CompileResult::number(1.0))
    }

    const ONE: FunctionDef = FunctionDef {
        name: "ONE",
        min_args: 1,
        max_args: Some(2),
        implementation: fn_one,
        volatile: false,
    };

    #[test]
    fn test_arity() {
        let ctx = ParsingContext::simple();
        assert_eq!(ONE.execute(&[], &ctx).error_kind(), Some(ErrorKind::Value));
        assert_eq!(ONE.execute(&[1.0.into()], &ctx).as_number(), Some(1.0));
        let three: Vec<FunctionArgument> = vec![1.0.into(), 2.0.into(), 3.0.into()];
        assert_eq!(ONE.execute(&three, &ctx).error_kind(), Some(ErrorKind::Na));
    }

    #[test]
    fn test_type_key_differs_per_implementation() {
        struct Custom;
        impl Function for Custom {
            fn name(&self) -> &str {
                "CUSTOM"
            }
            fn execute(&self, _: &[FunctionArgument], _: &ParsingContext) -> CompileResult {
                CompileResult::empty()
            }
        }
        assert_eq!(ONE.type_key(), TypeId::of::<FunctionDef>());
        assert_eq!(Custom.type_key(), TypeId::of::<Custom>());
    }
}
