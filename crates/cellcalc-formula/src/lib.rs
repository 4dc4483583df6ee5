//! # cellcalc-formula
//!
//! Function dispatch and evaluation for the cellcalc formula engine.
//!
//! This crate provides:
//! - Locale-aware parsing of numbers, dates and times ([`parse`])
//! - The function calling convention ([`Function`], [`CompileResult`])
//! - A repository of built-in functions with `_xlfn.` prefix handling
//! - Evaluation of expression trees, with lazy IF/IFERROR/IFNA
//!
//! ## Example
//!
//! ```rust
//! use cellcalc_formula::{evaluate, Expr, ParsingContext};
//!
//! let expr = Expr::call(
//!     "EDATE",
//!     vec![Expr::from("4/14/1900"), Expr::from(3.0)],
//! );
//! let result = evaluate(&expr, &ParsingContext::simple());
//! assert_eq!(result.as_number(), Some(196.0));
//! ```

pub mod argument;
pub mod ast;
pub mod context;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod parse;
pub mod result;

pub use argument::{ArgumentValue, CellFlags, FunctionArgument};
pub use ast::Expr;
pub use context::{EngineSettings, ParsingContext};
pub use error::{FormulaError, FormulaResult};
pub use evaluator::{evaluate, DefaultCompiler, Evaluator, FunctionCompiler};
pub use functions::{Function, FunctionDef, FunctionModule, Repository};
pub use result::{CompileResult, DataType};
