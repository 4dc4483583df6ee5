//! End-to-end tests for cellcalc-formula.
//!
//! Each test builds an expression tree (or an argument list), evaluates it
//! through the global repository and asserts on the typed result.

mod common;
mod errors;
mod evaluation;
mod functions;
mod locale;

// Re-export common utilities for submodules
pub use common::*;
