//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur outside of function execution
///
/// Function execution never fails with a `FormulaError`; invalid input
/// produces an error *value* instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormulaError {
    /// Text is not a recognizable time
    #[error("Invalid time string: {0:?}")]
    InvalidTime(String),

    /// A minute or second component is 60 or more
    #[error("Time component {component} out of range: {value}")]
    TimeComponentOutOfRange {
        component: &'static str,
        value: u32,
    },

    /// Culture could not be resolved
    #[error(transparent)]
    Culture(#[from] cellcalc_core::Error),

    /// Unknown function
    #[error("Unknown function: {0}")]
    UnknownFunction(String),
}
