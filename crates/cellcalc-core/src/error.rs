//! Error types for cellcalc-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in cellcalc-core
///
/// These are configuration errors. Spreadsheet errors such as `#VALUE!` are
/// values ([`crate::ErrorKind`]), not Rust errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Culture name is not one of the built-in cultures
    #[error("Unknown culture: {0}")]
    UnknownCulture(String),

    /// Culture name is empty or malformed
    #[error("Invalid culture name: {0:?}")]
    InvalidCultureName(String),

    /// Text is not a canonical error literal
    #[error("Unknown error literal: {0:?}")]
    UnknownErrorLiteral(String),
}
