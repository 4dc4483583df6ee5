//! # cellcalc-core
//!
//! Core value types for the cellcalc formula engine.
//!
//! This crate provides the leaf types shared by every layer of the engine:
//! - [`ScalarValue`] - A single number, text, boolean, date, error or blank
//! - [`ErrorKind`] - Spreadsheet error values with localized spellings
//! - [`Culture`] - Number, date, boolean and error conventions of a locale
//! - [`serial`] - Conversion between calendar dates and serial numbers
//!
//! ## Example
//!
//! ```rust
//! use cellcalc_core::{serial, Culture, ErrorKind};
//!
//! // The fictitious 1900-02-29 normalizes to 1900-03-01
//! assert_eq!(serial::to_serial(1900.0, 2.0, 29.0), Ok(61.0));
//! assert_eq!(serial::from_serial(-1.0), Err(ErrorKind::Num));
//!
//! let de = Culture::lookup("de-DE").unwrap();
//! assert_eq!(ErrorKind::Value.display(&de), "#WERT!");
//! ```

pub mod culture;
pub mod error;
pub mod serial;
pub mod value;

pub use culture::{Culture, DateOrder};
pub use error::{Error, Result};
pub use serial::SerialDateTime;
pub use value::{ErrorKind, ScalarValue};
