//! Locale-aware scalar parsing
//!
//! Every entry point takes the [`Culture`] explicitly.

mod date;
mod number;
mod time;

pub use date::{parse_date, parse_date_time};
pub use number::parse_number;
pub use time::TimeStringParser;

use cellcalc_core::{serial, Culture, ErrorKind, ScalarValue};
use log::trace;

/// Numeric interpretation of a scalar
///
/// Text must be a number in the culture's format; dates become serials and
/// blanks zero. Errors have no numeric value.
pub fn parse_numeric(value: &ScalarValue, culture: &Culture) -> Option<f64> {
    match value {
        ScalarValue::Number(n) => Some(*n),
        ScalarValue::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
        ScalarValue::Blank => Some(0.0),
        ScalarValue::Date(d) => serial::datetime_to_serial(*d).ok(),
        ScalarValue::Text(s) => parse_number(s, culture),
        ScalarValue::Error(_) => None,
    }
}

/// Number for arithmetic, reading text as a number, date or time
///
/// Errors pass through; text that is none of these is `#VALUE!`.
pub fn coerce_number(value: &ScalarValue, culture: &Culture) -> Result<f64, ErrorKind> {
    match value {
        ScalarValue::Error(e) => Err(*e),
        ScalarValue::Date(d) => serial::datetime_to_serial(*d),
        ScalarValue::Text(s) => text_to_serial(s, culture).ok_or(ErrorKind::Value),
        other => parse_numeric(other, culture).ok_or(ErrorKind::Value),
    }
}

fn text_to_serial(text: &str, culture: &Culture) -> Option<f64> {
    if let Some(n) = parse_number(text, culture) {
        return Some(n);
    }
    trace!("{:?} is not numeric, trying date/time", text);
    if let Some(dt) = parse_date_time(text, culture) {
        return serial::datetime_to_serial(dt).ok();
    }
    TimeStringParser::new(*culture).parse(text).ok()
}

/// Serial date/time interpretation of a scalar
///
/// Errors pass through, unparseable text is `#VALUE!` and negative serials
/// are `#NUM!`.
pub fn parse_date_or_time(value: &ScalarValue, culture: &Culture) -> Result<f64, ErrorKind> {
    let serial = coerce_number(value, culture)?;
    if serial < 0.0 {
        return Err(ErrorKind::Num);
    }
    Ok(serial)
}

/// Boolean interpretation of a scalar
///
/// Text must be a boolean literal in the culture (English is always
/// accepted); numbers are true when non-zero.
pub fn parse_boolean(value: &ScalarValue, culture: &Culture) -> Option<bool> {
    match value {
        ScalarValue::Boolean(b) => Some(*b),
        ScalarValue::Number(n) => Some(*n != 0.0),
        ScalarValue::Blank => Some(false),
        ScalarValue::Text(s) => culture.parse_boolean(s),
        ScalarValue::Date(_) | ScalarValue::Error(_) => None,
    }
}
