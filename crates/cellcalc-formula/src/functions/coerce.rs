//! Argument coercion shared by the built-in functions
//!
//! Every helper returns `Err(kind)` for a value the function cannot use, so
//! callers can propagate with `?`. Input errors always pass through unchanged.

use cellcalc_core::serial::MAX_SERIAL;
use cellcalc_core::{ErrorKind, ScalarValue};

use crate::argument::FunctionArgument;
use crate::context::ParsingContext;
use crate::parse;

/// Scalar value of an argument; multi-cell ranges are `#VALUE!`
pub fn scalar(arg: &FunctionArgument) -> Result<&ScalarValue, ErrorKind> {
    arg.as_scalar().ok_or(ErrorKind::Value)
}

/// Argument at `index`, or `None` when omitted or blank
pub fn optional(args: &[FunctionArgument], index: usize) -> Option<&FunctionArgument> {
    args.get(index).filter(|a| !a.is_blank())
}

/// First error among the scalar arguments, in order
pub fn first_error(args: &[FunctionArgument]) -> Result<(), ErrorKind> {
    match args.iter().find_map(FunctionArgument::error) {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Numeric value of an argument (numeric, date or time text accepted)
pub fn number(arg: &FunctionArgument, ctx: &ParsingContext) -> Result<f64, ErrorKind> {
    parse::coerce_number(scalar(arg)?, ctx.culture())
}

/// Numeric value of an optional argument, with a default when omitted
pub fn number_or(
    args: &[FunctionArgument],
    index: usize,
    default: f64,
    ctx: &ParsingContext,
) -> Result<f64, ErrorKind> {
    match optional(args, index) {
        Some(arg) => number(arg, ctx),
        None => Ok(default),
    }
}

/// Integer value, truncated toward zero
pub fn integer(arg: &FunctionArgument, ctx: &ParsingContext) -> Result<i64, ErrorKind> {
    let n = number(arg, ctx)?.trunc();
    if n.abs() > i64::MAX as f64 / 2.0 {
        return Err(ErrorKind::Num);
    }
    Ok(n as i64)
}

/// Serial date of an argument; negative serials are `#NUM!`
pub fn serial(arg: &FunctionArgument, ctx: &ParsingContext) -> Result<f64, ErrorKind> {
    parse::parse_date_or_time(scalar(arg)?, ctx.culture())
}

/// Serial date of a required argument; omitted or blank is `#N/A`
pub fn required_serial(
    args: &[FunctionArgument],
    index: usize,
    ctx: &ParsingContext,
) -> Result<f64, ErrorKind> {
    match args.get(index) {
        Some(arg) if arg.is_blank() => Err(ErrorKind::Na),
        Some(arg) => serial(arg, ctx),
        None => Err(ErrorKind::Na),
    }
}

/// Whole day of a serial; days past 9999-12-31 are `#NUM!`
pub fn whole_day(serial: f64) -> Result<i64, ErrorKind> {
    let day = serial.trunc();
    if !(0.0..=MAX_SERIAL as f64).contains(&day) {
        return Err(ErrorKind::Num);
    }
    Ok(day as i64)
}

/// Boolean value of an argument
pub fn boolean(arg: &FunctionArgument, ctx: &ParsingContext) -> Result<bool, ErrorKind> {
    let value = scalar(arg)?;
    if let ScalarValue::Error(e) = value {
        return Err(*e);
    }
    parse::parse_boolean(value, ctx.culture()).ok_or(ErrorKind::Value)
}

/// Text value of an argument
pub fn text(arg: &FunctionArgument, ctx: &ParsingContext) -> Result<String, ErrorKind> {
    match scalar(arg)? {
        ScalarValue::Error(e) => Err(*e),
        ScalarValue::Boolean(b) => Ok(ctx.culture().boolean_text(*b).to_string()),
        other => Ok(other.to_string()),
    }
}
