//! Text conversion functions

use cellcalc_core::{serial, ErrorKind, ScalarValue};

use super::coerce;
use super::{FnResult, FunctionDef, FunctionModule};
use crate::argument::FunctionArgument;
use crate::context::ParsingContext;
use crate::parse;
use crate::result::CompileResult;

/// VALUE(text) - Converts number, date or time text to a number
pub fn fn_value(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    match coerce::scalar(&args[0])? {
        ScalarValue::Boolean(_) => Err(ErrorKind::Value),
        value => Ok(CompileResult::number(parse::coerce_number(
            value,
            ctx.culture(),
        )?)),
    }
}

/// N(value) - Number for numbers and booleans, zero for text
pub fn fn_n(args: &[FunctionArgument], _ctx: &ParsingContext) -> FnResult {
    let n = match coerce::scalar(&args[0])? {
        ScalarValue::Error(e) => return Err(*e),
        ScalarValue::Number(n) => *n,
        ScalarValue::Date(d) => serial::datetime_to_serial(*d)?,
        ScalarValue::Boolean(b) => f64::from(u8::from(*b)),
        ScalarValue::Text(_) | ScalarValue::Blank => 0.0,
    };
    Ok(CompileResult::number(n))
}

/// T(value) - The text itself, or empty text for anything else
pub fn fn_t(args: &[FunctionArgument], _ctx: &ParsingContext) -> FnResult {
    match coerce::scalar(&args[0])? {
        ScalarValue::Error(e) => Err(*e),
        ScalarValue::Text(s) => Ok(CompileResult::string(s.as_str())),
        _ => Ok(CompileResult::string("")),
    }
}

/// Text function module
pub fn module() -> FunctionModule {
    let mut module = FunctionModule::new();

    // VALUE
    module.add(FunctionDef {
        name: "VALUE",
        min_args: 1,
        max_args: Some(1),
        implementation: fn_value,
        volatile: false,
    });

    // N
    module.add(FunctionDef {
        name: "N",
        min_args: 1,
        max_args: Some(1),
        implementation: fn_n,
        volatile: false,
    });

    // T
    module.add(FunctionDef {
        name: "T",
        min_args: 1,
        max_args: Some(1),
        implementation: fn_t,
        volatile: false,
    });

    module
}
