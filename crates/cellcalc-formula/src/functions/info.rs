//! Information functions
//!
//! The IS functions never propagate errors; they classify them.

use cellcalc_core::{ErrorKind, ScalarValue};

use super::{FnResult, FunctionDef, FunctionModule};
use crate::argument::FunctionArgument;
use crate::context::ParsingContext;
use crate::result::CompileResult;

fn classify(args: &[FunctionArgument], test: impl Fn(&ScalarValue) -> bool) -> FnResult {
    let matched = args[0].as_scalar().map(test).unwrap_or(false);
    Ok(CompileResult::boolean(matched))
}

/// ISBLANK(value)
pub fn fn_isblank(args: &[FunctionArgument], _ctx: &ParsingContext) -> FnResult {
    classify(args, ScalarValue::is_blank)
}

/// ISNUMBER(value) - Dates count as numbers
pub fn fn_isnumber(args: &[FunctionArgument], _ctx: &ParsingContext) -> FnResult {
    classify(args, |v| matches!(v, ScalarValue::Number(_) | ScalarValue::Date(_)))
}

/// ISTEXT(value)
pub fn fn_istext(args: &[FunctionArgument], _ctx: &ParsingContext) -> FnResult {
    classify(args, |v| matches!(v, ScalarValue::Text(_)))
}

/// ISLOGICAL(value)
pub fn fn_islogical(args: &[FunctionArgument], _ctx: &ParsingContext) -> FnResult {
    classify(args, |v| matches!(v, ScalarValue::Boolean(_)))
}

/// ISERROR(value) - Any error
pub fn fn_iserror(args: &[FunctionArgument], _ctx: &ParsingContext) -> FnResult {
    classify(args, ScalarValue::is_error)
}

/// ISERR(value) - Any error except #N/A
pub fn fn_iserr(args: &[FunctionArgument], _ctx: &ParsingContext) -> FnResult {
    classify(args, |v| matches!(v.as_error(), Some(e) if e != ErrorKind::Na))
}

/// ISNA(value)
pub fn fn_isna(args: &[FunctionArgument], _ctx: &ParsingContext) -> FnResult {
    classify(args, |v| v.as_error() == Some(ErrorKind::Na))
}

/// NA() - Returns #N/A
pub fn fn_na(_args: &[FunctionArgument], _ctx: &ParsingContext) -> FnResult {
    Err(ErrorKind::Na)
}

/// ERROR.TYPE(error_val) - Number of an error; #N/A for non-errors
pub fn fn_error_type(args: &[FunctionArgument], _ctx: &ParsingContext) -> FnResult {
    match args[0].error() {
        Some(kind) => Ok(CompileResult::number(f64::from(kind.error_type_code()))),
        None => Err(ErrorKind::Na),
    }
}

/// TYPE(value) - 1 number, 2 text, 4 logical, 16 error, 64 array
pub fn fn_type(args: &[FunctionArgument], _ctx: &ParsingContext) -> FnResult {
    let code = match args[0].as_scalar() {
        None => 64.0,
        Some(ScalarValue::Text(_)) => 2.0,
        Some(ScalarValue::Boolean(_)) => 4.0,
        Some(ScalarValue::Error(_)) => 16.0,
        Some(_) => 1.0,
    };
    Ok(CompileResult::number(code))
}

/// Information function module
pub fn module() -> FunctionModule {
    let mut module = FunctionModule::new();

    let predicates: [(&'static str, super::FunctionImpl); 7] = [
        ("ISBLANK", fn_isblank),
        ("ISNUMBER", fn_isnumber),
        ("ISTEXT", fn_istext),
        ("ISLOGICAL", fn_islogical),
        ("ISERROR", fn_iserror),
        ("ISERR", fn_iserr),
        ("ISNA", fn_isna),
    ];
    for (name, implementation) in predicates {
        module.add(FunctionDef {
            name,
            min_args: 1,
            max_args: Some(1),
            implementation,
            volatile: false,
        });
    }

    // NA
    module.add(FunctionDef {
        name: "NA",
        min_args: 0,
        max_args: Some(0),
        implementation: fn_na,
        volatile: false,
    });

    // ERROR.TYPE
    module.add(FunctionDef {
        name: "ERROR.TYPE",
        min_args: 1,
        max_args: Some(1),
        implementation: fn_error_type,
        volatile: false,
    });

    // TYPE
    module.add(FunctionDef {
        name: "TYPE",
        min_args: 1,
        max_args: Some(1),
        implementation: fn_type,
        volatile: false,
    });

    module
}
