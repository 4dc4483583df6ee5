//! Statistical functions

use cellcalc_core::{ErrorKind, ScalarValue};

use super::aggregate::{self, Aggregation};
use super::coerce;
use super::{FnResult, FunctionDef, FunctionModule};
use crate::argument::{CellFlags, FunctionArgument};
use crate::context::ParsingContext;
use crate::result::CompileResult;

/// COUNT(value1, [value2], ...) - Counts numbers
pub fn fn_count(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    let count = aggregate::count_numbers(args, ctx, CellFlags::empty());
    Ok(CompileResult::number(count as f64))
}

/// COUNTA(value1, [value2], ...) - Counts non-empty values
pub fn fn_counta(args: &[FunctionArgument], _ctx: &ParsingContext) -> FnResult {
    let count = aggregate::count_values(args, CellFlags::empty());
    Ok(CompileResult::number(count as f64))
}

/// COUNTBLANK(range) - Counts empty cells and empty strings
pub fn fn_countblank(args: &[FunctionArgument], _ctx: &ParsingContext) -> FnResult {
    let count = args[0]
        .cells()
        .iter()
        .filter(|c| match c.as_scalar() {
            Some(ScalarValue::Blank) => true,
            Some(ScalarValue::Text(s)) => s.is_empty(),
            _ => false,
        })
        .count();
    Ok(CompileResult::number(count as f64))
}

/// AVERAGE(number1, [number2], ...)
pub fn fn_average(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    let values = aggregate::numbers(args, ctx, Aggregation::NUMBERS)?;
    Ok(CompileResult::number(aggregate::average(&values)?))
}

/// AVERAGEA(value1, [value2], ...) - Average counting booleans and text in ranges
pub fn fn_averagea(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    let values = aggregate::numbers(args, ctx, Aggregation::ALL_VALUES)?;
    Ok(CompileResult::number(aggregate::average(&values)?))
}

/// MIN(number1, [number2], ...) - Zero when there are no numbers
pub fn fn_min(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    let values = aggregate::numbers(args, ctx, Aggregation::NUMBERS)?;
    Ok(CompileResult::number(aggregate::min(&values)))
}

/// MAX(number1, [number2], ...) - Zero when there are no numbers
pub fn fn_max(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    let values = aggregate::numbers(args, ctx, Aggregation::NUMBERS)?;
    Ok(CompileResult::number(aggregate::max(&values)))
}

/// SUBTOTAL(function_num, ref1, [ref2], ...)
///
/// Function numbers 1-11 include hidden cells, 101-111 leave them out. Cells
/// holding a SUBTOTAL themselves are always left out.
pub fn fn_subtotal(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    let code = coerce::integer(&args[0], ctx)?;
    let (function, skip) = match code {
        1..=11 => (code, CellFlags::SUBTOTAL),
        101..=111 => (code - 100, CellFlags::SUBTOTAL | CellFlags::HIDDEN),
        _ => return Err(ErrorKind::Value),
    };

    let refs = &args[1..];
    let numbers = || aggregate::numbers(refs, ctx, Aggregation::NUMBERS.skipping(skip));
    let result = match function {
        1 => aggregate::average(&numbers()?)?,
        2 => aggregate::count_numbers(refs, ctx, skip) as f64,
        3 => aggregate::count_values(refs, skip) as f64,
        4 => aggregate::max(&numbers()?),
        5 => aggregate::min(&numbers()?),
        6 => aggregate::product(&numbers()?),
        7 => aggregate::variance(&numbers()?, true)?.sqrt(),
        8 => aggregate::variance(&numbers()?, false)?.sqrt(),
        9 => aggregate::sum(&numbers()?),
        10 => aggregate::variance(&numbers()?, true)?,
        _ => aggregate::variance(&numbers()?, false)?,
    };
    Ok(CompileResult::number(result))
}

/// Statistical function module
pub fn module() -> FunctionModule {
    let mut module = FunctionModule::new();

    // COUNT
    module.add(FunctionDef {
        name: "COUNT",
        min_args: 1,
        max_args: None,
        implementation: fn_count,
        volatile: false,
    });

    // COUNTA
    module.add(FunctionDef {
        name: "COUNTA",
        min_args: 1,
        max_args: None,
        implementation: fn_counta,
        volatile: false,
    });

    // COUNTBLANK
    module.add(FunctionDef {
        name: "COUNTBLANK",
        min_args: 1,
        max_args: Some(1),
        implementation: fn_countblank,
        volatile: false,
    });

    // AVERAGE
    module.add(FunctionDef {
        name: "AVERAGE",
        min_args: 1,
        max_args: None,
        implementation: fn_average,
        volatile: false,
    });

    // AVERAGEA
    module.add(FunctionDef {
        name: "AVERAGEA",
        min_args: 1,
        max_args: None,
        implementation: fn_averagea,
        volatile: false,
    });

    // MIN
    module.add(FunctionDef {
        name: "MIN",
        min_args: 1,
        max_args: None,
        implementation: fn_min,
        volatile: false,
    });

    // MAX
    module.add(FunctionDef {
        name: "MAX",
        min_args: 1,
        max_args: None,
        implementation: fn_max,
        volatile: false,
    });

    // SUBTOTAL
    module.add(FunctionDef {
        name: "SUBTOTAL",
        min_args: 2,
        max_args: None,
        implementation: fn_subtotal,
        volatile: false,
    });

    module
}
