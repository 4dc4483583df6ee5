//! Math functions

use std::str::FromStr;

use cellcalc_core::ErrorKind;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

use super::aggregate::{self, Aggregation};
use super::coerce;
use super::{FnResult, FunctionDef, FunctionModule};
use crate::argument::FunctionArgument;
use crate::context::ParsingContext;
use crate::result::CompileResult;

/// SUM(number1, [number2], ...) - Adds its arguments
pub fn fn_sum(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    let values = aggregate::numbers(args, ctx, Aggregation::NUMBERS)?;
    Ok(CompileResult::number(aggregate::sum(&values)))
}

/// PRODUCT(number1, [number2], ...) - Multiplies its arguments
pub fn fn_product(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    let values = aggregate::numbers(args, ctx, Aggregation::NUMBERS)?;
    Ok(CompileResult::number(aggregate::product(&values)))
}

/// ABS(number) - Returns the absolute value
pub fn fn_abs(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    Ok(CompileResult::number(coerce::number(&args[0], ctx)?.abs()))
}

fn to_decimal(n: f64) -> Option<Decimal> {
    // Shortest decimal form first, so 2.675 rounds like the digits read
    Decimal::from_str(&n.to_string())
        .ok()
        .or_else(|| Decimal::from_f64(n))
}

fn round_with(number: f64, digits: f64, strategy: RoundingStrategy) -> f64 {
    let digits = digits.trunc().clamp(-308.0, 308.0) as i32;
    if digits >= 0 {
        return match to_decimal(number) {
            Some(d) => d
                .round_dp_with_strategy(digits.min(28) as u32, strategy)
                .to_f64()
                .unwrap_or(number),
            // Too large for a decimal; no fractional digits to round
            None => number,
        };
    }

    let factor = 10f64.powi(-digits);
    if !factor.is_finite() {
        return 0.0;
    }
    match to_decimal(number / factor) {
        Some(d) => d.round_dp_with_strategy(0, strategy).to_f64().unwrap_or(0.0) * factor,
        None => number,
    }
}

fn rounding(args: &[FunctionArgument], ctx: &ParsingContext, strategy: RoundingStrategy) -> FnResult {
    let number = coerce::number(&args[0], ctx)?;
    let digits = coerce::number_or(args, 1, 0.0, ctx)?;
    Ok(CompileResult::number(round_with(number, digits, strategy)))
}

/// ROUND(number, [num_digits]) - Rounds half away from zero
pub fn fn_round(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    rounding(args, ctx, RoundingStrategy::MidpointAwayFromZero)
}

/// ROUNDUP(number, [num_digits]) - Rounds away from zero
pub fn fn_roundup(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    rounding(args, ctx, RoundingStrategy::AwayFromZero)
}

/// ROUNDDOWN(number, [num_digits]) - Rounds toward zero
pub fn fn_rounddown(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    rounding(args, ctx, RoundingStrategy::ToZero)
}

/// INT(number) - Rounds down to the nearest integer
pub fn fn_int(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    Ok(CompileResult::number(coerce::number(&args[0], ctx)?.floor()))
}

/// MOD(number, divisor) - Remainder with the sign of the divisor
pub fn fn_mod(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    let number = coerce::number(&args[0], ctx)?;
    let divisor = coerce::number(&args[1], ctx)?;
    if divisor == 0.0 {
        return Err(ErrorKind::Div0);
    }
    Ok(CompileResult::number(number - divisor * (number / divisor).floor()))
}

/// SQRT(number)
pub fn fn_sqrt(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    let number = coerce::number(&args[0], ctx)?;
    if number < 0.0 {
        return Err(ErrorKind::Num);
    }
    Ok(CompileResult::number(number.sqrt()))
}

/// POWER(number, power)
pub fn fn_power(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    let base = coerce::number(&args[0], ctx)?;
    let exponent = coerce::number(&args[1], ctx)?;
    if base == 0.0 {
        if exponent == 0.0 {
            return Err(ErrorKind::Num);
        }
        if exponent < 0.0 {
            return Err(ErrorKind::Div0);
        }
    }
    Ok(CompileResult::number(base.powf(exponent)))
}

/// SIGN(number) - Returns -1, 0 or 1
pub fn fn_sign(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    let number = coerce::number(&args[0], ctx)?;
    let sign = if number > 0.0 {
        1.0
    } else if number < 0.0 {
        -1.0
    } else {
        0.0
    };
    Ok(CompileResult::number(sign))
}

/// PI()
pub fn fn_pi(_args: &[FunctionArgument], _ctx: &ParsingContext) -> FnResult {
    Ok(CompileResult::number(std::f64::consts::PI))
}

/// Math function module
pub fn module() -> FunctionModule {
    let mut module = FunctionModule::new();

    // SUM
    module.add(FunctionDef {
        name: "SUM",
        min_args: 1,
        max_args: None,
        implementation: fn_sum,
        volatile: false,
    });

    // PRODUCT
    module.add(FunctionDef {
        name: "PRODUCT",
        min_args: 1,
        max_args: None,
        implementation: fn_product,
        volatile: false,
    });

    // ABS
    module.add(FunctionDef {
        name: "ABS",
        min_args: 1,
        max_args: Some(1),
        implementation: fn_abs,
        volatile: false,
    });

    // ROUND
    module.add(FunctionDef {
        name: "ROUND",
        min_args: 1,
        max_args: Some(2),
        implementation: fn_round,
        volatile: false,
    });

    // ROUNDUP
    module.add(FunctionDef {
        name: "ROUNDUP",
        min_args: 1,
        max_args: Some(2),
        implementation: fn_roundup,
        volatile: false,
    });

    // ROUNDDOWN
    module.add(FunctionDef {
        name: "ROUNDDOWN",
        min_args: 1,
        max_args: Some(2),
        implementation: fn_rounddown,
        volatile: false,
    });

    // INT
    module.add(FunctionDef {
        name: "INT",
        min_args: 1,
        max_args: Some(1),
        implementation: fn_int,
        volatile: false,
    });

    // MOD
    module.add(FunctionDef {
        name: "MOD",
        min_args: 2,
        max_args: Some(2),
        implementation: fn_mod,
        volatile: false,
    });

    // SQRT
    module.add(FunctionDef {
        name: "SQRT",
        min_args: 1,
        max_args: Some(1),
        implementation: fn_sqrt,
        volatile: false,
    });

    // POWER
    module.add(FunctionDef {
        name: "POWER",
        min_args: 2,
        max_args: Some(2),
        implementation: fn_power,
        volatile: false,
    });

    // SIGN
    module.add(FunctionDef {
        name: "SIGN",
        min_args: 1,
        max_args: Some(1),
        implementation: fn_sign,
        volatile: false,
    });

    // PI
    module.add(FunctionDef {
        name: "PI",
        min_args: 0,
        max_args: Some(0),
        implementation: fn_pi,
        volatile: false,
    });

    module
}
