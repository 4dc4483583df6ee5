//! Value collection for aggregate functions
//!
//! Direct scalar arguments are coerced: booleans count as 1/0 and numeric
//! text is parsed. Inside ranges only numbers (and dates) take part, unless
//! the aggregation includes all values as the `A`-suffixed functions do.

use cellcalc_core::{serial, ErrorKind, ScalarValue};

use crate::argument::{CellFlags, FunctionArgument};
use crate::context::ParsingContext;
use crate::parse;

/// Treatment of non-numeric values found inside ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeValues {
    /// Booleans and text are ignored
    NumbersOnly,
    /// TRUE is 1, FALSE and text are 0
    All,
}

/// How an aggregate function collects its inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aggregation {
    pub range_values: RangeValues,
    /// Cells with any of these flags are left out
    pub skip: CellFlags,
}

impl Aggregation {
    pub const NUMBERS: Aggregation = Aggregation {
        range_values: RangeValues::NumbersOnly,
        skip: CellFlags::empty(),
    };

    pub const ALL_VALUES: Aggregation = Aggregation {
        range_values: RangeValues::All,
        skip: CellFlags::empty(),
    };

    pub fn skipping(mut self, flags: CellFlags) -> Self {
        self.skip |= flags;
        self
    }
}

/// Collect the numbers an aggregate function operates on
///
/// The first error met, in argument order, is returned instead.
pub fn numbers(
    args: &[FunctionArgument],
    ctx: &ParsingContext,
    aggregation: Aggregation,
) -> Result<Vec<f64>, ErrorKind> {
    let mut out = Vec::new();
    for arg in args {
        if arg.flags().intersects(aggregation.skip) {
            continue;
        }
        if arg.is_range() {
            for cell in arg.cells() {
                if cell.flags().intersects(aggregation.skip) {
                    continue;
                }
                if let Some(value) = cell.as_scalar() {
                    if let Some(n) = range_number(value, aggregation.range_values)? {
                        out.push(n);
                    }
                }
            }
        } else if let Some(value) = arg.as_scalar() {
            if !value.is_blank() {
                out.push(parse::coerce_number(value, ctx.culture())?);
            }
        }
    }
    Ok(out)
}

fn range_number(value: &ScalarValue, mode: RangeValues) -> Result<Option<f64>, ErrorKind> {
    Ok(match value {
        ScalarValue::Number(n) => Some(*n),
        ScalarValue::Date(d) => Some(serial::datetime_to_serial(*d)?),
        ScalarValue::Error(e) => return Err(*e),
        ScalarValue::Blank => None,
        ScalarValue::Boolean(b) => match mode {
            RangeValues::All => Some(if *b { 1.0 } else { 0.0 }),
            RangeValues::NumbersOnly => None,
        },
        ScalarValue::Text(_) => match mode {
            RangeValues::All => Some(0.0),
            RangeValues::NumbersOnly => None,
        },
    })
}

/// Count the values COUNT would count; errors are never counted
pub fn count_numbers(args: &[FunctionArgument], ctx: &ParsingContext, skip: CellFlags) -> usize {
    let mut count = 0;
    for arg in args {
        if arg.flags().intersects(skip) {
            continue;
        }
        if arg.is_range() {
            count += arg
                .cells()
                .iter()
                .filter(|c| !c.flags().intersects(skip))
                .filter(|c| {
                    matches!(
                        c.as_scalar(),
                        Some(ScalarValue::Number(_)) | Some(ScalarValue::Date(_))
                    )
                })
                .count();
        } else if let Some(value) = arg.as_scalar() {
            let counts = match value {
                ScalarValue::Number(_) | ScalarValue::Date(_) | ScalarValue::Boolean(_) => true,
                ScalarValue::Text(_) => parse::coerce_number(value, ctx.culture()).is_ok(),
                ScalarValue::Blank | ScalarValue::Error(_) => false,
            };
            if counts {
                count += 1;
            }
        }
    }
    count
}

/// Count non-blank values, errors included
pub fn count_values(args: &[FunctionArgument], skip: CellFlags) -> usize {
    args.iter()
        .filter(|a| !a.flags().intersects(skip))
        .flat_map(|a| a.cells())
        .filter(|c| !c.flags().intersects(skip) && !c.is_blank())
        .count()
}

pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

pub fn product(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().product()
}

pub fn average(values: &[f64]) -> Result<f64, ErrorKind> {
    if values.is_empty() {
        return Err(ErrorKind::Div0);
    }
    Ok(sum(values) / values.len() as f64)
}

pub fn min(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::min).unwrap_or(0.0)
}

pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).unwrap_or(0.0)
}

/// Variance; `sample` divides by n - 1
pub fn variance(values: &[f64], sample: bool) -> Result<f64, ErrorKind> {
    let n = values.len();
    let divisor = if sample { n.saturating_sub(1) } else { n };
    if divisor == 0 {
        return Err(ErrorKind::Div0);
    }
    let mean = sum(values) / n as f64;
    let squares: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Ok(squares / divisor as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ctx() -> ParsingContext {
        ParsingContext::simple()
    }

    #[test]
    fn test_direct_values_are_coerced() {
        let args = [
            FunctionArgument::from(true),
            FunctionArgument::from("2"),
            FunctionArgument::from(3.0),
        ];
        assert_eq!(numbers(&args, &ctx(), Aggregation::NUMBERS), Ok(vec![1.0, 2.0, 3.0]));
        let bad = [FunctionArgument::from("abc")];
        assert_eq!(numbers(&bad, &ctx(), Aggregation::NUMBERS), Err(ErrorKind::Value));
    }

    #[test]
    fn test_range_values_ignored_unless_all() {
        let range = FunctionArgument::range([
            FunctionArgument::from(1.0),
            FunctionArgument::from(true),
            FunctionArgument::from("text"),
            FunctionArgument::blank(),
        ]);
        let args = [range];
        assert_eq!(numbers(&args, &ctx(), Aggregation::NUMBERS), Ok(vec![1.0]));
        assert_eq!(
            numbers(&args, &ctx(), Aggregation::ALL_VALUES),
            Ok(vec![1.0, 1.0, 0.0])
        );
    }

    #[test]
    fn test_skip_flags() {
        let range = FunctionArgument::range([
            FunctionArgument::from(1.0),
            FunctionArgument::from(10.0).hidden(),
        ]);
        let args = [range];
        let visible = Aggregation::NUMBERS.skipping(CellFlags::HIDDEN);
        assert_eq!(numbers(&args, &ctx(), visible), Ok(vec![1.0]));
        assert_eq!(count_values(&args, CellFlags::HIDDEN), 1);
    }

    #[test]
    fn test_counts() {
        let args = [
            FunctionArgument::range([
                FunctionArgument::from(1.0),
                FunctionArgument::from(true),
                FunctionArgument::from(ErrorKind::Na),
                FunctionArgument::blank(),
            ]),
            FunctionArgument::from("3"),
            FunctionArgument::from(false),
        ];
        assert_eq!(count_numbers(&args, &ctx(), CellFlags::empty()), 3);
        assert_eq!(count_values(&args, CellFlags::empty()), 5);
    }

    #[test]
    fn test_variance() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(variance(&values, false), Ok(4.0));
        assert_eq!(variance(&[1.0], true), Err(ErrorKind::Div0));
    }
}
