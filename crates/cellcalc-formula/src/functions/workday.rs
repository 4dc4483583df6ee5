//! Working-day functions
//!
//! Days are counted on serial numbers, so weekdays follow the serial
//! calendar (serial 0 is a Saturday) even before 1900-03-01.

use ahash::AHashSet;
use cellcalc_core::serial::{self, MAX_SERIAL};
use cellcalc_core::{ErrorKind, ScalarValue};
use chrono::Weekday;
use lazy_regex::regex_is_match;
use log::trace;

use super::coerce;
use super::{FnResult, FunctionDef, FunctionModule};
use crate::argument::FunctionArgument;
use crate::context::ParsingContext;
use crate::parse;
use crate::result::CompileResult;

/// Weekend days, indexed Monday..Sunday
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekendMask([bool; 7]);

impl Default for WeekendMask {
    fn default() -> Self {
        Self::SATURDAY_SUNDAY
    }
}

impl WeekendMask {
    pub const SATURDAY_SUNDAY: WeekendMask =
        WeekendMask([false, false, false, false, false, true, true]);

    /// Weekend from a numeric code
    ///
    /// Codes 1-7 are two-day weekends starting Saturday, Sunday, ... Friday;
    /// codes 11-17 are single days Sunday, Monday, ... Saturday. Anything
    /// else is `#NUM!`.
    pub fn from_code(code: i64) -> Result<Self, ErrorKind> {
        let mut days = [false; 7];
        match code {
            1..=7 => {
                // Code 1 starts on Saturday (index 5)
                let first = (code as usize + 4) % 7;
                days[first] = true;
                days[(first + 1) % 7] = true;
            }
            11..=17 => days[(code as usize - 11 + 6) % 7] = true,
            _ => return Err(ErrorKind::Num),
        }
        Ok(Self(days))
    }

    /// Weekend from a seven-character mask such as `"0000011"`
    ///
    /// Malformed masks and masks with no working day are `#VALUE!`.
    pub fn from_pattern(pattern: &str) -> Result<Self, ErrorKind> {
        if !regex_is_match!(r"^[01]{7}$", pattern) || pattern == "1111111" {
            return Err(ErrorKind::Value);
        }
        let mut days = [false; 7];
        for (day, c) in days.iter_mut().zip(pattern.chars()) {
            *day = c == '1';
        }
        Ok(Self(days))
    }

    pub fn is_weekend(&self, day: Weekday) -> bool {
        self.0[day.num_days_from_monday() as usize]
    }

    fn working_days_per_week(&self) -> i64 {
        self.0.iter().filter(|d| !**d).count() as i64
    }
}

fn weekend_argument(
    args: &[FunctionArgument],
    index: usize,
    ctx: &ParsingContext,
) -> Result<WeekendMask, ErrorKind> {
    let arg = match coerce::optional(args, index) {
        Some(arg) => arg,
        None => return Ok(WeekendMask::default()),
    };
    match coerce::scalar(arg)? {
        ScalarValue::Error(e) => Err(*e),
        ScalarValue::Text(s) => WeekendMask::from_pattern(s),
        _ => WeekendMask::from_code(coerce::integer(arg, ctx)?),
    }
}

/// Serial days of a holidays argument; blanks are ignored
fn holidays_argument(
    args: &[FunctionArgument],
    index: usize,
    ctx: &ParsingContext,
) -> Result<AHashSet<i64>, ErrorKind> {
    let mut days = AHashSet::new();
    if let Some(arg) = args.get(index) {
        for cell in arg.cells() {
            let value = coerce::scalar(cell)?;
            if value.is_blank() {
                continue;
            }
            let day = parse::parse_date_or_time(value, ctx.culture())?;
            days.insert(day.trunc() as i64);
        }
    }
    Ok(days)
}

fn is_working_day(day: i64, weekend: &WeekendMask, holidays: &AHashSet<i64>) -> bool {
    !weekend.is_weekend(serial::excel_weekday(day)) && !holidays.contains(&day)
}

/// Day that is `days` working days away from `start`
fn shift_working_days(
    start: i64,
    days: i64,
    weekend: &WeekendMask,
    holidays: &AHashSet<i64>,
) -> Result<i64, ErrorKind> {
    let step = days.signum();
    let mut remaining = days.abs();
    let mut day = start;
    while remaining > 0 {
        day += step;
        if !(0..=MAX_SERIAL).contains(&day) {
            return Err(ErrorKind::Num);
        }
        if is_working_day(day, weekend, holidays) {
            remaining -= 1;
        }
    }
    Ok(day)
}

/// Working days from `start` to `end` inclusive, negative when reversed
fn count_working_days(
    start: i64,
    end: i64,
    weekend: &WeekendMask,
    holidays: &AHashSet<i64>,
) -> i64 {
    let (from, to, sign) = if start <= end {
        (start, end, 1)
    } else {
        (end, start, -1)
    };

    let span = to - from + 1;
    let mut count = span / 7 * weekend.working_days_per_week();
    for day in (from + span / 7 * 7)..=to {
        if !weekend.is_weekend(serial::excel_weekday(day)) {
            count += 1;
        }
    }
    count -= holidays
        .iter()
        .filter(|h| (from..=to).contains(*h) && !weekend.is_weekend(serial::excel_weekday(**h)))
        .count() as i64;
    count * sign
}

fn workday(
    args: &[FunctionArgument],
    ctx: &ParsingContext,
    weekend: Option<usize>,
    holidays: usize,
) -> FnResult {
    let start = coerce::whole_day(coerce::required_serial(args, 0, ctx)?)?;
    let days = coerce::integer(&args[1], ctx)?;
    let weekend = match weekend {
        Some(index) => weekend_argument(args, index, ctx)?,
        None => WeekendMask::default(),
    };
    let holidays = holidays_argument(args, holidays, ctx)?;
    trace!(
        "shifting serial {} by {} working days ({} holidays)",
        start,
        days,
        holidays.len()
    );
    let day = shift_working_days(start, days, &weekend, &holidays)?;
    // Validates the result against the calendar range
    serial::serial_to_date(day)?;
    Ok(CompileResult::date(day as f64))
}

fn networkdays(
    args: &[FunctionArgument],
    ctx: &ParsingContext,
    weekend: Option<usize>,
    holidays: usize,
) -> FnResult {
    let start = coerce::whole_day(coerce::required_serial(args, 0, ctx)?)?;
    let end = coerce::whole_day(coerce::required_serial(args, 1, ctx)?)?;
    let weekend = match weekend {
        Some(index) => weekend_argument(args, index, ctx)?,
        None => WeekendMask::default(),
    };
    let holidays = holidays_argument(args, holidays, ctx)?;
    let count = count_working_days(start, end, &weekend, &holidays);
    Ok(CompileResult::number(count as f64))
}

/// WORKDAY(start_date, days, [holidays])
pub fn fn_workday(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    workday(args, ctx, None, 2)
}

/// WORKDAY.INTL(start_date, days, [weekend], [holidays])
pub fn fn_workday_intl(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    workday(args, ctx, Some(2), 3)
}

/// NETWORKDAYS(start_date, end_date, [holidays])
pub fn fn_networkdays(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    networkdays(args, ctx, None, 2)
}

/// NETWORKDAYS.INTL(start_date, end_date, [weekend], [holidays])
pub fn fn_networkdays_intl(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    networkdays(args, ctx, Some(2), 3)
}

/// Working-day function module
pub fn module() -> FunctionModule {
    let mut module = FunctionModule::new();

    // WORKDAY
    module.add(FunctionDef {
        name: "WORKDAY",
        min_args: 2,
        max_args: Some(3),
        implementation: fn_workday,
        volatile: false,
    });

    // WORKDAY.INTL
    module.add(FunctionDef {
        name: "WORKDAY.INTL",
        min_args: 2,
        max_args: Some(4),
        implementation: fn_workday_intl,
        volatile: false,
    });

    // NETWORKDAYS
    module.add(FunctionDef {
        name: "NETWORKDAYS",
        min_args: 2,
        max_args: Some(3),
        implementation: fn_networkdays,
        volatile: false,
    });

    // NETWORKDAYS.INTL
    module.add(FunctionDef {
        name: "NETWORKDAYS.INTL",
        min_args: 2,
        max_args: Some(4),
        implementation: fn_networkdays_intl,
        volatile: false,
    });

    module
}
