//! Date and time functions
//!
//! All calendar arithmetic goes through the serial codec, so the 1900 leap
//! day and the zero date behave the way spreadsheets expect:
//! `YEAR(0)` is 1900, `DAY(0)` is 0, `DAY(60)` is 29 and `WEEKDAY(0)` is 7.

use cellcalc_core::serial::{self, SerialDateTime};
use cellcalc_core::{ErrorKind, ScalarValue};
use chrono::{Datelike, Months, NaiveDate, Weekday};
use log::trace;

use super::coerce;
use super::{FnResult, FunctionDef, FunctionModule};
use crate::argument::FunctionArgument;
use crate::context::ParsingContext;
use crate::parse::{self, TimeStringParser};
use crate::result::CompileResult;

/// Largest component TIME accepts
const MAX_TIME_COMPONENT: f64 = 32_767.0;

fn decode(arg: &FunctionArgument, ctx: &ParsingContext) -> Result<SerialDateTime, ErrorKind> {
    serial::from_serial(coerce::serial(arg, ctx)?)
}

fn whole_serial(arg: &FunctionArgument, ctx: &ParsingContext) -> Result<i64, ErrorKind> {
    coerce::whole_day(coerce::serial(arg, ctx)?)
}

fn optional_integer(
    args: &[FunctionArgument],
    index: usize,
    default: i64,
    ctx: &ParsingContext,
) -> Result<i64, ErrorKind> {
    match coerce::optional(args, index) {
        Some(arg) => coerce::integer(arg, ctx),
        None => Ok(default),
    }
}

fn date_result(date: NaiveDate) -> FnResult {
    Ok(CompileResult::date(serial::date_to_serial(date)? as f64))
}

/// DATE(year, month, day)
pub fn fn_date(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    let year = coerce::number(&args[0], ctx)?;
    let month = coerce::number(&args[1], ctx)?;
    let day = coerce::number(&args[2], ctx)?;
    Ok(CompileResult::date(serial::to_serial(year, month, day)?))
}

/// TIME(hour, minute, second) - Wraps past midnight; negative totals are #NUM!
pub fn fn_time(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    let mut parts = [0.0; 3];
    for (part, arg) in parts.iter_mut().zip(args) {
        *part = coerce::number(arg, ctx)?.trunc();
        if *part > MAX_TIME_COMPONENT {
            return Err(ErrorKind::Num);
        }
    }
    let [hour, minute, second] = parts;
    let total = hour * 3600.0 + minute * 60.0 + second;
    if total < 0.0 {
        return Err(ErrorKind::Num);
    }
    let seconds = total % f64::from(serial::SECONDS_PER_DAY);
    Ok(CompileResult::date(seconds / f64::from(serial::SECONDS_PER_DAY)))
}

/// YEAR(serial_number)
pub fn fn_year(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    let (year, _, _) = decode(&args[0], ctx)?.excel_ymd();
    Ok(CompileResult::number(f64::from(year)))
}

/// MONTH(serial_number)
pub fn fn_month(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    let (_, month, _) = decode(&args[0], ctx)?.excel_ymd();
    Ok(CompileResult::number(f64::from(month)))
}

/// DAY(serial_number)
pub fn fn_day(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    let (_, _, day) = decode(&args[0], ctx)?.excel_ymd();
    Ok(CompileResult::number(f64::from(day)))
}

/// HOUR(serial_number)
pub fn fn_hour(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    Ok(CompileResult::number(f64::from(decode(&args[0], ctx)?.hour())))
}

/// MINUTE(serial_number)
pub fn fn_minute(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    Ok(CompileResult::number(f64::from(decode(&args[0], ctx)?.minute())))
}

/// SECOND(serial_number)
pub fn fn_second(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    Ok(CompileResult::number(f64::from(decode(&args[0], ctx)?.second())))
}

/// DATEVALUE(date_text) - Serial day of a date string; any time is dropped
pub fn fn_datevalue(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    match coerce::scalar(&args[0])? {
        ScalarValue::Error(e) => Err(*e),
        ScalarValue::Date(d) => date_result(d.date()),
        ScalarValue::Text(s) => {
            let parsed = parse::parse_date_time(s, ctx.culture()).ok_or(ErrorKind::Value)?;
            date_result(parsed.date())
        }
        _ => Err(ErrorKind::Value),
    }
}

/// TIMEVALUE(time_text) - Fraction of a day; a bare date is midnight
pub fn fn_timevalue(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    let text = match coerce::scalar(&args[0])? {
        ScalarValue::Error(e) => return Err(*e),
        ScalarValue::Text(s) => s,
        _ => return Err(ErrorKind::Value),
    };
    match TimeStringParser::new(*ctx.culture()).parse(text) {
        Ok(fraction) => Ok(CompileResult::date(fraction)),
        Err(err) => {
            if parse::parse_date(text, ctx.culture()).is_some() {
                return Ok(CompileResult::date(0.0));
            }
            trace!("TIMEVALUE: {}", err);
            Err(ErrorKind::Value)
        }
    }
}

fn add_months(date: NaiveDate, months: i64) -> Result<NaiveDate, ErrorKind> {
    let count = u32::try_from(months.unsigned_abs()).map_err(|_| ErrorKind::Num)?;
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(count))
    } else {
        date.checked_sub_months(Months::new(count))
    };
    shifted.ok_or(ErrorKind::Num)
}

/// EDATE(start_date, months) - Same day, months later, clamped to month end
pub fn fn_edate(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    let start = coerce::whole_day(coerce::required_serial(args, 0, ctx)?)?;
    let months = coerce::integer(&args[1], ctx)?;
    let date = serial::serial_to_date(start)?;
    date_result(add_months(date, months)?)
}

/// EOMONTH(start_date, months) - Last day of the month, months later
pub fn fn_eomonth(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    let start = coerce::whole_day(coerce::required_serial(args, 0, ctx)?)?;
    let months = coerce::integer(&args[1], ctx)?;
    let date = serial::serial_to_date(start)?;
    let first = date.with_day(1).ok_or(ErrorKind::Num)?;
    let next_month = add_months(first, months + 1)?;
    date_result(next_month.pred_opt().ok_or(ErrorKind::Num)?)
}

/// Day number for a WEEKDAY return type
fn weekday_number(day: Weekday, return_type: i64) -> Result<u32, ErrorKind> {
    let from_monday = day.num_days_from_monday();
    Ok(match return_type {
        1 => day.num_days_from_sunday() + 1,
        2 => from_monday + 1,
        3 => from_monday,
        11..=17 => (from_monday + 7 - (return_type - 11) as u32) % 7 + 1,
        _ => return Err(ErrorKind::Num),
    })
}

/// WEEKDAY(serial_number, [return_type])
///
/// Return type 1 (default) numbers Sunday..Saturday 1..7, 2 Monday..Sunday
/// 1..7, 3 Monday..Sunday 0..6, and 11-17 start the week on Monday..Sunday.
pub fn fn_weekday(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    let day = whole_serial(&args[0], ctx)?;
    let return_type = optional_integer(args, 1, 1, ctx)?;
    let number = weekday_number(serial::excel_weekday(day), return_type)?;
    Ok(CompileResult::number(f64::from(number)))
}

/// ISO 8601 week of a serial day
///
/// Counted on serial weekdays, so the days before 1900-03-01 agree with
/// WEEKDAY: serial 1 is a Sunday and falls in week 52 of 1899.
fn iso_week(day: i64) -> Result<u32, ErrorKind> {
    let from_monday = i64::from(serial::excel_weekday(day).num_days_from_monday());
    let thursday = day - from_monday + 3;
    let jan1 = if thursday < 1 {
        // 1899-01-01, counted back from serial 1 (1900-01-01)
        1 - 365
    } else {
        let (year, _, _) = serial::from_serial(thursday as f64)?.excel_ymd();
        serial::to_serial(f64::from(year), 1.0, 1.0)? as i64
    };
    Ok(((thursday - jan1).div_euclid(7) + 1) as u32)
}

/// WEEKNUM(serial_number, [return_type])
///
/// Week 1 contains January 1st. Return types pick the first day of the week
/// (1 and 17 Sunday, 2 and 11 Monday, 12-16 Tuesday..Saturday); 21 is the
/// ISO 8601 week.
pub fn fn_weeknum(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    let day = whole_serial(&args[0], ctx)?;
    let return_type = optional_integer(args, 1, 1, ctx)?;
    let week_start = match return_type {
        21 => return Ok(CompileResult::number(f64::from(iso_week(day)?))),
        1 | 17 => 6,
        2 | 11 => 0,
        12..=16 => return_type - 11,
        _ => return Err(ErrorKind::Num),
    };

    let (year, _, _) = serial::from_serial(day as f64)?.excel_ymd();
    let jan1 = serial::to_serial(f64::from(year), 1.0, 1.0)? as i64;
    let jan1_weekday = i64::from(serial::excel_weekday(jan1).num_days_from_monday());
    let offset = (jan1_weekday - week_start).rem_euclid(7);
    let week = (day - jan1 + offset).div_euclid(7) + 1;
    Ok(CompileResult::number(week as f64))
}

/// ISOWEEKNUM(date)
pub fn fn_isoweeknum(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    let day = whole_serial(&args[0], ctx)?;
    Ok(CompileResult::number(f64::from(iso_week(day)?)))
}

fn is_last_day_of_month(d: NaiveDate) -> bool {
    d.succ_opt().map_or(true, |next| next.month() != d.month())
}

fn is_last_day_of_february(d: NaiveDate) -> bool {
    d.month() == 2 && is_last_day_of_month(d)
}

fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

fn days_360(sy: i32, sm: u32, sd: u32, ey: i32, em: u32, ed: u32) -> i64 {
    360 * i64::from(ey - sy) + 30 * (i64::from(em) - i64::from(sm)) + (i64::from(ed) - i64::from(sd))
}

/// Days between two dates on a 30/360 calendar, as DAYS360 counts them
fn days_360_between(start: NaiveDate, end: NaiveDate, european: bool) -> i64 {
    let (sy, sm, mut sd) = (start.year(), start.month(), start.day());
    let (mut ey, mut em, mut ed) = (end.year(), end.month(), end.day());

    if european {
        sd = sd.min(30);
        ed = ed.min(30);
    } else {
        if is_last_day_of_month(start) {
            sd = 30;
        }
        if is_last_day_of_month(end) {
            if sd < 30 {
                (ey, em) = next_month(ey, em);
                ed = 1;
            } else {
                ed = 30;
            }
        }
    }
    days_360(sy, sm, sd, ey, em, ed)
}

/// US (NASD) 30/360 day count used by YEARFRAC basis 0
fn us_days_360(start: NaiveDate, end: NaiveDate) -> i64 {
    let (mut sd, mut ed) = (start.day(), end.day());
    if sd == 31 && ed == 31 {
        sd = 30;
        ed = 30;
    } else if sd == 31 {
        sd = 30;
    } else if sd == 30 && ed == 31 {
        ed = 30;
    } else if is_last_day_of_february(start) && is_last_day_of_february(end) {
        sd = 30;
        ed = 30;
    } else if is_last_day_of_february(start) {
        sd = 30;
    }
    days_360(start.year(), start.month(), sd, end.year(), end.month(), ed)
}

fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

fn days_in_year(year: i32) -> f64 {
    if is_leap_year(year) {
        366.0
    } else {
        365.0
    }
}

fn within_one_year(start: NaiveDate, end: NaiveDate) -> bool {
    start.year() == end.year()
        || (end.year() == start.year() + 1
            && (start.month(), start.day()) >= (end.month(), end.day()))
}

fn spans_leap_day(start: NaiveDate, end: NaiveDate) -> bool {
    [start.year(), end.year()]
        .into_iter()
        .filter_map(|y| NaiveDate::from_ymd_opt(y, 2, 29))
        .any(|leap_day| start <= leap_day && leap_day <= end)
}

/// Actual/actual year length for YEARFRAC basis 1
fn actual_year_length(start: NaiveDate, end: NaiveDate) -> f64 {
    if within_one_year(start, end) {
        if (start.year() == end.year() && is_leap_year(start.year())) || spans_leap_day(start, end)
        {
            366.0
        } else {
            365.0
        }
    } else {
        let years = start.year()..=end.year();
        let count = years.clone().count() as f64;
        years.map(days_in_year).sum::<f64>() / count
    }
}

/// YEARFRAC(start_date, end_date, [basis])
///
/// Basis 0 is US 30/360, 1 actual/actual, 2 actual/360, 3 actual/365 and
/// 4 European 30/360. The dates may come in either order.
pub fn fn_yearfrac(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    let mut start = whole_serial(&args[0], ctx)?;
    let mut end = whole_serial(&args[1], ctx)?;
    let basis = optional_integer(args, 2, 0, ctx)?;
    if !(0..=4).contains(&basis) {
        return Err(ErrorKind::Num);
    }
    if start > end {
        std::mem::swap(&mut start, &mut end);
    }

    let (s, e) = (serial::serial_to_date(start)?, serial::serial_to_date(end)?);
    let actual_days = (end - start) as f64;
    let fraction = match basis {
        0 => us_days_360(s, e) as f64 / 360.0,
        1 => actual_days / actual_year_length(s, e),
        2 => actual_days / 360.0,
        3 => actual_days / 365.0,
        _ => days_360_between(s, e, true) as f64 / 360.0,
    };
    Ok(CompileResult::number(fraction))
}

/// DAYS(end_date, start_date)
pub fn fn_days(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    let end = whole_serial(&args[0], ctx)?;
    let start = whole_serial(&args[1], ctx)?;
    Ok(CompileResult::number((end - start) as f64))
}

/// DAYS360(start_date, end_date, [method]) - TRUE selects the European method
pub fn fn_days360(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    let start = serial::serial_to_date(whole_serial(&args[0], ctx)?)?;
    let end = serial::serial_to_date(whole_serial(&args[1], ctx)?)?;
    let european = match coerce::optional(args, 2) {
        Some(arg) => coerce::boolean(arg, ctx)?,
        None => false,
    };
    Ok(CompileResult::number(days_360_between(start, end, european) as f64))
}

/// NOW() - Current date and time
pub fn fn_now(_args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    Ok(CompileResult::date(serial::datetime_to_serial(ctx.now())?))
}

/// TODAY() - Current date
pub fn fn_today(_args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    date_result(ctx.now().date())
}

/// Date function module
pub fn module() -> FunctionModule {
    let mut module = FunctionModule::new();

    // DATE
    module.add(FunctionDef {
        name: "DATE",
        min_args: 3,
        max_args: Some(3),
        implementation: fn_date,
        volatile: false,
    });

    // TIME
    module.add(FunctionDef {
        name: "TIME",
        min_args: 3,
        max_args: Some(3),
        implementation: fn_time,
        volatile: false,
    });

    // YEAR, MONTH, DAY, HOUR, MINUTE, SECOND
    let parts: [(&'static str, super::FunctionImpl); 6] = [
        ("YEAR", fn_year),
        ("MONTH", fn_month),
        ("DAY", fn_day),
        ("HOUR", fn_hour),
        ("MINUTE", fn_minute),
        ("SECOND", fn_second),
    ];
    for (name, implementation) in parts {
        module.add(FunctionDef {
            name,
            min_args: 1,
            max_args: Some(1),
            implementation,
            volatile: false,
        });
    }

    // DATEVALUE
    module.add(FunctionDef {
        name: "DATEVALUE",
        min_args: 1,
        max_args: Some(1),
        implementation: fn_datevalue,
        volatile: false,
    });

    // TIMEVALUE
    module.add(FunctionDef {
        name: "TIMEVALUE",
        min_args: 1,
        max_args: Some(1),
        implementation: fn_timevalue,
        volatile: false,
    });

    // EDATE
    module.add(FunctionDef {
        name: "EDATE",
        min_args: 2,
        max_args: Some(2),
        implementation: fn_edate,
        volatile: false,
    });

    // EOMONTH
    module.add(FunctionDef {
        name: "EOMONTH",
        min_args: 2,
        max_args: Some(2),
        implementation: fn_eomonth,
        volatile: false,
    });

    // WEEKDAY
    module.add(FunctionDef {
        name: "WEEKDAY",
        min_args: 1,
        max_args: Some(2),
        implementation: fn_weekday,
        volatile: false,
    });

    // WEEKNUM
    module.add(FunctionDef {
        name: "WEEKNUM",
        min_args: 1,
        max_args: Some(2),
        implementation: fn_weeknum,
        volatile: false,
    });

    // ISOWEEKNUM
    module.add(FunctionDef {
        name: "ISOWEEKNUM",
        min_args: 1,
        max_args: Some(1),
        implementation: fn_isoweeknum,
        volatile: false,
    });

    // YEARFRAC
    module.add(FunctionDef {
        name: "YEARFRAC",
        min_args: 2,
        max_args: Some(3),
        implementation: fn_yearfrac,
        volatile: false,
    });

    // DAYS
    module.add(FunctionDef {
        name: "DAYS",
        min_args: 2,
        max_args: Some(2),
        implementation: fn_days,
        volatile: false,
    });

    // DAYS360
    module.add(FunctionDef {
        name: "DAYS360",
        min_args: 2,
        max_args: Some(3),
        implementation: fn_days360,
        volatile: false,
    });

    // NOW
    module.add(FunctionDef {
        name: "NOW",
        min_args: 0,
        max_args: Some(0),
        implementation: fn_now,
        volatile: true,
    });

    // TODAY
    module.add(FunctionDef {
        name: "TODAY",
        min_args: 0,
        max_args: Some(0),
        implementation: fn_today,
        volatile: true,
    });

    module
}
