//! Date and time functions through the evaluator.

use crate::{assert_error, call, eval, round_to};
use cellcalc_core::ErrorKind;
use cellcalc_formula::{evaluate, DataType, Expr, ParsingContext};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;

fn date(y: f64, m: f64, d: f64) -> Expr {
    call("DATE", vec![y.into(), m.into(), d.into()])
}

fn num(expr: Expr) -> Option<f64> {
    eval(&expr).as_number()
}

fn one(name: &str, arg: Expr) -> Option<f64> {
    num(call(name, vec![arg]))
}

#[test]
fn test_date_components() {
    let d = date(2017.0, 5.0, 19.0);
    assert_eq!(num(d.clone()), Some(42874.0));
    assert_eq!(one("YEAR", d.clone()), Some(2017.0));
    assert_eq!(one("MONTH", d.clone()), Some(5.0));
    assert_eq!(one("DAY", d), Some(19.0));
}

#[test]
fn test_date_rolls_over_and_offsets_years() {
    assert_eq!(num(date(2017.0, 13.0, 1.0)), Some(43101.0));
    assert_eq!(num(date(2017.0, 1.0, 0.0)), Some(43100.0));
    assert_eq!(num(date(117.0, 5.0, 19.0)), Some(42874.0));
    assert_eq!(num(date(1900.0, 2.0, 28.0)), Some(59.0));
    assert_eq!(num(date(1900.0, 3.0, 1.0)), Some(61.0));
}

#[test]
fn test_zero_date_and_leap_day() {
    assert_eq!(one("YEAR", 0.0.into()), Some(1900.0));
    assert_eq!(one("MONTH", 0.0.into()), Some(1.0));
    assert_eq!(one("DAY", 0.0.into()), Some(0.0));
    assert_eq!(one("MONTH", 60.0.into()), Some(2.0));
    assert_eq!(one("DAY", 60.0.into()), Some(29.0));
    assert_eq!(one("DAY", 61.0.into()), Some(1.0));
}

#[test]
fn test_month_arithmetic() {
    let may19 = date(2017.0, 5.0, 19.0);
    assert_eq!(num(call("EOMONTH", vec![may19.clone(), 0.0.into()])), Some(42886.0));
    assert_eq!(num(call("EOMONTH", vec![may19, (-3.0).into()])), Some(42794.0));

    let jan31 = date(2016.0, 1.0, 31.0);
    let result = eval(&call("EDATE", vec![jan31, 1.0.into()]));
    assert_eq!(result.data_type(), DataType::Date);
    assert_eq!(result.as_number(), Some(42429.0));
}

#[test]
fn test_weekday_and_week_numbers() {
    let friday = || date(2017.0, 5.0, 19.0);
    assert_eq!(one("WEEKDAY", friday()), Some(6.0));
    assert_eq!(num(call("WEEKDAY", vec![friday(), 2.0.into()])), Some(5.0));
    assert_eq!(num(call("WEEKDAY", vec![friday(), 3.0.into()])), Some(4.0));
    assert_eq!(num(call("WEEKDAY", vec![friday(), 15.0.into()])), Some(1.0));

    let jan2 = || date(2017.0, 1.0, 2.0);
    assert_eq!(one("WEEKNUM", jan2()), Some(1.0));
    assert_eq!(num(call("WEEKNUM", vec![jan2(), 2.0.into()])), Some(2.0));
    assert_eq!(one("ISOWEEKNUM", date(2017.0, 1.0, 1.0)), Some(52.0));
    assert_eq!(
        num(call("WEEKNUM", vec![date(2017.0, 1.0, 1.0), 21.0.into()])),
        Some(52.0)
    );
}

#[test]
fn test_times() {
    let time = |h: f64, m: f64, s: f64| call("TIME", vec![h.into(), m.into(), s.into()]);
    assert_eq!(num(time(18.0, 0.0, 0.0)), Some(0.75));
    assert_eq!(num(time(25.0, 0.0, 0.0)).map(|t| round_to(t, 9)), Some(round_to(1.0 / 24.0, 9)));
    assert_error(&eval(&time(-1.0, 0.0, 0.0)), ErrorKind::Num);

    let t = || time(10.0, 30.0, 15.0);
    assert_eq!(one("HOUR", t()), Some(10.0));
    assert_eq!(one("MINUTE", t()), Some(30.0));
    assert_eq!(one("SECOND", t()), Some(15.0));
}

#[test]
fn test_text_conversions() {
    assert_eq!(one("DATEVALUE", "5/19/2017 18:00".into()), Some(42874.0));
    assert_eq!(one("DATEVALUE", "2/29/1900".into()), Some(61.0));
    assert_eq!(one("TIMEVALUE", "5/19/2017 18:00".into()), Some(0.75));
    assert_eq!(one("TIMEVALUE", "5/19/2017".into()), Some(0.0));
    assert_error(&eval(&call("DATEVALUE", vec![42874.0.into()])), ErrorKind::Value);
    assert_error(&eval(&call("TIMEVALUE", vec!["noon".into()])), ErrorKind::Value);
    assert_eq!(one("DAY", "May 19, 2017".into()), Some(19.0));
}

#[test]
fn test_day_counts() {
    let start = || date(2017.0, 1.0, 1.0);
    let end = || date(2017.0, 5.0, 23.0);
    assert_eq!(num(call("DAYS", vec![end(), start()])), Some(142.0));
    assert_eq!(num(call("DAYS", vec![start(), end()])), Some(-142.0));

    let yearfrac = |basis: f64| {
        num(call("YEARFRAC", vec![start(), end(), basis.into()])).map(|v| round_to(v, 6))
    };
    assert_eq!(yearfrac(0.0), Some(0.394444));
    assert_eq!(yearfrac(1.0), Some(0.389041));
    assert_eq!(yearfrac(2.0), Some(0.394444));
    assert_eq!(yearfrac(3.0), Some(0.389041));
    assert_eq!(yearfrac(4.0), Some(0.394444));
    assert_eq!(
        num(call("YEARFRAC", vec![end(), start()])),
        num(call("YEARFRAC", vec![start(), end()]))
    );

    let jan15 = || date(2017.0, 1.0, 15.0);
    let mar31 = || date(2017.0, 3.0, 31.0);
    assert_eq!(num(call("DAYS360", vec![jan15(), mar31()])), Some(76.0));
    assert_eq!(
        num(call("DAYS360", vec![jan15(), mar31(), true.into()])),
        Some(75.0)
    );
}

#[test]
fn test_now_and_today_use_context_clock() {
    let now = NaiveDate::from_ymd_opt(2017, 5, 19)
        .and_then(|d| d.and_hms_opt(18, 0, 0))
        .expect("valid timestamp");
    let ctx = ParsingContext::simple().with_fixed_now(now);
    assert_eq!(evaluate(&call("NOW", vec![]), &ctx).as_number(), Some(42874.75));
    assert_eq!(evaluate(&call("TODAY", vec![]), &ctx).as_number(), Some(42874.0));
    assert_eq!(
        evaluate(&call("HOUR", vec![call("NOW", vec![])]), &ctx).as_number(),
        Some(18.0)
    );
}
