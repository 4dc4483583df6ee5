//! Error propagation through function arguments.
//!
//! Every error kind passed in a slot a function does not special-case must
//! come back unchanged.

use crate::{assert_error, execute};
use cellcalc_core::ErrorKind;
use cellcalc_formula::{DataType, FunctionArgument};

/// Functions and argument lists with the error placed in each slot
fn cases(error: ErrorKind) -> Vec<(&'static str, Vec<FunctionArgument>)> {
    let e = || FunctionArgument::from(error);
    let date = || FunctionArgument::from(42874.0);
    let n = |v: f64| FunctionArgument::from(v);
    vec![
        ("DAY", vec![e()]),
        ("MONTH", vec![e()]),
        ("YEAR", vec![e()]),
        ("HOUR", vec![e()]),
        ("MINUTE", vec![e()]),
        ("SECOND", vec![e()]),
        ("WEEKDAY", vec![e()]),
        ("WEEKDAY", vec![date(), e()]),
        ("WEEKNUM", vec![e()]),
        ("ISOWEEKNUM", vec![e()]),
        ("DATE", vec![e(), n(1.0), n(1.0)]),
        ("DATE", vec![n(2017.0), n(1.0), e()]),
        ("TIME", vec![n(1.0), e(), n(1.0)]),
        ("DATEVALUE", vec![e()]),
        ("TIMEVALUE", vec![e()]),
        ("EDATE", vec![e(), n(1.0)]),
        ("EDATE", vec![date(), e()]),
        ("EOMONTH", vec![e(), n(1.0)]),
        ("YEARFRAC", vec![date(), e()]),
        ("YEARFRAC", vec![date(), date(), e()]),
        ("DAYS", vec![e(), date()]),
        ("DAYS360", vec![date(), e()]),
        ("NETWORKDAYS", vec![e(), date()]),
        ("NETWORKDAYS", vec![date(), e()]),
        ("NETWORKDAYS", vec![date(), date(), FunctionArgument::range([e()])]),
        ("NETWORKDAYS.INTL", vec![date(), date(), e()]),
        ("WORKDAY", vec![e(), n(1.0)]),
        ("WORKDAY", vec![date(), e()]),
        ("WORKDAY.INTL", vec![date(), n(1.0), e()]),
        ("SUM", vec![n(1.0), e()]),
        ("AVERAGE", vec![FunctionArgument::range([n(1.0), e()])]),
        ("ROUND", vec![e(), n(1.0)]),
        ("ABS", vec![e()]),
        ("VALUE", vec![e()]),
        ("N", vec![e()]),
        ("NOT", vec![e()]),
        ("AND", vec![n(1.0), e()]),
        ("IF", vec![e(), n(1.0), n(2.0)]),
        ("CHOOSE", vec![e(), n(1.0)]),
        ("MATCH", vec![e(), FunctionArgument::range([n(1.0)])]),
    ]
}

#[test]
fn test_every_error_kind_passes_through() {
    for kind in ErrorKind::ALL {
        for (name, args) in cases(kind) {
            let result = execute(name, &args);
            assert_eq!(
                result.error_kind(),
                Some(kind),
                "{name} with {kind} returned {result:?}"
            );
            assert_eq!(result.data_type(), DataType::ExcelError);
        }
    }
}

#[test]
fn test_first_error_wins() {
    let args = [
        FunctionArgument::from(ErrorKind::Div0),
        FunctionArgument::from(ErrorKind::Na),
    ];
    assert_error(&execute("SUM", &args), ErrorKind::Div0);
    assert_error(&execute("DATE", &[args[1].clone(), args[0].clone(), 1.0.into()]), ErrorKind::Na);
}

#[test]
fn test_missing_required_dates_are_na() {
    let blank = FunctionArgument::blank;
    assert_error(&execute("EDATE", &[blank(), 1.0.into()]), ErrorKind::Na);
    assert_error(&execute("EOMONTH", &[blank(), 1.0.into()]), ErrorKind::Na);
    assert_error(&execute("WORKDAY", &[blank(), 1.0.into()]), ErrorKind::Na);
    assert_error(&execute("WORKDAY.INTL", &[blank(), 1.0.into()]), ErrorKind::Na);
    assert_error(&execute("NETWORKDAYS", &[blank(), 42874.0.into()]), ErrorKind::Na);
    assert_error(&execute("NETWORKDAYS.INTL", &[42874.0.into(), blank()]), ErrorKind::Na);
}

#[test]
fn test_argument_count_errors() {
    assert_error(&execute("DAY", &[]), ErrorKind::Value);
    assert_error(&execute("SUM", &[]), ErrorKind::Value);
    assert_error(&execute("ISOWEEKNUM", &[42874.0.into(), 1.0.into()]), ErrorKind::Na);
    assert_error(&execute("NOW", &[1.0.into()]), ErrorKind::Na);
}

#[test]
fn test_coercion_and_domain_errors() {
    assert_error(&execute("DAY", &["not a date".into()]), ErrorKind::Value);
    assert_error(&execute("DAY", &[(-1.0).into()]), ErrorKind::Num);
    assert_error(&execute("WEEKDAY", &[1.0.into(), 0.0.into()]), ErrorKind::Num);
    assert_error(&execute("YEARFRAC", &[1.0.into(), 2.0.into(), 9.0.into()]), ErrorKind::Num);
    assert_error(&execute("DATE", &[9999.0.into(), 13.0.into(), 1.0.into()]), ErrorKind::Num);
    assert_error(&execute("DATE", &[1900.0.into(), (-1.0).into(), 1.0.into()]), ErrorKind::Num);
    assert_error(&execute("MOD", &[1.0.into(), 0.0.into()]), ErrorKind::Div0);
}
