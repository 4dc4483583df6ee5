//! Aggregates over ranges with mixed content and cell flags.

use crate::{assert_error, call, eval};
use cellcalc_core::ErrorKind;
use cellcalc_formula::{CellFlags, Expr, FunctionArgument};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;

fn column(cells: Vec<FunctionArgument>) -> Expr {
    Expr::range(FunctionArgument::range(cells))
}

fn sheet() -> Expr {
    column(vec![
        10.0.into(),
        20.0.into(),
        FunctionArgument::from(30.0).hidden(),
        "text".into(),
        true.into(),
        FunctionArgument::blank(),
        FunctionArgument::from(60.0).with_flags(CellFlags::SUBTOTAL),
    ])
}

fn num(expr: Expr) -> Option<f64> {
    eval(&expr).as_number()
}

#[test]
fn test_sum_ignores_text_and_booleans_in_ranges() {
    assert_eq!(num(call("SUM", vec![sheet()])), Some(120.0));
    // Direct arguments are coerced
    assert_eq!(num(call("SUM", vec!["5".into(), true.into(), 1.0.into()])), Some(7.0));
    assert_error(&eval(&call("SUM", vec!["five".into()])), ErrorKind::Value);
}

#[test]
fn test_counts() {
    assert_eq!(num(call("COUNT", vec![sheet()])), Some(4.0));
    assert_eq!(num(call("COUNT", vec!["1".into(), "x".into(), true.into()])), Some(2.0));
    assert_eq!(num(call("COUNTA", vec![sheet()])), Some(6.0));
    assert_eq!(num(call("COUNTBLANK", vec![sheet()])), Some(1.0));
}

#[test]
fn test_averages() {
    let range = column(vec![2.0.into(), true.into(), "x".into(), 4.0.into()]);
    assert_eq!(num(call("AVERAGE", vec![range.clone()])), Some(3.0));
    assert_eq!(num(call("AVERAGEA", vec![range])), Some(1.75));
    assert_error(
        &eval(&call("AVERAGE", vec![column(vec!["a".into()])])),
        ErrorKind::Div0,
    );
}

#[test]
fn test_subtotal_skips_hidden_and_nested_subtotals() {
    assert_eq!(num(call("SUBTOTAL", vec![9.0.into(), sheet()])), Some(60.0));
    assert_eq!(num(call("SUBTOTAL", vec![109.0.into(), sheet()])), Some(30.0));
    assert_eq!(num(call("SUBTOTAL", vec![2.0.into(), sheet()])), Some(3.0));
    assert_eq!(num(call("SUBTOTAL", vec![102.0.into(), sheet()])), Some(2.0));
    assert_eq!(num(call("SUBTOTAL", vec![104.0.into(), sheet()])), Some(20.0));
    assert_error(
        &eval(&call("SUBTOTAL", vec![12.0.into(), sheet()])),
        ErrorKind::Value,
    );
}

#[test]
fn test_dates_in_ranges_are_serials() {
    let d = |m, day| FunctionArgument::from(NaiveDate::from_ymd_opt(2017, m, day).unwrap());
    let dates = column(vec![d(5, 19), d(5, 21)]);
    assert_eq!(num(call("MIN", vec![dates.clone()])), Some(42874.0));
    assert_eq!(num(call("MAX", vec![dates.clone()])), Some(42876.0));
    assert_eq!(num(call("AVERAGE", vec![dates])), Some(42875.0));
}

#[test]
fn test_errors_in_ranges_propagate() {
    let range = column(vec![1.0.into(), ErrorKind::Ref.into(), ErrorKind::Na.into()]);
    assert_error(&eval(&call("SUM", vec![range.clone()])), ErrorKind::Ref);
    assert_error(&eval(&call("MAX", vec![range.clone()])), ErrorKind::Ref);
    // COUNT never fails on errors
    assert_eq!(num(call("COUNT", vec![range])), Some(1.0));
}
