//! Working-day arithmetic with weekends and holidays.

use crate::{assert_error, call, eval};
use cellcalc_core::ErrorKind;
use cellcalc_formula::{Expr, FunctionArgument};
use pretty_assertions::assert_eq;

const FRI_MAY_19: f64 = 42874.0;
const MON_MAY_1: f64 = 42856.0;
const WED_MAY_31: f64 = 42886.0;
const MON_MAY_22: f64 = 42877.0;
const MON_MAY_29: f64 = 42884.0;
const SAT_MAY_27: f64 = 42882.0;

fn holidays(days: &[f64]) -> Expr {
    Expr::range(FunctionArgument::range(days.iter().copied()))
}

fn num(name: &str, args: Vec<Expr>) -> Option<f64> {
    eval(&call(name, args)).as_number()
}

#[test]
fn test_workday_skips_weekends() {
    assert_eq!(num("WORKDAY", vec![FRI_MAY_19.into(), 1.0.into()]), Some(MON_MAY_22));
    assert_eq!(num("WORKDAY", vec![FRI_MAY_19.into(), (-1.0).into()]), Some(FRI_MAY_19 - 1.0));
    assert_eq!(num("WORKDAY", vec![FRI_MAY_19.into(), 5.0.into()]), Some(FRI_MAY_19 + 7.0));
    assert_eq!(num("WORKDAY", vec![FRI_MAY_19.into(), 0.0.into()]), Some(FRI_MAY_19));
}

#[test]
fn test_workday_skips_holidays() {
    let args = vec![FRI_MAY_19.into(), 1.0.into(), holidays(&[MON_MAY_22])];
    assert_eq!(num("WORKDAY", args), Some(MON_MAY_22 + 1.0));

    let text_holiday = Expr::range(FunctionArgument::range(["5/22/2017"]));
    let args = vec!["5/19/2017".into(), 1.0.into(), text_holiday];
    assert_eq!(num("WORKDAY", args), Some(MON_MAY_22 + 1.0));
}

#[test]
fn test_workday_intl_weekends() {
    // Friday and Saturday off
    let args = vec![FRI_MAY_19.into(), 1.0.into(), 7.0.into()];
    assert_eq!(num("WORKDAY.INTL", args), Some(FRI_MAY_19 + 2.0));
    // Sunday only
    let args = vec![FRI_MAY_19.into(), 1.0.into(), "0000001".into()];
    assert_eq!(num("WORKDAY.INTL", args), Some(FRI_MAY_19 + 1.0));
    assert_error(
        &eval(&call("WORKDAY.INTL", vec![FRI_MAY_19.into(), 1.0.into(), 8.0.into()])),
        ErrorKind::Num,
    );
}

#[test]
fn test_networkdays_in_may_2017() {
    let may = || vec![Expr::from(MON_MAY_1), Expr::from(WED_MAY_31)];
    assert_eq!(num("NETWORKDAYS", may()), Some(23.0));

    let mut with_holidays = may();
    with_holidays.push(holidays(&[MON_MAY_29, SAT_MAY_27]));
    assert_eq!(num("NETWORKDAYS", with_holidays), Some(22.0));

    let reversed = vec![Expr::from(WED_MAY_31), Expr::from(MON_MAY_1)];
    assert_eq!(num("NETWORKDAYS", reversed), Some(-23.0));

    let text = vec!["5/1/2017".into(), "5/31/2017".into()];
    assert_eq!(num("NETWORKDAYS", text), Some(23.0));
}

#[test]
fn test_networkdays_intl_weekends() {
    let may = |weekend: Expr| vec![Expr::from(MON_MAY_1), Expr::from(WED_MAY_31), weekend];
    assert_eq!(num("NETWORKDAYS.INTL", may(11.0.into())), Some(27.0));
    assert_eq!(num("NETWORKDAYS.INTL", may("0000011".into())), Some(23.0));
    assert_eq!(num("NETWORKDAYS.INTL", may("0000000".into())), Some(31.0));
    assert_error(&eval(&call("NETWORKDAYS.INTL", may("1111111".into()))), ErrorKind::Value);
    assert_error(&eval(&call("NETWORKDAYS.INTL", may("000001".into()))), ErrorKind::Value);
    assert_error(&eval(&call("NETWORKDAYS.INTL", may(0.0.into()))), ErrorKind::Num);
}

#[test]
fn test_networkdays_agrees_with_workday() {
    for days in [1.0, 5.0, 17.0, 60.0] {
        let end = num("WORKDAY", vec![MON_MAY_1.into(), days.into()])
            .expect("WORKDAY should be numeric");
        let count = num("NETWORKDAYS", vec![MON_MAY_1.into(), end.into()]);
        assert_eq!(count, Some(days + 1.0), "{days} working days");
    }
}
