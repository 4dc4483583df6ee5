//! End-to-end evaluation of expression trees.

use crate::{call, eval, round_to};
use cellcalc_core::{ErrorKind, ScalarValue};
use cellcalc_formula::{
    CompileResult, DataType, Evaluator, Expr, Function, FunctionArgument, FunctionDef,
    FunctionModule, ParsingContext, Repository,
};

fn date(y: f64, m: f64, d: f64) -> Expr {
    call("DATE", vec![y.into(), m.into(), d.into()])
}

#[test]
fn test_date_leap_bug() {
    let result = eval(&date(1900.0, 2.0, 29.0));
    assert_eq!(result.data_type(), DataType::Date);
    assert_eq!(result.as_number(), Some(61.0));
    assert_eq!(eval(&date(1900.0, 3.0, 1.0)).as_number(), Some(61.0));
}

#[test]
fn test_weekday_of_zero_date() {
    let result = eval(&call("WEEKDAY", vec![0.0.into()]));
    assert_eq!(result.as_number(), Some(7.0));
}

#[test]
fn test_edate_from_text() {
    let result = eval(&call("EDATE", vec!["4/14/1900".into(), 3.0.into()]));
    assert_eq!(result.data_type(), DataType::Date);
    assert_eq!(result.as_number(), Some(196.0));
}

#[test]
fn test_yearfrac_default_basis() {
    let expr = call(
        "YEARFRAC",
        vec![date(2017.0, 1.0, 1.0), date(2017.0, 5.0, 23.0)],
    );
    let result = eval(&expr).as_number().expect("YEARFRAC should be numeric");
    assert_eq!(round_to(result, 11), 0.39444444444);
}

#[test]
fn test_xlfn_prefixed_calls() {
    let expr = call("_xlfn.ISOWEEKNUM", vec![date(2017.0, 5.0, 19.0)]);
    assert_eq!(eval(&expr).as_number(), Some(20.0));
    let expr = call("_xlfn.days", vec![date(2017.0, 5.0, 19.0), date(2017.0, 1.0, 1.0)]);
    assert_eq!(eval(&expr).as_number(), Some(138.0));
}

#[test]
fn test_unknown_function_is_name_error() {
    let result = eval(&call("NOT.A.FUNCTION", vec![1.0.into()]));
    assert_eq!(result.error_kind(), Some(ErrorKind::Name));
}

#[test]
fn test_nested_date_parts() {
    let expr = call("YEAR", vec![call("EOMONTH", vec![date(2016.0, 12.0, 15.0), 2.0.into()])]);
    assert_eq!(eval(&expr).as_number(), Some(2017.0));
    let expr = call("DAY", vec![call("EOMONTH", vec![date(2016.0, 1.0, 15.0), 1.0.into()])]);
    assert_eq!(eval(&expr).as_number(), Some(29.0));
}

#[test]
fn test_ranges_flow_into_functions() {
    let range = FunctionArgument::rows([[1.0, 2.0], [3.0, 4.0]]);
    let expr = call(
        "INDEX",
        vec![Expr::range(range.clone()), 2.0.into(), 1.0.into()],
    );
    assert_eq!(eval(&expr).as_number(), Some(3.0));
    let expr = call("SUM", vec![Expr::range(range), 10.0.into()]);
    assert_eq!(eval(&expr).as_number(), Some(20.0));
}

#[test]
fn test_if_and_iferror_are_lazy() {
    let failing = call("NOT.A.FUNCTION", vec![]);
    let expr = call("IF", vec![false.into(), failing.clone(), "no".into()]);
    assert_eq!(eval(&expr).as_text(), Some("no"));

    let expr = call("IFERROR", vec![call("SQRT", vec![(-1.0).into()]), 0.0.into()]);
    assert_eq!(eval(&expr).as_number(), Some(0.0));

    let expr = call("IFERROR", vec![1.0.into(), failing]);
    assert_eq!(eval(&expr).as_number(), Some(1.0));
}

fn fn_twice(args: &[FunctionArgument], ctx: &ParsingContext) -> Result<CompileResult, ErrorKind> {
    let n = cellcalc_formula::functions::coerce::number(&args[0], ctx)?;
    Ok(CompileResult::number(n * 2.0))
}

#[test]
fn test_custom_module_in_private_repository() {
    let mut module = FunctionModule::new();
    module.add(FunctionDef {
        name: "TWICE",
        min_args: 1,
        max_args: Some(1),
        implementation: fn_twice,
        volatile: false,
    });

    let mut repository = Repository::create();
    repository.load_module(&module);
    repository.load_module(&module);

    let ctx = ParsingContext::simple();
    let evaluator = Evaluator::new(&repository, &ctx);
    let expr = call("twice", vec![call("DAY", vec![date(2017.0, 5.0, 19.0)])]);
    assert_eq!(evaluator.evaluate(&expr).as_number(), Some(38.0));

    // The global repository is untouched
    assert!(Repository::global().get_function("TWICE").is_none());
    assert_eq!(
        repository.require("TWICE").map(|f| f.name().to_string()).ok(),
        Some("TWICE".to_string())
    );
}

#[test]
fn test_blank_values_evaluate_to_empty() {
    let result = eval(&Expr::value(ScalarValue::Blank));
    assert_eq!(result.data_type(), DataType::Empty);
    let expr = call("IF", vec![true.into(), Expr::value(ScalarValue::Blank)]);
    assert_eq!(eval(&expr).as_number(), Some(0.0));
}
