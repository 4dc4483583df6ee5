//! Culture-dependent parsing seen through the functions.

use crate::{assert_error, call, execute_with};
use cellcalc_core::{Culture, ErrorKind};
use cellcalc_formula::{evaluate, EngineSettings, Expr, ParsingContext};
use pretty_assertions::assert_eq;

fn ctx(culture: Culture) -> ParsingContext {
    ParsingContext::new(culture)
}

fn datevalue(text: &str, culture: Culture) -> Option<f64> {
    execute_with("DATEVALUE", &[text.into()], &ctx(culture)).as_number()
}

#[test]
fn test_same_date_in_each_culture() {
    assert_eq!(datevalue("5/19/2017", Culture::EN_US), Some(42874.0));
    assert_eq!(datevalue("19/05/2017", Culture::EN_GB), Some(42874.0));
    assert_eq!(datevalue("19.05.2017", Culture::DE_DE), Some(42874.0));
    assert_eq!(datevalue("19.05.2017", Culture::RU_RU), Some(42874.0));
    assert_eq!(datevalue("19. Mai 2017", Culture::DE_DE), Some(42874.0));
    assert_eq!(datevalue("2017-05-19", Culture::FR_FR), Some(42874.0));
}

#[test]
fn test_day_order_is_not_guessed() {
    assert_eq!(datevalue("19/5/2017", Culture::EN_US), None);
    assert_error(
        &execute_with("DAY", &["19/5/2017".into()], &ctx(Culture::EN_US)),
        ErrorKind::Value,
    );
    assert_eq!(
        execute_with("DAY", &["19/5/2017".into()], &ctx(Culture::EN_GB)).as_number(),
        Some(19.0)
    );
}

#[test]
fn test_numbers_follow_separators() {
    let value = |text: &str, culture| execute_with("VALUE", &[text.into()], &ctx(culture));
    assert_eq!(value("1,442.00", Culture::EN_US).as_number(), Some(1442.0));
    assert_eq!(value("1.442,00", Culture::DE_DE).as_number(), Some(1442.0));
    assert_eq!(value("1 442,5", Culture::FR_FR).as_number(), Some(1442.5));
    assert_eq!(value("1,5", Culture::DE_DE).as_number(), Some(1.5));
    assert_error(&value("1,44", Culture::EN_US), ErrorKind::Value);
}

#[test]
fn test_localized_booleans() {
    let de = ctx(Culture::DE_DE);
    let expr = Expr::call("IF", vec!["WAHR".into(), 1.0.into(), 2.0.into()]);
    assert_eq!(evaluate(&expr, &de).as_number(), Some(1.0));

    let expr = Expr::call("NOT", vec!["falsch".into()]);
    assert_eq!(evaluate(&expr, &de).as_bool(), Some(true));

    // English literals are accepted everywhere
    let expr = Expr::call("AND", vec!["TRUE".into(), "WAHR".into()]);
    assert_eq!(evaluate(&expr, &de).as_bool(), Some(true));
    assert_error(
        &evaluate(&Expr::call("NOT", vec!["WAHR".into()]), &ParsingContext::simple()),
        ErrorKind::Value,
    );
}

#[test]
fn test_localized_error_strings() {
    assert_eq!(ErrorKind::Value.display(&Culture::DE_DE), "#WERT!");
    assert_eq!(ErrorKind::Num.display(&Culture::FR_FR), "#NOMBRE!");
    assert_eq!(ErrorKind::Na.display(&Culture::EN_US), "#N/A");
    assert_eq!(ErrorKind::parse("#nv", &Culture::DE_DE), Some(ErrorKind::Na));
    assert_eq!(ErrorKind::parse("#N/A", &Culture::DE_DE), Some(ErrorKind::Na));
    for culture in Culture::all() {
        for kind in ErrorKind::ALL {
            assert_eq!(ErrorKind::parse(kind.display(culture), culture), Some(kind));
        }
    }
}

#[test]
fn test_times_in_culture() {
    let de = ctx(Culture::DE_DE);
    let hour = execute_with("HOUR", &["19.05.2017 06:00".into()], &de);
    assert_eq!(hour.as_number(), Some(6.0));
    let fraction = execute_with("TIMEVALUE", &["18:00".into()], &de);
    assert_eq!(fraction.as_number(), Some(0.75));
}

#[test]
fn test_settings_select_culture() {
    let settings: EngineSettings =
        serde_json::from_str(r#"{ "culture": "de_AT" }"#).expect("valid settings");
    let context = ParsingContext::from_settings(&settings).expect("known language");
    assert_eq!(context.culture().name(), "de-DE");

    let expr = call("YEAR", vec!["19.05.2017".into()]);
    assert_eq!(evaluate(&expr, &context).as_number(), Some(2017.0));

    let unknown = EngineSettings {
        culture: "xx-YY".to_string(),
        ..EngineSettings::default()
    };
    assert!(ParsingContext::from_settings(&unknown).is_err());
}
