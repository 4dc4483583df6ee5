//! Time string parsing

use cellcalc_core::Culture;
use lazy_regex::{regex_captures, regex_is_match};

use super::date;
use crate::error::{FormulaError, FormulaResult};

/// Parses time strings into fractions of a day
///
/// Recognized forms:
/// - 24-hour `H:MM`, `H:MM:SS` and `H:MM:SS.fff`; hours of 24 or more wrap
///   around (`"25:00"` is `"01:00"`)
/// - 12-hour `H AM`, `H:MM PM`, `H:MM:SS am`
/// - a date followed by either of the above; the date is discarded
///
/// Minutes or seconds of 60 or more are an error.
///
/// ```rust
/// use cellcalc_core::Culture;
/// use cellcalc_formula::parse::TimeStringParser;
///
/// let parser = TimeStringParser::new(Culture::EN_US);
/// assert_eq!(parser.parse("18:00").unwrap(), 0.75);
/// assert_eq!(parser.parse("6 PM").unwrap(), 0.75);
/// assert!(parser.parse("10:60").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeStringParser {
    culture: Culture,
}

impl TimeStringParser {
    pub fn new(culture: Culture) -> Self {
        Self { culture }
    }

    /// Check whether the text has the shape of a time, without validating
    /// component ranges
    pub fn can_parse(&self, text: &str) -> bool {
        let s = text.trim();
        has_time_shape(s) || date::split_trailing_time(s, &self.culture).is_some()
    }

    /// Parse the text into a fraction of a day
    pub fn parse(&self, text: &str) -> FormulaResult<f64> {
        let s = text.trim();
        if let Some(result) = parse_time_of_day(s) {
            return result;
        }
        if let Some((_, time_text)) = date::split_trailing_time(s, &self.culture) {
            if let Some(result) = parse_time_of_day(time_text) {
                return result;
            }
        }
        Err(FormulaError::InvalidTime(text.to_string()))
    }
}

pub(crate) fn has_time_shape(s: &str) -> bool {
    regex_is_match!(r"^\d{1,5}:\d{1,2}(?::\d{1,2}(?:[.,]\d+)?)?$", s)
        || regex_is_match!(r"(?i)^\d{1,2}(?::\d{1,2}(?::\d{1,2})?)?\s*[ap]\.?m\.?$", s)
}

/// Parse a bare time; `None` when the text is not time-shaped
pub(crate) fn parse_time_of_day(s: &str) -> Option<FormulaResult<f64>> {
    if let Some((_, h, m, sec, frac)) =
        regex_captures!(r"^(\d{1,5}):(\d{1,2})(?::(\d{1,2})(?:[.,](\d+))?)?$", s)
    {
        return Some(twenty_four_hour(h, m, sec, frac));
    }
    if let Some((_, h, m, sec, meridiem)) = regex_captures!(
        r"(?i)^(\d{1,2})(?::(\d{1,2})(?::(\d{1,2}))?)?\s*([ap])\.?m\.?$",
        s
    ) {
        return Some(twelve_hour(s, h, m, sec, meridiem));
    }
    None
}

fn component(text: &str) -> u32 {
    text.parse().unwrap_or(0)
}

fn check_range(component: &'static str, value: u32) -> FormulaResult<u32> {
    if value >= 60 {
        return Err(FormulaError::TimeComponentOutOfRange { component, value });
    }
    Ok(value)
}

fn to_fraction(hour: u32, minute: u32, second: f64) -> f64 {
    (hour as f64 * 3600.0 + minute as f64 * 60.0 + second) / 86_400.0
}

fn twenty_four_hour(h: &str, m: &str, s: &str, frac: &str) -> FormulaResult<f64> {
    let hour = component(h) % 24;
    let minute = check_range("minute", component(m))?;
    let second = check_range("second", component(s))?;
    let fraction: f64 = if frac.is_empty() {
        0.0
    } else {
        format!("0.{}", frac).parse().unwrap_or(0.0)
    };
    Ok(to_fraction(hour, minute, second as f64 + fraction))
}

fn twelve_hour(text: &str, h: &str, m: &str, s: &str, meridiem: &str) -> FormulaResult<f64> {
    let hour = component(h);
    if hour > 12 {
        return Err(FormulaError::InvalidTime(text.to_string()));
    }
    let minute = check_range("minute", component(m))?;
    let second = check_range("second", component(s))?;
    let mut hour = hour % 12;
    if meridiem.eq_ignore_ascii_case("p") {
        hour += 12;
    }
    Ok(to_fraction(hour, minute, second as f64))
}
