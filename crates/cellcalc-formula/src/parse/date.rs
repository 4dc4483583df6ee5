//! Culture-aware date parsing
//!
//! Numeric dates accept `/`, `-` and `.` as separators under every culture.
//! A four-digit leading part always means year-month-day; otherwise the
//! culture's [`DateOrder`] decides.

use cellcalc_core::{Culture, DateOrder};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use lazy_regex::regex_captures;

use super::time;

/// Two-digit years below this land in the 2000s, the rest in the 1900s
const TWO_DIGIT_YEAR_PIVOT: i32 = 30;

/// Parse a date string
pub fn parse_date(text: &str, culture: &Culture) -> Option<NaiveDate> {
    let s = text.trim();
    if s.is_empty() {
        return None;
    }
    parse_numeric_date(s, culture).or_else(|| parse_month_name_date(s, culture))
}

/// Parse a date with an optional trailing time
pub fn parse_date_time(text: &str, culture: &Culture) -> Option<NaiveDateTime> {
    let s = text.trim();
    if let Some(date) = parse_date(s, culture) {
        return Some(date.and_time(NaiveTime::default()));
    }

    let (date, time_text) = split_trailing_time(s, culture)?;
    let fraction = time::parse_time_of_day(time_text)?.ok()?;
    let seconds = (fraction * 86_400.0).round() as u32 % 86_400;
    let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)?;
    Some(date.and_time(time))
}

/// Split `"<date> <time>"` into the parsed date and the time text
pub(crate) fn split_trailing_time<'a>(
    text: &'a str,
    culture: &Culture,
) -> Option<(NaiveDate, &'a str)> {
    text.char_indices()
        .filter(|(_, c)| c.is_whitespace())
        .find_map(|(i, _)| {
            let (head, tail) = text.split_at(i);
            let tail = tail.trim();
            if !time::has_time_shape(tail) {
                return None;
            }
            parse_date(head, culture).map(|d| (d, tail))
        })
}

fn parse_numeric_date(s: &str, culture: &Culture) -> Option<NaiveDate> {
    let normalized = s.replace(['-', '.'], "/");
    let parts: Vec<&str> = normalized.split('/').collect();
    if parts
        .iter()
        .any(|p| p.is_empty() || p.len() > 4 || !p.chars().all(|c| c.is_ascii_digit()))
    {
        return None;
    }

    match parts.as_slice() {
        [first, second, third] => {
            let (y, m, d) = if first.len() == 4 {
                (*first, *second, *third)
            } else {
                match culture.date_order() {
                    DateOrder::MonthDayYear => (*third, *first, *second),
                    DateOrder::DayMonthYear => (*third, *second, *first),
                    DateOrder::YearMonthDay => (*first, *second, *third),
                }
            };
            if m.len() > 2 || d.len() > 2 {
                return None;
            }
            build_date(parse_year(y)?, m.parse().ok()?, d.parse().ok()?)
        }
        // M/yyyy and yyyy/M name the first of the month
        [first, second] if second.len() == 4 && first.len() <= 2 => {
            build_date(parse_year(second)?, first.parse().ok()?, 1)
        }
        [first, second] if first.len() == 4 && second.len() <= 2 => {
            build_date(parse_year(first)?, second.parse().ok()?, 1)
        }
        _ => None,
    }
}

fn parse_month_name_date(s: &str, culture: &Culture) -> Option<NaiveDate> {
    // May 19, 2017
    if let Some((_, month, day, year)) =
        regex_captures!(r"^(\p{L}+)\.?\s+(\d{1,2})(?:st|nd|rd|th)?,?\s+(\d{2,4})$", s)
    {
        let month = culture.month_from_name(month)?;
        return build_date(parse_year(year)?, month, day.parse().ok()?);
    }

    // 19 May 2017, 19-May-2017, 19. Mai 2017
    if let Some((_, day, month, year)) =
        regex_captures!(r"^(\d{1,2})\.?[\s/-]*(\p{L}+)\.?[\s,/-]+(\d{2,4})$", s)
    {
        let month = culture.month_from_name(month)?;
        return build_date(parse_year(year)?, month, day.parse().ok()?);
    }

    // May 2017
    if let Some((_, month, year)) = regex_captures!(r"^(\p{L}+)\.?[\s,/-]+(\d{4})$", s) {
        let month = culture.month_from_name(month)?;
        return build_date(parse_year(year)?, month, 1);
    }

    None
}

fn parse_year(text: &str) -> Option<i32> {
    let year: i32 = text.parse().ok()?;
    match text.len() {
        1 | 2 if year < TWO_DIGIT_YEAR_PIVOT => Some(2000 + year),
        1 | 2 => Some(1900 + year),
        4 => Some(year),
        _ => None,
    }
}

fn build_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    if !(1900..=9999).contains(&year) {
        return None;
    }
    // The fictitious 1900-02-29 reads as the day after 1900-02-28
    if (year, month, day) == (1900, 2, 29) {
        return NaiveDate::from_ymd_opt(1900, 3, 1);
    }
    NaiveDate::from_ymd_opt(year, month, day)
}
