//! Serial date/time codec
//!
//! Dates are stored as serial numbers: the integer part counts days and the
//! fractional part is the time of day.
//!
//! Notes:
//! - Serial 0 is the sentinel date 1900-01-00 (1899-12-31 on a real calendar).
//! - Serial 60 is the non-existent 1900-02-29, kept for compatibility with the
//!   1900 leap-year bug. It converts to 1900-03-01 on a real calendar.
//! - From serial 61 (1900-03-01) onward, serials agree with the usual
//!   1899-12-30 based day count.

use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::value::ErrorKind;

/// Seconds in a day
pub const SECONDS_PER_DAY: u32 = 86_400;

/// Serial of the fictitious 1900-02-29
pub const LEAP_BUG_SERIAL: i64 = 60;

/// First serial (1900-03-01) where the spreadsheet and calendar day counts agree
pub const RECONCILIATION_SERIAL: i64 = 61;

/// Serial of 9999-12-31, the last representable date
pub const MAX_SERIAL: i64 = 2_958_465;

fn sentinel_base() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 31).expect("1899-12-31 is a valid date")
}

fn calendar_base() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).expect("1899-12-30 is a valid date")
}

fn reconciliation_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 3, 1).expect("1900-03-01 is a valid date")
}

/// Convert year/month/day components to a serial number
///
/// Components are truncated toward zero. Years 0..=1899 are offset by 1900.
/// Months and days outside their normal range roll into adjacent months and
/// years. Results before serial 0 or after 9999-12-31 are `#NUM!`.
pub fn to_serial(year: f64, month: f64, day: f64) -> Result<f64, ErrorKind> {
    let date = normalize_date(year, month, day)?;
    date_to_serial(date).map(|s| s as f64)
}

/// Convert date and time components to a serial number
pub fn to_serial_with_time(
    year: f64,
    month: f64,
    day: f64,
    hour: f64,
    minute: f64,
    second: f64,
) -> Result<f64, ErrorKind> {
    let days = to_serial(year, month, day)?;
    let total = days + time_to_fraction(hour.trunc(), minute.trunc(), second.trunc());
    if total < 0.0 {
        return Err(ErrorKind::Num);
    }
    Ok(total)
}

fn normalize_date(year: f64, month: f64, day: f64) -> Result<NaiveDate, ErrorKind> {
    if !(year.is_finite() && month.is_finite() && day.is_finite()) {
        return Err(ErrorKind::Num);
    }

    let mut year = year.trunc();
    if year < 0.0 {
        return Err(ErrorKind::Num);
    }
    if year < 1900.0 {
        year += 1900.0;
    }
    if year > 9999.0 {
        return Err(ErrorKind::Num);
    }

    let month = month.trunc();
    let day = day.trunc();
    // Anything beyond these can only land outside 1900..=9999
    if month.abs() > 1.0e6 || day.abs() > 1.0e8 {
        return Err(ErrorKind::Num);
    }

    let total_months = year as i64 * 12 + month as i64 - 1;
    let y = total_months.div_euclid(12);
    let m = total_months.rem_euclid(12) + 1;
    let first = NaiveDate::from_ymd_opt(y as i32, m as u32, 1).ok_or(ErrorKind::Num)?;

    let offset = day as i64 - 1;
    let date = if offset >= 0 {
        first.checked_add_days(Days::new(offset as u64))
    } else {
        first.checked_sub_days(Days::new(offset.unsigned_abs()))
    }
    .ok_or(ErrorKind::Num)?;

    if date < sentinel_base() || date.year() > 9999 {
        return Err(ErrorKind::Num);
    }
    Ok(date)
}

/// Serial day number of a calendar date
pub fn date_to_serial(date: NaiveDate) -> Result<i64, ErrorKind> {
    if date < sentinel_base() || date.year() > 9999 {
        return Err(ErrorKind::Num);
    }
    if date < reconciliation_date() {
        Ok((date - sentinel_base()).num_days())
    } else {
        Ok((date - calendar_base()).num_days())
    }
}

/// Serial number (with time fraction) of a calendar date and time
pub fn datetime_to_serial(datetime: NaiveDateTime) -> Result<f64, ErrorKind> {
    let days = date_to_serial(datetime.date())?;
    let time = datetime.time();
    let seconds =
        time.num_seconds_from_midnight() as f64 + time.nanosecond() as f64 / 1_000_000_000.0;
    Ok(days as f64 + seconds / SECONDS_PER_DAY as f64)
}

/// Calendar date of a whole serial day
///
/// Serial 60 (1900-02-29) converts to 1900-03-01.
pub fn serial_to_date(serial: i64) -> Result<NaiveDate, ErrorKind> {
    if !(0..=MAX_SERIAL).contains(&serial) {
        return Err(ErrorKind::Num);
    }
    let date = if serial < LEAP_BUG_SERIAL {
        sentinel_base().checked_add_days(Days::new(serial as u64))
    } else if serial == LEAP_BUG_SERIAL {
        Some(reconciliation_date())
    } else {
        calendar_base().checked_add_days(Days::new(serial as u64))
    };
    date.ok_or(ErrorKind::Num)
}

/// Fraction of a day for the given time components
pub fn time_to_fraction(hour: f64, minute: f64, second: f64) -> f64 {
    (hour * 3600.0 + minute * 60.0 + second) / SECONDS_PER_DAY as f64
}

/// Weekday of a serial day, counting serial 0 as a Saturday
pub fn excel_weekday(serial: i64) -> Weekday {
    match serial.rem_euclid(7) {
        0 => Weekday::Sat,
        1 => Weekday::Sun,
        2 => Weekday::Mon,
        3 => Weekday::Tue,
        4 => Weekday::Wed,
        5 => Weekday::Thu,
        _ => Weekday::Fri,
    }
}

/// Decode a serial number into a date and time of day
///
/// Negative, non-finite or out-of-range serials are `#NUM!`. The day
/// fraction is rounded half-up at the fifth decimal, then to whole seconds; a
/// full 86400 seconds rolls into the next day.
pub fn from_serial(serial: f64) -> Result<SerialDateTime, ErrorKind> {
    if !serial.is_finite() || serial < 0.0 {
        return Err(ErrorKind::Num);
    }
    if serial >= (MAX_SERIAL + 1) as f64 {
        return Err(ErrorKind::Num);
    }

    let mut serial_day = serial.trunc() as i64;
    let mut seconds = fraction_seconds(serial);
    if seconds >= SECONDS_PER_DAY {
        serial_day += 1;
        seconds = 0;
    }

    let date = serial_to_date(serial_day)?;
    Ok(SerialDateTime {
        serial_day,
        date,
        seconds,
    })
}

/// Whole seconds of the fractional part, rounded at the fifth decimal
fn fraction_seconds(serial: f64) -> u32 {
    let exact = Decimal::from_str(&serial.to_string())
        .ok()
        .or_else(|| Decimal::from_f64(serial));

    match exact {
        Some(value) => {
            let fraction = value
                .fract()
                .round_dp_with_strategy(5, RoundingStrategy::MidpointAwayFromZero);
            (fraction * Decimal::from(SECONDS_PER_DAY))
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_u32()
                .unwrap_or(0)
        }
        None => {
            let fraction = (serial.fract() * 1e5).round() / 1e5;
            (fraction * SECONDS_PER_DAY as f64).round() as u32
        }
    }
}

/// A decoded serial number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialDateTime {
    serial_day: i64,
    date: NaiveDate,
    seconds: u32,
}

impl SerialDateTime {
    /// Whole serial day (after any rounding rollover)
    pub fn serial_day(&self) -> i64 {
        self.serial_day
    }

    /// Calendar date; serial 0 is 1899-12-31 and serial 60 is 1900-03-01
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Hour of the day (0-23)
    pub fn hour(&self) -> u32 {
        self.seconds / 3600
    }

    /// Minute of the hour (0-59)
    pub fn minute(&self) -> u32 {
        self.seconds % 3600 / 60
    }

    /// Second of the minute (0-59)
    pub fn second(&self) -> u32 {
        self.seconds % 60
    }

    /// Time of day
    pub fn time(&self) -> NaiveTime {
        NaiveTime::from_num_seconds_from_midnight_opt(self.seconds, 0).unwrap_or_default()
    }

    /// Calendar date and time
    pub fn datetime(&self) -> NaiveDateTime {
        self.date.and_time(self.time())
    }

    /// Check for the sentinel serial 0
    pub fn is_zero_date(&self) -> bool {
        self.serial_day == 0
    }

    /// Year, month and day as reported by YEAR/MONTH/DAY
    ///
    /// Serial 0 is `1900-01-00` and serial 60 is `1900-02-29`.
    pub fn excel_ymd(&self) -> (i32, u32, u32) {
        match self.serial_day {
            0 => (1900, 1, 0),
            LEAP_BUG_SERIAL => (1900, 2, 29),
            _ => (self.date.year(), self.date.month(), self.date.day()),
        }
    }

    /// Weekday from serial arithmetic (serial 0 is a Saturday)
    pub fn weekday(&self) -> Weekday {
        excel_weekday(self.serial_day)
    }
}
