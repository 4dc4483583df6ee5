//! Culture (locale) conventions used when parsing and displaying values
//!
//! A [`Culture`] is passed explicitly to every parse/format call. There is no
//! ambient or thread-local culture.

use crate::error::{Error, Result};
use crate::value::ErrorKind;

/// Order of the day, month and year components in a numeric date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateOrder {
    /// `5/19/2017`
    MonthDayYear,
    /// `19/5/2017`
    DayMonthYear,
    /// `2017/5/19`
    YearMonthDay,
}

const ENGLISH_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Canonical error literals, indexed like [`ErrorKind::ALL`]
const CANONICAL_ERRORS: [&str; 7] = [
    "#NULL!", "#DIV/0!", "#VALUE!", "#REF!", "#NAME?", "#NUM!", "#N/A",
];

/// Locale conventions for numbers, dates, booleans and error literals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Culture {
    name: &'static str,
    decimal_separator: char,
    group_separator: char,
    date_separator: char,
    date_order: DateOrder,
    true_text: &'static str,
    false_text: &'static str,
    error_texts: [&'static str; 7],
    month_names: [&'static str; 12],
}

impl Culture {
    /// Culture-neutral conventions (English spellings, `.` decimal separator)
    pub const INVARIANT: Culture = Culture {
        name: "",
        decimal_separator: '.',
        group_separator: ',',
        date_separator: '/',
        date_order: DateOrder::MonthDayYear,
        true_text: "TRUE",
        false_text: "FALSE",
        error_texts: CANONICAL_ERRORS,
        month_names: ENGLISH_MONTHS,
    };

    /// English (United States)
    pub const EN_US: Culture = Culture {
        name: "en-US",
        ..Culture::INVARIANT
    };

    /// English (United Kingdom)
    pub const EN_GB: Culture = Culture {
        name: "en-GB",
        date_order: DateOrder::DayMonthYear,
        ..Culture::INVARIANT
    };

    /// German (Germany)
    pub const DE_DE: Culture = Culture {
        name: "de-DE",
        decimal_separator: ',',
        group_separator: '.',
        date_separator: '.',
        date_order: DateOrder::DayMonthYear,
        true_text: "WAHR",
        false_text: "FALSCH",
        error_texts: [
            "#NULL!", "#DIV/0!", "#WERT!", "#BEZUG!", "#NAME?", "#ZAHL!", "#NV",
        ],
        month_names: [
            "Januar",
            "Februar",
            "März",
            "April",
            "Mai",
            "Juni",
            "Juli",
            "August",
            "September",
            "Oktober",
            "November",
            "Dezember",
        ],
    };

    /// French (France)
    pub const FR_FR: Culture = Culture {
        name: "fr-FR",
        decimal_separator: ',',
        group_separator: '\u{a0}',
        date_separator: '/',
        date_order: DateOrder::DayMonthYear,
        true_text: "VRAI",
        false_text: "FAUX",
        error_texts: [
            "#NUL!", "#DIV/0!", "#VALEUR!", "#REF!", "#NOM?", "#NOMBRE!", "#N/A",
        ],
        month_names: [
            "janvier",
            "février",
            "mars",
            "avril",
            "mai",
            "juin",
            "juillet",
            "août",
            "septembre",
            "octobre",
            "novembre",
            "décembre",
        ],
    };

    /// Polish (Poland)
    pub const PL_PL: Culture = Culture {
        name: "pl-PL",
        decimal_separator: ',',
        group_separator: '\u{a0}',
        date_separator: '.',
        date_order: DateOrder::DayMonthYear,
        true_text: "PRAWDA",
        false_text: "FAŁSZ",
        error_texts: [
            "#ZERO!", "#DZIEL/0!", "#ARG!", "#ADR!", "#NAZWA?", "#LICZBA!", "#N/D",
        ],
        month_names: [
            "styczeń",
            "luty",
            "marzec",
            "kwiecień",
            "maj",
            "czerwiec",
            "lipiec",
            "sierpień",
            "wrzesień",
            "październik",
            "listopad",
            "grudzień",
        ],
    };

    /// Russian (Russia)
    pub const RU_RU: Culture = Culture {
        name: "ru-RU",
        decimal_separator: ',',
        group_separator: '\u{a0}',
        date_separator: '.',
        date_order: DateOrder::DayMonthYear,
        true_text: "ИСТИНА",
        false_text: "ЛОЖЬ",
        error_texts: [
            "#ПУСТО!", "#ДЕЛ/0!", "#ЗНАЧ!", "#ССЫЛКА!", "#ИМЯ?", "#ЧИСЛО!", "#Н/Д",
        ],
        month_names: [
            "январь",
            "февраль",
            "март",
            "апрель",
            "май",
            "июнь",
            "июль",
            "август",
            "сентябрь",
            "октябрь",
            "ноябрь",
            "декабрь",
        ],
    };

    /// All built-in cultures
    pub fn all() -> &'static [Culture] {
        const ALL: [Culture; 7] = [
            Culture::INVARIANT,
            Culture::EN_US,
            Culture::EN_GB,
            Culture::DE_DE,
            Culture::FR_FR,
            Culture::PL_PL,
            Culture::RU_RU,
        ];
        &ALL
    }

    /// Look up a built-in culture by name
    ///
    /// Matching is case-insensitive and accepts `_` in place of `-`. An empty
    /// name or `"invariant"` selects [`Culture::INVARIANT`]. A bare language
    /// (`"de"`) or an unknown region of a known language (`"de-AT"`) falls back
    /// to the language's default culture.
    pub fn lookup(name: &str) -> Result<Culture> {
        let key = name.trim().replace('_', "-").to_ascii_lowercase();
        if key.is_empty() || key == "invariant" {
            return Ok(Culture::INVARIANT);
        }
        if !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(Error::InvalidCultureName(name.to_string()));
        }

        if let Some(culture) = Culture::all()
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(&key))
        {
            return Ok(*culture);
        }

        let language = key.split('-').next().unwrap_or_default();
        match language {
            "en" => Ok(Culture::EN_US),
            "de" => Ok(Culture::DE_DE),
            "fr" => Ok(Culture::FR_FR),
            "pl" => Ok(Culture::PL_PL),
            "ru" => Ok(Culture::RU_RU),
            _ => Err(Error::UnknownCulture(name.to_string())),
        }
    }

    /// Culture name (`"en-US"`); empty for the invariant culture
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Decimal separator
    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    /// Digit group (thousands) separator
    pub fn group_separator(&self) -> char {
        self.group_separator
    }

    /// Native separator between date components
    pub fn date_separator(&self) -> char {
        self.date_separator
    }

    /// Component order of numeric dates
    pub fn date_order(&self) -> DateOrder {
        self.date_order
    }

    /// Check whether `c` acts as a group separator in this culture
    ///
    /// Cultures grouping with a no-break space also accept a plain space and a
    /// narrow no-break space.
    pub fn is_group_separator(&self, c: char) -> bool {
        if c == self.group_separator {
            return true;
        }
        matches!(self.group_separator, '\u{a0}' | '\u{202f}' | ' ')
            && matches!(c, '\u{a0}' | '\u{202f}' | ' ')
    }

    /// Localized spelling of a boolean
    pub fn boolean_text(&self, value: bool) -> &'static str {
        if value {
            self.true_text
        } else {
            self.false_text
        }
    }

    /// Parse a boolean literal
    ///
    /// Accepts the localized spelling and always the English `TRUE`/`FALSE`,
    /// case-insensitively.
    pub fn parse_boolean(&self, text: &str) -> Option<bool> {
        let text = text.trim();
        if eq_fold(text, self.true_text) || text.eq_ignore_ascii_case("TRUE") {
            Some(true)
        } else if eq_fold(text, self.false_text) || text.eq_ignore_ascii_case("FALSE") {
            Some(false)
        } else {
            None
        }
    }

    /// Localized spelling of an error literal
    pub fn error_text(&self, kind: ErrorKind) -> &'static str {
        self.error_texts[kind.index()]
    }

    /// Parse an error literal in this culture's spelling
    ///
    /// Only the localized spelling is matched; see [`ErrorKind::parse`] for the
    /// variant that also accepts the canonical spelling.
    pub fn parse_error_text(&self, text: &str) -> Option<ErrorKind> {
        let text = text.trim();
        ErrorKind::ALL
            .iter()
            .copied()
            .find(|kind| eq_fold(text, self.error_texts[kind.index()]))
    }

    /// Month names, January first
    pub fn month_names(&self) -> &[&'static str; 12] {
        &self.month_names
    }

    /// Resolve a month name to its number (1-12)
    ///
    /// English names are always recognized. Exact (case-insensitive) matches
    /// win; otherwise an unambiguous prefix of at least three letters is
    /// accepted (`"Sept"`, `"Mär"`).
    pub fn month_from_name(&self, text: &str) -> Option<u32> {
        let needle = text.trim().trim_end_matches('.').to_lowercase();
        if needle.is_empty() {
            return None;
        }

        for names in [&self.month_names, &ENGLISH_MONTHS] {
            if let Some(idx) = names.iter().position(|m| m.to_lowercase() == needle) {
                return Some(idx as u32 + 1);
            }
        }

        if needle.chars().count() < 3 {
            return None;
        }
        for names in [&self.month_names, &ENGLISH_MONTHS] {
            let mut matches = names
                .iter()
                .enumerate()
                .filter(|(_, m)| m.to_lowercase().starts_with(&needle));
            if let (Some((idx, _)), None) = (matches.next(), matches.next()) {
                return Some(idx as u32 + 1);
            }
        }
        None
    }
}

impl Default for Culture {
    fn default() -> Self {
        Culture::EN_US
    }
}

fn eq_fold(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || a.to_lowercase() == b.to_lowercase()
}
