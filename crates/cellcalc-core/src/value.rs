//! Scalar and error value types

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::culture::Culture;
use crate::error::Error;

/// A single value flowing through formula evaluation
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScalarValue {
    /// Empty cell or omitted argument
    #[default]
    Blank,

    /// Numeric value (serial dates included)
    Number(f64),

    /// Text value
    Text(String),

    /// Boolean value (TRUE/FALSE)
    Boolean(bool),

    /// Calendar date and time
    Date(NaiveDateTime),

    /// Error value (#VALUE!, #N/A, etc.)
    Error(ErrorKind),
}

impl ScalarValue {
    /// Create a new text value
    pub fn text<S: Into<String>>(s: S) -> Self {
        ScalarValue::Text(s.into())
    }

    /// Check if the value is blank
    pub fn is_blank(&self) -> bool {
        matches!(self, ScalarValue::Blank)
    }

    /// Check if the value is an error
    pub fn is_error(&self) -> bool {
        matches!(self, ScalarValue::Error(_))
    }

    /// Get the error kind if this is an error value
    pub fn as_error(&self) -> Option<ErrorKind> {
        match self {
            ScalarValue::Error(e) => Some(*e),
            _ => None,
        }
    }

    /// Get the text if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ScalarValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the type name for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            ScalarValue::Blank => "blank",
            ScalarValue::Number(_) => "number",
            ScalarValue::Text(_) => "text",
            ScalarValue::Boolean(_) => "boolean",
            ScalarValue::Date(_) => "date",
            ScalarValue::Error(_) => "error",
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Blank => Ok(()),
            ScalarValue::Number(n) => write!(f, "{}", n),
            ScalarValue::Text(s) => write!(f, "{}", s),
            ScalarValue::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            ScalarValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d %H:%M:%S")),
            ScalarValue::Error(e) => write!(f, "{}", e),
        }
    }
}

impl From<bool> for ScalarValue {
    fn from(b: bool) -> Self {
        ScalarValue::Boolean(b)
    }
}

impl From<i32> for ScalarValue {
    fn from(n: i32) -> Self {
        ScalarValue::Number(n as f64)
    }
}

impl From<i64> for ScalarValue {
    fn from(n: i64) -> Self {
        ScalarValue::Number(n as f64)
    }
}

impl From<f64> for ScalarValue {
    fn from(n: f64) -> Self {
        ScalarValue::Number(n)
    }
}

impl From<&str> for ScalarValue {
    fn from(s: &str) -> Self {
        ScalarValue::text(s)
    }
}

impl From<String> for ScalarValue {
    fn from(s: String) -> Self {
        ScalarValue::Text(s)
    }
}

impl From<NaiveDate> for ScalarValue {
    fn from(d: NaiveDate) -> Self {
        ScalarValue::Date(d.and_time(NaiveTime::default()))
    }
}

impl From<NaiveDateTime> for ScalarValue {
    fn from(d: NaiveDateTime) -> Self {
        ScalarValue::Date(d)
    }
}

impl From<ErrorKind> for ScalarValue {
    fn from(e: ErrorKind) -> Self {
        ScalarValue::Error(e)
    }
}

/// Spreadsheet error values
///
/// Two errors are equal when their kinds are equal; the display spelling
/// depends on the [`Culture`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// #NULL! - Intersection of ranges is empty
    Null,
    /// #DIV/0! - Division by zero
    Div0,
    /// #VALUE! - Wrong type of argument or unparseable text
    Value,
    /// #REF! - Invalid cell reference
    Ref,
    /// #NAME? - Unrecognized function or name
    Name,
    /// #NUM! - Numeric input or result out of domain
    Num,
    /// #N/A - Value not available or required argument missing
    Na,
}

impl ErrorKind {
    /// Every error kind, in `ERROR.TYPE` order
    pub const ALL: [ErrorKind; 7] = [
        ErrorKind::Null,
        ErrorKind::Div0,
        ErrorKind::Value,
        ErrorKind::Ref,
        ErrorKind::Name,
        ErrorKind::Num,
        ErrorKind::Na,
    ];

    /// Get the canonical (English) display string
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Null => "#NULL!",
            ErrorKind::Div0 => "#DIV/0!",
            ErrorKind::Value => "#VALUE!",
            ErrorKind::Ref => "#REF!",
            ErrorKind::Name => "#NAME?",
            ErrorKind::Num => "#NUM!",
            ErrorKind::Na => "#N/A",
        }
    }

    /// Get the number reported by `ERROR.TYPE`
    pub fn error_type_code(&self) -> u8 {
        self.index() as u8 + 1
    }

    /// Get the display string in the given culture
    pub fn display(&self, culture: &Culture) -> &'static str {
        culture.error_text(*self)
    }

    /// Parse an error literal
    ///
    /// Accepts the culture's spelling and always the canonical English
    /// spelling, case-insensitively.
    pub fn parse(text: &str, culture: &Culture) -> Option<ErrorKind> {
        culture
            .parse_error_text(text)
            .or_else(|| text.trim().parse().ok())
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            ErrorKind::Null => 0,
            ErrorKind::Div0 => 1,
            ErrorKind::Value => 2,
            ErrorKind::Ref => 3,
            ErrorKind::Name => 4,
            ErrorKind::Num => 5,
            ErrorKind::Na => 6,
        }
    }
}

impl FromStr for ErrorKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "#NULL!" => Ok(ErrorKind::Null),
            "#DIV/0!" => Ok(ErrorKind::Div0),
            "#VALUE!" => Ok(ErrorKind::Value),
            "#REF!" => Ok(ErrorKind::Ref),
            "#NAME?" => Ok(ErrorKind::Name),
            "#NUM!" => Ok(ErrorKind::Num),
            "#N/A" => Ok(ErrorKind::Na),
            _ => Err(Error::UnknownErrorLiteral(s.to_string())),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
