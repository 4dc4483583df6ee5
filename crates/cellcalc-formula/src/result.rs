//! Typed function results

use cellcalc_core::{serial, ErrorKind, ScalarValue};

use crate::argument::{ArgumentValue, FunctionArgument};

/// Kind of value held by a [`CompileResult`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Number,
    String,
    Boolean,
    /// A serial number meant to be shown as a date or time
    Date,
    ExcelError,
    Array,
    Empty,
}

/// The tagged result of evaluating one function or expression node
#[derive(Debug, Clone, PartialEq)]
pub struct CompileResult {
    data_type: DataType,
    value: ArgumentValue,
}

impl CompileResult {
    fn scalar(data_type: DataType, value: ScalarValue) -> Self {
        Self {
            data_type,
            value: ArgumentValue::Scalar(value),
        }
    }

    /// Numeric result; NaN and infinities become `#NUM!`
    pub fn number(n: f64) -> Self {
        if n.is_finite() {
            Self::scalar(DataType::Number, ScalarValue::Number(n))
        } else {
            Self::error(ErrorKind::Num)
        }
    }

    /// Serial date/time result
    pub fn date(serial: f64) -> Self {
        if serial.is_finite() {
            Self::scalar(DataType::Date, ScalarValue::Number(serial))
        } else {
            Self::error(ErrorKind::Num)
        }
    }

    pub fn string(s: impl Into<String>) -> Self {
        Self::scalar(DataType::String, ScalarValue::Text(s.into()))
    }

    pub fn boolean(b: bool) -> Self {
        Self::scalar(DataType::Boolean, ScalarValue::Boolean(b))
    }

    pub fn error(kind: ErrorKind) -> Self {
        Self::scalar(DataType::ExcelError, ScalarValue::Error(kind))
    }

    pub fn empty() -> Self {
        Self::scalar(DataType::Empty, ScalarValue::Blank)
    }

    /// Range or array result
    pub fn array(range: FunctionArgument) -> Self {
        Self {
            data_type: DataType::Array,
            value: range.value().clone(),
        }
    }

    /// Result carrying a scalar, tagged by its variant
    ///
    /// Calendar dates are stored as serial numbers.
    pub fn from_scalar(value: ScalarValue) -> Self {
        match value {
            ScalarValue::Blank => Self::empty(),
            ScalarValue::Number(n) => Self::number(n),
            ScalarValue::Text(s) => Self::string(s),
            ScalarValue::Boolean(b) => Self::boolean(b),
            ScalarValue::Date(d) => match serial::datetime_to_serial(d) {
                Ok(s) => Self::date(s),
                Err(e) => Self::error(e),
            },
            ScalarValue::Error(e) => Self::error(e),
        }
    }

    /// Result carrying an argument's value
    ///
    /// Multi-cell ranges become arrays; a blank cell reads as zero.
    pub fn from_argument(arg: &FunctionArgument) -> Self {
        match arg.as_scalar() {
            Some(ScalarValue::Blank) => Self::number(0.0),
            Some(value) => Self::from_scalar(value.clone()),
            None => Self::array(arg.clone()),
        }
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn value(&self) -> &ArgumentValue {
        &self.value
    }

    /// Scalar payload; `None` for arrays
    pub fn scalar_value(&self) -> Option<&ScalarValue> {
        match &self.value {
            ArgumentValue::Scalar(v) => Some(v),
            ArgumentValue::Range(_) => None,
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.scalar_value().and_then(ScalarValue::as_error)
    }

    pub fn is_error(&self) -> bool {
        self.data_type == DataType::ExcelError
    }

    /// Numeric payload of Number and Date results
    pub fn as_number(&self) -> Option<f64> {
        match self.scalar_value() {
            Some(ScalarValue::Number(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.scalar_value() {
            Some(ScalarValue::Boolean(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        self.scalar_value().and_then(ScalarValue::as_text)
    }

    /// Convert into an argument for an enclosing function
    pub fn into_argument(self) -> FunctionArgument {
        FunctionArgument::new(self.value)
    }
}

impl From<ErrorKind> for CompileResult {
    fn from(kind: ErrorKind) -> Self {
        CompileResult::error(kind)
    }
}
