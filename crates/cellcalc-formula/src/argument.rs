//! Function arguments
//!
//! An argument is either a single scalar or a range. A range whose members
//! are all ranges is a list of rows; any other range is a single column.

use bitflags::bitflags;
use cellcalc_core::{ErrorKind, ScalarValue};
use chrono::{NaiveDate, NaiveDateTime};

bitflags! {
    /// Per-cell state that aggregate functions may consult
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellFlags: u8 {
        /// Cell sits in a hidden row
        const HIDDEN = 0b0000_0001;
        /// Cell holds a SUBTOTAL formula
        const SUBTOTAL = 0b0000_0010;
    }
}

/// Payload of a [`FunctionArgument`]
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentValue {
    Scalar(ScalarValue),
    Range(Vec<FunctionArgument>),
}

/// A single argument passed to a function
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionArgument {
    value: ArgumentValue,
    flags: CellFlags,
}

impl FunctionArgument {
    /// Wrap an argument value
    pub fn new(value: ArgumentValue) -> Self {
        Self {
            value,
            flags: CellFlags::empty(),
        }
    }

    /// Create a scalar argument
    pub fn scalar(value: impl Into<ScalarValue>) -> Self {
        Self::new(ArgumentValue::Scalar(value.into()))
    }

    /// Create a blank (omitted) argument
    pub fn blank() -> Self {
        Self::scalar(ScalarValue::Blank)
    }

    /// Create a single-column range
    pub fn range<I, T>(cells: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<FunctionArgument>,
    {
        Self::new(ArgumentValue::Range(cells.into_iter().map(Into::into).collect()))
    }

    /// Create a two-dimensional range from rows
    pub fn rows<I, R, T>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = T>,
        T: Into<FunctionArgument>,
    {
        Self::new(ArgumentValue::Range(
            rows.into_iter().map(FunctionArgument::range).collect(),
        ))
    }

    /// Replace the cell flags
    pub fn with_flags(mut self, flags: CellFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Mark the cell as hidden
    pub fn hidden(self) -> Self {
        let flags = self.flags | CellFlags::HIDDEN;
        self.with_flags(flags)
    }

    pub fn value(&self) -> &ArgumentValue {
        &self.value
    }

    pub fn flags(&self) -> CellFlags {
        self.flags
    }

    pub fn is_range(&self) -> bool {
        matches!(self.value, ArgumentValue::Range(_))
    }

    /// Scalar value, looking through single-cell ranges
    pub fn as_scalar(&self) -> Option<&ScalarValue> {
        match &self.value {
            ArgumentValue::Scalar(v) => Some(v),
            ArgumentValue::Range(cells) if cells.len() == 1 => cells[0].as_scalar(),
            ArgumentValue::Range(_) => None,
        }
    }

    /// Error carried by a scalar (or single-cell) argument
    pub fn error(&self) -> Option<ErrorKind> {
        self.as_scalar().and_then(ScalarValue::as_error)
    }

    /// Check for a blank scalar
    pub fn is_blank(&self) -> bool {
        matches!(self.as_scalar(), Some(ScalarValue::Blank))
    }

    /// All scalar cells, depth-first
    pub fn cells(&self) -> Vec<&FunctionArgument> {
        let mut out = Vec::new();
        self.collect_cells(&mut out);
        out
    }

    fn collect_cells<'a>(&'a self, out: &mut Vec<&'a FunctionArgument>) {
        match &self.value {
            ArgumentValue::Scalar(_) => out.push(self),
            ArgumentValue::Range(cells) => {
                for cell in cells {
                    cell.collect_cells(out);
                }
            }
        }
    }

    fn is_row_list(cells: &[FunctionArgument]) -> bool {
        !cells.is_empty() && cells.iter().all(FunctionArgument::is_range)
    }

    /// Number of rows and columns
    pub fn shape(&self) -> (usize, usize) {
        match &self.value {
            ArgumentValue::Scalar(_) => (1, 1),
            ArgumentValue::Range(cells) if Self::is_row_list(cells) => {
                let cols = cells.iter().map(|r| r.cells().len()).max().unwrap_or(0);
                (cells.len(), cols)
            }
            ArgumentValue::Range(cells) => (cells.len(), 1),
        }
    }

    /// Cell at a zero-based row and column
    pub fn cell_at(&self, row: usize, col: usize) -> Option<&FunctionArgument> {
        match &self.value {
            ArgumentValue::Scalar(_) => (row == 0 && col == 0).then_some(self),
            ArgumentValue::Range(cells) if Self::is_row_list(cells) => {
                cells.get(row)?.cells().get(col).copied()
            }
            ArgumentValue::Range(cells) => {
                if col == 0 {
                    cells.get(row)
                } else {
                    None
                }
            }
        }
    }
}

impl From<ScalarValue> for FunctionArgument {
    fn from(v: ScalarValue) -> Self {
        FunctionArgument::scalar(v)
    }
}

impl From<f64> for FunctionArgument {
    fn from(n: f64) -> Self {
        FunctionArgument::scalar(n)
    }
}

impl From<i32> for FunctionArgument {
    fn from(n: i32) -> Self {
        FunctionArgument::scalar(n)
    }
}

impl From<bool> for FunctionArgument {
    fn from(b: bool) -> Self {
        FunctionArgument::scalar(b)
    }
}

impl From<&str> for FunctionArgument {
    fn from(s: &str) -> Self {
        FunctionArgument::scalar(s)
    }
}

impl From<String> for FunctionArgument {
    fn from(s: String) -> Self {
        FunctionArgument::scalar(s)
    }
}

impl From<ErrorKind> for FunctionArgument {
    fn from(e: ErrorKind) -> Self {
        FunctionArgument::scalar(e)
    }
}

impl From<NaiveDate> for FunctionArgument {
    fn from(d: NaiveDate) -> Self {
        FunctionArgument::scalar(d)
    }
}

impl From<NaiveDateTime> for FunctionArgument {
    fn from(d: NaiveDateTime) -> Self {
        FunctionArgument::scalar(d)
    }
}
