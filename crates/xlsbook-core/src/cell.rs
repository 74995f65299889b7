//! Cell values

use std::fmt;

use crate::style::StyleId;

/// Represents the value stored in a cell
///
/// Formula cells are not modelled; a formula's cached result is stored as
/// its plain value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Cell carries formatting but no value
    #[default]
    Blank,

    /// Numeric value (all numbers stored as f64, including dates)
    Number(f64),

    /// String value
    Text(String),

    /// Boolean value (TRUE/FALSE)
    Boolean(bool),

    /// Error value (#VALUE!, #REF!, etc.)
    Error(CellError),
}

impl CellValue {
    pub fn is_blank(&self) -> bool {
        matches!(self, CellValue::Blank)
    }

    pub fn as_number(&self) -> Option<f64> {
        match *self {
            CellValue::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Blank => Ok(()),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Boolean(b) => f.write_str(if *b { "TRUE" } else { "FALSE" }),
            CellValue::Error(e) => e.fmt(f),
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => |$v:ident| $body:expr),* $(,)?) => {
        $(impl From<$ty> for CellValue {
            fn from($v: $ty) -> Self {
                $body
            }
        })*
    };
}

impl_from! {
    bool => |b| CellValue::Boolean(b),
    i32 => |n| CellValue::Number(f64::from(n)),
    f64 => |n| CellValue::Number(n),
    &str => |s| CellValue::Text(s.to_owned()),
    String => |s| CellValue::Text(s),
    CellError => |e| CellValue::Error(e),
}

/// Error values a cell can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellError {
    Null,
    Div0,
    Value,
    Ref,
    Name,
    Num,
    Na,
}

/// Error, BOOLERR code, display text
const CELL_ERRORS: [(CellError, u8, &str); 7] = [
    (CellError::Null, 0x00, "#NULL!"),
    (CellError::Div0, 0x07, "#DIV/0!"),
    (CellError::Value, 0x0F, "#VALUE!"),
    (CellError::Ref, 0x17, "#REF!"),
    (CellError::Name, 0x1D, "#NAME?"),
    (CellError::Num, 0x24, "#NUM!"),
    (CellError::Na, 0x2A, "#N/A"),
];

impl CellError {
    fn entry(self) -> (CellError, u8, &'static str) {
        CELL_ERRORS[self as usize]
    }

    pub fn as_str(&self) -> &'static str {
        self.entry().2
    }

    /// Code stored in BOOLERR and FORMULA records
    pub fn code(&self) -> u8 {
        self.entry().1
    }

    pub fn from_code(code: u8) -> Option<Self> {
        CELL_ERRORS
            .iter()
            .find(|(_, c, _)| *c == code)
            .map(|(e, _, _)| *e)
    }
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cell: its value and the cell format it is displayed with
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    /// Value
    pub value: CellValue,
    /// Cell format
    pub style: StyleId,
}

impl Cell {
    /// Create a cell with a value and style
    pub fn new(value: CellValue, style: StyleId) -> Self {
        Self { value, style }
    }
}
