//! Error types for xlsbook-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in xlsbook-core
#[derive(Debug, Error)]
pub enum Error {
    /// Row index out of bounds
    #[error("Row index {0} out of bounds (max: {1})")]
    RowOutOfBounds(u32, u32),

    /// Column index out of bounds
    #[error("Column index {0} out of bounds (max: {1})")]
    ColumnOutOfBounds(u32, u16),

    /// Sheet index out of bounds
    #[error("Sheet index {0} out of bounds (count: {1})")]
    SheetOutOfBounds(usize, usize),

    /// Sheet not found by name
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Invalid sheet name
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// Duplicate sheet name
    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),

    /// The document already holds the maximum number of font records
    #[error("Font limit exceeded: a document may hold at most {limit} fonts")]
    FontLimitExceeded { limit: usize },

    /// The document already holds the maximum number of cell format (XF) records
    #[error("Style limit exceeded: a document may hold at most {limit} cell formats")]
    StyleLimitExceeded { limit: usize },

    /// The document already holds the maximum number of custom number formats
    #[error("Number format limit exceeded: a document may hold at most {limit} custom formats")]
    FormatLimitExceeded { limit: usize },

    /// Malformed number format pattern
    #[error("Invalid number format '{pattern}': {reason}")]
    InvalidNumberFormat { pattern: String, reason: String },

    /// Font id does not refer to a font record
    #[error("Invalid font index: {0}")]
    InvalidFontIndex(u16),

    /// Style id does not refer to a cell format record
    #[error("Invalid style index: {0}")]
    InvalidStyleIndex(u16),

    /// Palette index outside the customizable range
    #[error("Invalid palette index: {0} (expected 8..=63)")]
    InvalidPaletteIndex(u16),

    #[error("Invalid color '{0}': expected 'auto' or RRGGBB")]
    InvalidColor(String),

    /// Outline level would exceed the format maximum
    #[error("Outline level {0} exceeds the maximum of {1}")]
    OutlineLevelExceeded(u8, u8),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Whether this error reports an exhausted record table
    pub fn is_capacity_error(&self) -> bool {
        matches!(
            self,
            Error::FontLimitExceeded { .. }
                | Error::StyleLimitExceeded { .. }
                | Error::FormatLimitExceeded { .. }
        )
    }
}
