//! Error types for xlsbook

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by sessions and workbooks
#[derive(Debug, Error)]
pub enum Error {
    /// Document model error (capacity, bounds, invalid names or formats)
    #[error(transparent)]
    Core(#[from] xlsbook_core::Error),

    /// Error while reading or writing the binary format
    #[error(transparent)]
    Biff(#[from] xlsbook_biff::BiffError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No sheet with this name
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// The session has no sheet to work on
    #[error("The document has no sheets")]
    NoSheet,
}

impl Error {
    /// Whether this error reports an exhausted font, style or format table
    pub fn is_capacity_error(&self) -> bool {
        matches!(self, Error::Core(e) if e.is_capacity_error())
    }
}
