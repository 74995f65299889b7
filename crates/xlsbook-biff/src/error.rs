//! BIFF error types

use thiserror::Error;

/// Result type for BIFF operations
pub type BiffResult<T> = std::result::Result<T, BiffError>;

/// Errors that can occur during BIFF reading/writing
#[derive(Debug, Error)]
pub enum BiffError {
    /// IO error (also covers CFB errors which use std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid file format
    #[error("Invalid XLS format: {0}")]
    InvalidFormat(String),

    /// Unsupported version
    #[error("Unsupported XLS version: {0}")]
    UnsupportedVersion(String),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] xlsbook_core::Error),
}
