//! Prelude module - common imports for xlsbook users
//!
//! ```rust
//! use xlsbook::prelude::*;
//! ```

pub use crate::{
    // Formatting requests
    BorderType,
    CellAlignment,
    CellStyle,
    // Cell types
    CellValue,
    Color,
    // Main types
    Document,
    // Extension traits
    DocumentExt,
    // Error types
    Error,
    ExcelWorkbook,
    FontFamily,
    Result,
    Session,
    SessionOptions,
    StyleId,
};
