//! # xlsbook
//!
//! Write and read Excel 97-2003 (`.xls`) workbooks through a small
//! coordinate-based API.
//!
//! The format caps the number of font and cell format records a workbook may
//! hold. xlsbook interns both: every formatting request is reduced to a
//! canonical key, and equal requests share one record no matter how many
//! cells use it.
//!
//! - [`ExcelWorkbook`] - file-bound workbook with 1-based Excel coordinates
//! - [`Session`] - the same operations on a 0-based row cursor
//! - [`CellStyle`] - a formatting request
//! - [`FormattingContext`] - the font and style caches behind `apply`
//!
//! ## Example
//!
//! ```rust
//! use xlsbook::prelude::*;
//!
//! let mut session = Session::create(SessionOptions::default()).unwrap();
//! let header = CellStyle::new().with_bold(true).with_size(12);
//!
//! session.write_text(0, "Region").unwrap();
//! session.write_text(1, "Sales").unwrap();
//! let a = session.apply_style(0, &header).unwrap();
//! let b = session.apply_style(1, &header).unwrap();
//! assert_eq!(a, b);
//!
//! let mut bytes = Vec::new();
//! session.save(&mut bytes).unwrap();
//! ```

pub mod applier;
pub mod descriptor;
pub mod error;
pub mod fingerprint;
pub mod font_cache;
pub mod prelude;
pub mod session;
pub mod style_cache;
pub mod workbook;

pub use applier::FormattingContext;
pub use descriptor::{BorderType, CellAlignment, CellStyle, FontFamily};
pub use error::{Error, Result};
pub use fingerprint::StyleFingerprint;
pub use font_cache::FontCache;
pub use session::{Session, SessionOptions};
pub use style_cache::StyleCache;
pub use workbook::ExcelWorkbook;

// Re-export core types
pub use xlsbook_core::{
    CellError, CellValue, Color, Document, DocumentSettings, FontId, FontRecord, Limits, Sheet,
    StyleId, StyleRecord, MAX_COLS, MAX_ROWS,
};

// Re-export I/O types
pub use xlsbook_biff::{BiffError, BiffReader, BiffWriter};

use std::path::Path;

/// Extension trait for Document to add file I/O
pub trait DocumentExt: Sized {
    /// Read a document from an `.xls` file
    fn open<P: AsRef<Path>>(path: P) -> Result<Self>;

    /// Write the document to an `.xls` file
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()>;
}

impl DocumentExt for Document {
    fn open<P: AsRef<Path>>(path: P) -> Result<Document> {
        Ok(BiffReader::read_file(path)?)
    }

    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        Ok(BiffWriter::write_file(self, path)?)
    }
}
