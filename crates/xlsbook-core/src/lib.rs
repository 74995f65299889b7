//! # xlsbook-core
//!
//! In-memory model of an Excel 97-2003 (BIFF8) workbook.
//!
//! This crate provides the types the codec and the interning layer share:
//! - [`Document`] - fonts, cell formats (XF), number formats, palette, sheets
//! - [`Sheet`], [`Row`], [`Cell`] - sparse cell storage with outline grouping
//! - [`FontRecord`], [`StyleRecord`] - the records BIFF8 caps in number
//! - [`DocumentSettings`] - date system and record table limits
//!
//! ## Example
//!
//! ```rust
//! use xlsbook_core::{Document, FontRecord, StyleRecord};
//!
//! let mut doc = Document::new();
//! let sheet = doc.create_sheet("Sheet1").unwrap();
//!
//! let font = doc.create_font(FontRecord::new("Arial", 12).with_bold(true)).unwrap();
//! let mut staged = StyleRecord::new();
//! staged.font = font;
//! let style = doc.create_style_from(&staged).unwrap();
//!
//! let sheet = doc.sheet_mut(sheet).unwrap();
//! sheet.set_value(0, 0, "Total").unwrap();
//! sheet.set_style(0, 0, style).unwrap();
//! ```

pub mod cell;
pub mod column;
pub mod date;
pub mod document;
pub mod error;
pub mod row;
pub mod settings;
pub mod sheet;
pub mod style;

pub use cell::{Cell, CellError, CellValue};
pub use column::ColumnInfo;
pub use document::Document;
pub use error::{Error, Result};
pub use row::Row;
pub use settings::{DocumentSettings, Limits};
pub use sheet::Sheet;

// Re-export all style types for convenience
pub use style::{
    BorderEdge, BorderLineStyle, Borders, Color, Escapement, Fill, FontId, FontRecord,
    HorizontalAlignment, NamedStyle, Palette, PatternType, StyleId, StyleRecord, Underline,
    VerticalAlignment, XfKind,
};

/// Maximum number of rows in a BIFF8 worksheet
pub const MAX_ROWS: u32 = 65_536;

/// Maximum number of columns in a BIFF8 worksheet
pub const MAX_COLS: u16 = 256;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Deepest row/column outline level
pub const MAX_OUTLINE_LEVEL: u8 = 7;
