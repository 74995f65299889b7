//! # xlsbook-biff
//!
//! Reader and writer for the Excel 97-2003 binary format (BIFF8, `.xls`).
//!
//! [`BiffReader`] loads a compound file into a [`xlsbook_core::Document`];
//! [`BiffWriter`] serializes one back. Fonts, XF records and custom number
//! formats are written exactly as the document holds them, so ids stay
//! stable across a save and reload.

pub mod biff;
pub mod error;
pub mod reader;
pub mod styles;
pub mod writer;

pub use error::{BiffError, BiffResult};
pub use reader::BiffReader;
pub use writer::BiffWriter;
