//! Row-cursor access to a document, 0-based

use std::io::{Read, Seek, Write};
use std::path::Path;

use chrono::NaiveDateTime;
use tracing::{debug, info};
use xlsbook_biff::{BiffReader, BiffWriter};
use xlsbook_core::date::{parse_date_text, serial_to_datetime};
use xlsbook_core::{CellValue, Document, DocumentSettings, Sheet, StyleId, MAX_ROWS};

use crate::applier::FormattingContext;
use crate::descriptor::CellStyle;
use crate::{Error, Result};

/// Options for [`Session::create`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// Settings of the new document
    pub settings: DocumentSettings,
    /// Name of the sheet a new document starts with
    pub sheet_name: String,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            settings: DocumentSettings::default(),
            sheet_name: "Sheet1".to_string(),
        }
    }
}

impl SessionOptions {
    /// Create default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document settings
    pub fn with_settings(mut self, settings: DocumentSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the name of the first sheet
    pub fn with_sheet_name<S: Into<String>>(mut self, name: S) -> Self {
        self.sheet_name = name.into();
        self
    }
}

/// A document with a selected sheet and row
///
/// Cells are addressed by column on the selected row; rows and columns are
/// 0-based. The session owns the [`FormattingContext`] of its document, so
/// every [`apply_style`](Session::apply_style) call shares font and format
/// records with the calls before it.
#[derive(Debug)]
pub struct Session {
    doc: Document,
    sheet: usize,
    row: u32,
    formatting: FormattingContext,
}

impl Session {
    /// Create a document with one sheet and select its first row
    pub fn create(options: SessionOptions) -> Result<Self> {
        let mut doc = Document::with_settings(options.settings);
        let sheet = doc.create_sheet(&options.sheet_name)?;
        debug!(sheet = %options.sheet_name, "created document");
        Ok(Self::from_document(doc, sheet))
    }

    /// Read a document and select the first row of its first sheet
    pub fn open<R: Read + Seek>(reader: R) -> Result<Self> {
        Self::with_document(BiffReader::read(reader)?)
    }

    /// Read a document from a file
    pub fn open_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let session = Self::with_document(BiffReader::read_file(path)?)?;
        info!(path = %path.display(), sheets = session.doc.sheet_count(), "opened workbook");
        Ok(session)
    }

    /// Take over an existing document, selecting its first sheet
    pub fn with_document(doc: Document) -> Result<Self> {
        if doc.sheet_count() == 0 {
            return Err(Error::NoSheet);
        }
        Ok(Self::from_document(doc, 0))
    }

    fn from_document(doc: Document, sheet: usize) -> Self {
        let formatting = FormattingContext::new(&doc);
        Self {
            doc,
            sheet,
            row: 0,
            formatting,
        }
    }

    /// Write the document
    pub fn save<W: Write>(&self, writer: W) -> Result<()> {
        BiffWriter::write(&self.doc, writer)?;
        Ok(())
    }

    /// Write the document to a file, replacing it if present
    pub fn save_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        BiffWriter::write_file(&self.doc, path)?;
        info!(path = %path.display(), "saved workbook");
        Ok(())
    }

    /// The document
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Give up the session and keep the document
    pub fn into_document(self) -> Document {
        self.doc
    }

    /// The formatting caches of this document
    pub fn formatting(&self) -> &FormattingContext {
        &self.formatting
    }

    // === Sheets ===

    /// Add a sheet and select it
    ///
    /// The current row number is kept.
    pub fn create_sheet(&mut self, name: &str) -> Result<usize> {
        self.sheet = self.doc.create_sheet(name)?;
        Ok(self.sheet)
    }

    /// Select a sheet by name (case-insensitive)
    pub fn select_sheet(&mut self, name: &str) -> Result<()> {
        self.sheet = self
            .doc
            .sheet_index(name)
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))?;
        Ok(())
    }

    /// Whether a sheet with this name exists
    pub fn sheet_exists(&self, name: &str) -> bool {
        self.doc.sheet_exists(name)
    }

    /// Index of the selected sheet
    pub fn current_sheet(&self) -> usize {
        self.sheet
    }

    /// The selected sheet
    pub fn sheet(&self) -> Result<&Sheet> {
        self.doc.sheet(self.sheet).ok_or(Error::NoSheet)
    }

    fn sheet_mut(&mut self) -> Result<&mut Sheet> {
        self.doc.sheet_mut(self.sheet).ok_or(Error::NoSheet)
    }

    // === Navigation ===

    /// Select a row
    pub fn select_row(&mut self, row: u32) -> Result<()> {
        if row >= MAX_ROWS {
            return Err(xlsbook_core::Error::RowOutOfBounds(row, MAX_ROWS - 1).into());
        }
        self.row = row;
        Ok(())
    }

    /// Select the row below the current one
    pub fn next_row(&mut self) -> Result<()> {
        self.select_row(self.row + 1)
    }

    /// Whether the row below the current one exists in the format
    pub fn has_more_rows(&self) -> bool {
        self.row + 1 < MAX_ROWS
    }

    /// The selected row
    pub fn current_row(&self) -> u32 {
        self.row
    }

    // === Grouping ===

    /// Group rows `first..=last` one level deeper and collapse the group
    pub fn group_rows(&mut self, first: u32, last: u32) -> Result<()> {
        let sheet = self.sheet_mut()?;
        sheet.group_rows(first, last)?;
        sheet.set_row_group_collapsed(first.min(last), true)?;
        Ok(())
    }

    /// Group columns `first..=last` one level deeper and collapse the group
    pub fn group_cols(&mut self, first: u16, last: u16) -> Result<()> {
        let sheet = self.sheet_mut()?;
        sheet.group_columns(first, last)?;
        sheet.set_column_group_collapsed(first.min(last), true)?;
        Ok(())
    }

    // === Cells ===

    /// Store a value in column `col` of the selected row, keeping the
    /// cell's format
    pub fn write_value<V: Into<CellValue>>(&mut self, col: u16, value: V) -> Result<()> {
        let row = self.row;
        self.sheet_mut()?.set_value(row, col, value)?;
        Ok(())
    }

    /// Store text
    pub fn write_text(&mut self, col: u16, value: &str) -> Result<()> {
        self.write_value(col, value)
    }

    /// Store a number
    pub fn write_number(&mut self, col: u16, value: f64) -> Result<()> {
        self.write_value(col, value)
    }

    /// Store a boolean
    pub fn write_bool(&mut self, col: u16, value: bool) -> Result<()> {
        self.write_value(col, value)
    }

    /// Value in column `col` of the selected row
    ///
    /// Missing and blank cells read as `None`.
    pub fn read_cell(&self, col: u16) -> Option<CellValue> {
        self.read_cell_at(self.row, col)
    }

    /// Value at `row`, `col` of the selected sheet, without moving the cursor
    pub fn read_cell_at(&self, row: u32, col: u16) -> Option<CellValue> {
        self.doc
            .sheet(self.sheet)?
            .value(row, col)
            .filter(|v| !v.is_blank())
            .cloned()
    }

    /// Value in column `col` of the selected row as a date
    ///
    /// Numbers are date serials in the document's date system; text is
    /// parsed from common ISO and US forms. Anything else reads as `None`.
    pub fn read_cell_as_date(&self, col: u16) -> Option<NaiveDateTime> {
        self.read_cell_as_date_at(self.row, col)
    }

    /// Date at `row`, `col` of the selected sheet, without moving the cursor
    pub fn read_cell_as_date_at(&self, row: u32, col: u16) -> Option<NaiveDateTime> {
        match self.read_cell_at(row, col)? {
            CellValue::Number(serial) => {
                serial_to_datetime(serial, self.doc.settings().date_1904)
            }
            CellValue::Text(text) => parse_date_text(&text),
            _ => None,
        }
    }

    // === Formatting ===

    /// Format column `col` of the selected row
    ///
    /// Equal descriptors share one format record; see [`FormattingContext`].
    pub fn apply_style(&mut self, col: u16, style: &CellStyle) -> Result<StyleId> {
        self.formatting
            .apply(&mut self.doc, self.sheet, self.row, col, style)
    }

    /// Copy a format record of another document into this one
    pub fn import_style(&mut self, source: &Document, id: StyleId) -> Result<StyleId> {
        self.formatting.import_style(&mut self.doc, source, id)
    }
}
