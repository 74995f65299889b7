//! File-bound workbook with Excel coordinates
//!
//! [`ExcelWorkbook`] wraps a [`Session`] and counts rows and columns from 1,
//! the way they appear in Excel: A1 is `(1, 1)`. Whenever a method takes
//! both, the column comes first.
//!
//! Cells are reached in one of two ways. Move the row cursor with
//! [`next_row`](ExcelWorkbook::next_row) or
//! [`select_row`](ExcelWorkbook::select_row) and pass only a column, or use
//! the `*_at` variants with both coordinates; those leave the cursor where
//! it was.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use xlsbook_core::{CellValue, StyleId};

use crate::descriptor::CellStyle;
use crate::session::{Session, SessionOptions};
use crate::Result;

/// Value returned by [`ExcelWorkbook::read_number`] for cells without a number
pub const NO_NUMBER: f64 = -1.0;

/// Format applied by [`ExcelWorkbook::write_percentage`]
pub const PERCENT_FORMAT: &str = "0%";

/// Value returned by [`ExcelWorkbook::read_date`] for cells without a date:
/// 0001-01-01 00:00
pub fn no_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .unwrap_or(NaiveDate::MIN)
        .and_time(NaiveTime::MIN)
}

/// A workbook bound to a path on the local file system
///
/// ```rust,no_run
/// use xlsbook::{CellStyle, ExcelWorkbook};
///
/// let mut wb = ExcelWorkbook::create("report.xls")?;
/// wb.write_text(1, "Total")?;
/// wb.apply_formatting(1, &CellStyle::new().with_bold(true))?;
/// wb.write_percentage(2, 12.5)?;
/// wb.save()?;
/// # Ok::<(), xlsbook::Error>(())
/// ```
#[derive(Debug)]
pub struct ExcelWorkbook {
    session: Session,
    path: PathBuf,
}

impl ExcelWorkbook {
    /// Create a workbook with one sheet named `Sheet1` at `path`
    ///
    /// The file is written right away, replacing any file already there.
    /// Row 1 is selected.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::create_with(path, SessionOptions::default())
    }

    /// Create a workbook with custom options
    pub fn create_with<P: AsRef<Path>>(path: P, options: SessionOptions) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let session = Session::create(options)?;
        session.save_file(&path)?;
        let mut wb = Self { session, path };
        wb.select_row(1)?;
        Ok(wb)
    }

    /// Open an existing workbook; row 1 of the first sheet is selected
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let session = Session::open_file(&path)?;
        let mut wb = Self { session, path };
        wb.select_row(1)?;
        Ok(wb)
    }

    /// Save to the path given to `create` or `open`
    pub fn save(&self) -> Result<()> {
        self.session.save_file(&self.path)
    }

    /// Save to another path; the workbook stays bound to its original path
    pub fn save_as<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.session.save_file(path)
    }

    /// Path the workbook is bound to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The underlying 0-based session
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The underlying 0-based session, mutably
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    // === Navigation ===

    /// Select the next row
    pub fn next_row(&mut self) -> Result<()> {
        self.session.next_row()
    }

    /// Select a row (1-based)
    pub fn select_row(&mut self, row: u32) -> Result<()> {
        self.session.select_row(zero_based_row(row)?)
    }

    /// The selected row (1-based)
    pub fn current_row(&self) -> u32 {
        self.session.current_row() + 1
    }

    /// Whether the next row is within the sheet
    pub fn has_more_rows(&self) -> bool {
        self.session.has_more_rows()
    }

    /// Whether the next row is within the sheet and the current row is at
    /// most `max_rows`
    pub fn has_more_rows_within(&self, max_rows: u32) -> bool {
        self.has_more_rows() && self.current_row() <= max_rows
    }

    /// Run `f` with `row` selected, then select the previous row again
    fn at_row<T>(&mut self, row: u32, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let previous = self.session.current_row();
        self.select_row(row)?;
        let result = f(self);
        self.session.select_row(previous)?;
        result
    }

    // === Grouping ===

    /// Group rows `first..=last` (1-based) and collapse them
    pub fn group_rows(&mut self, first: u32, last: u32) -> Result<()> {
        self.session
            .group_rows(zero_based_row(first)?, zero_based_row(last)?)
    }

    /// Group columns `first..=last` (1-based) and collapse them
    pub fn group_cols(&mut self, first: u16, last: u16) -> Result<()> {
        self.session
            .group_cols(zero_based_col(first)?, zero_based_col(last)?)
    }

    // === Writing ===

    /// Write text into column `col` of the selected row
    pub fn write_text(&mut self, col: u16, value: &str) -> Result<()> {
        self.session.write_text(zero_based_col(col)?, value)
    }

    /// Write a number into column `col` of the selected row
    pub fn write_number(&mut self, col: u16, value: f64) -> Result<()> {
        self.session.write_number(zero_based_col(col)?, value)
    }

    /// Write a percentage into column `col` of the selected row
    ///
    /// `value` is in percent: 50.0 is stored as 0.5 and shown as `50%`.
    pub fn write_percentage(&mut self, col: u16, value: f64) -> Result<()> {
        self.write_number(col, value / 100.0)?;
        self.apply_formatting(col, &CellStyle::with_format(PERCENT_FORMAT))?;
        Ok(())
    }

    /// Write text at `col`, `row`
    pub fn write_text_at(&mut self, col: u16, row: u32, value: &str) -> Result<()> {
        self.at_row(row, |wb| wb.write_text(col, value))
    }

    /// Write a number at `col`, `row`
    pub fn write_number_at(&mut self, col: u16, row: u32, value: f64) -> Result<()> {
        self.at_row(row, |wb| wb.write_number(col, value))
    }

    /// Write a percentage at `col`, `row`
    pub fn write_percentage_at(&mut self, col: u16, row: u32, value: f64) -> Result<()> {
        self.at_row(row, |wb| wb.write_percentage(col, value))
    }

    // === Reading ===

    fn value(&self, col: u16, row: Option<u32>) -> Option<CellValue> {
        let col = col.checked_sub(1)?;
        let row = match row {
            Some(r) => r.checked_sub(1)?,
            None => self.session.current_row(),
        };
        self.session.read_cell_at(row, col)
    }

    /// Number in column `col` of the selected row, or -1
    ///
    /// Text that parses as a number counts as one.
    pub fn read_number(&self, col: u16) -> f64 {
        self.read_number_or(col, NO_NUMBER)
    }

    /// Number in column `col` of the selected row, or `default`
    pub fn read_number_or(&self, col: u16, default: f64) -> f64 {
        number_of(self.value(col, None)).unwrap_or(default)
    }

    /// Number at `col`, `row`, or -1
    pub fn read_number_at(&self, col: u16, row: u32) -> f64 {
        number_of(self.value(col, Some(row))).unwrap_or(NO_NUMBER)
    }

    /// Date in column `col` of the selected row, or [`no_date`]
    ///
    /// Numbers are read as date serials, text is parsed.
    pub fn read_date(&self, col: u16) -> NaiveDateTime {
        self.read_date_or(col, no_date())
    }

    /// Date in column `col` of the selected row, or `default`
    pub fn read_date_or(&self, col: u16, default: NaiveDateTime) -> NaiveDateTime {
        col.checked_sub(1)
            .and_then(|c| self.session.read_cell_as_date(c))
            .unwrap_or(default)
    }

    /// Date at `col`, `row`, or [`no_date`]
    pub fn read_date_at(&self, col: u16, row: u32) -> NaiveDateTime {
        let date = match (col.checked_sub(1), row.checked_sub(1)) {
            (Some(c), Some(r)) => self.session.read_cell_as_date_at(r, c),
            _ => None,
        };
        date.unwrap_or_else(no_date)
    }

    /// Text of column `col` of the selected row; empty for empty cells
    ///
    /// Numbers and booleans are rendered as text.
    pub fn read_text(&self, col: u16) -> String {
        self.read_text_or(col, "")
    }

    /// Text of column `col` of the selected row, or `default`
    pub fn read_text_or(&self, col: u16, default: &str) -> String {
        self.value(col, None)
            .map_or_else(|| default.to_string(), |v| v.to_string())
    }

    /// Text at `col`, `row`; empty for empty cells
    pub fn read_text_at(&self, col: u16, row: u32) -> String {
        self.value(col, Some(row))
            .map(|v| v.to_string())
            .unwrap_or_default()
    }

    // === Formatting ===

    /// Format column `col` of the selected row
    pub fn apply_formatting(&mut self, col: u16, style: &CellStyle) -> Result<StyleId> {
        self.session.apply_style(zero_based_col(col)?, style)
    }

    /// Format the cell at `col`, `row`
    pub fn apply_formatting_at(
        &mut self,
        col: u16,
        row: u32,
        style: &CellStyle,
    ) -> Result<StyleId> {
        self.at_row(row, |wb| wb.apply_formatting(col, style))
    }
}

fn zero_based_row(row: u32) -> Result<u32> {
    row.checked_sub(1)
        .ok_or_else(|| xlsbook_core::Error::other("row numbers start at 1").into())
}

fn zero_based_col(col: u16) -> Result<u16> {
    col.checked_sub(1)
        .ok_or_else(|| xlsbook_core::Error::other("column numbers start at 1").into())
}

fn number_of(value: Option<CellValue>) -> Option<f64> {
    match value? {
        CellValue::Number(n) => Some(n),
        CellValue::Text(s) => s.trim().parse().ok(),
        _ => None,
    }
}
