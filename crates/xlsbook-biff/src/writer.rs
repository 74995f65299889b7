//! XLS (BIFF8) writer.
//!
//! Serializes a [`Document`] into a `Workbook` stream inside a Compound File
//! Binary container. The font, XF, FORMAT and STYLE tables are written in
//! document order, so every id a cell holds is the id it gets in the file.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Cursor, Write};
use std::path::Path;

use xlsbook_core::{CellValue, Document, Sheet};

use crate::biff::records;
use crate::biff::strings::{write_short_string, write_sst};
use crate::biff::write_record;
use crate::error::BiffResult;
use crate::styles;

/// Smallest Workbook stream Excel accepts; shorter streams are zero-padded
const MIN_STREAM_LEN: usize = 4096;

/// Column width written when a column has no custom width (8.43 characters)
const DEFAULT_COLUMN_WIDTH: u16 = 0x0924;

/// Row height written when a row has no custom height (12.75 pt)
const DEFAULT_ROW_HEIGHT: u16 = 0x00FF;

/// XLS file writer
pub struct BiffWriter;

impl BiffWriter {
    /// Write a document to a file path
    pub fn write_file<P: AsRef<Path>>(doc: &Document, path: P) -> BiffResult<()> {
        let file = File::create(path)?;
        Self::write(doc, file)
    }

    /// Write a document to a writer
    pub fn write<W: Write>(doc: &Document, mut writer: W) -> BiffResult<()> {
        let bytes = Self::write_to_vec(doc)?;
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(())
    }

    /// Serialize a document into the bytes of an `.xls` file
    pub fn write_to_vec(doc: &Document) -> BiffResult<Vec<u8>> {
        let stream = Self::workbook_stream(doc);

        let mut compound = cfb::CompoundFile::create(Cursor::new(Vec::new()))?;
        {
            let mut workbook = compound.create_stream("/Workbook")?;
            workbook.write_all(&stream)?;
        }
        compound.flush()?;
        Ok(compound.into_inner().into_inner())
    }

    /// Build the BIFF8 `Workbook` stream for a document
    pub fn workbook_stream(doc: &Document) -> Vec<u8> {
        let sst = SharedStrings::collect(doc);
        let mut out = Vec::new();

        // Write workbook globals
        write_record(&mut out, records::BOF, &bof(records::BOF_WORKBOOK_GLOBALS));
        write_record(&mut out, records::CODEPAGE, &records::CODEPAGE_UTF16.to_le_bytes());
        write_record(&mut out, records::WINDOW1, &window1());
        let date_mode = doc.settings().date_1904 as u16;
        write_record(&mut out, records::DATEMODE, &date_mode.to_le_bytes());

        for font in doc.fonts() {
            write_record(&mut out, records::FONT, &styles::write_font(font));
        }
        for (code, pattern) in doc.custom_formats() {
            write_record(&mut out, records::FORMAT, &styles::write_format(*code, pattern));
        }
        for xf in doc.styles() {
            write_record(&mut out, records::XF, &styles::write_xf(xf));
        }
        for style in doc.named_styles() {
            write_record(&mut out, records::STYLE, &styles::write_style(style));
        }
        if !doc.palette().is_default() {
            let body = styles::write_palette(doc.palette().colors());
            write_record(&mut out, records::PALETTE, &body);
        }

        // BOUNDSHEET positions are patched once the sheet offsets are known
        let mut position_slots = Vec::with_capacity(doc.sheet_count());
        for sheet in doc.sheets() {
            let mut body = vec![0u8; 6];
            write_short_string(&mut body, sheet.name());
            position_slots.push(out.len() + 4);
            write_record(&mut out, records::BOUNDSHEET, &body);
        }

        write_sst(&mut out, &sst.strings, sst.total_refs);
        write_record(&mut out, records::EOF, &[]);

        // Write worksheets
        for (index, sheet) in doc.sheets().iter().enumerate() {
            let position = out.len() as u32;
            out[position_slots[index]..position_slots[index] + 4]
                .copy_from_slice(&position.to_le_bytes());
            write_sheet(&mut out, doc, sheet, index == 0, &sst);
        }

        if out.len() < MIN_STREAM_LEN {
            out.resize(MIN_STREAM_LEN, 0);
        }

        log::debug!(
            "wrote {} sheets, {} fonts, {} XFs, {} shared strings ({} bytes)",
            doc.sheet_count(),
            doc.font_count(),
            doc.style_count(),
            sst.strings.len(),
            out.len()
        );

        out
    }
}

/// Unique cell strings in first-use order
struct SharedStrings<'a> {
    strings: Vec<String>,
    index: HashMap<&'a str, u32>,
    total_refs: u32,
}

impl<'a> SharedStrings<'a> {
    fn collect(doc: &'a Document) -> Self {
        let mut sst = SharedStrings {
            strings: Vec::new(),
            index: HashMap::new(),
            total_refs: 0,
        };
        for sheet in doc.sheets() {
            for (_, row) in sheet.rows() {
                for cell in row.cells.values() {
                    if let CellValue::Text(text) = &cell.value {
                        sst.total_refs += 1;
                        if !sst.index.contains_key(text.as_str()) {
                            sst.index.insert(text.as_str(), sst.strings.len() as u32);
                            sst.strings.push(text.clone());
                        }
                    }
                }
            }
        }
        sst
    }

    fn get(&self, text: &str) -> u32 {
        self.index.get(text).copied().unwrap_or(0)
    }
}

fn bof(substream: u16) -> Vec<u8> {
    let mut body = Vec::with_capacity(16);
    body.extend_from_slice(&records::BIFF8_VERSION.to_le_bytes());
    body.extend_from_slice(&substream.to_le_bytes());
    body.extend_from_slice(&0x0DBBu16.to_le_bytes()); // build
    body.extend_from_slice(&0x07CCu16.to_le_bytes()); // year
    body.extend_from_slice(&0u32.to_le_bytes()); // file history
    body.extend_from_slice(&6u32.to_le_bytes()); // lowest BIFF version
    body
}

fn window1() -> Vec<u8> {
    [0u16, 0, 0x3000, 0x1E00, 0x0038, 0, 0, 1, 0x0258]
        .iter()
        .flat_map(|v| v.to_le_bytes())
        .collect()
}

fn write_sheet(
    out: &mut Vec<u8>,
    doc: &Document,
    sheet: &Sheet,
    first: bool,
    sst: &SharedStrings<'_>,
) {
    let default_xf = doc.default_style_id().0;

    write_record(out, records::BOF, &bof(records::BOF_WORKSHEET));
    write_record(out, records::GUTS, &guts(sheet));
    write_record(out, records::WSBOOL, &0x04C1u16.to_le_bytes());
    write_record(out, records::DIMENSION, &dimension(sheet));

    for (col, info) in sheet.columns().filter(|(_, c)| c.has_custom_settings()) {
        let mut options = (info.outline_level as u16 & 0x07) << 8;
        if info.hidden {
            options |= 0x0001;
        }
        if info.width.is_some() {
            options |= 0x0002;
        }
        if info.collapsed {
            options |= 0x1000;
        }
        let mut body = Vec::with_capacity(12);
        body.extend_from_slice(&col.to_le_bytes());
        body.extend_from_slice(&col.to_le_bytes());
        body.extend_from_slice(&info.width.unwrap_or(DEFAULT_COLUMN_WIDTH).to_le_bytes());
        body.extend_from_slice(&default_xf.to_le_bytes());
        body.extend_from_slice(&options.to_le_bytes());
        body.extend_from_slice(&0u16.to_le_bytes());
        write_record(out, records::COLINFO, &body);
    }

    for (index, row) in sheet.rows() {
        if row.cells.is_empty() && !row.has_custom_settings() {
            continue;
        }
        let (first_col, end_col) = row.column_span().unwrap_or((0, 0));
        let mut options =
            (row.outline_level as u32 & 0x07) | 0x0100 | ((default_xf as u32) << 16);
        if row.collapsed {
            options |= 0x10;
        }
        if row.hidden {
            options |= 0x20;
        }
        if row.height.is_some() {
            options |= 0x40;
        }
        let mut body = Vec::with_capacity(16);
        body.extend_from_slice(&(index as u16).to_le_bytes());
        body.extend_from_slice(&first_col.to_le_bytes());
        body.extend_from_slice(&end_col.to_le_bytes());
        body.extend_from_slice(&row.height.unwrap_or(DEFAULT_ROW_HEIGHT).to_le_bytes());
        body.extend_from_slice(&[0u8; 4]);
        body.extend_from_slice(&options.to_le_bytes());
        write_record(out, records::ROW, &body);
    }

    for (index, row) in sheet.rows() {
        for (&col, cell) in &row.cells {
            let mut body = Vec::with_capacity(14);
            body.extend_from_slice(&(index as u16).to_le_bytes());
            body.extend_from_slice(&col.to_le_bytes());
            body.extend_from_slice(&cell.style.0.to_le_bytes());
            let record_type = match &cell.value {
                CellValue::Blank => records::BLANK,
                CellValue::Number(n) => {
                    body.extend_from_slice(&n.to_le_bytes());
                    records::NUMBER
                }
                CellValue::Text(text) => {
                    body.extend_from_slice(&sst.get(text).to_le_bytes());
                    records::LABELSST
                }
                CellValue::Boolean(b) => {
                    body.extend_from_slice(&[*b as u8, 0]);
                    records::BOOLERR
                }
                CellValue::Error(e) => {
                    body.extend_from_slice(&[e.code(), 1]);
                    records::BOOLERR
                }
            };
            write_record(out, record_type, &body);
        }
    }

    // grbit: gridlines, headers, zeros, default colors, outline symbols;
    // the first sheet is also selected and active
    let grbit: u16 = if first { 0x06B6 } else { 0x00B6 };
    let mut window2 = Vec::with_capacity(18);
    window2.extend_from_slice(&grbit.to_le_bytes());
    window2.extend_from_slice(&[0u8; 4]); // top row, left column
    window2.extend_from_slice(&0x0040u16.to_le_bytes()); // gridline color
    window2.extend_from_slice(&[0u8; 10]);
    write_record(out, records::WINDOW2, &window2);

    write_record(out, records::EOF, &[]);
}

/// GUTS: row gutter(2) + column gutter(2) + row levels(2) + column levels(2)
fn guts(sheet: &Sheet) -> Vec<u8> {
    let (row_level, col_level) = sheet.max_outline_levels();
    let gutter = |level: u8| if level == 0 { 0 } else { 17 + 12 * level as u16 };
    let levels = |level: u8| if level == 0 { 0 } else { level as u16 + 1 };

    let mut body = Vec::with_capacity(8);
    body.extend_from_slice(&gutter(row_level).to_le_bytes());
    body.extend_from_slice(&gutter(col_level).to_le_bytes());
    body.extend_from_slice(&levels(row_level).to_le_bytes());
    body.extend_from_slice(&levels(col_level).to_le_bytes());
    body
}

/// DIMENSION: first row(4) + last row+1(4) + first col(2) + last col+1(2) + reserved(2)
fn dimension(sheet: &Sheet) -> Vec<u8> {
    let (r0, c0, r1, c1) = match sheet.used_range() {
        Some((r0, c0, r1, c1)) => (r0, c0, r1 + 1, c1 + 1),
        None => (0, 0, 0, 0),
    };
    let mut body = Vec::with_capacity(14);
    body.extend_from_slice(&r0.to_le_bytes());
    body.extend_from_slice(&r1.to_le_bytes());
    body.extend_from_slice(&c0.to_le_bytes());
    body.extend_from_slice(&c1.to_le_bytes());
    body.extend_from_slice(&0u16.to_le_bytes());
    body
}
