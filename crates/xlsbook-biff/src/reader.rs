//! XLS (BIFF8) reader
//!
//! Loads the `Workbook` stream of a Compound File Binary container into a
//! [`Document`]. Style records are loaded as they are stored, so font ids,
//! XF indexes and custom format codes in the document match the file.

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use xlsbook_core::{
    CellError, CellValue, Document, DocumentSettings, Sheet, StyleId, MAX_COLS, MAX_OUTLINE_LEVEL,
};

use crate::biff::parser::{read_f64, read_rk, read_u16, read_u32, read_u8};
use crate::biff::records;
use crate::biff::strings::{parse_sst, read_short_string, read_unicode_string};
use crate::biff::{self, BiffRecord};
use crate::error::{BiffError, BiffResult};
use crate::styles;

/// BOUNDSHEET sheet kind of a worksheet (charts and macro sheets are skipped)
const WORKSHEET_KIND: u8 = 0x00;

/// XLS file reader
pub struct BiffReader;

impl BiffReader {
    /// Read a workbook from a file
    pub fn read_file<P: AsRef<Path>>(path: P) -> BiffResult<Document> {
        Self::read(std::fs::File::open(path)?)
    }

    /// Read a workbook from any `Read + Seek` source
    pub fn read<R: Read + Seek>(reader: R) -> BiffResult<Document> {
        Self::read_with_settings(reader, DocumentSettings::default())
    }

    /// Read a workbook, giving the loaded document `settings`
    ///
    /// A DATEMODE record in the file overrides `settings.date_1904`.
    pub fn read_with_settings<R: Read + Seek>(
        reader: R,
        settings: DocumentSettings,
    ) -> BiffResult<Document> {
        let mut container = cfb::CompoundFile::open(reader)?;
        let name = ["/Workbook", "/Book"]
            .into_iter()
            .find(|name| container.exists(name))
            .ok_or_else(|| BiffError::InvalidFormat("container has no Workbook stream".into()))?;

        let mut bytes = Vec::new();
        container.open_stream(name)?.read_to_end(&mut bytes)?;

        let records = biff::read_all_records(&mut Cursor::new(bytes))?;
        Self::read_records(&records, settings)
    }

    /// Build a document from the records of a Workbook stream
    pub fn read_records(records: &[BiffRecord], settings: DocumentSettings) -> BiffResult<Document> {
        let mut substreams = Substreams::new(records);
        let globals = substreams
            .next()
            .ok_or_else(|| BiffError::InvalidFormat("empty Workbook stream".into()))?;

        let mut doc = Document::blank(settings);
        let Globals { strings, sheets } = Globals::load(globals, &mut doc)?;

        let default_xf = StyleId(xlsbook_core::document::DEFAULT_CELL_XF);
        if doc.style(default_xf).is_some() {
            doc.set_default_style(default_xf)?;
        }
        log::debug!(
            "globals: {} fonts, {} XFs, {} custom formats, {} shared strings",
            doc.font_count(),
            doc.style_count(),
            doc.custom_formats().len(),
            strings.len()
        );

        let style_count = doc.style_count();
        let default_style = doc.default_style_id();

        // Substreams follow the BOUNDSHEET records in order
        for (bound, body) in sheets.iter().zip(substreams) {
            if bound.kind != WORKSHEET_KIND {
                log::debug!("skipping sheet '{}' of kind {:#04x}", bound.name, bound.kind);
                continue;
            }
            let index = doc.create_sheet(&bound.name)?;
            let sheet = doc
                .sheet_mut(index)
                .ok_or_else(|| BiffError::Parse(format!("sheet '{}' was not created", bound.name)))?;
            let mut loader = SheetLoader {
                sheet,
                strings: &strings,
                style_count,
                default_style,
                awaiting_string: None,
            };
            loader.load(body)?;
        }

        Ok(doc)
    }
}

/// Splits a record list into substreams, each running from an outermost BOF
/// up to (not including) its EOF. Nested substreams such as embedded charts
/// stay inside their parent.
struct Substreams<'a> {
    rest: &'a [BiffRecord],
}

impl<'a> Substreams<'a> {
    fn new(records: &'a [BiffRecord]) -> Self {
        Self { rest: records }
    }
}

impl<'a> Iterator for Substreams<'a> {
    type Item = &'a [BiffRecord];

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.rest.iter().position(|r| r.record_type == records::BOF)?;
        let mut depth = 0usize;
        for (i, rec) in self.rest.iter().enumerate().skip(start) {
            match rec.record_type {
                records::BOF => depth += 1,
                records::EOF => {
                    depth -= 1;
                    if depth == 0 {
                        let body = &self.rest[start..i];
                        self.rest = &self.rest[i + 1..];
                        return Some(body);
                    }
                }
                _ => {}
            }
        }
        // Unterminated substream: hand out what is there
        let body = &self.rest[start..];
        self.rest = &[];
        Some(body)
    }
}

struct BoundSheet {
    kind: u8,
    name: String,
}

/// Workbook-wide records that sheets refer to
struct Globals {
    strings: Vec<String>,
    sheets: Vec<BoundSheet>,
}

impl Globals {
    fn load(body: &[BiffRecord], doc: &mut Document) -> BiffResult<Self> {
        let (bof, body) = body
            .split_first()
            .ok_or_else(|| BiffError::InvalidFormat("missing workbook globals".into()))?;
        let (version, kind) = biff::parse_bof(&bof.data)?;
        if kind != records::BOF_WORKBOOK_GLOBALS {
            return Err(BiffError::InvalidFormat(format!(
                "first substream has type {kind:#06x}, not workbook globals"
            )));
        }
        if version != records::BIFF8_VERSION {
            return Err(BiffError::UnsupportedVersion(format!(
                "BIFF version {version:#06x}, only BIFF8 is read"
            )));
        }

        let mut globals = Globals {
            strings: Vec::new(),
            sheets: Vec::new(),
        };
        for rec in body {
            let data = rec.data.as_slice();
            let loaded = match rec.record_type {
                records::SST => parse_sst(data, &rec.continue_offsets).map(|s| globals.strings = s),
                records::BOUNDSHEET => parse_boundsheet(data).map(|s| globals.sheets.push(s)),
                records::DATEMODE => {
                    read_u16(data, &mut 0).map(|mode| doc.settings_mut().date_1904 = mode == 1)
                }
                records::FONT => styles::parse_font(data).map(|font| {
                    doc.push_font(font);
                }),
                records::FORMAT => {
                    styles::parse_format(data).map(|(code, pattern)| doc.register_format(code, pattern))
                }
                records::XF => styles::parse_xf(data).map(|xf| {
                    doc.push_style(xf);
                }),
                records::STYLE => styles::parse_style(data).map(|s| doc.push_named_style(s)),
                records::PALETTE => styles::apply_palette(data, doc),
                _ => Ok(()),
            };
            match loaded {
                Ok(()) => {}
                // Without these the sheets cannot be read at all
                Err(e) if matches!(rec.record_type, records::SST | records::BOUNDSHEET) => {
                    return Err(e)
                }
                Err(e) => log::warn!("skipping record {:#06x}: {e}", rec.record_type),
            }
        }
        Ok(globals)
    }
}

/// BOUNDSHEET: stream position(4) + visibility(1) + kind(1) + name
fn parse_boundsheet(data: &[u8]) -> BiffResult<BoundSheet> {
    let mut off = 5;
    let kind = read_u8(data, &mut off)?;
    let name = read_short_string(data, &mut off)?;
    Ok(BoundSheet { kind, name })
}

/// Reads the records of one worksheet substream into a sheet
struct SheetLoader<'a> {
    sheet: &'a mut Sheet,
    strings: &'a [String],
    style_count: usize,
    default_style: StyleId,
    /// FORMULA cell whose text result arrives in the next STRING record
    awaiting_string: Option<(u32, u16)>,
}

impl SheetLoader<'_> {
    fn load(&mut self, body: &[BiffRecord]) -> BiffResult<()> {
        for rec in body {
            let data = rec.data.as_slice();
            let awaiting = self.awaiting_string.take();
            match rec.record_type {
                records::NUMBER => {
                    let (row, col, xf, mut off) = cell_header(data)?;
                    let value = read_f64(data, &mut off)?;
                    self.store(row, col, xf, CellValue::Number(value))?;
                }
                records::RK => {
                    let (row, col, xf, mut off) = cell_header(data)?;
                    let value = read_rk(data, &mut off)?;
                    self.store(row, col, xf, CellValue::Number(value))?;
                }
                records::LABELSST => {
                    let (row, col, xf, mut off) = cell_header(data)?;
                    let index = read_u32(data, &mut off)? as usize;
                    let value = match self.strings.get(index) {
                        Some(text) => CellValue::Text(text.clone()),
                        None => {
                            log::warn!("cell ({row}, {col}) refers to missing shared string {index}");
                            CellValue::Blank
                        }
                    };
                    self.store(row, col, xf, value)?;
                }
                records::LABEL => {
                    let (row, col, xf, mut off) = cell_header(data)?;
                    let text = read_unicode_string(data, &mut off)?;
                    self.store(row, col, xf, CellValue::Text(text))?;
                }
                records::BOOLERR => {
                    let (row, col, xf, mut off) = cell_header(data)?;
                    let raw = read_u8(data, &mut off)?;
                    let value = match read_u8(data, &mut off)? {
                        0 => CellValue::Boolean(raw != 0),
                        _ => CellValue::Error(error_value(raw)),
                    };
                    self.store(row, col, xf, value)?;
                }
                records::BLANK if data.len() >= 6 => {
                    let (row, col, xf, _) = cell_header(data)?;
                    self.store(row, col, xf, CellValue::Blank)?;
                }
                records::MULRK => {
                    let (row, first, entries) = multi_cell(data, 6, "MULRK")?;
                    for (col, entry) in (first..=u16::MAX).zip(entries) {
                        let mut off = 0;
                        let xf = read_u16(entry, &mut off)?;
                        let value = read_rk(entry, &mut off)?;
                        self.store(row, col, xf, CellValue::Number(value))?;
                    }
                }
                records::MULBLANK => {
                    let (row, first, entries) = multi_cell(data, 2, "MULBLANK")?;
                    for (col, entry) in (first..=u16::MAX).zip(entries) {
                        let xf = read_u16(entry, &mut 0)?;
                        self.store(row, col, xf, CellValue::Blank)?;
                    }
                }
                records::FORMULA => self.formula(data)?,
                records::STRING => {
                    if let Some((row, col)) = awaiting {
                        let text = read_unicode_string(data, &mut 0)?;
                        self.sheet.set_value(row, col, text)?;
                    }
                }
                records::ROW if data.len() >= 16 => self.row(data)?,
                records::COLINFO if data.len() >= 10 => self.colinfo(data)?,
                _ => {}
            }
        }
        Ok(())
    }

    fn store(&mut self, row: u32, col: u16, xf: u16, value: CellValue) -> BiffResult<()> {
        let style = if usize::from(xf) < self.style_count {
            StyleId(xf)
        } else {
            log::warn!("cell ({row}, {col}) uses missing XF {xf}, falling back to the default");
            self.default_style
        };
        let cell = self.sheet.get_or_create_cell(row, col)?;
        cell.value = value;
        cell.style = style;
        Ok(())
    }

    /// FORMULA: header(6) + cached result(8) + options(2) + reserved(4) + tokens
    ///
    /// Only the cached result is kept. A text result follows in a STRING
    /// record.
    fn formula(&mut self, data: &[u8]) -> BiffResult<()> {
        if data.len() < 20 {
            return Err(BiffError::Parse("FORMULA record too short".into()));
        }
        let (row, col, xf, mut off) = cell_header(data)?;
        let result = &data[off..off + 8];

        // A result whose top two bytes are 0xFFFF is not a double
        let value = if result[6..8] != [0xFF, 0xFF] {
            CellValue::Number(read_f64(data, &mut off)?)
        } else {
            match result[0] {
                0x00 => {
                    self.awaiting_string = Some((row, col));
                    CellValue::Blank
                }
                0x01 => CellValue::Boolean(result[2] != 0),
                0x02 => CellValue::Error(error_value(result[2])),
                _ => CellValue::Blank,
            }
        };
        self.store(row, col, xf, value)
    }

    /// ROW: index(2) + first col(2) + last col + 1(2) + height(2) + reserved(4) + flags(4)
    fn row(&mut self, data: &[u8]) -> BiffResult<()> {
        let index = u32::from(read_u16(data, &mut 0)?);
        let height = read_u16(data, &mut 6)?;
        let flags = read_u32(data, &mut 12)?;

        let row = self.sheet.get_or_create_row(index)?;
        row.outline_level = ((flags & 0x07) as u8).min(MAX_OUTLINE_LEVEL);
        row.collapsed = flags & 0x10 != 0;
        row.hidden = flags & 0x20 != 0;
        if flags & 0x40 != 0 {
            row.height = Some(height & 0x7FFF);
        }
        Ok(())
    }

    /// COLINFO: first(2) + last(2) + width(2) + xf(2) + flags(2) + reserved(2)
    fn colinfo(&mut self, data: &[u8]) -> BiffResult<()> {
        let mut off = 0;
        let first = read_u16(data, &mut off)?;
        // Excel stores the last range up to column 256
        let last = read_u16(data, &mut off)?.min(MAX_COLS - 1);
        let width = read_u16(data, &mut off)?;
        off += 2;
        let flags = read_u16(data, &mut off)?;

        for col in first..=last {
            let info = self.sheet.get_or_create_column(col)?;
            info.hidden = flags & 0x0001 != 0;
            if flags & 0x0002 != 0 {
                info.width = Some(width);
            }
            info.outline_level = (((flags >> 8) & 0x07) as u8).min(MAX_OUTLINE_LEVEL);
            info.collapsed = flags & 0x1000 != 0;
        }
        Ok(())
    }
}

/// Row, column and XF index that open every cell record, plus the offset
/// just past them
fn cell_header(data: &[u8]) -> BiffResult<(u32, u16, u16, usize)> {
    let mut off = 0;
    let row = u32::from(read_u16(data, &mut off)?);
    let col = read_u16(data, &mut off)?;
    let xf = read_u16(data, &mut off)?;
    Ok((row, col, xf, off))
}

/// Row, first column and fixed-size entries of a MULRK or MULBLANK record.
/// The last column closes the record and is implied by the entry count.
fn multi_cell<'a>(
    data: &'a [u8],
    entry_len: usize,
    name: &str,
) -> BiffResult<(u32, u16, std::slice::ChunksExact<'a, u8>)> {
    if data.len() < 6 {
        return Err(BiffError::Parse(format!("{name} record too short")));
    }
    let mut off = 0;
    let row = u32::from(read_u16(data, &mut off)?);
    let first = read_u16(data, &mut off)?;
    Ok((row, first, data[off..data.len() - 2].chunks_exact(entry_len)))
}

fn error_value(code: u8) -> CellError {
    CellError::from_code(code).unwrap_or(CellError::Value)
}
