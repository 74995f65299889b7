//! End-to-end tests for XLS roundtrip (create -> save -> read -> verify)

use std::io::Cursor;

use pretty_assertions::assert_eq;
use xlsbook_biff::{BiffError, BiffReader, BiffWriter};
use xlsbook_core::{
    BorderLineStyle, Borders, CellError, CellValue, Document, DocumentSettings, Fill, FontRecord,
    HorizontalAlignment, NamedStyle, StyleId, StyleRecord, Underline,
};

fn roundtrip(doc: &Document) -> Document {
    let bytes = BiffWriter::write_to_vec(doc).unwrap();
    BiffReader::read(Cursor::new(bytes)).unwrap()
}

/// Test that record tables come back with identical ids
#[test]
fn test_roundtrip_style_tables() {
    let mut doc = Document::new();
    let sheet = doc.create_sheet("Styles").unwrap();

    let bold = doc
        .create_font(FontRecord::new("Verdana", 12).with_bold(true).with_color(10))
        .unwrap();
    let underlined = doc
        .create_font(FontRecord::new("Arial", 9).with_underline(Underline::Double))
        .unwrap();
    let format = doc.get_or_create_format("0.000").unwrap();

    let mut staged = StyleRecord::new();
    staged.font = bold;
    staged.format = format;
    staged.horizontal = HorizontalAlignment::Center;
    staged.wrap_text = true;
    staged.rotation = -30;
    staged.borders = Borders::all(BorderLineStyle::Medium, 8);
    staged.fill = Fill::solid(13);
    let header = doc.create_style_from(&staged).unwrap();

    staged.font = underlined;
    staged.borders = Borders::new();
    let body = doc.create_style_from(&staged).unwrap();

    let s = doc.sheet_mut(sheet).unwrap();
    s.set_value(0, 0, "Header").unwrap();
    s.set_style(0, 0, header).unwrap();
    s.set_value(1, 0, 12.5).unwrap();
    s.set_style(1, 0, body).unwrap();

    let loaded = roundtrip(&doc);

    assert_eq!(loaded.fonts(), doc.fonts());
    assert_eq!(loaded.styles(), doc.styles());
    assert_eq!(loaded.custom_formats(), doc.custom_formats());
    assert_eq!(loaded.named_styles(), doc.named_styles());
    assert_eq!(loaded.default_style_id(), StyleId(15));

    let s = loaded.sheet(0).unwrap();
    assert_eq!(s.name(), "Styles");
    assert_eq!(s.cell(0, 0).unwrap().style, header);
    assert_eq!(s.cell(1, 0).unwrap().style, body);
    assert_eq!(loaded.style(header).unwrap().font, bold);
}

/// Test every cell value kind
#[test]
fn test_roundtrip_cell_values() {
    let mut doc = Document::new();
    let idx = doc.create_sheet("Values").unwrap();
    let s = doc.sheet_mut(idx).unwrap();
    s.set_value(0, 0, "text").unwrap();
    s.set_value(0, 1, -3.25).unwrap();
    s.set_value(0, 2, true).unwrap();
    s.set_value(0, 3, CellError::Div0).unwrap();
    s.set_value(0, 4, "Ünïcödé ✓").unwrap();
    s.set_style(0, 5, StyleId(15)).unwrap();
    s.set_value(40_000, 255, "corner").unwrap();

    let loaded = roundtrip(&doc);
    let s = loaded.sheet(0).unwrap();

    assert_eq!(s.value(0, 0), Some(&CellValue::Text("text".into())));
    assert_eq!(s.value(0, 1), Some(&CellValue::Number(-3.25)));
    assert_eq!(s.value(0, 2), Some(&CellValue::Boolean(true)));
    assert_eq!(s.value(0, 3), Some(&CellValue::Error(CellError::Div0)));
    assert_eq!(s.value(0, 4), Some(&CellValue::Text("Ünïcödé ✓".into())));
    assert_eq!(s.value(0, 5), Some(&CellValue::Blank));
    assert_eq!(s.value(40_000, 255), Some(&CellValue::Text("corner".into())));
    assert_eq!(s.cell_count(), doc.sheet(0).unwrap().cell_count());
}

/// Test a shared string table large enough to need CONTINUE records
#[test]
fn test_roundtrip_large_string_table() {
    let mut doc = Document::new();
    let idx = doc.create_sheet("Strings").unwrap();
    let s = doc.sheet_mut(idx).unwrap();
    for row in 0..2000u32 {
        s.set_value(row, 0, format!("row number {row} with some padding text"))
            .unwrap();
    }
    s.set_value(0, 1, "Ω".repeat(6000)).unwrap();

    let loaded = roundtrip(&doc);
    let s = loaded.sheet(0).unwrap();
    assert_eq!(
        s.value(1999, 0).and_then(CellValue::as_text),
        Some("row number 1999 with some padding text")
    );
    assert_eq!(s.value(0, 1).and_then(CellValue::as_text), Some("Ω".repeat(6000).as_str()));
}

/// Test outline grouping, hidden rows and custom sizes
#[test]
fn test_roundtrip_outline() {
    let mut doc = Document::new();
    let idx = doc.create_sheet("Outline").unwrap();
    let s = doc.sheet_mut(idx).unwrap();
    s.set_value(0, 0, "top").unwrap();
    s.group_rows(1, 4).unwrap();
    s.group_rows(2, 3).unwrap();
    s.set_row_group_collapsed(2, true).unwrap();
    s.get_or_create_row(0).unwrap().height = Some(400);
    s.group_columns(2, 3).unwrap();
    s.set_column_group_collapsed(2, true).unwrap();
    s.get_or_create_column(0).unwrap().width = Some(20 * 256);

    let loaded = roundtrip(&doc);
    let s = loaded.sheet(0).unwrap();

    let levels: Vec<u8> = (0..6).map(|r| s.row(r).map_or(0, |x| x.outline_level)).collect();
    assert_eq!(levels, vec![0, 1, 2, 2, 1, 0]);
    assert!(s.row(2).unwrap().hidden);
    assert!(s.row(3).unwrap().hidden);
    assert!(!s.row(1).unwrap().hidden);
    assert!(s.row(4).unwrap().collapsed);
    assert_eq!(s.row(0).unwrap().height, Some(400));

    assert_eq!(s.column(2).unwrap().outline_level, 1);
    assert!(s.column(3).unwrap().hidden);
    assert!(s.column(4).unwrap().collapsed);
    assert_eq!(s.column(0).unwrap().width, Some(20 * 256));
    assert_eq!(s.column(2).unwrap().width, None);
    assert_eq!(s.max_outline_levels(), (2, 1));
}

/// Test workbook-level settings: date system, palette, user styles, sheet order
#[test]
fn test_roundtrip_workbook_settings() {
    let mut doc = Document::with_settings(DocumentSettings::new().with_date_1904(true));
    doc.set_palette_color(20, (1, 2, 3)).unwrap();
    doc.push_named_style(NamedStyle::User {
        xf: 0,
        name: "Custom".into(),
    });
    doc.create_sheet("One").unwrap();
    doc.create_sheet("Two").unwrap();
    doc.create_sheet("Three").unwrap();

    let loaded = roundtrip(&doc);
    assert!(loaded.settings().date_1904);
    assert_eq!(loaded.palette(), doc.palette());
    assert_eq!(loaded.named_styles().last(), doc.named_styles().last());
    let names: Vec<&str> = loaded.sheets().iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["One", "Two", "Three"]);
}

/// Test writing and reading through the filesystem
#[test]
fn test_roundtrip_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.xls");

    let mut doc = Document::new();
    let idx = doc.create_sheet("Sheet1").unwrap();
    doc.sheet_mut(idx).unwrap().set_value(2, 3, 42).unwrap();

    BiffWriter::write_file(&doc, &path).unwrap();
    let loaded = BiffReader::read_file(&path).unwrap();
    assert_eq!(
        loaded.sheet(0).unwrap().value(2, 3),
        Some(&CellValue::Number(42.0))
    );
}

/// Test that non-XLS input is rejected
#[test]
fn test_read_rejects_garbage() {
    let result = BiffReader::read(Cursor::new(vec![0u8; 1024]));
    assert!(result.is_err());

    let mut compound = cfb::CompoundFile::create(Cursor::new(Vec::new())).unwrap();
    compound.create_stream("/WordDocument").unwrap();
    let bytes = compound.into_inner().into_inner();
    let err = BiffReader::read(Cursor::new(bytes)).unwrap_err();
    assert!(matches!(err, BiffError::InvalidFormat(_)), "got {err:?}");
}
