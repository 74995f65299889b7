//! End-to-end tests for ExcelWorkbook roundtrip (create -> write -> save -> open -> read)

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use xlsbook::prelude::*;

/// Test values, formats and outline grouping survive a save and reopen
#[test]
fn test_roundtrip_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.xls");

    let header = CellStyle::new()
        .with_bold(true)
        .with_background(Color::LIGHT_GRAY)
        .with_outline(BorderType::Thin)
        .with_alignment(CellAlignment::Center);
    let money = CellStyle::with_format("#,##0.00 \"EUR\"");

    let mut wb = ExcelWorkbook::create(&path).unwrap();
    wb.write_text(1, "Region").unwrap();
    wb.write_text(2, "Sales").unwrap();
    wb.write_text(3, "Share").unwrap();
    for col in 1..=3 {
        wb.apply_formatting(col, &header).unwrap();
    }

    let rows = [("North", 1250.5, 40.0), ("South", 980.0, 35.0), ("West", 610.25, 25.0)];
    for (region, sales, share) in rows {
        wb.next_row().unwrap();
        wb.write_text(1, region).unwrap();
        wb.write_number(2, sales).unwrap();
        wb.apply_formatting(2, &money).unwrap();
        wb.write_percentage(3, share).unwrap();
    }
    wb.group_rows(2, 4).unwrap();
    wb.save().unwrap();

    let styles = wb.session().document().style_count();
    let fonts = wb.session().document().font_count();

    let mut reopened = ExcelWorkbook::open(&path).unwrap();
    assert_eq!(reopened.path(), path.as_path());
    assert_eq!(reopened.current_row(), 1);
    assert_eq!(reopened.read_text(1), "Region");
    assert_eq!(reopened.read_text_at(1, 3), "South");
    assert_eq!(reopened.read_number_at(2, 2), 1250.5);
    assert_eq!(reopened.read_number_at(3, 4), 0.25);

    let doc = reopened.session().document();
    assert_eq!(doc.style_count(), styles);
    assert_eq!(doc.font_count(), fonts);
    assert_eq!(doc.custom_formats().len(), 1);

    let sheet = reopened.session().sheet().unwrap();
    let header_ids: Vec<StyleId> = (0..3).map(|c| sheet.cell(0, c).unwrap().style).collect();
    assert_eq!(header_ids, vec![header_ids[0]; 3]);
    let money_ids: Vec<StyleId> = (1..4).map(|r| sheet.cell(r, 1).unwrap().style).collect();
    assert_eq!(money_ids, vec![money_ids[0]; 3]);
    assert!(sheet.row(1).unwrap().hidden);
    assert!(sheet.row(4).unwrap().collapsed);

    // New rows keep going after the reopened content
    reopened.select_row(5).unwrap();
    reopened.write_text(1, "East").unwrap();
    reopened.save().unwrap();
    let again = ExcelWorkbook::open(&path).unwrap();
    assert_eq!(again.read_text_at(1, 5), "East");
}

/// Test that save_as leaves the bound path untouched
#[test]
fn test_save_as_keeps_binding() {
    let dir = tempfile::tempdir().unwrap();
    let original = dir.path().join("a.xls");
    let copy = dir.path().join("b.xls");

    let mut wb = ExcelWorkbook::create(&original).unwrap();
    wb.write_number(1, 3.0).unwrap();
    wb.save_as(&copy).unwrap();

    assert_eq!(wb.path(), original.as_path());
    assert_eq!(ExcelWorkbook::open(&copy).unwrap().read_number(1), 3.0);
    // The original still holds the empty workbook written by create
    assert_eq!(ExcelWorkbook::open(&original).unwrap().read_number(1), -1.0);
}

/// Test dates written as serials and as text
#[test]
fn test_roundtrip_dates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dates.xls");

    let mut wb = ExcelWorkbook::create(&path).unwrap();
    wb.write_number(1, 45366.0).unwrap();
    wb.apply_formatting(1, &CellStyle::with_format("yyyy-mm-dd"))
        .unwrap();
    wb.write_text(2, "2024-03-15 08:30").unwrap();
    wb.save().unwrap();

    let wb = ExcelWorkbook::open(&path).unwrap();
    let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    assert_eq!(wb.read_date(1), day.and_hms_opt(0, 0, 0).unwrap());
    assert_eq!(wb.read_date(2), day.and_hms_opt(8, 30, 0).unwrap());
    assert_eq!(wb.read_date(3), xlsbook::workbook::no_date());
}

/// Test the extension trait on Document
#[test]
fn test_document_ext() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.xls");

    let mut doc = Document::new();
    let idx = doc.create_sheet("Data").unwrap();
    doc.sheet_mut(idx).unwrap().set_value(0, 0, "x").unwrap();
    doc.save(&path).unwrap();

    let loaded = Document::open(&path).unwrap();
    assert_eq!(loaded.sheet(0).unwrap().name(), "Data");
    assert_eq!(
        loaded.sheet(0).unwrap().value(0, 0),
        Some(&CellValue::Text("x".into()))
    );
}

/// Test that opening something that is not a workbook fails cleanly
#[test]
fn test_open_rejects_non_xls() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.xls");
    std::fs::write(&path, b"just some text").unwrap();

    let err = ExcelWorkbook::open(&path).unwrap_err();
    assert!(matches!(err, Error::Biff(_)), "got {err:?}");
}

/// Test writes at explicit coordinates leave the cursor alone
#[test]
fn test_coordinate_writes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("coords.xls");

    let mut wb = ExcelWorkbook::create(&path).unwrap();
    wb.select_row(3).unwrap();
    wb.write_percentage_at(2, 10, 12.5).unwrap();
    wb.write_text_at(1, 10, "rate").unwrap();
    assert_eq!(wb.current_row(), 3);
    wb.session_mut().create_sheet("Notes").unwrap();
    wb.save().unwrap();

    let doc = ExcelWorkbook::open(&path).unwrap().session().document().clone();
    assert_eq!(doc.sheet_count(), 2);
    let cell = doc.sheet(0).unwrap().cell(9, 1).unwrap();
    assert_eq!(cell.value, CellValue::Number(0.125));
    assert_eq!(doc.style(cell.style).unwrap().format, 9);
}
