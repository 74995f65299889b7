//! Integration tests for the document model: seeded records, record
//! creation, limits and palette lookups

use pretty_assertions::assert_eq;
use xlsbook_core::style::number_format::FIRST_CUSTOM_FORMAT;
use xlsbook_core::{
    BorderLineStyle, Borders, Color, Document, DocumentSettings, Error, Fill, FontId, FontRecord,
    HorizontalAlignment, Limits, NamedStyle, Palette, StyleId, StyleRecord, XfKind,
};

fn limited(max_fonts: usize, max_styles: usize, max_custom_formats: usize) -> Document {
    Document::with_settings(DocumentSettings::new().with_limits(Limits {
        max_fonts,
        max_styles,
        max_custom_formats,
    }))
}

/// Test the records a new document starts with
#[test]
fn test_seeded_defaults() {
    let doc = Document::new();

    assert_eq!(doc.font_count(), 4);
    for font in doc.fonts() {
        assert_eq!(font, &FontRecord::default());
    }
    assert_eq!(doc.font(FontId(0)).unwrap().name, "Arial");
    assert_eq!(doc.font(FontId(0)).unwrap().height, 200);

    assert_eq!(doc.style_count(), 21);
    let kinds: Vec<XfKind> = doc.styles().iter().map(|s| s.kind).collect();
    assert!(kinds[..15].iter().all(|k| *k == XfKind::Style));
    assert_eq!(kinds[15], XfKind::Cell);
    assert!(kinds[16..].iter().all(|k| *k == XfKind::Style));

    let formats: Vec<u16> = doc.styles()[16..].iter().map(|s| s.format).collect();
    assert_eq!(formats, vec![0x2B, 0x29, 0x2C, 0x2A, 0x09]);

    assert_eq!(doc.default_style_id(), StyleId(15));
    assert_eq!(doc.named_styles().len(), 6);
    assert!(doc
        .named_styles()
        .contains(&NamedStyle::Builtin { xf: 0, id: 0, level: 0xFF }));
    assert!(doc.palette().is_default());
    assert_eq!(doc.sheet_count(), 0);
    assert!(doc.custom_formats().is_empty());
}

/// Test that font ids skip 4 as records are added
#[test]
fn test_create_font_ids() {
    let mut doc = Document::new();
    let a = doc.create_font(FontRecord::new("Tahoma", 12)).unwrap();
    let b = doc.create_font(FontRecord::new("Tahoma", 14)).unwrap();
    assert_eq!(a, FontId(5));
    assert_eq!(b, FontId(6));
    assert_eq!(doc.font(a).unwrap().height, 240);
    assert!(doc.font(FontId(4)).is_none());

    assert_eq!(doc.find_font(&FontRecord::new("Tahoma", 14)), Some(b));
    assert_eq!(doc.find_font(&FontRecord::default()), Some(FontId(0)));
    assert_eq!(doc.find_font(&FontRecord::new("Tahoma", 16)), None);
}

/// Test that font creation past the limit fails without adding a record
#[test]
fn test_font_limit() {
    let mut doc = limited(5, 4000, 250);
    doc.create_font(FontRecord::new("Georgia", 11)).unwrap();
    let err = doc.create_font(FontRecord::new("Georgia", 12)).unwrap_err();
    assert!(matches!(err, Error::FontLimitExceeded { limit: 5 }));
    assert!(err.is_capacity_error());
    assert_eq!(doc.font_count(), 5);
}

/// Test that a created XF copies the staged attributes onto the default cell XF
#[test]
fn test_create_style_from() {
    let mut doc = Document::new();
    let font = doc
        .create_font(FontRecord::new("Arial", 12).with_bold(true))
        .unwrap();

    let mut staged = StyleRecord::style_xf();
    staged.font = font;
    staged.horizontal = HorizontalAlignment::Right;
    staged.borders = Borders::all(BorderLineStyle::Medium, Palette::BLACK);
    staged.fill = Fill::solid(doc.color_index(Color::YELLOW));
    staged.locked = false;

    let id = doc.create_style_from(&staged).unwrap();
    assert_eq!(id, StyleId(21));

    let record = doc.style(id).unwrap();
    assert_eq!(record.font, font);
    assert_eq!(record.horizontal, HorizontalAlignment::Right);
    assert_eq!(record.borders, staged.borders);
    assert_eq!(record.fill.foreground, 13);
    // Kind and protection come from the default cell XF
    assert_eq!(record.kind, XfKind::Cell);
    assert!(record.locked);
}

/// Test that XF creation past the limit fails
#[test]
fn test_style_limit() {
    let mut doc = limited(512, 22, 250);
    let staged = StyleRecord::new();
    doc.create_style_from(&staged).unwrap();
    let err = doc.create_style_from(&staged).unwrap_err();
    assert!(matches!(err, Error::StyleLimitExceeded { limit: 22 }));
    assert_eq!(doc.style_count(), 22);
}

/// Test custom number format registration
#[test]
fn test_formats() {
    let mut doc = limited(512, 4000, 2);
    assert_eq!(doc.get_or_create_format("0%").unwrap(), 9);
    assert_eq!(doc.builtin_format("0.00"), Some(2));

    let a = doc.get_or_create_format("0.000").unwrap();
    assert_eq!(a, FIRST_CUSTOM_FORMAT);
    assert_eq!(doc.get_or_create_format("0.000").unwrap(), a);
    doc.get_or_create_format("yyyy-mm-dd").unwrap();
    assert!(doc.is_date_format(a + 1));

    assert!(matches!(
        doc.get_or_create_format("#,##0.000"),
        Err(Error::FormatLimitExceeded { limit: 2 })
    ));
    assert!(matches!(
        doc.get_or_create_format("\"unterminated"),
        Err(Error::InvalidNumberFormat { .. })
    ));
    assert_eq!(doc.format_string(a), Some("0.000"));
    assert_eq!(doc.format_string(9), Some("0%"));
}

/// Test palette lookups through the document
#[test]
fn test_palette_lookups() {
    let mut doc = Document::new();
    assert_eq!(doc.find_color(255, 0, 0), Some(10));
    assert_eq!(doc.find_similar_color(200, 10, 10), 10);
    assert_eq!(doc.color_index(Color::Auto), Palette::AUTOMATIC);

    doc.set_palette_color(10, (1, 2, 3)).unwrap();
    assert_eq!(doc.find_color(1, 2, 3), Some(10));
    assert!(matches!(
        doc.set_palette_color(70, (0, 0, 0)),
        Err(Error::InvalidPaletteIndex(70))
    ));
}

/// Test that new cells pick up the default cell XF
#[test]
fn test_sheet_cells_default_style() {
    let mut doc = Document::new();
    let index = doc.create_sheet("Sheet1").unwrap();
    let sheet = doc.sheet_mut(index).unwrap();
    sheet.set_value(0, 0, 1.0).unwrap();
    assert_eq!(sheet.cell(0, 0).unwrap().style, StyleId(15));
}
