//! Document type

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::settings::DocumentSettings;
use crate::sheet::Sheet;
use crate::style::number_format::{self, NumberFormats};
use crate::style::{
    Color, FontId, FontRecord, NamedStyle, Palette, StyleId, StyleRecord, XfKind,
};
use crate::MAX_SHEET_NAME_LEN;

/// Index of the default cell XF in a freshly created document
pub const DEFAULT_CELL_XF: u16 = 15;

/// Number formats of the built-in style XFs 16..=20
const BUILTIN_STYLE_FORMATS: [u16; 5] = [0x2B, 0x29, 0x2C, 0x2A, 0x09];

/// Built-in STYLE entries as (style XF, built-in id)
const BUILTIN_STYLES: [(u16, u8); 6] = [
    (0x10, 3), // Comma
    (0x11, 6), // Comma [0]
    (0x12, 4), // Currency
    (0x13, 7), // Currency [0]
    (0x00, 0), // Normal
    (0x14, 5), // Percent
];

/// Characters that may not appear in a sheet name
const INVALID_SHEET_NAME_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// An in-memory BIFF8 workbook
///
/// Owns the font table, the XF (cell format) table, custom number formats,
/// the color palette and the sheets. Records are append-only: nothing here
/// modifies a font or XF once it has been created.
#[derive(Debug, Clone)]
pub struct Document {
    sheets: Vec<Sheet>,
    fonts: Vec<FontRecord>,
    styles: Vec<StyleRecord>,
    formats: NumberFormats,
    palette: Palette,
    named_styles: Vec<NamedStyle>,
    settings: DocumentSettings,
    default_style: StyleId,
}

impl Document {
    /// Create a document seeded with the standard fonts, XFs and styles
    pub fn new() -> Self {
        Self::with_settings(DocumentSettings::default())
    }

    /// Create a seeded document with custom settings
    pub fn with_settings(settings: DocumentSettings) -> Self {
        let mut doc = Self::blank(settings);

        doc.fonts = vec![FontRecord::default(); 4];

        // 0..=14: style XFs
        for i in 0..15 {
            let mut xf = StyleRecord::style_xf();
            xf.font = match i {
                1 | 2 => FontId(1),
                3 | 4 => FontId(2),
                _ => FontId(0),
            };
            doc.styles.push(xf);
        }
        // 15: default cell XF
        doc.styles.push(StyleRecord::new());
        // 16..=20: built-in number format style XFs
        for format in BUILTIN_STYLE_FORMATS {
            let mut xf = StyleRecord::style_xf();
            xf.font = FontId(1);
            xf.format = format;
            doc.styles.push(xf);
        }

        doc.named_styles = BUILTIN_STYLES
            .iter()
            .map(|&(xf, id)| NamedStyle::Builtin { xf, id, level: 0xFF })
            .collect();
        doc.default_style = StyleId(DEFAULT_CELL_XF);
        doc
    }

    /// Create a document with empty record tables
    ///
    /// Used when loading a file, whose records populate the tables.
    pub fn blank(settings: DocumentSettings) -> Self {
        Self {
            sheets: Vec::new(),
            fonts: Vec::new(),
            styles: Vec::new(),
            formats: NumberFormats::new(),
            palette: Palette::new(),
            named_styles: Vec::new(),
            settings,
            default_style: StyleId(0),
        }
    }

    /// Document settings
    pub fn settings(&self) -> &DocumentSettings {
        &self.settings
    }

    /// Mutable document settings
    pub fn settings_mut(&mut self) -> &mut DocumentSettings {
        &mut self.settings
    }

    // === Fonts ===

    /// Find a font with exactly these attributes
    pub fn find_font(&self, font: &FontRecord) -> Option<FontId> {
        self.fonts
            .iter()
            .position(|f| f == font)
            .map(FontId::from_position)
    }

    /// Create a new font record
    pub fn create_font(&mut self, font: FontRecord) -> Result<FontId> {
        let limit = self.settings.limits.max_fonts;
        if self.fonts.len() >= limit {
            warn!(limit, "font table is full");
            return Err(Error::FontLimitExceeded { limit });
        }
        if font.name.is_empty() || font.name.chars().count() > 255 {
            return Err(Error::other(format!("invalid font name '{}'", font.name)));
        }

        let id = FontId::from_position(self.fonts.len());
        debug!(
            font = %id,
            name = %font.name,
            height = font.height,
            weight = font.weight,
            italic = font.italic,
            color = font.color,
            "created font record"
        );
        self.fonts.push(font);
        Ok(id)
    }

    /// Append a font record without limit checks (file loading)
    pub fn push_font(&mut self, font: FontRecord) -> FontId {
        self.fonts.push(font);
        FontId::from_position(self.fonts.len() - 1)
    }

    /// Get a font record
    pub fn font(&self, id: FontId) -> Option<&FontRecord> {
        id.position().and_then(|p| self.fonts.get(p))
    }

    /// All font records in table order
    pub fn fonts(&self) -> &[FontRecord] {
        &self.fonts
    }

    /// Number of font records
    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    // === Cell formats (XF) ===

    /// Register a new cell XF holding the formatting of `staged`
    ///
    /// The record starts as a copy of the default cell XF, then receives the
    /// attributes of `staged` through [`StyleRecord::copy_from`]. The font
    /// and number format it references must exist.
    pub fn create_style_from(&mut self, staged: &StyleRecord) -> Result<StyleId> {
        if self.font(staged.font).is_none() {
            return Err(Error::InvalidFontIndex(staged.font.0));
        }
        if self.format_string(staged.format).is_none() {
            return Err(Error::InvalidNumberFormat {
                pattern: format!("#{}", staged.format),
                reason: "unknown format code".to_string(),
            });
        }
        let limit = self.settings.limits.max_styles;
        if self.styles.len() >= limit {
            warn!(limit, "cell format table is full");
            return Err(Error::StyleLimitExceeded { limit });
        }

        let mut record = self.default_style().cloned().unwrap_or_default();
        record.copy_from(staged);
        record.kind = XfKind::Cell;

        let id = StyleId(self.styles.len() as u16);
        debug!(
            style = %id,
            font = %record.font,
            format = record.format,
            "created cell format record"
        );
        self.styles.push(record);
        Ok(id)
    }

    /// Append an XF record without checks (file loading)
    pub fn push_style(&mut self, record: StyleRecord) -> StyleId {
        self.styles.push(record);
        StyleId(self.styles.len() as u16 - 1)
    }

    /// Get an XF record
    pub fn style(&self, id: StyleId) -> Option<&StyleRecord> {
        self.styles.get(id.index())
    }

    /// All XF records in table order
    pub fn styles(&self) -> &[StyleRecord] {
        &self.styles
    }

    /// Number of XF records
    pub fn style_count(&self) -> usize {
        self.styles.len()
    }

    /// The XF new cells are given
    pub fn default_style(&self) -> Option<&StyleRecord> {
        self.style(self.default_style)
    }

    /// Id of the XF new cells are given
    pub fn default_style_id(&self) -> StyleId {
        self.default_style
    }

    /// Change the XF new cells are given
    pub fn set_default_style(&mut self, id: StyleId) -> Result<()> {
        if self.style(id).is_none() {
            return Err(Error::InvalidStyleIndex(id.0));
        }
        self.default_style = id;
        Ok(())
    }

    /// STYLE entries
    pub fn named_styles(&self) -> &[NamedStyle] {
        &self.named_styles
    }

    /// Append a STYLE entry (file loading)
    pub fn push_named_style(&mut self, style: NamedStyle) {
        self.named_styles.push(style);
    }

    // === Number formats ===

    /// Built-in code for a pattern, if it is one
    pub fn builtin_format(&self, pattern: &str) -> Option<u16> {
        number_format::builtin_format(pattern)
    }

    /// Resolve a pattern to a format code, registering a custom format when needed
    pub fn get_or_create_format(&mut self, pattern: &str) -> Result<u16> {
        let before = self.formats.len();
        let code = self
            .formats
            .get_or_create(pattern, self.settings.limits.max_custom_formats)
            .map_err(|e| {
                if e.is_capacity_error() {
                    warn!(pattern, "custom number format table is full");
                }
                e
            })?;
        if self.formats.len() > before {
            debug!(code, pattern, "created custom number format");
        }
        Ok(code)
    }

    /// Register a custom format under a known code (file loading)
    pub fn register_format(&mut self, code: u16, pattern: String) {
        self.formats.insert(code, pattern);
    }

    /// Pattern for a format code
    pub fn format_string(&self, code: u16) -> Option<&str> {
        self.formats.format_string(code)
    }

    /// Custom formats as (code, pattern)
    pub fn custom_formats(&self) -> &[(u16, String)] {
        self.formats.custom()
    }

    /// Whether a format code displays dates or times
    pub fn is_date_format(&self, code: u16) -> bool {
        self.formats.is_date_format(code)
    }

    // === Palette ===

    /// The color palette
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Replace a palette entry
    pub fn set_palette_color(&mut self, index: u16, rgb: (u8, u8, u8)) -> Result<()> {
        self.palette.set_color_at(index, rgb)
    }

    /// Palette index holding exactly this color
    pub fn find_color(&self, r: u8, g: u8, b: u8) -> Option<u16> {
        self.palette.find_color(r, g, b)
    }

    /// Palette index nearest to this color
    pub fn find_similar_color(&self, r: u8, g: u8, b: u8) -> u16 {
        self.palette.find_similar_color(r, g, b)
    }

    /// Palette index for a requested color; automatic stays automatic
    pub fn color_index(&self, color: Color) -> u16 {
        self.palette.index_of(color)
    }

    // === Sheets ===

    /// Create a sheet and return its index
    pub fn create_sheet(&mut self, name: &str) -> Result<usize> {
        validate_sheet_name(name)?;
        if self.sheet_exists(name) {
            return Err(Error::DuplicateSheetName(name.to_string()));
        }
        self.sheets.push(Sheet::new(name, self.default_style));
        debug!(sheet = name, index = self.sheets.len() - 1, "created sheet");
        Ok(self.sheets.len() - 1)
    }

    /// Get a sheet by index
    pub fn sheet(&self, index: usize) -> Option<&Sheet> {
        self.sheets.get(index)
    }

    /// Get a mutable sheet by index
    pub fn sheet_mut(&mut self, index: usize) -> Option<&mut Sheet> {
        self.sheets.get_mut(index)
    }

    /// Find a sheet index by name (case-insensitive)
    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        let name = name.to_lowercase();
        self.sheets
            .iter()
            .position(|s| s.name().to_lowercase() == name)
    }

    /// Check whether a sheet with this name exists (case-insensitive)
    pub fn sheet_exists(&self, name: &str) -> bool {
        self.sheet_index(name).is_some()
    }

    /// All sheets in order
    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    /// Number of sheets
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_sheet_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidSheetName("name is empty".to_string()));
    }
    if name.chars().count() > MAX_SHEET_NAME_LEN {
        return Err(Error::InvalidSheetName(format!(
            "'{}' is longer than {} characters",
            name, MAX_SHEET_NAME_LEN
        )));
    }
    if let Some(c) = name.chars().find(|c| INVALID_SHEET_NAME_CHARS.contains(c)) {
        return Err(Error::InvalidSheetName(format!(
            "'{}' contains '{}'",
            name, c
        )));
    }
    Ok(())
}
