//! Applying formatting requests to cells

use xlsbook_core::{
    BorderEdge, BorderLineStyle, Document, Fill, Palette, Sheet, StyleId, StyleRecord,
};

use crate::descriptor::CellStyle;
use crate::fingerprint::StyleFingerprint;
use crate::font_cache::FontCache;
use crate::style_cache::StyleCache;
use crate::Result;

/// Font and style caches of one document
///
/// Built once per opened or created document and kept alongside it. Every
/// formatting request goes through [`FormattingContext::apply`], which
/// guarantees that equal requests share one cell format record and that
/// records differing only in unrelated attributes share one font.
///
/// ```rust
/// use xlsbook::{CellStyle, Document, FormattingContext};
///
/// let mut doc = Document::new();
/// let sheet = doc.create_sheet("Sheet1").unwrap();
/// let mut ctx = FormattingContext::new(&doc);
///
/// let bold = CellStyle::new().with_bold(true);
/// let a = ctx.apply(&mut doc, sheet, 0, 0, &bold).unwrap();
/// let b = ctx.apply(&mut doc, sheet, 1, 0, &bold).unwrap();
/// assert_eq!(a, b);
/// ```
#[derive(Debug)]
pub struct FormattingContext {
    fonts: FontCache,
    styles: StyleCache,
}

impl FormattingContext {
    /// Create caches for `doc`, seeded from its default cell format
    pub fn new(doc: &Document) -> Self {
        let seed = doc.default_style().cloned().unwrap_or_default();
        Self {
            fonts: FontCache::new(),
            styles: StyleCache::new(seed),
        }
    }

    /// Format the cell at `row`, `col` of sheet `sheet` as `style` describes
    ///
    /// Creates the cell as a blank when it does not exist and replaces any
    /// format it had. Returns the id of the shared format record.
    pub fn apply(
        &mut self,
        doc: &mut Document,
        sheet: usize,
        row: u32,
        col: u16,
        style: &CellStyle,
    ) -> Result<StyleId> {
        let count = doc.sheet_count();
        if doc.sheet(sheet).is_none() {
            return Err(xlsbook_core::Error::SheetOutOfBounds(sheet, count).into());
        }
        // Nothing may be interned for a cell that cannot be written.
        Sheet::check_position(row, col)?;

        let id = self.resolve(doc, style)?;
        if let Some(target) = doc.sheet_mut(sheet) {
            target.set_style(row, col, id)?;
        }
        Ok(id)
    }

    /// Format record for `style`, created on first request
    pub fn resolve(&mut self, doc: &mut Document, style: &CellStyle) -> Result<StyleId> {
        let font = self.fonts.resolve_descriptor(doc, style)?;

        let format = match style.custom_format() {
            Some(pattern) => match doc.builtin_format(pattern) {
                Some(code) => Some(code),
                None => Some(doc.get_or_create_format(pattern)?),
            },
            None => None,
        };
        let background = if style.background().is_auto() {
            None
        } else {
            Some(doc.color_index(style.background()))
        };

        let scratch = self.styles.scratch_style();
        if let Some(code) = format {
            scratch.format = code;
        }
        if let Some(color) = background {
            scratch.fill = Fill::solid(color);
        }
        scratch.horizontal = style.alignment().to_horizontal();
        scratch.wrap_text = style.wrap_text();
        let pending = stage_borders(scratch, style);
        scratch.font = font;

        let fingerprint =
            StyleFingerprint::of(self.styles.staged()).with_pending_border(pending);
        self.styles
            .intern_or_create(fingerprint, |staged| Ok(doc.create_style_from(staged)?))
    }

    /// Recreate a format record of another document in `doc`
    ///
    /// The font, number format and colors are resolved again in `doc`
    /// rather than copied as raw indices, so the result looks the same even
    /// when the two documents number their records differently.
    pub fn import_style(
        &mut self,
        doc: &mut Document,
        source: &Document,
        id: StyleId,
    ) -> Result<StyleId> {
        let record = source
            .style(id)
            .ok_or(xlsbook_core::Error::InvalidStyleIndex(id.0))?;
        let mut font = source
            .font(record.font)
            .cloned()
            .ok_or(xlsbook_core::Error::InvalidFontIndex(record.font.0))?;
        font.color = remap_color(source, doc, font.color);
        let font = self.fonts.resolve_record(doc, font)?;

        let format = match source.format_string(record.format) {
            Some(pattern) => match doc.builtin_format(pattern) {
                Some(code) => code,
                None => doc.get_or_create_format(pattern)?,
            },
            None => 0,
        };

        let mut staged = record.clone();
        staged.font = font;
        staged.format = format;
        staged.fill.foreground = remap_color(source, doc, staged.fill.foreground);
        staged.fill.background = remap_color(source, doc, staged.fill.background);
        for edge in [
            &mut staged.borders.left,
            &mut staged.borders.right,
            &mut staged.borders.top,
            &mut staged.borders.bottom,
        ] {
            edge.color = remap_color(source, doc, edge.color);
        }

        self.styles.scratch_style().copy_from(&staged);
        let fingerprint = StyleFingerprint::of(self.styles.staged());
        self.styles
            .intern_or_create(fingerprint, |staged| Ok(doc.create_style_from(staged)?))
    }

    /// The font cache
    pub fn fonts(&self) -> &FontCache {
        &self.fonts
    }

    /// The style cache
    pub fn styles(&self) -> &StyleCache {
        &self.styles
    }
}

/// Draw the requested edges in palette black
///
/// An edge asked for without a line style gets a thin line. Returns the
/// requested line style when no edge was asked for, `None` otherwise.
fn stage_borders(scratch: &mut StyleRecord, style: &CellStyle) -> BorderLineStyle {
    let line = style.border_type().to_line_style();
    let (top, left, right, bottom) = style.borders();
    if !(top || left || right || bottom) {
        return line;
    }

    let line = match line {
        BorderLineStyle::None => BorderLineStyle::Thin,
        line => line,
    };
    let edge = BorderEdge::new(line, Palette::BLACK);
    if top {
        scratch.borders.top = edge;
    }
    if left {
        scratch.borders.left = edge;
    }
    if right {
        scratch.borders.right = edge;
    }
    if bottom {
        scratch.borders.bottom = edge;
    }
    BorderLineStyle::None
}

// Palette entries are per document; system and automatic indices are not.
fn remap_color(source: &Document, target: &Document, icv: u16) -> u16 {
    if (Palette::FIRST_INDEX..=Palette::LAST_INDEX).contains(&icv) {
        target.color_index(source.palette().resolve(icv))
    } else {
        icv
    }
}
