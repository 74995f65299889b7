//! Find-or-create table for font records

use ahash::AHashMap;
use tracing::trace;
use xlsbook_core::{Color, Document, Escapement, FontId, FontRecord, Underline};

use crate::descriptor::{CellStyle, FontFamily};
use crate::Result;

/// Attributes a descriptor can vary on a font, with the color already
/// mapped to a palette index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct FontKey {
    bold: bool,
    italic: bool,
    underline: bool,
    color: u16,
    height: u16,
    family: FontFamily,
}

impl FontKey {
    fn to_record(self) -> FontRecord {
        FontRecord {
            height: self.height,
            weight: if self.bold {
                FontRecord::WEIGHT_BOLD
            } else {
                FontRecord::WEIGHT_NORMAL
            },
            italic: self.italic,
            strikeout: false,
            underline: if self.underline {
                Underline::Single
            } else {
                Underline::None
            },
            color: self.color,
            escapement: Escapement::None,
            name: self.family.name().to_string(),
        }
    }
}

/// Resolves font attributes to font records of one document
///
/// Existing records are found through [`Document::find_font`], so fonts
/// that were already in a file opened from disk are reused as well. A font
/// is created only when no record matches, which keeps the document at one
/// record per distinct attribute set.
#[derive(Debug, Default)]
pub struct FontCache {
    resolved: AHashMap<FontKey, FontId>,
}

impl FontCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Font record for the given attributes, created if missing
    ///
    /// `size` is in points; records store twentieths of a point. Fails with
    /// [`xlsbook_core::Error::FontLimitExceeded`] when a new record is needed
    /// and the font table is full.
    #[allow(clippy::too_many_arguments)]
    pub fn resolve(
        &mut self,
        doc: &mut Document,
        bold: bool,
        italic: bool,
        underline: bool,
        color: Color,
        size: u16,
        family: FontFamily,
    ) -> Result<FontId> {
        let key = FontKey {
            bold,
            italic,
            underline,
            color: doc.color_index(color),
            height: size.saturating_mul(20),
            family,
        };
        if let Some(&id) = self.resolved.get(&key) {
            return Ok(id);
        }

        let record = key.to_record();
        let id = match doc.find_font(&record) {
            Some(id) => id,
            None => doc.create_font(record)?,
        };
        trace!(font = %id, name = family.name(), height = key.height, "resolved font");
        self.resolved.insert(key, id);
        Ok(id)
    }

    /// Font record for the font attributes of a descriptor
    pub fn resolve_descriptor(&mut self, doc: &mut Document, style: &CellStyle) -> Result<FontId> {
        self.resolve(
            doc,
            style.bold(),
            style.italic(),
            style.underlined(),
            style.font_color(),
            style.size(),
            style.family(),
        )
    }

    /// Font record equal to `record`, created if missing
    ///
    /// Used for fonts that carry attributes a descriptor cannot express
    /// (strikeout, escapement, other families), so the result is not
    /// memoized.
    pub fn resolve_record(&mut self, doc: &mut Document, record: FontRecord) -> Result<FontId> {
        match doc.find_font(&record) {
            Some(id) => Ok(id),
            None => Ok(doc.create_font(record)?),
        }
    }

    /// Number of attribute sets resolved so far
    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    /// Whether nothing has been resolved yet
    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }
}
