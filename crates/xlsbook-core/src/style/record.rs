//! Cell format (XF) records

use super::{Borders, Fill, FontId, HorizontalAlignment, VerticalAlignment};

/// Handle to a cell format record in a [`Document`](crate::Document)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct StyleId(pub u16);

impl StyleId {
    /// Position in the XF table
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for StyleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether an XF record is a named-style template or a cell format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum XfKind {
    /// Style XF, referenced by STYLE records
    Style,
    /// Cell XF, referenced by cells
    #[default]
    Cell,
}

/// A cell format record
///
/// Records owned by a document are never modified once registered. Values of
/// this type that are not registered (a session's scratch style, for
/// instance) are ordinary mutable values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleRecord {
    /// Font reference
    pub font: FontId,
    /// Number format code
    pub format: u16,
    /// Horizontal alignment
    pub horizontal: HorizontalAlignment,
    /// Vertical alignment
    pub vertical: VerticalAlignment,
    /// Wrap text
    pub wrap_text: bool,
    /// Shrink to fit
    pub shrink_to_fit: bool,
    /// Indent level (0-15)
    pub indent: u8,
    /// Text rotation in degrees (-90 to 90, or 255 for vertical)
    pub rotation: i16,
    /// Borders
    pub borders: Borders,
    /// Background
    pub fill: Fill,
    /// Cell is locked when the sheet is protected
    pub locked: bool,
    /// Formula is hidden when the sheet is protected
    pub hidden: bool,
    /// Style or cell XF
    pub kind: XfKind,
    /// Parent style XF (cell XFs only)
    pub parent: u16,
}

impl StyleRecord {
    /// Create a cell XF with default attributes
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a style XF with default attributes
    pub fn style_xf() -> Self {
        Self {
            kind: XfKind::Style,
            parent: 0x0FFF,
            ..Self::default()
        }
    }

    /// Whether this is a style XF
    pub fn is_style_xf(&self) -> bool {
        self.kind == XfKind::Style
    }

    /// Copy every formatting attribute of `src` into this record
    ///
    /// Transfers alignment, the four borders with their colors, the fill,
    /// number format, font reference, indentation, rotation, vertical
    /// alignment and wrap flag. The XF kind, parent and protection flags are
    /// left untouched. Font references are copied as raw ids, so `src` must
    /// belong to the same document.
    pub fn copy_from(&mut self, src: &StyleRecord) {
        self.horizontal = src.horizontal;
        self.vertical = src.vertical;
        self.wrap_text = src.wrap_text;
        self.shrink_to_fit = src.shrink_to_fit;
        self.indent = src.indent;
        self.rotation = src.rotation;
        self.borders = src.borders;
        self.fill = src.fill;
        self.format = src.format;
        self.font = src.font;
    }
}

impl Default for StyleRecord {
    fn default() -> Self {
        Self {
            font: FontId(0),
            format: 0,
            horizontal: HorizontalAlignment::General,
            vertical: VerticalAlignment::Bottom,
            wrap_text: false,
            shrink_to_fit: false,
            indent: 0,
            rotation: 0,
            borders: Borders::default(),
            fill: Fill::default(),
            locked: true,
            hidden: false,
            kind: XfKind::Cell,
            parent: 0,
        }
    }
}
