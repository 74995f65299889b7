//! Formatting records: fonts, cell formats (XF), number formats, palette

mod alignment;
mod border;
mod color;
mod fill;
mod font;
pub mod number_format;
mod palette;
mod record;

pub use alignment::{
    rotation_from_biff, rotation_to_biff, HorizontalAlignment, VerticalAlignment,
    ROTATION_VERTICAL,
};
pub use border::{BorderEdge, BorderLineStyle, Borders};
pub use color::Color;
pub use fill::{Fill, PatternType};
pub use font::{Escapement, FontId, FontRecord, Underline};
pub use number_format::NumberFormats;
pub use palette::{Palette, DEFAULT_PALETTE};
pub use record::{StyleId, StyleRecord, XfKind};

/// A STYLE record: names a style XF
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamedStyle {
    /// One of the built-in styles ("Normal", "Comma", ...)
    Builtin {
        /// Style XF index
        xf: u16,
        /// Built-in style id
        id: u8,
        /// Outline level for RowLevel/ColLevel styles, 0xFF otherwise
        level: u8,
    },
    /// A user-defined style
    User {
        /// Style XF index
        xf: u16,
        /// Style name
        name: String,
    },
}

impl NamedStyle {
    /// Style XF this entry names
    pub fn xf(&self) -> u16 {
        match self {
            NamedStyle::Builtin { xf, .. } | NamedStyle::User { xf, .. } => *xf,
        }
    }
}
