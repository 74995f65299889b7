//! Font records

use super::Palette;

/// Handle to a font record in a [`Document`](crate::Document)
///
/// Ids follow BIFF8 numbering: the fifth font record is never referenced, so
/// the id jumps from 3 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct FontId(pub u16);

impl FontId {
    /// Id of the record stored at a position in the font table
    pub fn from_position(position: usize) -> Self {
        if position < 4 {
            FontId(position as u16)
        } else {
            FontId(position as u16 + 1)
        }
    }

    /// Position in the font table, or `None` for the unused id 4
    pub fn position(self) -> Option<usize> {
        match self.0 {
            0..=3 => Some(self.0 as usize),
            4 => None,
            n => Some(n as usize - 1),
        }
    }
}

impl std::fmt::Display for FontId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A font record as stored in the document
///
/// Equality covers every attribute that the format stores, so two equal
/// records are interchangeable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontRecord {
    /// Height in twentieths of a point
    pub height: u16,
    /// Boldness (400 normal, 700 bold)
    pub weight: u16,
    /// Italic
    pub italic: bool,
    /// Strikethrough
    pub strikeout: bool,
    /// Underline kind
    pub underline: Underline,
    /// Color palette index
    pub color: u16,
    /// Superscript/subscript offset
    pub escapement: Escapement,
    /// Font family name
    pub name: String,
}

impl FontRecord {
    /// Normal weight
    pub const WEIGHT_NORMAL: u16 = 400;
    /// Bold weight
    pub const WEIGHT_BOLD: u16 = 700;

    /// Create a font with the given name and height in points
    pub fn new<S: Into<String>>(name: S, points: u16) -> Self {
        Self {
            name: name.into(),
            height: points.saturating_mul(20),
            ..Self::default()
        }
    }

    /// Set bold
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.weight = if bold {
            Self::WEIGHT_BOLD
        } else {
            Self::WEIGHT_NORMAL
        };
        self
    }

    /// Set italic
    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Set underline
    pub fn with_underline(mut self, underline: Underline) -> Self {
        self.underline = underline;
        self
    }

    /// Set color palette index
    pub fn with_color(mut self, color: u16) -> Self {
        self.color = color;
        self
    }

    /// Whether the weight is bold
    pub fn is_bold(&self) -> bool {
        self.weight >= Self::WEIGHT_BOLD
    }

    /// Height in points
    pub fn points(&self) -> f64 {
        self.height as f64 / 20.0
    }
}

impl Default for FontRecord {
    fn default() -> Self {
        Self {
            height: 200,
            weight: Self::WEIGHT_NORMAL,
            italic: false,
            strikeout: false,
            underline: Underline::None,
            color: Palette::AUTOMATIC,
            escapement: Escapement::None,
            name: "Arial".to_string(),
        }
    }
}

/// Underline style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Underline {
    /// No underline
    #[default]
    None,
    /// Single underline
    Single,
    /// Double underline
    Double,
    /// Single accounting underline (extends to cell width)
    SingleAccounting,
    /// Double accounting underline
    DoubleAccounting,
}

impl Underline {
    /// Record code
    pub fn to_biff(self) -> u8 {
        match self {
            Underline::None => 0x00,
            Underline::Single => 0x01,
            Underline::Double => 0x02,
            Underline::SingleAccounting => 0x21,
            Underline::DoubleAccounting => 0x22,
        }
    }

    /// Decode a record code; unknown codes read as no underline
    pub fn from_biff(code: u8) -> Self {
        match code {
            0x01 => Underline::Single,
            0x02 => Underline::Double,
            0x21 => Underline::SingleAccounting,
            0x22 => Underline::DoubleAccounting,
            _ => Underline::None,
        }
    }
}

/// Superscript/subscript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Escapement {
    /// Normal baseline
    #[default]
    None,
    /// Superscript
    Superscript,
    /// Subscript
    Subscript,
}

impl Escapement {
    /// Record code
    pub fn to_biff(self) -> u16 {
        match self {
            Escapement::None => 0,
            Escapement::Superscript => 1,
            Escapement::Subscript => 2,
        }
    }

    /// Decode a record code
    pub fn from_biff(code: u16) -> Self {
        match code {
            1 => Escapement::Superscript,
            2 => Escapement::Subscript,
            _ => Escapement::None,
        }
    }
}
