//! Text alignment types

/// Rotation value meaning "letters stacked vertically"
pub const ROTATION_VERTICAL: i16 = 255;

/// Horizontal alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorizontalAlignment {
    /// General alignment (text left, numbers right)
    #[default]
    General,
    /// Left aligned
    Left,
    /// Center aligned
    Center,
    /// Right aligned
    Right,
    /// Fill (repeat content to fill cell width)
    Fill,
    /// Justify (stretch to fit width)
    Justify,
    /// Center across selection
    CenterAcrossSelection,
    /// Distributed (like justify, but for East Asian text)
    Distributed,
}

impl HorizontalAlignment {
    /// Record code (3 bits)
    pub fn to_biff(self) -> u8 {
        match self {
            HorizontalAlignment::General => 0,
            HorizontalAlignment::Left => 1,
            HorizontalAlignment::Center => 2,
            HorizontalAlignment::Right => 3,
            HorizontalAlignment::Fill => 4,
            HorizontalAlignment::Justify => 5,
            HorizontalAlignment::CenterAcrossSelection => 6,
            HorizontalAlignment::Distributed => 7,
        }
    }

    /// Decode a record code
    pub fn from_biff(code: u8) -> Self {
        match code {
            1 => HorizontalAlignment::Left,
            2 => HorizontalAlignment::Center,
            3 => HorizontalAlignment::Right,
            4 => HorizontalAlignment::Fill,
            5 => HorizontalAlignment::Justify,
            6 => HorizontalAlignment::CenterAcrossSelection,
            7 => HorizontalAlignment::Distributed,
            _ => HorizontalAlignment::General,
        }
    }
}

/// Vertical alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerticalAlignment {
    /// Top aligned
    Top,
    /// Center aligned
    Center,
    /// Bottom aligned (default)
    #[default]
    Bottom,
    /// Justify
    Justify,
    /// Distributed
    Distributed,
}

impl VerticalAlignment {
    /// Record code (3 bits)
    pub fn to_biff(self) -> u8 {
        match self {
            VerticalAlignment::Top => 0,
            VerticalAlignment::Center => 1,
            VerticalAlignment::Bottom => 2,
            VerticalAlignment::Justify => 3,
            VerticalAlignment::Distributed => 4,
        }
    }

    /// Decode a record code
    pub fn from_biff(code: u8) -> Self {
        match code {
            0 => VerticalAlignment::Top,
            1 => VerticalAlignment::Center,
            3 => VerticalAlignment::Justify,
            4 => VerticalAlignment::Distributed,
            _ => VerticalAlignment::Bottom,
        }
    }
}

/// Encode a rotation in degrees (-90..=90, or [`ROTATION_VERTICAL`])
///
/// Out-of-range values encode as no rotation.
pub fn rotation_to_biff(degrees: i16) -> u8 {
    match degrees {
        ROTATION_VERTICAL => 255,
        0..=90 => degrees as u8,
        -90..=-1 => (90 - degrees) as u8,
        _ => 0,
    }
}

/// Decode a rotation byte into degrees
pub fn rotation_from_biff(code: u8) -> i16 {
    match code {
        r @ 0..=90 => r as i16,
        r @ 91..=180 => -((r as i16) - 90),
        255 => ROTATION_VERTICAL,
        _ => 0,
    }
}
