//! Border style types

/// Border line styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BorderLineStyle {
    /// No border
    #[default]
    None,
    /// Thin line
    Thin,
    /// Medium line
    Medium,
    /// Dashed line
    Dashed,
    /// Dotted line
    Dotted,
    /// Thick line
    Thick,
    /// Double line
    Double,
    /// Hair line (very thin)
    Hair,
    /// Medium dashed
    MediumDashed,
    /// Dash-dot
    DashDot,
    /// Medium dash-dot
    MediumDashDot,
    /// Dash-dot-dot
    DashDotDot,
    /// Medium dash-dot-dot
    MediumDashDotDot,
    /// Slant dash-dot
    SlantDashDot,
}

impl BorderLineStyle {
    /// Record code (4 bits)
    pub fn to_biff(self) -> u8 {
        match self {
            BorderLineStyle::None => 0,
            BorderLineStyle::Thin => 1,
            BorderLineStyle::Medium => 2,
            BorderLineStyle::Dashed => 3,
            BorderLineStyle::Dotted => 4,
            BorderLineStyle::Thick => 5,
            BorderLineStyle::Double => 6,
            BorderLineStyle::Hair => 7,
            BorderLineStyle::MediumDashed => 8,
            BorderLineStyle::DashDot => 9,
            BorderLineStyle::MediumDashDot => 10,
            BorderLineStyle::DashDotDot => 11,
            BorderLineStyle::MediumDashDotDot => 12,
            BorderLineStyle::SlantDashDot => 13,
        }
    }

    /// Decode a record code
    pub fn from_biff(code: u8) -> Self {
        match code {
            1 => BorderLineStyle::Thin,
            2 => BorderLineStyle::Medium,
            3 => BorderLineStyle::Dashed,
            4 => BorderLineStyle::Dotted,
            5 => BorderLineStyle::Thick,
            6 => BorderLineStyle::Double,
            7 => BorderLineStyle::Hair,
            8 => BorderLineStyle::MediumDashed,
            9 => BorderLineStyle::DashDot,
            10 => BorderLineStyle::MediumDashDot,
            11 => BorderLineStyle::DashDotDot,
            12 => BorderLineStyle::MediumDashDotDot,
            13 => BorderLineStyle::SlantDashDot,
            _ => BorderLineStyle::None,
        }
    }
}

/// A single border edge: line style plus palette color index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BorderEdge {
    /// Line style
    pub style: BorderLineStyle,
    /// Line color (palette index)
    pub color: u16,
}

impl BorderEdge {
    /// Create a new border edge
    pub fn new(style: BorderLineStyle, color: u16) -> Self {
        Self { style, color }
    }

    /// Whether a line is drawn
    pub fn is_visible(&self) -> bool {
        self.style != BorderLineStyle::None
    }
}

/// The four borders of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Borders {
    /// Left border
    pub left: BorderEdge,
    /// Right border
    pub right: BorderEdge,
    /// Top border
    pub top: BorderEdge,
    /// Bottom border
    pub bottom: BorderEdge,
}

impl Borders {
    /// Create with no borders
    pub fn new() -> Self {
        Self::default()
    }

    /// Same edge on every side
    pub fn all(style: BorderLineStyle, color: u16) -> Self {
        let edge = BorderEdge::new(style, color);
        Self {
            left: edge,
            right: edge,
            top: edge,
            bottom: edge,
        }
    }

    /// Check if no border is drawn
    pub fn is_empty(&self) -> bool {
        !(self.left.is_visible()
            || self.right.is_visible()
            || self.top.is_visible()
            || self.bottom.is_visible())
    }
}
