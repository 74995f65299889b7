//! Formatting requests
//!
//! A [`CellStyle`] describes how a cell should look. It is plain data: the
//! [`FormattingContext`](crate::FormattingContext) turns it into font and
//! cell format records, reusing existing records wherever it can.

use xlsbook_core::{BorderLineStyle, Color, HorizontalAlignment};

/// Largest font size Excel accepts, in points
pub const MAX_FONT_SIZE: u16 = 409;

/// Smallest font size, in points
pub const MIN_FONT_SIZE: u16 = 1;

/// Font size of the default look, in points
pub const DEFAULT_FONT_SIZE: u16 = 10;

/// Font families a descriptor can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontFamily {
    #[default]
    Arial,
    Times,
    Courier,
    Tahoma,
    Calibri,
    Batang,
    Broadway,
    Cambria,
    Castellar,
    Century,
    Fixedsys,
    Garamond,
    Georgia,
    Harrington,
    Terminal,
    Wingdings,
}

impl FontFamily {
    /// Every family, in declaration order
    pub const ALL: [FontFamily; 16] = [
        FontFamily::Arial,
        FontFamily::Times,
        FontFamily::Courier,
        FontFamily::Tahoma,
        FontFamily::Calibri,
        FontFamily::Batang,
        FontFamily::Broadway,
        FontFamily::Cambria,
        FontFamily::Castellar,
        FontFamily::Century,
        FontFamily::Fixedsys,
        FontFamily::Garamond,
        FontFamily::Georgia,
        FontFamily::Harrington,
        FontFamily::Terminal,
        FontFamily::Wingdings,
    ];

    /// Name written into the font record
    pub fn name(self) -> &'static str {
        match self {
            FontFamily::Arial => "Arial",
            FontFamily::Times => "Times",
            FontFamily::Courier => "Courier",
            FontFamily::Tahoma => "Tahoma",
            FontFamily::Calibri => "Calibri",
            FontFamily::Batang => "Batang",
            FontFamily::Broadway => "Broadway",
            FontFamily::Cambria => "Cambria",
            FontFamily::Castellar => "Castellar",
            FontFamily::Century => "Century",
            FontFamily::Fixedsys => "Fixedsys",
            FontFamily::Garamond => "Garamond",
            FontFamily::Georgia => "Georgia",
            FontFamily::Harrington => "Harrington",
            FontFamily::Terminal => "Terminal",
            FontFamily::Wingdings => "Wingdings",
        }
    }

    /// Look up a family by its record name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.name().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for FontFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Horizontal alignment of a cell's content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellAlignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl CellAlignment {
    /// Alignment stored in the cell format record
    pub fn to_horizontal(self) -> HorizontalAlignment {
        match self {
            CellAlignment::Left => HorizontalAlignment::Left,
            CellAlignment::Center => HorizontalAlignment::Center,
            CellAlignment::Right => HorizontalAlignment::Right,
            CellAlignment::Justify => HorizontalAlignment::Justify,
        }
    }
}

/// Line style used for the borders a descriptor enables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BorderType {
    Hair,
    Dashed,
    Dotted,
    Double,
    Thin,
    Medium,
    Thick,
    #[default]
    None,
}

impl BorderType {
    /// Line style stored in the cell format record
    pub fn to_line_style(self) -> BorderLineStyle {
        match self {
            BorderType::Hair => BorderLineStyle::Hair,
            BorderType::Dashed => BorderLineStyle::Dashed,
            BorderType::Dotted => BorderLineStyle::Dotted,
            BorderType::Double => BorderLineStyle::Double,
            BorderType::Thin => BorderLineStyle::Thin,
            BorderType::Medium => BorderLineStyle::Medium,
            BorderType::Thick => BorderLineStyle::Thick,
            BorderType::None => BorderLineStyle::None,
        }
    }
}

/// Desired formatting of a cell
///
/// The default value is the baseline look of a new document: Arial 10 pt,
/// no emphasis, left aligned, no borders, no explicit colors and no custom
/// number format. Descriptors are built with the `with_*` methods:
///
/// ```rust
/// use xlsbook::{CellAlignment, CellStyle, Color};
///
/// let header = CellStyle::new()
///     .with_bold(true)
///     .with_size(12)
///     .with_background(Color::rgb(255, 255, 0))
///     .with_alignment(CellAlignment::Center);
/// assert!(header.defines_font());
/// ```
///
/// Font size is clamped to `1..=409` points, so two descriptors that differ
/// only beyond the clamp are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellStyle {
    bold: bool,
    italic: bool,
    underlined: bool,
    family: FontFamily,
    size: u16,
    font_color: Color,
    background: Color,
    wrap_text: bool,
    alignment: CellAlignment,
    border_top: bool,
    border_left: bool,
    border_right: bool,
    border_bottom: bool,
    border_type: BorderType,
    custom_format: Option<String>,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            underlined: false,
            family: FontFamily::Arial,
            size: DEFAULT_FONT_SIZE,
            font_color: Color::Auto,
            background: Color::Auto,
            wrap_text: false,
            alignment: CellAlignment::Left,
            border_top: false,
            border_left: false,
            border_right: false,
            border_bottom: false,
            border_type: BorderType::None,
            custom_format: None,
        }
    }
}

impl CellStyle {
    /// Create the default descriptor
    pub fn new() -> Self {
        Self::default()
    }

    /// Descriptor that only applies a number format
    pub fn with_format<S: Into<String>>(pattern: S) -> Self {
        Self::new().with_custom_format(pattern)
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    pub fn with_underlined(mut self, underlined: bool) -> Self {
        self.underlined = underlined;
        self
    }

    pub fn with_family(mut self, family: FontFamily) -> Self {
        self.family = family;
        self
    }

    /// Set the font size in points, clamped to `1..=409`
    pub fn with_size(mut self, size: u16) -> Self {
        self.size = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        self
    }

    /// Set the font color; [`Color::Auto`] leaves it unspecified
    pub fn with_font_color(mut self, color: Color) -> Self {
        self.font_color = color;
        self
    }

    /// Set a solid background; [`Color::Auto`] removes it
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn with_wrap_text(mut self, wrap: bool) -> Self {
        self.wrap_text = wrap;
        self
    }

    pub fn with_alignment(mut self, alignment: CellAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Enable or disable each border edge
    pub fn with_borders(mut self, top: bool, left: bool, right: bool, bottom: bool) -> Self {
        self.border_top = top;
        self.border_left = left;
        self.border_right = right;
        self.border_bottom = bottom;
        self
    }

    /// Enable all four border edges in one line style
    pub fn with_outline(self, border_type: BorderType) -> Self {
        self.with_borders(true, true, true, true)
            .with_border_type(border_type)
    }

    pub fn with_border_top(mut self, enabled: bool) -> Self {
        self.border_top = enabled;
        self
    }

    pub fn with_border_left(mut self, enabled: bool) -> Self {
        self.border_left = enabled;
        self
    }

    pub fn with_border_right(mut self, enabled: bool) -> Self {
        self.border_right = enabled;
        self
    }

    pub fn with_border_bottom(mut self, enabled: bool) -> Self {
        self.border_bottom = enabled;
        self
    }

    pub fn with_border_type(mut self, border_type: BorderType) -> Self {
        self.border_type = border_type;
        self
    }

    /// Set a number format pattern such as `"0.00"` or `"dd/mm/yyyy"`
    pub fn with_custom_format<S: Into<String>>(mut self, pattern: S) -> Self {
        self.custom_format = Some(pattern.into());
        self
    }

    /// Remove the number format pattern
    pub fn without_custom_format(mut self) -> Self {
        self.custom_format = None;
        self
    }

    pub fn bold(&self) -> bool {
        self.bold
    }

    pub fn italic(&self) -> bool {
        self.italic
    }

    pub fn underlined(&self) -> bool {
        self.underlined
    }

    pub fn family(&self) -> FontFamily {
        self.family
    }

    /// Font size in points
    pub fn size(&self) -> u16 {
        self.size
    }

    pub fn font_color(&self) -> Color {
        self.font_color
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn wrap_text(&self) -> bool {
        self.wrap_text
    }

    pub fn alignment(&self) -> CellAlignment {
        self.alignment
    }

    /// Enabled edges as `(top, left, right, bottom)`
    pub fn borders(&self) -> (bool, bool, bool, bool) {
        (
            self.border_top,
            self.border_left,
            self.border_right,
            self.border_bottom,
        )
    }

    pub fn border_type(&self) -> BorderType {
        self.border_type
    }

    pub fn custom_format(&self) -> Option<&str> {
        self.custom_format.as_deref()
    }

    /// Whether this descriptor asks for a font other than the default one
    ///
    /// Borders, colors and alignment do not count; only emphasis, family and
    /// size do.
    pub fn defines_font(&self) -> bool {
        self.bold
            || self.underlined
            || self.italic
            || self.family != FontFamily::Arial
            || self.size != DEFAULT_FONT_SIZE
    }
}
