//! BIFF8 color palette

use super::Color;
use crate::error::{Error, Result};

/// The standard BIFF8 color palette.  Indices 8–63 in the workbook map to
/// entries 0–55 here.  A PALETTE record can override individual entries.
pub const DEFAULT_PALETTE: [(u8, u8, u8); 56] = [
    (0, 0, 0),       //  8: Black
    (255, 255, 255), //  9: White
    (255, 0, 0),     // 10: Red
    (0, 255, 0),     // 11: Bright Green
    (0, 0, 255),     // 12: Blue
    (255, 255, 0),   // 13: Yellow
    (255, 0, 255),   // 14: Pink
    (0, 255, 255),   // 15: Turquoise
    (128, 0, 0),     // 16: Dark Red
    (0, 128, 0),     // 17: Green
    (0, 0, 128),     // 18: Dark Blue
    (128, 128, 0),   // 19: Dark Yellow
    (128, 0, 128),   // 20: Violet
    (0, 128, 128),   // 21: Teal
    (192, 192, 192), // 22: Silver (25% Gray)
    (128, 128, 128), // 23: Gray (50% Gray)
    (153, 153, 255), // 24: Periwinkle
    (153, 51, 102),  // 25: Plum
    (255, 255, 204), // 26: Ivory
    (204, 255, 255), // 27: Light Turquoise
    (102, 0, 102),   // 28: Dark Purple
    (255, 128, 128), // 29: Coral
    (0, 102, 204),   // 30: Ocean Blue
    (204, 204, 255), // 31: Ice Blue
    (0, 0, 128),     // 32: Dark Blue (dup)
    (255, 0, 255),   // 33: Pink (dup)
    (255, 255, 0),   // 34: Yellow (dup)
    (0, 255, 255),   // 35: Turquoise (dup)
    (128, 0, 128),   // 36: Violet (dup)
    (128, 0, 0),     // 37: Dark Red (dup)
    (0, 128, 128),   // 38: Teal (dup)
    (0, 0, 255),     // 39: Blue (dup)
    (0, 204, 255),   // 40: Sky Blue
    (204, 255, 255), // 41: Light Turquoise (dup)
    (204, 255, 204), // 42: Light Green
    (255, 255, 153), // 43: Light Yellow
    (153, 204, 255), // 44: Pale Blue
    (255, 153, 204), // 45: Rose
    (204, 153, 255), // 46: Lavender
    (255, 204, 153), // 47: Tan
    (51, 102, 255),  // 48: Light Blue
    (51, 204, 204),  // 49: Aqua
    (153, 204, 0),   // 50: Lime
    (255, 204, 0),   // 51: Gold
    (255, 153, 0),   // 52: Light Orange
    (255, 102, 0),   // 53: Orange
    (102, 102, 153), // 54: Blue-Gray
    (150, 150, 150), // 55: 40% Gray
    (0, 51, 102),    // 56: Dark Teal
    (51, 153, 102),  // 57: Sea Green
    (0, 51, 0),      // 58: Dark Green
    (51, 51, 0),     // 59: Olive Green
    (153, 51, 0),    // 60: Brown
    (153, 51, 51),   // 61: Dark Rose
    (51, 51, 153),   // 62: Indigo
    (51, 51, 51),    // 63: 80% Gray
];

/// Workbook color palette (56 customizable entries)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [(u8, u8, u8); 56],
}

impl Palette {
    /// First customizable palette index
    pub const FIRST_INDEX: u16 = 8;
    /// Last customizable palette index
    pub const LAST_INDEX: u16 = 63;
    /// Black
    pub const BLACK: u16 = 8;
    /// White
    pub const WHITE: u16 = 9;
    /// System window text color (default foreground)
    pub const SYSTEM_FOREGROUND: u16 = 0x0040;
    /// System window color (default background)
    pub const SYSTEM_BACKGROUND: u16 = 0x0041;
    /// Automatic color ("normal" font color)
    pub const AUTOMATIC: u16 = 0x7FFF;

    /// Create the default palette
    pub fn new() -> Self {
        Self {
            colors: DEFAULT_PALETTE,
        }
    }

    /// Whether no entry differs from the default palette
    pub fn is_default(&self) -> bool {
        self.colors == DEFAULT_PALETTE
    }

    /// All 56 entries, index 8 first
    pub fn colors(&self) -> &[(u8, u8, u8); 56] {
        &self.colors
    }

    /// RGB value stored at a palette index
    pub fn rgb_at(&self, index: u16) -> Option<(u8, u8, u8)> {
        if (Self::FIRST_INDEX..=Self::LAST_INDEX).contains(&index) {
            Some(self.colors[(index - Self::FIRST_INDEX) as usize])
        } else {
            None
        }
    }

    /// Replace the color at a palette index
    pub fn set_color_at(&mut self, index: u16, rgb: (u8, u8, u8)) -> Result<()> {
        if !(Self::FIRST_INDEX..=Self::LAST_INDEX).contains(&index) {
            return Err(Error::InvalidPaletteIndex(index));
        }
        self.colors[(index - Self::FIRST_INDEX) as usize] = rgb;
        Ok(())
    }

    /// Find the first palette index holding exactly this color
    pub fn find_color(&self, r: u8, g: u8, b: u8) -> Option<u16> {
        self.colors
            .iter()
            .position(|&c| c == (r, g, b))
            .map(|pos| pos as u16 + Self::FIRST_INDEX)
    }

    /// Find the palette index whose color is nearest to the given one
    ///
    /// Distance is the sum of the absolute component differences. Ties go
    /// to the lowest index.
    pub fn find_similar_color(&self, r: u8, g: u8, b: u8) -> u16 {
        let distance = |&(cr, cg, cb): &(u8, u8, u8)| {
            (cr as i32 - r as i32).abs() + (cg as i32 - g as i32).abs() + (cb as i32 - b as i32).abs()
        };

        let mut best = 0usize;
        let mut best_distance = i32::MAX;
        for (pos, color) in self.colors.iter().enumerate() {
            let d = distance(color);
            if d < best_distance {
                best = pos;
                best_distance = d;
            }
        }
        best as u16 + Self::FIRST_INDEX
    }

    /// Map a requested color to a palette index
    ///
    /// Exact matches win; otherwise the nearest color is used. Automatic maps
    /// to [`Palette::AUTOMATIC`].
    pub fn index_of(&self, color: Color) -> u16 {
        match color {
            Color::Auto => Self::AUTOMATIC,
            Color::Rgb { r, g, b } => self
                .find_color(r, g, b)
                .unwrap_or_else(|| self.find_similar_color(r, g, b)),
        }
    }

    /// Resolve a palette index read from a record into a color
    pub fn resolve(&self, icv: u16) -> Color {
        match icv {
            Self::FIRST_INDEX..=Self::LAST_INDEX => {
                let (r, g, b) = self.colors[(icv - Self::FIRST_INDEX) as usize];
                Color::Rgb { r, g, b }
            }
            Self::SYSTEM_FOREGROUND => Color::BLACK,
            Self::SYSTEM_BACKGROUND => Color::WHITE,
            // Indices 0–7 are the EGA colors, identical to 8–15.
            0..=7 => {
                let (r, g, b) = DEFAULT_PALETTE[icv as usize];
                Color::Rgb { r, g, b }
            }
            _ => Color::Auto,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_color_exact() {
        let palette = Palette::new();
        assert_eq!(palette.find_color(0, 0, 0), Some(8));
        assert_eq!(palette.find_color(255, 0, 0), Some(10));
        // Duplicates resolve to the first occurrence
        assert_eq!(palette.find_color(0, 0, 128), Some(18));
        assert_eq!(palette.find_color(1, 2, 3), None);
    }

    #[test]
    fn test_find_similar_color() {
        let palette = Palette::new();
        assert_eq!(palette.find_similar_color(250, 5, 5), 10);
        assert_eq!(palette.find_similar_color(1, 1, 1), 8);
        assert_eq!(palette.find_similar_color(52, 52, 52), 63);
    }

    #[test]
    fn test_index_of() {
        let palette = Palette::new();
        assert_eq!(palette.index_of(Color::Auto), Palette::AUTOMATIC);
        assert_eq!(palette.index_of(Color::RED), 10);
        assert_eq!(palette.index_of(Color::rgb(254, 1, 0)), 10);
    }

    #[test]
    fn test_resolve() {
        let palette = Palette::new();
        assert_eq!(palette.resolve(8), Color::BLACK);
        assert_eq!(palette.resolve(63), Color::rgb(51, 51, 51));
        assert_eq!(palette.resolve(0x41), Color::WHITE);
        assert_eq!(palette.resolve(0x7FFF), Color::Auto);
        assert_eq!(palette.resolve(2), Color::RED);
    }

    #[test]
    fn test_set_color_at() {
        let mut palette = Palette::new();
        palette.set_color_at(8, (1, 2, 3)).unwrap();
        assert_eq!(palette.rgb_at(8), Some((1, 2, 3)));
        assert!(!palette.is_default());
        assert!(palette.set_color_at(64, (0, 0, 0)).is_err());
        assert!(palette.set_color_at(7, (0, 0, 0)).is_err());
    }
}
