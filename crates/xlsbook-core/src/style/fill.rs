//! Fill/background style types

use super::Palette;

/// Pattern fill types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PatternType {
    /// No pattern
    #[default]
    None,
    /// Solid (100% foreground)
    Solid,
    /// 50% gray
    MediumGray,
    /// 75% gray
    DarkGray,
    /// 25% gray
    LightGray,
    /// Horizontal stripe
    DarkHorizontal,
    /// Vertical stripe
    DarkVertical,
    /// Diagonal stripe (down)
    DarkDown,
    /// Diagonal stripe (up)
    DarkUp,
    /// Grid
    DarkGrid,
    /// Trellis
    DarkTrellis,
    /// Thin horizontal stripe
    LightHorizontal,
    /// Thin vertical stripe
    LightVertical,
    /// Thin diagonal stripe (down)
    LightDown,
    /// Thin diagonal stripe (up)
    LightUp,
    /// Thin grid
    LightGrid,
    /// Thin trellis
    LightTrellis,
    /// 12.5% gray
    Gray125,
    /// 6.25% gray
    Gray0625,
}

impl PatternType {
    /// Record code (6 bits)
    pub fn to_biff(self) -> u8 {
        match self {
            PatternType::None => 0,
            PatternType::Solid => 1,
            PatternType::MediumGray => 2,
            PatternType::DarkGray => 3,
            PatternType::LightGray => 4,
            PatternType::DarkHorizontal => 5,
            PatternType::DarkVertical => 6,
            PatternType::DarkDown => 7,
            PatternType::DarkUp => 8,
            PatternType::DarkGrid => 9,
            PatternType::DarkTrellis => 10,
            PatternType::LightHorizontal => 11,
            PatternType::LightVertical => 12,
            PatternType::LightDown => 13,
            PatternType::LightUp => 14,
            PatternType::LightGrid => 15,
            PatternType::LightTrellis => 16,
            PatternType::Gray125 => 17,
            PatternType::Gray0625 => 18,
        }
    }

    /// Decode a record code
    pub fn from_biff(code: u8) -> Self {
        match code {
            1 => PatternType::Solid,
            2 => PatternType::MediumGray,
            3 => PatternType::DarkGray,
            4 => PatternType::LightGray,
            5 => PatternType::DarkHorizontal,
            6 => PatternType::DarkVertical,
            7 => PatternType::DarkDown,
            8 => PatternType::DarkUp,
            9 => PatternType::DarkGrid,
            10 => PatternType::DarkTrellis,
            11 => PatternType::LightHorizontal,
            12 => PatternType::LightVertical,
            13 => PatternType::LightDown,
            14 => PatternType::LightUp,
            15 => PatternType::LightGrid,
            16 => PatternType::LightTrellis,
            17 => PatternType::Gray125,
            18 => PatternType::Gray0625,
            _ => PatternType::None,
        }
    }
}

/// Cell background: a pattern drawn in the foreground color over the
/// background color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fill {
    /// Pattern
    pub pattern: PatternType,
    /// Pattern color (palette index)
    pub foreground: u16,
    /// Background color (palette index)
    pub background: u16,
}

impl Fill {
    /// Solid fill in the given palette color
    pub fn solid(color: u16) -> Self {
        Self {
            pattern: PatternType::Solid,
            foreground: color,
            background: Palette::SYSTEM_BACKGROUND,
        }
    }

    /// Check if this is a "no fill"
    pub fn is_none(&self) -> bool {
        self.pattern == PatternType::None
    }
}

impl Default for Fill {
    fn default() -> Self {
        Self {
            pattern: PatternType::None,
            foreground: Palette::SYSTEM_FOREGROUND,
            background: Palette::SYSTEM_BACKGROUND,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_mapping() {
        for code in 0..19 {
            assert_eq!(PatternType::from_biff(code).to_biff(), code);
        }
        assert_eq!(PatternType::from_biff(40), PatternType::None);
    }

    #[test]
    fn test_solid() {
        let fill = Fill::solid(10);
        assert_eq!(fill.pattern, PatternType::Solid);
        assert_eq!(fill.foreground, 10);
        assert!(!fill.is_none());
        assert!(Fill::default().is_none());
    }
}
