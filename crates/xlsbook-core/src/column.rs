//! Column types

/// Column metadata
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnInfo {
    /// Custom width in 1/256 of a character (None = default)
    pub width: Option<u16>,
    /// Column is hidden
    pub hidden: bool,
    /// Outline/grouping level (0-7)
    pub outline_level: u8,
    /// Column is collapsed (in outline)
    pub collapsed: bool,
}

impl ColumnInfo {
    /// Create a new column with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if this column has any custom settings
    pub fn has_custom_settings(&self) -> bool {
        self.width.is_some() || self.hidden || self.outline_level > 0 || self.collapsed
    }
}
