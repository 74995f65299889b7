//! Row types

use std::collections::BTreeMap;

use crate::cell::Cell;

/// A row: its cells plus row metadata
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    /// Cells keyed by column index
    pub cells: BTreeMap<u16, Cell>,
    /// Custom height in twentieths of a point (None = default)
    pub height: Option<u16>,
    /// Row is hidden
    pub hidden: bool,
    /// Outline/grouping level (0-7)
    pub outline_level: u8,
    /// Row is collapsed (in outline)
    pub collapsed: bool,
}

impl Row {
    /// Create a new row with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if this row has any custom settings
    pub fn has_custom_settings(&self) -> bool {
        self.height.is_some() || self.hidden || self.outline_level > 0 || self.collapsed
    }

    /// First and one-past-last used column, if any cell exists
    pub fn column_span(&self) -> Option<(u16, u16)> {
        let first = *self.cells.keys().next()?;
        let last = *self.cells.keys().next_back()?;
        Some((first, last + 1))
    }

    /// Number of cells in row
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}
