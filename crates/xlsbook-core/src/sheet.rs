//! Worksheet type

use std::collections::BTreeMap;

use crate::cell::{Cell, CellValue};
use crate::column::ColumnInfo;
use crate::error::{Error, Result};
use crate::row::Row;
use crate::style::StyleId;
use crate::{MAX_COLS, MAX_OUTLINE_LEVEL, MAX_ROWS};

/// A worksheet: sparse rows of cells plus row and column metadata
#[derive(Debug, Clone)]
pub struct Sheet {
    name: String,
    rows: BTreeMap<u32, Row>,
    columns: BTreeMap<u16, ColumnInfo>,
    /// Style given to cells created without an explicit one
    default_style: StyleId,
}

impl Sheet {
    /// Create an empty sheet whose new cells use `default_style`
    pub fn new<S: Into<String>>(name: S, default_style: StyleId) -> Self {
        Self {
            name: name.into(),
            rows: BTreeMap::new(),
            columns: BTreeMap::new(),
            default_style,
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    // === Rows and cells ===

    /// Get a row
    pub fn row(&self, row: u32) -> Option<&Row> {
        self.rows.get(&row)
    }

    /// Get a mutable row
    pub fn row_mut(&mut self, row: u32) -> Option<&mut Row> {
        self.rows.get_mut(&row)
    }

    /// Get a row, creating it when absent
    pub fn get_or_create_row(&mut self, row: u32) -> Result<&mut Row> {
        validate_row(row)?;
        Ok(self.rows.entry(row).or_default())
    }

    /// Iterate over rows in ascending order
    pub fn rows(&self) -> impl Iterator<Item = (u32, &Row)> {
        self.rows.iter().map(|(i, r)| (*i, r))
    }

    /// Get a cell
    pub fn cell(&self, row: u32, col: u16) -> Option<&Cell> {
        self.rows.get(&row).and_then(|r| r.cells.get(&col))
    }

    /// Get a mutable cell
    pub fn cell_mut(&mut self, row: u32, col: u16) -> Option<&mut Cell> {
        self.rows.get_mut(&row).and_then(|r| r.cells.get_mut(&col))
    }

    /// Get a cell, creating a blank one with the default style when absent
    pub fn get_or_create_cell(&mut self, row: u32, col: u16) -> Result<&mut Cell> {
        validate_col(col)?;
        let default_style = self.default_style;
        let row = self.get_or_create_row(row)?;
        Ok(row
            .cells
            .entry(col)
            .or_insert_with(|| Cell::new(CellValue::Blank, default_style)))
    }

    /// Get a cell value
    pub fn value(&self, row: u32, col: u16) -> Option<&CellValue> {
        self.cell(row, col).map(|c| &c.value)
    }

    /// Set a cell value, keeping the cell's style
    pub fn set_value<V: Into<CellValue>>(&mut self, row: u32, col: u16, value: V) -> Result<()> {
        self.get_or_create_cell(row, col)?.value = value.into();
        Ok(())
    }

    /// Fail unless `row`, `col` lies inside the BIFF8 grid
    pub fn check_position(row: u32, col: u16) -> Result<()> {
        validate_row(row)?;
        validate_col(col)
    }

    /// Set a cell's style, keeping its value
    pub fn set_style(&mut self, row: u32, col: u16, style: StyleId) -> Result<()> {
        self.get_or_create_cell(row, col)?.style = style;
        Ok(())
    }

    /// Get the number of cells
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(Row::cell_count).sum()
    }

    /// Check if the sheet holds no cells
    pub fn is_empty(&self) -> bool {
        self.rows.values().all(|r| r.cells.is_empty())
    }

    /// Get the used range as (first_row, first_col, last_row, last_col), inclusive
    pub fn used_range(&self) -> Option<(u32, u16, u32, u16)> {
        let mut range: Option<(u32, u16, u32, u16)> = None;
        for (&index, row) in &self.rows {
            let Some((first, end)) = row.column_span() else {
                continue;
            };
            range = Some(match range {
                None => (index, first, index, end - 1),
                Some((r0, c0, _, c1)) => (r0, c0.min(first), index, c1.max(end - 1)),
            });
        }
        range
    }

    // === Columns ===

    /// Get column metadata
    pub fn column(&self, col: u16) -> Option<&ColumnInfo> {
        self.columns.get(&col)
    }

    /// Get column metadata, creating it when absent
    pub fn get_or_create_column(&mut self, col: u16) -> Result<&mut ColumnInfo> {
        validate_col(col)?;
        Ok(self.columns.entry(col).or_default())
    }

    /// Iterate over columns with metadata in ascending order
    pub fn columns(&self) -> impl Iterator<Item = (u16, &ColumnInfo)> {
        self.columns.iter().map(|(i, c)| (*i, c))
    }

    // === Outline grouping ===

    /// Group rows `first..=last` one outline level deeper
    pub fn group_rows(&mut self, first: u32, last: u32) -> Result<()> {
        let (first, last) = ordered(first, last);
        validate_row(last)?;
        if let Some(level) = (first..=last)
            .map(|r| self.row_level(r))
            .find(|&l| l >= MAX_OUTLINE_LEVEL)
        {
            return Err(Error::OutlineLevelExceeded(level + 1, MAX_OUTLINE_LEVEL));
        }
        for r in first..=last {
            self.rows.entry(r).or_default().outline_level += 1;
        }
        Ok(())
    }

    /// Collapse or expand the row group containing `row`
    ///
    /// Collapsing hides every row of the group and marks the row after it as
    /// collapsed. Expanding reveals the group again; nested groups that are
    /// still collapsed stay hidden.
    pub fn set_row_group_collapsed(&mut self, row: u32, collapsed: bool) -> Result<()> {
        validate_row(row)?;
        let level = self.row_level(row);
        if level == 0 {
            return Ok(());
        }
        let level_of = |r: u32| self.row_level(r);
        let (start, end) = group_bounds(row, level, MAX_ROWS, &level_of);

        let reveal = if collapsed {
            Vec::new()
        } else {
            let collapsed_at = |r: u32| self.rows.get(&r).map_or(false, |x| x.collapsed);
            positions_to_reveal(start, end, level, MAX_ROWS, &level_of, &collapsed_at)
        };

        if collapsed {
            for r in start..=end {
                self.rows.entry(r).or_default().hidden = true;
            }
        } else {
            for r in reveal {
                self.rows.entry(r).or_default().hidden = false;
            }
        }
        if end + 1 < MAX_ROWS {
            self.rows.entry(end + 1).or_default().collapsed = collapsed;
        }
        Ok(())
    }

    /// Group columns `first..=last` one outline level deeper
    pub fn group_columns(&mut self, first: u16, last: u16) -> Result<()> {
        let (first, last) = ordered(first, last);
        validate_col(last)?;
        if let Some(level) = (first..=last)
            .map(|c| self.column_level(c))
            .find(|&l| l >= MAX_OUTLINE_LEVEL)
        {
            return Err(Error::OutlineLevelExceeded(level + 1, MAX_OUTLINE_LEVEL));
        }
        for c in first..=last {
            self.columns.entry(c).or_default().outline_level += 1;
        }
        Ok(())
    }

    /// Collapse or expand the column group containing `col`
    pub fn set_column_group_collapsed(&mut self, col: u16, collapsed: bool) -> Result<()> {
        validate_col(col)?;
        let level = self.column_level(col);
        if level == 0 {
            return Ok(());
        }
        let max = MAX_COLS as u32;
        let level_of = |c: u32| self.column_level(c as u16);
        let (start, end) = group_bounds(col as u32, level, max, &level_of);

        let reveal = if collapsed {
            Vec::new()
        } else {
            let collapsed_at = |c: u32| {
                self.columns
                    .get(&(c as u16))
                    .map_or(false, |x| x.collapsed)
            };
            positions_to_reveal(start, end, level, max, &level_of, &collapsed_at)
        };

        if collapsed {
            for c in start..=end {
                self.columns.entry(c as u16).or_default().hidden = true;
            }
        } else {
            for c in reveal {
                self.columns.entry(c as u16).or_default().hidden = false;
            }
        }
        if end + 1 < max {
            self.columns.entry((end + 1) as u16).or_default().collapsed = collapsed;
        }
        Ok(())
    }

    /// Deepest row and column outline levels
    pub fn max_outline_levels(&self) -> (u8, u8) {
        let rows = self.rows.values().map(|r| r.outline_level).max().unwrap_or(0);
        let cols = self
            .columns
            .values()
            .map(|c| c.outline_level)
            .max()
            .unwrap_or(0);
        (rows, cols)
    }

    fn row_level(&self, row: u32) -> u8 {
        self.rows.get(&row).map_or(0, |r| r.outline_level)
    }

    fn column_level(&self, col: u16) -> u8 {
        self.columns.get(&col).map_or(0, |c| c.outline_level)
    }
}

fn validate_row(row: u32) -> Result<()> {
    if row >= MAX_ROWS {
        return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
    }
    Ok(())
}

fn validate_col(col: u16) -> Result<()> {
    if col >= MAX_COLS {
        return Err(Error::ColumnOutOfBounds(col as u32, MAX_COLS - 1));
    }
    Ok(())
}

fn ordered<T: Ord>(a: T, b: T) -> (T, T) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Contiguous run around `pos` whose outline level is at least `level`
fn group_bounds(pos: u32, level: u8, max: u32, level_of: &dyn Fn(u32) -> u8) -> (u32, u32) {
    let mut start = pos;
    while start > 0 && level_of(start - 1) >= level {
        start -= 1;
    }
    let mut end = pos;
    while end + 1 < max && level_of(end + 1) >= level {
        end += 1;
    }
    (start, end)
}

/// Positions in `start..=end` that become visible when the group at `level`
/// is expanded; nested groups still marked collapsed keep their rows hidden
fn positions_to_reveal(
    start: u32,
    end: u32,
    level: u8,
    max: u32,
    level_of: &dyn Fn(u32) -> u8,
    collapsed_at: &dyn Fn(u32) -> bool,
) -> Vec<u32> {
    let mut out = Vec::new();
    let mut pos = start;
    while pos <= end {
        if level_of(pos) <= level {
            out.push(pos);
            pos += 1;
            continue;
        }
        let (inner_start, inner_end) = group_bounds(pos, level + 1, max, level_of);
        if !(inner_end + 1 < max && collapsed_at(inner_end + 1)) {
            out.extend(positions_to_reveal(
                inner_start,
                inner_end,
                level + 1,
                max,
                level_of,
                collapsed_at,
            ));
        }
        pos = inner_end + 1;
    }
    out
}
