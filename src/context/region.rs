use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix of every region id (`div-1`, `div-2`, ...).
pub const REGION_ID_PREFIX: &str = "div-";

/// One grid cell, 1-indexed. Ordered row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
}

impl Cell {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    pub fn in_bounds(&self, columns: u32, rows: u32) -> bool {
        (1..=rows).contains(&self.row) && (1..=columns).contains(&self.col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid cell id '{0}' (expected row-col, e.g. 2-3)")]
pub struct ParseCellError(pub String);

impl FromStr for Cell {
    type Err = ParseCellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCellError(s.to_string());
        let (row, col) = s.trim().split_once('-').ok_or_else(err)?;
        let row: u32 = row.trim().parse().map_err(|_| err())?;
        let col: u32 = col.trim().parse().map_err(|_| err())?;
        if row == 0 || col == 0 {
            return Err(err());
        }
        Ok(Cell::new(row, col))
    }
}

/// An inclusive rectangle of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CellRange {
    pub start_row: u32,
    pub end_row: u32,
    pub start_col: u32,
    pub end_col: u32,
}

impl CellRange {
    pub fn new(start_row: u32, end_row: u32, start_col: u32, end_col: u32) -> Self {
        Self {
            start_row,
            end_row,
            start_col,
            end_col,
        }
    }

    pub fn single(cell: Cell) -> Self {
        Self::new(cell.row, cell.row, cell.col, cell.col)
    }

    /// Smallest rectangle containing every cell. `None` for no cells.
    ///
    /// Only min/max are taken, so the result does not depend on the order
    /// or multiplicity of the input.
    pub fn bounding<I>(cells: I) -> Option<Self>
    where
        I: IntoIterator<Item = Cell>,
    {
        cells.into_iter().fold(None, |acc, cell| {
            Some(match acc {
                None => CellRange::single(cell),
                Some(r) => CellRange::new(
                    r.start_row.min(cell.row),
                    r.end_row.max(cell.row),
                    r.start_col.min(cell.col),
                    r.end_col.max(cell.col),
                ),
            })
        })
    }

    pub fn is_normalized(&self) -> bool {
        self.start_row >= 1
            && self.start_col >= 1
            && self.start_row <= self.end_row
            && self.start_col <= self.end_col
    }

    pub fn fits(&self, columns: u32, rows: u32) -> bool {
        self.is_normalized() && self.end_row <= rows && self.end_col <= columns
    }

    /// True if the rectangles share at least one cell.
    pub fn intersects(&self, other: &CellRange) -> bool {
        self.start_row <= other.end_row
            && self.end_row >= other.start_row
            && self.start_col <= other.end_col
            && self.end_col >= other.start_col
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (self.start_row..=self.end_row).contains(&cell.row)
            && (self.start_col..=self.end_col).contains(&cell.col)
    }

    pub fn col_span(&self) -> u32 {
        self.end_col - self.start_col + 1
    }

    pub fn row_span(&self) -> u32 {
        self.end_row - self.start_row + 1
    }

    /// Every cell of the rectangle, row-major.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (self.start_row..=self.end_row).flat_map(move |row| {
            (self.start_col..=self.end_col).map(move |col| Cell::new(row, col))
        })
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rows {}-{}, cols {}-{}",
            self.start_row, self.end_row, self.start_col, self.end_col
        )
    }
}

/// A committed rectangle that becomes one generated item.
///
/// `id` and `content` are positional: they always equal `div-N` and `N`
/// where N is the region's 1-based place in the model's list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub id: String,
    pub range: CellRange,
    pub content: String,
}

impl Region {
    pub fn numbered(n: usize, range: CellRange) -> Self {
        Self {
            id: region_id(n),
            range,
            content: n.to_string(),
        }
    }

    pub(super) fn renumber(&mut self, n: usize) {
        self.id = region_id(n);
        self.content = n.to_string();
    }
}

pub fn region_id(n: usize) -> String {
    format!("{}{}", REGION_ID_PREFIX, n)
}
