use thiserror::Error;

use super::config::{ConfigField, ConfigPatch, GridConfig};
use super::region::{Cell, CellRange, Region};

/// A candidate rectangle shares cells with an already placed region.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{candidate} overlaps existing region '{existing}'")]
pub struct OverlapError {
    pub candidate: CellRange,
    /// Id of the first region the candidate intersects.
    pub existing: String,
}

/// Why a rectangle could not be placed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlaceError {
    #[error(transparent)]
    Overlap(#[from] OverlapError),
    #[error("{candidate} lies outside the {columns}x{rows} grid")]
    OutOfBounds {
        candidate: CellRange,
        columns: u32,
        rows: u32,
    },
}

/// Grid geometry plus the ordered, non-overlapping list of placed regions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridModel {
    config: GridConfig,
    regions: Vec<Region>,
}

impl GridModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GridConfig) -> Self {
        Self {
            config: config.normalized(),
            regions: Vec::new(),
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Apply raw text from a form control. See [`GridConfig::set_field`].
    ///
    /// Columns and rows never drop below the extent already covered by
    /// regions. Returns true if the config changed.
    pub fn set_field(&mut self, field: ConfigField, raw: &str) -> bool {
        let before = self.config.clone();
        self.config.set_field(field, raw);
        self.keep_regions_in_bounds();
        self.config != before
    }

    /// Merge a typed partial update, with the same clamping as `set_field`.
    pub fn apply(&mut self, patch: &ConfigPatch) {
        self.config.apply(patch);
        self.keep_regions_in_bounds();
    }

    /// Restore default geometry and drop every region.
    pub fn reset(&mut self) {
        self.config = GridConfig::default();
        self.regions.clear();
    }

    /// Place a new region after the existing ones.
    ///
    /// Fails without touching the list if `range` is inverted, reaches past
    /// the grid, or shares a cell with any placed region.
    pub fn add_region(&mut self, range: CellRange) -> Result<&Region, PlaceError> {
        let (columns, rows) = (self.config.columns, self.config.rows);
        if !range.fits(columns, rows) {
            return Err(PlaceError::OutOfBounds {
                candidate: range,
                columns,
                rows,
            });
        }

        if let Some(existing) = self.regions.iter().find(|r| r.range.intersects(&range)) {
            return Err(OverlapError {
                candidate: range,
                existing: existing.id.clone(),
            }
            .into());
        }

        let n = self.regions.len() + 1;
        self.regions.push(Region::numbered(n, range));
        self.debug_check_invariants();
        Ok(&self.regions[n - 1])
    }

    /// Remove a region by id and renumber the rest to `div-1..div-N` in
    /// their existing order. Returns false if no region has that id.
    pub fn remove_region(&mut self, id: &str) -> bool {
        let Some(index) = self.regions.iter().position(|r| r.id == id) else {
            return false;
        };
        self.regions.remove(index);
        for (i, region) in self.regions.iter_mut().enumerate() {
            region.renumber(i + 1);
        }
        self.debug_check_invariants();
        true
    }

    pub fn region_at(&self, cell: Cell) -> Option<&Region> {
        self.regions.iter().find(|r| r.range.contains(cell))
    }

    /// Every cell of the current grid, row-major.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let columns = self.config.columns;
        (1..=self.config.rows)
            .flat_map(move |row| (1..=columns).map(move |col| Cell::new(row, col)))
    }

    /// Cells not covered by any region, row-major. These are the only cells
    /// a selection surface offers.
    pub fn visible_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells().filter(|cell| self.region_at(*cell).is_none())
    }

    fn keep_regions_in_bounds(&mut self) {
        let max_col = self.regions.iter().map(|r| r.range.end_col).max().unwrap_or(1);
        let max_row = self.regions.iter().map(|r| r.range.end_row).max().unwrap_or(1);
        self.config.columns = self.config.columns.max(max_col);
        self.config.rows = self.config.rows.max(max_row);
    }

    fn debug_check_invariants(&self) {
        if cfg!(debug_assertions) {
            for (i, a) in self.regions.iter().enumerate() {
                debug_assert!(a.range.fits(self.config.columns, self.config.rows));
                debug_assert_eq!(a.id, super::region::region_id(i + 1));
                for b in &self.regions[i + 1..] {
                    debug_assert!(!a.range.intersects(&b.range), "{} overlaps {}", a.id, b.id);
                }
            }
        }
    }
}
