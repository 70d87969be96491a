//! Drag-selection state machine.
//!
//! One gesture is pointer-down, any number of pointer-enters, then
//! pointer-up. The engine collects the touched cells, commits their bounding
//! rectangle to the model on release, and always ends back in `Idle`.

use std::collections::BTreeSet;

use super::model::{GridModel, PlaceError};
use super::region::{Cell, CellRange, Region};

/// Cells touched by the gesture in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    pub anchor: Cell,
    pub active: BTreeSet<Cell>,
}

impl SelectionState {
    fn new(anchor: Cell) -> Self {
        Self {
            anchor,
            active: BTreeSet::from([anchor]),
        }
    }

    /// Bounding rectangle of the active cells.
    pub fn bounds(&self) -> CellRange {
        CellRange::bounding(self.active.iter().copied()).unwrap_or(CellRange::single(self.anchor))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Pointer is down, only the anchor is active.
    Selecting,
    /// Pointer is down and has entered other cells.
    Extending,
}

/// Outcome of releasing the pointer.
pub type Commit = Result<Region, PlaceError>;

#[derive(Debug, Clone, Default)]
pub struct SelectionEngine {
    state: Option<SelectionState>,
}

impl SelectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        match &self.state {
            None => Phase::Idle,
            Some(s) if s.active.len() == 1 => Phase::Selecting,
            Some(_) => Phase::Extending,
        }
    }

    pub fn state(&self) -> Option<&SelectionState> {
        self.state.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    /// True if the cell belongs to the gesture in progress.
    pub fn is_highlighted(&self, cell: Cell) -> bool {
        self.state.as_ref().is_some_and(|s| s.active.contains(&cell))
    }

    /// Start a gesture at `cell`.
    ///
    /// A pointer-down while a gesture is still open discards that gesture
    /// and starts over, so a lost pointer-up can never wedge the engine.
    pub fn pointer_down(&mut self, cell: Cell) {
        self.state = Some(SelectionState::new(cell));
    }

    /// Add `cell` to the open gesture. Ignored when idle.
    ///
    /// Returns true if the cell was newly added.
    pub fn pointer_enter(&mut self, cell: Cell) -> bool {
        match &mut self.state {
            Some(state) => state.active.insert(cell),
            None => false,
        }
    }

    /// Finish the gesture, committing its bounding rectangle to `model`.
    ///
    /// Returns `None` if no gesture was open. Whatever the outcome, the
    /// engine is idle afterwards.
    pub fn pointer_up(&mut self, model: &mut GridModel) -> Option<Commit> {
        let state = self.state.take()?;
        Some(model.add_region(state.bounds()).cloned())
    }

    /// Drop the open gesture if its rectangle no longer fits a
    /// `columns` x `rows` grid. Returns true if it was dropped.
    pub fn cancel_outside(&mut self, columns: u32, rows: u32) -> bool {
        if self.state.as_ref().is_some_and(|s| !s.bounds().fits(columns, rows)) {
            self.state = None;
            return true;
        }
        false
    }

    /// Drop the open gesture without committing. Returns true if there was one.
    pub fn cancel(&mut self) -> bool {
        self.state.take().is_some()
    }
}
