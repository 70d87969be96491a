//! Core data model for the grid layout generator.
//!
//! This module contains:
//! - `GridConfig` - Grid geometry and item sizing with lenient field input
//! - `Region` / `CellRange` - Placed rectangles and the overlap test
//! - `GridModel` - Config plus the ordered, non-overlapping region list
//! - `SelectionEngine` - Drag gesture state machine
//! - `GridSession` - The event boundary used by a presentation layer

pub mod config;
pub mod layout;
mod model;
mod notify;
mod region;
mod selection;
mod settings;

use tracing::{debug, info, warn};

use crate::render::{CodeGenerator, GenerateOptions, GeneratedCode, RenderError};

// Re-export public types
pub use config::{ConfigField, ConfigPatch, GridConfig, ItemSize, ItemSizeMode, Length, Unit};
pub use layout::{Layout, LayoutError};
pub use model::{GridModel, OverlapError, PlaceError};
pub use notify::{Notification, NotificationLevel};
pub use region::{Cell, CellRange, ParseCellError, Region};
pub use selection::{Commit, Phase, SelectionEngine, SelectionState};
pub use settings::{Settings, SettingsError, DEFAULT_CONTAINER_CLASS, SETTINGS_FILE};

/// An inbound event from the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    ConfigFieldChange { field: ConfigField, raw: String },
    PointerDown(Cell),
    PointerEnter(Cell),
    PointerUp,
    /// Pointer released somewhere that is not a grid cell.
    PointerCancel,
    RegionDoubleClick(String),
    Reset,
}

/// One editing session: grid model, open gesture, and code generator.
///
/// Every event runs to completion before the next one is accepted, so the
/// session is driven through `&mut self` with no locking. Reads always
/// reflect the latest state: generated code is derived on access.
pub struct GridSession {
    model: GridModel,
    selection: SelectionEngine,
    generator: CodeGenerator,
    notifications: Vec<Notification>,
}

impl std::fmt::Debug for GridSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridSession")
            .field("model", &self.model)
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}

impl GridSession {
    /// Create a session with the default grid and no regions.
    pub fn new(options: GenerateOptions) -> Result<Self, RenderError> {
        Self::with_model(GridModel::new(), options)
    }

    /// Create a session that starts from an existing model.
    pub fn with_model(model: GridModel, options: GenerateOptions) -> Result<Self, RenderError> {
        Ok(Self {
            model,
            selection: SelectionEngine::new(),
            generator: CodeGenerator::new(options)?,
            notifications: Vec::new(),
        })
    }

    /// Dispatch one inbound event.
    pub fn handle(&mut self, event: Event) {
        match event {
            Event::ConfigFieldChange { field, raw } => {
                self.on_config_field_change(field, &raw);
            }
            Event::PointerDown(cell) => self.on_pointer_down(cell),
            Event::PointerEnter(cell) => self.on_pointer_enter(cell),
            Event::PointerUp => {
                self.on_pointer_up();
            }
            Event::PointerCancel => self.on_pointer_cancel(),
            Event::RegionDoubleClick(id) => {
                self.on_region_double_click(&id);
            }
            Event::Reset => self.on_reset(),
        }
    }

    /// Apply raw form input. Returns true if the config changed.
    ///
    /// An open gesture that no longer fits the resized grid is dropped.
    pub fn on_config_field_change(&mut self, field: ConfigField, raw: &str) -> bool {
        let changed = self.model.set_field(field, raw);
        debug!(%field, raw, changed, "config field edited");
        let config = self.model.config();
        if self.selection.cancel_outside(config.columns, config.rows) {
            debug!(
                columns = config.columns,
                rows = config.rows,
                "gesture dropped after resize"
            );
        }
        changed
    }

    pub fn on_pointer_down(&mut self, cell: Cell) {
        if !self.in_bounds(cell) {
            return;
        }
        if self.selection.is_active() {
            debug!("pointer down during open gesture, restarting");
        }
        self.selection.pointer_down(cell);
        debug!(%cell, "gesture started");
    }

    pub fn on_pointer_enter(&mut self, cell: Cell) {
        if !self.in_bounds(cell) {
            return;
        }
        if self.selection.pointer_enter(cell) {
            debug!(%cell, "selection extended");
        }
    }

    /// Release the pointer, committing the open gesture if there is one.
    ///
    /// An overlapping selection is discarded and queued as a warning
    /// notification; a successful commit is silent.
    pub fn on_pointer_up(&mut self) -> Option<Commit> {
        let commit = self.selection.pointer_up(&mut self.model)?;
        match &commit {
            Ok(region) => info!(id = %region.id, range = %region.range, "region placed"),
            Err(err) => {
                warn!(%err, "selection rejected");
                self.notifications.push(Notification::from(err.clone()));
            }
        }
        Some(commit)
    }

    pub fn on_pointer_cancel(&mut self) {
        if self.selection.cancel() {
            debug!("gesture cancelled");
        }
    }

    /// Remove a region and renumber the rest. Returns false for an unknown id.
    pub fn on_region_double_click(&mut self, id: &str) -> bool {
        if !self.model.remove_region(id) {
            debug!(id, "no region to remove");
            return false;
        }
        info!(id, remaining = self.model.len(), "region removed");
        self.notifications.push(Notification::RegionRemoved { id: id.to_string() });
        true
    }

    /// Restore the default grid, dropping every region and any open gesture.
    pub fn on_reset(&mut self) {
        self.model.reset();
        self.selection.cancel();
        info!("grid reset");
    }

    pub fn model(&self) -> &GridModel {
        &self.model
    }

    pub fn config(&self) -> &GridConfig {
        self.model.config()
    }

    pub fn regions(&self) -> &[Region] {
        self.model.regions()
    }

    pub fn selection(&self) -> &SelectionEngine {
        &self.selection
    }

    /// Markup and style for the current state.
    pub fn generated(&self) -> Result<GeneratedCode, RenderError> {
        self.generator.generate(self.model.config(), self.model.regions())
    }

    /// Drain queued notifications, oldest first.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Text picture of the grid and the open selection.
    pub fn preview(&self) -> String {
        crate::render::render_preview(&self.model, &self.selection)
    }

    fn in_bounds(&self, cell: Cell) -> bool {
        let config = self.model.config();
        let inside = cell.in_bounds(config.columns, config.rows);
        if !inside {
            warn!(
                %cell,
                columns = config.columns,
                rows = config.rows,
                "pointer event outside grid ignored"
            );
        }
        inside
    }
}
