pub mod commands;
pub mod context;
pub mod error_fmt;
pub mod render;
pub mod script;

// Re-export commonly used types from context module for convenience
pub use context::{
    Cell, CellRange, ConfigField, ConfigPatch, Event, GridConfig, GridModel, GridSession, ItemSize,
    Layout, LayoutError, Length, Notification, NotificationLevel, OverlapError, Phase, PlaceError,
    Region, SelectionEngine, SelectionState, Settings, SettingsError, Unit, SETTINGS_FILE,
};

// Re-export the code generator for embedding
pub use render::{render_preview, CodeGenerator, GenerateOptions, GeneratedCode, RenderError};

// Re-export script parsing for drivers
pub use script::{parse_script, ScriptError};
