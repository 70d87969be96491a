use std::fmt;
use std::io;

use owo_colors::OwoColorize;

use crate::context::{LayoutError, SettingsError};
use crate::render::RenderError;
use crate::script::ScriptError;

/// Application error with context for actionable error messages.
#[derive(Debug)]
pub enum AppError {
    /// IO error with context
    Io { context: String, source: io::Error },
    /// Settings file could not be loaded
    Settings { path: String, source: SettingsError },
    /// Layout document could not be read into a grid
    Layout { path: String, source: LayoutError },
    /// Event script could not be parsed
    Script { path: String, source: ScriptError },
    /// Code generation failed
    Render(RenderError),
    /// Log output could not be installed
    Logging(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Io { context, source } => {
                write!(f, "{}", format_cli_error(&format!("{}: {}", context, source)))
            }
            AppError::Settings { path, source } => {
                write!(f, "{}", format_settings_error(source, path))
            }
            AppError::Layout { path, source } => {
                write!(f, "{}", format_layout_error(source, path))
            }
            AppError::Script { path, source } => {
                write!(f, "{}", format_script_error(source, path))
            }
            AppError::Render(source) => {
                write!(f, "{}", format_cli_error(&format!("failed to generate code: {}", source)))
            }
            AppError::Logging(message) => {
                write!(f, "{}", format_cli_error(&format!("failed to set up logging: {}", message)))
            }
        }
    }
}

impl std::error::Error for AppError {}

impl From<RenderError> for AppError {
    fn from(e: RenderError) -> Self {
        AppError::Render(e)
    }
}

/// Extension trait to add context to IO results.
pub trait IoResultExt<T> {
    fn with_context(self, context: &str) -> Result<T, AppError>;
}

impl<T> IoResultExt<T> for Result<T, io::Error> {
    fn with_context(self, context: &str) -> Result<T, AppError> {
        self.map_err(|e| AppError::Io {
            context: context.to_string(),
            source: e,
        })
    }
}

/// Extension trait to add file path context to layout results.
pub trait LayoutResultExt<T> {
    fn with_path(self, path: &str) -> Result<T, AppError>;
}

impl<T> LayoutResultExt<T> for Result<T, LayoutError> {
    fn with_path(self, path: &str) -> Result<T, AppError> {
        self.map_err(|e| AppError::Layout {
            path: path.to_string(),
            source: e,
        })
    }
}

/// Extension trait to add file path context to script results.
pub trait ScriptResultExt<T> {
    fn with_script_path(self, path: &str) -> Result<T, AppError>;
}

impl<T> ScriptResultExt<T> for Result<T, ScriptError> {
    fn with_script_path(self, path: &str) -> Result<T, AppError> {
        self.map_err(|e| AppError::Script {
            path: path.to_string(),
            source: e,
        })
    }
}

/// Extension trait to add file path context to settings results.
pub trait SettingsResultExt<T> {
    fn with_settings_path(self, path: &str) -> Result<T, AppError>;
}

impl<T> SettingsResultExt<T> for Result<T, SettingsError> {
    fn with_settings_path(self, path: &str) -> Result<T, AppError> {
        self.map_err(|e| AppError::Settings {
            path: path.to_string(),
            source: e,
        })
    }
}

// ============================================================================
// Formatting functions (internal implementation)
// ============================================================================

fn format_cli_error(message: &str) -> String {
    format!("{}: {}\n", "error".red().bold(), message)
}

fn format_layout_error(error: &LayoutError, path: &str) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}: ", "error".red().bold()));

    match error {
        LayoutError::Parse(yaml_err) => {
            out.push_str(&format!("invalid layout in {}\n", path.cyan()));
            out.push('\n');
            out.push_str(&format!("  {}\n", yaml_err.to_string().dimmed()));
            out.push('\n');
            out.push_str(&format!("  {}:\n", "Expected shape".bold()));
            out.push_str(&format!("      {}\n", "grid:".dimmed()));
            out.push_str(&format!("      {}\n", "  columns: 3".dimmed()));
            out.push_str(&format!("      {}\n", "  rows: 2".dimmed()));
            out.push_str(&format!("      {}\n", "regions:".dimmed()));
            out.push_str(&format!(
                "      {}\n",
                "  - { start_row: 1, end_row: 1, start_col: 1, end_col: 2 }".dimmed()
            ));
        }
        LayoutError::InvertedRange { index, range } => {
            out.push_str(&format!(
                "region #{} in {} is inverted ({})\n",
                index.to_string().yellow(),
                path.cyan(),
                range
            ));
            out.push('\n');
            out.push_str(&format!("  {}:\n", "To fix this".bold()));
            out.push_str(&format!(
                "    Make sure {} and {}, both starting at 1\n",
                "start_row <= end_row".cyan(),
                "start_col <= end_col".cyan()
            ));
        }
        LayoutError::OutOfBounds {
            index,
            range,
            columns,
            rows,
        } => {
            out.push_str(&format!(
                "region #{} in {} lies outside the grid\n",
                index.to_string().yellow(),
                path.cyan()
            ));
            out.push('\n');
            out.push_str(&format!(
                "  {}\n",
                format!(
                    "The grid has {} columns and {} rows, but the region covers {}.",
                    columns, rows, range
                )
                .dimmed()
            ));
            out.push('\n');
            out.push_str(&format!("  {}:\n", "To fix this".bold()));
            out.push_str(&format!(
                "    1. Grow the grid with {} / {}\n",
                "grid.columns".cyan(),
                "grid.rows".cyan()
            ));
            out.push_str("    2. Or shrink the region\n");
        }
        LayoutError::Overlap { index, source } => {
            out.push_str(&format!(
                "region #{} in {} overlaps {}\n",
                index.to_string().yellow(),
                path.cyan(),
                source.existing.yellow()
            ));
            out.push('\n');
            out.push_str(&format!(
                "  {}\n",
                format!(
                    "Regions are placed in order; {} was already placed when {} was tried.",
                    source.existing, source.candidate
                )
                .dimmed()
            ));
            out.push('\n');
            out.push_str(&format!("  {}:\n", "To fix this".bold()));
            out.push_str("    Move or shrink one of the two regions so they share no cell\n");
        }
    }

    out
}

fn format_script_error(error: &ScriptError, path: &str) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}: ", "error".red().bold()));
    out.push_str(&format!(
        "{}:{}: {}\n",
        path.cyan(),
        error.line,
        error.message
    ));
    out.push('\n');
    out.push_str(&format!("  {}:\n", "Script commands".bold()));
    for line in [
        "set <field> <value>",
        "down <row-col>",
        "enter <row-col>",
        "up",
        "cancel",
        "drag <row-col> [<row-col>...]",
        "remove <region-id>",
        "reset",
    ] {
        out.push_str(&format!("    {}\n", line.dimmed()));
    }

    out
}

fn format_settings_error(error: &SettingsError, path: &str) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}: ", "error".red().bold()));
    out.push_str(&format!("failed to load {}\n", path.cyan()));
    out.push_str(&format!("  {} {}\n", "•".red(), error));

    if let SettingsError::InvalidClass { .. } = error {
        out.push('\n');
        out.push_str(&format!("  {}:\n", "To fix this".bold()));
        out.push_str(&format!(
            "    Use letters, digits, {} and {}, not starting with a digit\n",
            "-".cyan(),
            "_".cyan()
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{CellRange, OverlapError};

    fn strip_ansi(s: &str) -> String {
        let re = regex::Regex::new(r"\x1b\[[0-9;]*m").unwrap();
        re.replace_all(s, "").to_string()
    }

    #[test]
    fn test_format_layout_overlap() {
        let err = AppError::Layout {
            path: "layout.yml".to_string(),
            source: LayoutError::Overlap {
                index: 2,
                source: OverlapError {
                    candidate: CellRange::new(1, 2, 1, 2),
                    existing: "div-1".to_string(),
                },
            },
        };
        let stripped = strip_ansi(&err.to_string());

        assert!(stripped.contains("error:"));
        assert!(stripped.contains("region #2 in layout.yml overlaps div-1"));
        assert!(stripped.contains("To fix this"));
    }

    #[test]
    fn test_format_layout_out_of_bounds() {
        let err = AppError::Layout {
            path: "layout.yml".to_string(),
            source: LayoutError::OutOfBounds {
                index: 1,
                range: CellRange::new(1, 1, 1, 4),
                columns: 3,
                rows: 2,
            },
        };
        let stripped = strip_ansi(&err.to_string());

        assert!(stripped.contains("lies outside the grid"));
        assert!(stripped.contains("3 columns and 2 rows"));
        assert!(stripped.contains("grid.columns"));
    }

    #[test]
    fn test_format_layout_parse_error() {
        let yaml_err = serde_yaml::from_str::<CellRange>("nope").unwrap_err();
        let err = AppError::Layout {
            path: "layout.yml".to_string(),
            source: LayoutError::Parse(yaml_err),
        };
        let stripped = strip_ansi(&err.to_string());

        assert!(stripped.contains("invalid layout in layout.yml"));
        assert!(stripped.contains("Expected shape"));
        assert!(stripped.contains("regions:"));
    }

    #[test]
    fn test_format_script_error() {
        let err = AppError::Script {
            path: "build.grid".to_string(),
            source: ScriptError {
                line: 4,
                message: "unknown command 'jump'".to_string(),
            },
        };
        let stripped = strip_ansi(&err.to_string());

        assert!(stripped.contains("error: build.grid:4: unknown command 'jump'"));
        assert!(stripped.contains("drag <row-col>"));
    }

    #[test]
    fn test_format_settings_invalid_class() {
        let err = AppError::Settings {
            path: ".gridgen.yml".to_string(),
            source: SettingsError::InvalidClass {
                class: "9 lives".to_string(),
            },
        };
        let stripped = strip_ansi(&err.to_string());

        assert!(stripped.contains("failed to load .gridgen.yml"));
        assert!(stripped.contains("'9 lives'"));
        assert!(stripped.contains("To fix this"));
    }

    #[test]
    fn test_format_io_error() {
        let err = AppError::Io {
            context: "failed to read layout.yml".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        let stripped = strip_ansi(&err.to_string());
        assert_eq!(stripped, "error: failed to read layout.yml: missing\n");
    }

    #[test]
    fn test_extension_trait_layout() {
        let result: Result<(), LayoutError> = Err(LayoutError::InvertedRange {
            index: 1,
            range: CellRange::new(2, 1, 1, 1),
        });
        let err = result.with_path("layout.yml").unwrap_err();
        assert!(matches!(err, AppError::Layout { path, .. } if path == "layout.yml"));
    }

    #[test]
    fn test_extension_trait_script() {
        let result: Result<(), ScriptError> = Err(ScriptError {
            line: 1,
            message: "bad".to_string(),
        });
        let err = result.with_script_path("-").unwrap_err();
        assert!(matches!(err, AppError::Script { path, .. } if path == "-"));
    }
}
