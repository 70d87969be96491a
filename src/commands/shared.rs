//! Shared helpers for commands: reading inputs and printing generated code.

use std::io::Read;
use std::path::Path;

use owo_colors::OwoColorize;

use crate::context::{GridModel, Layout, Notification, NotificationLevel};
use crate::error_fmt::{AppError, IoResultExt, LayoutResultExt};
use crate::render::GeneratedCode;

/// Path argument meaning "read from stdin".
pub const STDIN_PATH: &str = "-";

/// Which generated artifacts to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodeOutput {
    /// Both artifacts under headings.
    #[default]
    Both,
    /// Only the markup, unadorned.
    Markup,
    /// Only the stylesheet, unadorned.
    Style,
}

/// Read a whole file, or stdin when `path` is `-`.
pub fn read_input(path: &str) -> Result<String, AppError> {
    if path == STDIN_PATH {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .with_context("failed to read stdin")?;
        return Ok(content);
    }
    std::fs::read_to_string(Path::new(path)).with_context(&format!("failed to read {}", path))
}

/// Load a layout document into a model; no path means the default grid.
pub fn load_model(path: Option<&str>) -> Result<GridModel, AppError> {
    let Some(path) = path else {
        return Ok(GridModel::new());
    };
    let content = read_input(path)?;
    Layout::parse(&content)
        .and_then(Layout::into_model)
        .with_path(path)
}

/// Write the model as a layout document.
pub fn save_model(model: &GridModel, path: &str) -> Result<(), AppError> {
    let yaml = Layout::from_model(model).to_yaml().with_path(path)?;
    std::fs::write(path, yaml).with_context(&format!("failed to write {}", path))
}

pub fn format_code(code: &GeneratedCode, output: CodeOutput) -> String {
    match output {
        CodeOutput::Markup => format!("{}\n", code.markup),
        CodeOutput::Style => code.style.clone(),
        CodeOutput::Both => {
            let mut out = String::new();
            out.push_str(&format!("{}\n", "Generated HTML".bold()));
            out.push_str(&code.markup);
            out.push_str("\n\n");
            out.push_str(&format!("{}\n", "Generated CSS".bold()));
            out.push_str(&code.style);
            out
        }
    }
}

pub fn format_notification(note: &Notification) -> String {
    match note.level() {
        NotificationLevel::Warning => format!("{} {}", "warning:".yellow().bold(), note),
        NotificationLevel::Info => format!("{} {}", "info:".cyan().bold(), note),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::CellRange;
    use tempfile::TempDir;

    fn strip_ansi(s: &str) -> String {
        let re = regex::Regex::new(r"\x1b\[[0-9;]*m").unwrap();
        re.replace_all(s, "").to_string()
    }

    fn code() -> GeneratedCode {
        GeneratedCode {
            markup: "<div class=\"grid-container\">\n</div>".to_string(),
            style: ".grid-container {\n}\n".to_string(),
        }
    }

    #[test]
    fn test_format_code_both() {
        let out = strip_ansi(&format_code(&code(), CodeOutput::Both));
        assert_eq!(
            out,
            concat!(
                "Generated HTML\n<div class=\"grid-container\">\n</div>\n",
                "\nGenerated CSS\n.grid-container {\n}\n"
            )
        );
    }

    #[test]
    fn test_format_code_single_artifact_is_plain() {
        assert_eq!(
            format_code(&code(), CodeOutput::Markup),
            "<div class=\"grid-container\">\n</div>\n"
        );
        assert_eq!(format_code(&code(), CodeOutput::Style), ".grid-container {\n}\n");
    }

    #[test]
    fn test_format_notification() {
        let warning = Notification::Overlap {
            candidate: CellRange::new(1, 1, 1, 1),
            existing: "div-1".to_string(),
        };
        assert_eq!(
            strip_ansi(&format_notification(&warning)),
            "warning: selection (rows 1-1, cols 1-1) overlaps existing item div-1"
        );
        let info = Notification::RegionRemoved { id: "div-2".to_string() };
        assert_eq!(strip_ansi(&format_notification(&info)), "info: item div-2 removed");
    }

    #[test]
    fn test_save_then_load_model() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("layout.yml");
        let path = path.to_str().unwrap();

        let mut model = GridModel::new();
        model.add_region(CellRange::new(1, 1, 1, 5)).unwrap();
        save_model(&model, path).unwrap();

        assert_eq!(load_model(Some(path)).unwrap(), model);
    }

    #[test]
    fn test_load_missing_layout_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.yml");
        let err = load_model(path.to_str()).unwrap_err();
        assert!(matches!(err, AppError::Io { .. }));
    }

    #[test]
    fn test_load_without_path_is_default_grid() {
        assert_eq!(load_model(None).unwrap(), GridModel::new());
    }
}
