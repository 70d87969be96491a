//! Tool settings.
//!
//! The settings file (`.gridgen.yml`) configures how code is emitted, not
//! the grid itself: the class name of the root container and whether the
//! shared placeholder item rule is included in the stylesheet.

use std::path::Path;

use serde::Deserialize;

pub const SETTINGS_FILE: &str = ".gridgen.yml";
pub const DEFAULT_CONTAINER_CLASS: &str = "grid-container";

/// Settings loaded from `.gridgen.yml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Class of the root element in both generated outputs.
    pub container_class: String,

    /// Emit the shared `.container > div` placeholder rule. Default: true.
    pub placeholder_style: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            container_class: DEFAULT_CONTAINER_CLASS.to_string(),
            placeholder_style: true,
        }
    }
}

/// Errors that can occur when loading or validating settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("container class '{class}' is not a valid CSS class name")]
    InvalidClass { class: String },
}

impl Settings {
    /// Load settings from a file path.
    ///
    /// Returns the default settings if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let settings = match std::fs::read_to_string(path) {
            Ok(content) => serde_yaml::from_str::<Option<Settings>>(&content)?.unwrap_or_default(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => return Err(SettingsError::Io(e)),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Ensure the container class can be used verbatim as a selector.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if is_css_class(&self.container_class) {
            Ok(())
        } else {
            Err(SettingsError::InvalidClass {
                class: self.container_class.clone(),
            })
        }
    }
}

fn is_css_class(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_' || first == '-')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.yml");

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.container_class, "grid-container");
        assert!(settings.placeholder_style);
    }

    #[test]
    fn test_load_valid_settings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(SETTINGS_FILE);

        std::fs::write(&path, "container_class: layout\nplaceholder_style: false\n").unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.container_class, "layout");
        assert!(!settings.placeholder_style);
    }

    #[test]
    fn test_load_partial_settings_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(SETTINGS_FILE);

        std::fs::write(&path, "placeholder_style: false\n").unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.container_class, DEFAULT_CONTAINER_CLASS);
        assert!(!settings.placeholder_style);
    }

    #[test]
    fn test_load_empty_settings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(SETTINGS_FILE);

        std::fs::write(&path, "").unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_rejects_unknown_fields() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(SETTINGS_FILE);

        std::fs::write(&path, "unknown_field: value\n").unwrap();

        let err = Settings::load(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_load_rejects_invalid_class() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(SETTINGS_FILE);

        std::fs::write(&path, "container_class: \"9 lives\"\n").unwrap();

        let err = Settings::load(&path).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidClass { class } if class == "9 lives"));
    }

    #[test]
    fn test_css_class_names() {
        assert!(is_css_class("grid-container"));
        assert!(is_css_class("_layout2"));
        assert!(!is_css_class(""));
        assert!(!is_css_class("2col"));
        assert!(!is_css_class("a b"));
        assert!(!is_css_class("a.b"));
    }
}
