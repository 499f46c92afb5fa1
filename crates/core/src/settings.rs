use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::report::DEFAULT_NOTES;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

/// Passed to the recognizer with every image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionHints {
    /// Tesseract languages: Arabic names mixed with Latin codes.
    pub languages: String,
    /// Tesseract page segmentation mode; 6 treats the image as one uniform block of text.
    pub page_seg_mode: u8,
    pub preserve_interword_spaces: bool,
}

impl Default for RecognitionHints {
    fn default() -> Self {
        Self {
            languages: "ara+eng".to_string(),
            page_seg_mode: 6,
            preserve_interword_spaces: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
    pub default_notes: String,
    /// Directory holding `*.traineddata`; engine default when unset.
    pub tessdata_dir: Option<PathBuf>,
    /// Images larger than this on either side are scaled down before recognition.
    pub max_image_dimension: u32,
    // Kept last so it serializes as a trailing `[recognition]` table.
    pub recognition: RecognitionHints,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            default_notes: DEFAULT_NOTES.to_string(),
            tessdata_dir: None,
            max_image_dimension: 2800,
            recognition: RecognitionHints::default(),
        }
    }
}

impl Settings {
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Load/save hooks for the persisted preferences.
pub trait SettingsStore {
    fn load(&self) -> Result<Settings, SettingsError>;
    fn save(&self, settings: &Settings) -> Result<(), SettingsError>;
}

/// Settings kept in a TOML file; a missing file means defaults.
#[derive(Debug, Clone)]
pub struct TomlFileStore {
    path: PathBuf,
}

impl TomlFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for TomlFileStore {
    fn load(&self) -> Result<Settings, SettingsError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Settings::from_toml(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Settings::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, settings.to_toml()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlFileStore::new(dir.path().join("nope.toml"));
        let settings = store.load().unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.recognition.languages, "ara+eng");
        assert_eq!(settings.recognition.page_seg_mode, 6);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlFileStore::new(dir.path().join("nested").join("settings.toml"));
        let settings = Settings {
            theme: Theme::Dark,
            tessdata_dir: Some(PathBuf::from("/usr/share/tessdata")),
            ..Settings::default()
        };
        store.save(&settings).unwrap();
        assert_eq!(store.load().unwrap(), settings);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let settings = Settings::from_toml("theme = \"dark\"\n").unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.default_notes, DEFAULT_NOTES);
        assert_eq!(settings.max_image_dimension, 2800);
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(matches!(Settings::from_toml("theme = 3"), Err(SettingsError::Parse(_))));
    }

    #[test]
    fn theme_toggles() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().to_string(), "light");
    }
}
