//! User settings, read from a TOML file.
//!
//! Missing or unreadable settings fall back to defaults. Command-line flags
//! override individual values.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use reg_normalization::{DisplayFormat, Locale};
use reg_output::Delimiter;
use reg_view::DEFAULT_PAGE_SIZE;

/// Türkiye, UTC+03:00.
const DEFAULT_UTC_OFFSET_MINUTES: i32 = 180;

/// Admin desk settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data: DataSettings,
    pub display: DisplaySettings,
    pub view: ViewSettings,
    pub export: ExportSettings,
}

/// Where the collections and photos live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// Directory of `<collection>.json` files.
    pub dir: PathBuf,
    /// Photo directory (default: `<dir>/objects`).
    pub objects_dir: Option<PathBuf>,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
            objects_dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub locale: Locale,
    /// Minutes east of UTC used for dates and times.
    pub utc_offset_minutes: i32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    pub page_size: usize,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub output_dir: PathBuf,
    pub delimiter: Delimiter,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("exports"),
            delimiter: Delimiter::default(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or from the default location.
    pub fn load(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load_from(&Self::config_path()),
        }
    }

    /// Load settings from a specific path.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            tracing::debug!(path = %path.display(), "No settings file, using defaults");
            return Self::default();
        };
        match toml::from_str(&content) {
            Ok(settings) => settings,
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "Ignoring invalid settings file");
                Self::default()
            }
        }
    }

    /// Get the default config file path.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("org", "ForumRegistration", "regdesk")
            .map(|dirs| dirs.config_dir().join("settings.toml"))
            .unwrap_or_else(|| PathBuf::from("settings.toml"))
    }

    pub fn display_format(&self) -> DisplayFormat {
        DisplayFormat::default()
            .with_locale(self.display.locale)
            .with_offset_minutes(self.display.utc_offset_minutes)
    }

    pub fn objects_dir(&self) -> PathBuf {
        self.data
            .objects_dir
            .clone()
            .unwrap_or_else(|| self.data.dir.join("objects"))
    }
}
