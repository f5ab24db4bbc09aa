use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::errors::{RangeSeekError, Result};
use crate::range_seek::BarColors;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Appearance
    pub bar_color: BarColor,
    pub active_color: AccentColor,
    pub thumb_diameter: f32,

    // Behavior
    pub notify_while_dragging: bool,
    pub debug_logging: bool,

    // Persisted selections, keyed by preference key
    pub ranges: BTreeMap<String, StoredRange>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bar_color: BarColor::Gray,
            active_color: AccentColor::Orange,
            thumb_diameter: 28.0,

            notify_while_dragging: false,
            debug_logging: false,

            ranges: BTreeMap::new(),
        }
    }
}

/// A persisted selection. Values keep the JSON form of their numeric type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRange {
    pub min: serde_json::Value,
    pub max: serde_json::Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarColor {
    Gray,
    Dark,
    Light,
}

impl BarColor {
    pub fn to_color(self) -> egui::Color32 {
        match self {
            BarColor::Gray => crate::range_seek::DEFAULT_BAR_COLOR,
            BarColor::Dark => egui::Color32::from_rgb(60, 60, 64),
            BarColor::Light => egui::Color32::from_rgb(200, 200, 205),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccentColor {
    Orange,
    Blue,
    Purple,
    Green,
    Red,
    Cyan,
}

impl AccentColor {
    pub fn to_color(self) -> egui::Color32 {
        match self {
            AccentColor::Orange => crate::range_seek::DEFAULT_ACTIVE_COLOR,
            AccentColor::Blue => egui::Color32::from_rgb(70, 130, 255),
            AccentColor::Purple => egui::Color32::from_rgb(160, 90, 255),
            AccentColor::Green => egui::Color32::from_rgb(50, 205, 100),
            AccentColor::Red => egui::Color32::from_rgb(255, 80, 80),
            AccentColor::Cyan => egui::Color32::from_rgb(50, 200, 220),
        }
    }
}

impl Settings {
    fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("org", "rangeseek", "RangeSeek")
            .map(|proj_dirs| proj_dirs.config_dir().join("settings.json"))
    }

    /// Loads settings from the platform config dir, falling back to defaults.
    pub fn load() -> Self {
        let Some(config_path) = Self::default_path() else {
            return Self::default();
        };
        if !config_path.exists() {
            return Self::default();
        }
        match Self::load_from(&config_path) {
            Ok(settings) => settings,
            Err(e) => {
                e.log();
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        let Some(config_path) = Self::default_path() else {
            log::warn!("No config directory available, settings not saved");
            return;
        };
        if let Err(e) = self.save_to(&config_path) {
            e.log();
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(config_dir) = path.parent() {
            std::fs::create_dir_all(config_dir)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::debug!(path = %path.display(), "settings saved");
        Ok(())
    }

    pub fn bar_colors(&self) -> BarColors {
        BarColors {
            background: self.bar_color.to_color(),
            active: self.active_color.to_color(),
        }
    }

    pub fn stored_range<T: DeserializeOwned>(&self, key: &str) -> Option<(T, T)> {
        let stored = self.ranges.get(key)?;
        let min = serde_json::from_value(stored.min.clone());
        let max = serde_json::from_value(stored.max.clone());
        match (min, max) {
            (Ok(min), Ok(max)) => Some((min, max)),
            (Err(e), _) | (_, Err(e)) => {
                log::warn!("Ignoring stored range '{}': {}", key, e);
                None
            }
        }
    }

    pub fn store_range<T: Serialize>(&mut self, key: &str, min: &T, max: &T) -> Result<()> {
        if key.is_empty() {
            return Err(RangeSeekError::SettingsError {
                message: "preference key must not be empty".to_string(),
            });
        }
        let stored = StoredRange {
            min: serde_json::to_value(min)?,
            max: serde_json::to_value(max)?,
        };
        self.ranges.insert(key.to_string(), stored);
        Ok(())
    }

    pub fn remove_range(&mut self, key: &str) -> bool {
        self.ranges.remove(key).is_some()
    }
}
