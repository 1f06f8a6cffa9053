//! Configuration file support for arctic-dock.
//!
//! Settings are read from `~/.config/arctic-dock/config.toml` (or a path given
//! on the command line) and cover dock geometry and the format menu. The
//! palette itself and the initial color format are fixed.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod types;

pub use types::{DockConfig, MenuConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [dock]
/// height_margin = 0.20
/// padding = 5
/// label_font = "Monospace 8"
///
/// [menu]
/// item_height = 20
/// width = 80
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Dock window geometry and labels
    #[serde(default)]
    pub dock: DockConfig,

    /// Format menu geometry
    #[serde(default)]
    pub menu: MenuConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is
    /// logged.
    ///
    /// Validated ranges:
    /// - `dock.height_margin`: 0.0 - 0.9
    /// - `dock.padding`: 0 - 50
    /// - `menu.item_height`: 12 - 64
    /// - `menu.width`: 40 - 400
    /// - `menu.item_padding`: 0 - item_height / 2
    pub fn validate_and_clamp(&mut self) {
        if !(0.0..=0.9).contains(&self.dock.height_margin) {
            log::warn!(
                "Invalid height_margin {:.2}, clamping to 0.0-0.9 range",
                self.dock.height_margin
            );
            // NaN fails `contains` but survives `clamp`
            self.dock.height_margin = if self.dock.height_margin.is_nan() {
                0.20
            } else {
                self.dock.height_margin.clamp(0.0, 0.9)
            };
        }

        if self.dock.padding > 50 {
            log::warn!(
                "Invalid padding {}, clamping to 0-50 range",
                self.dock.padding
            );
            self.dock.padding = 50;
        }

        if !(12..=64).contains(&self.menu.item_height) {
            log::warn!(
                "Invalid menu item_height {}, clamping to 12-64 range",
                self.menu.item_height
            );
            self.menu.item_height = self.menu.item_height.clamp(12, 64);
        }

        if !(40..=400).contains(&self.menu.width) {
            log::warn!(
                "Invalid menu width {}, clamping to 40-400 range",
                self.menu.width
            );
            self.menu.width = self.menu.width.clamp(40, 400);
        }

        let max_item_padding = self.menu.item_height / 2;
        if self.menu.item_padding > max_item_padding {
            log::warn!(
                "Invalid menu item_padding {}, clamping to 0-{}",
                self.menu.item_padding,
                max_item_padding
            );
            self.menu.item_padding = max_item_padding;
        }

        if self.dock.label_font.trim().is_empty() {
            log::warn!("Empty label_font, falling back to 'Monospace 8'");
            self.dock.label_font = DockConfig::default().label_font;
        }

        if self.menu.font.trim().is_empty() {
            log::warn!("Empty menu font, falling back to 'Monospace 9'");
            self.menu.font = MenuConfig::default().font;
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/arctic-dock/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("arctic-dock");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if
    /// no file exists there.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined, or the
    /// file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or contains invalid TOML.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// JSON schema of the configuration file, for editor integration.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_classic_layout() {
        let config = Config::default();
        assert_eq!(config.dock.padding, 5);
        assert_eq!(config.dock.height_margin, 0.20);
        assert_eq!(config.menu.item_height, 20);
        assert_eq!(config.menu.width, 80);
        assert_eq!(config.menu.item_padding, 5);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[menu]\nwidth = 120").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.menu.width, 120);
        assert_eq!(config.menu.item_height, 20);
        assert_eq!(config.dock.padding, 5);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut config: Config = toml::from_str(
            r#"
            [dock]
            height_margin = 1.5
            padding = 400

            [menu]
            item_height = 4
            width = 1000
            item_padding = 30
            "#,
        )
        .unwrap();
        config.validate_and_clamp();

        assert_eq!(config.dock.height_margin, 0.9);
        assert_eq!(config.dock.padding, 50);
        assert_eq!(config.menu.item_height, 12);
        assert_eq!(config.menu.width, 400);
        assert_eq!(config.menu.item_padding, 6);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[dock\npadding = ").unwrap();
        assert!(Config::load_from(file.path()).is_err());
    }

    #[test]
    fn schema_mentions_sections() {
        let schema = serde_json::to_string(&Config::json_schema()).unwrap();
        assert!(schema.contains("item_height"));
        assert!(schema.contains("height_margin"));
    }
}
