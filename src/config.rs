//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    CONFIG_DIR_ENV, CONFIG_DIR_NAME, DEFAULT_HISTORY_LIMIT, DEFAULT_MAX_TOKEN_LEN,
    DEFAULT_SHARE_ORIGIN, MAX_COLOR_PRESETS, MAX_HISTORY_LIMIT, MIN_MAX_TOKEN_LEN,
};
use crate::models::RgbColor;
use crate::studio::ShareLinks;

/// A named color bound to a digit shortcut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPreset {
    /// Display name
    pub name: String,
    /// Color applied to selected keys
    pub color: RgbColor,
}

impl ColorPreset {
    /// Creates a preset.
    pub fn new(name: impl Into<String>, color: RgbColor) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }
}

/// Default presets for digits 1-6.
#[must_use]
pub fn default_presets() -> Vec<ColorPreset> {
    vec![
        ColorPreset::new("Crimson", RgbColor::new(0xDC, 0x14, 0x3C)),
        ColorPreset::new("Tangerine", RgbColor::new(0xFF, 0x8C, 0x00)),
        ColorPreset::new("Lemon", RgbColor::new(0xF4, 0xD0, 0x3F)),
        ColorPreset::new("Mint", RgbColor::new(0x3E, 0xB4, 0x89)),
        ColorPreset::new("Ocean", RgbColor::new(0x1E, 0x6F, 0xD9)),
        ColorPreset::new("Graphite", RgbColor::new(0x3A, 0x3A, 0x3C)),
    ]
}

/// Studio editing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudioSettings {
    /// Maximum number of undo snapshots
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    /// Color presets in digit order
    #[serde(default = "default_presets")]
    pub presets: Vec<ColorPreset>,
}

const fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl Default for StudioSettings {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            presets: default_presets(),
        }
    }
}

/// Share link settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareSettings {
    /// Origin used for share and builder links
    #[serde(default = "default_origin")]
    pub origin: String,
    /// Token length budget in characters
    #[serde(default = "default_max_token_len")]
    pub max_token_len: usize,
}

fn default_origin() -> String {
    DEFAULT_SHARE_ORIGIN.to_string()
}

const fn default_max_token_len() -> usize {
    DEFAULT_MAX_TOKEN_LEN
}

impl Default for ShareSettings {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            max_token_len: default_max_token_len(),
        }
    }
}

/// UI preferences configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Display the getting-started guide on startup
    #[serde(default = "default_show_guide")]
    pub show_guide_on_startup: bool,
}

const fn default_show_guide() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_guide_on_startup: default_show_guide(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/KeyStudio/config.toml`
/// - macOS: `~/Library/Application Support/KeyStudio/config.toml`
/// - Windows: `%APPDATA%\KeyStudio\config.toml`
///
/// `KEYSTUDIO_CONFIG_DIR` replaces the directory when set.
///
/// # Validation
///
/// - `history_limit` must be between 1 and 500
/// - at most 9 presets, each with a non-empty name
/// - `origin` must be an http or https URL
/// - `max_token_len` must be at least 256
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Studio editing settings
    #[serde(default)]
    pub studio: StudioSettings,
    /// Share link settings
    #[serde(default)]
    pub share: ShareSettings,
    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the config directory path.
    ///
    /// Uses `KEYSTUDIO_CONFIG_DIR` when set, otherwise the platform directory:
    /// - Linux: `~/.config/KeyStudio/`
    /// - macOS: `~/Library/Application Support/KeyStudio/`
    /// - Windows: `%APPDATA%\KeyStudio\`
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|dir| !dir.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from an explicit path.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate().context(format!(
            "Invalid config file: {}",
            config_path.display()
        ))?;

        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to an explicit path (temp file + rename).
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir).context(format!(
                "Failed to create config directory: {}",
                config_dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        let limit = self.studio.history_limit;
        if !(1..=MAX_HISTORY_LIMIT).contains(&limit) {
            anyhow::bail!("history_limit must be between 1 and {MAX_HISTORY_LIMIT}, got {limit}");
        }

        if self.studio.presets.len() > MAX_COLOR_PRESETS {
            anyhow::bail!(
                "At most {MAX_COLOR_PRESETS} color presets are supported, got {}",
                self.studio.presets.len()
            );
        }
        if let Some(index) = self
            .studio
            .presets
            .iter()
            .position(|preset| preset.name.trim().is_empty())
        {
            anyhow::bail!("Color preset {} has an empty name", index + 1);
        }

        ShareLinks::new(&self.share.origin)?;

        if self.share.max_token_len < MIN_MAX_TOKEN_LEN {
            anyhow::bail!(
                "max_token_len must be at least {MIN_MAX_TOKEN_LEN}, got {}",
                self.share.max_token_len
            );
        }

        Ok(())
    }

    /// Sets the share origin with validation.
    pub fn set_share_origin(&mut self, origin: &str) -> Result<()> {
        ShareLinks::new(origin)?;
        self.share.origin = origin.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert_eq!(config.studio.history_limit, 20);
        assert_eq!(config.studio.presets.len(), 6);
        assert_eq!(config.share.origin, "https://keystudio.app");
        assert_eq!(config.share.max_token_len, 2000);
        assert!(config.ui.show_guide_on_startup);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate_history_limit() {
        let mut config = Config::new();
        config.studio.history_limit = 0;
        assert!(config.validate().is_err());

        config.studio.history_limit = MAX_HISTORY_LIMIT + 1;
        assert!(config.validate().is_err());

        config.studio.history_limit = 1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate_presets() {
        let mut config = Config::new();
        config.studio.presets = (0..10)
            .map(|i| ColorPreset::new(format!("P{i}"), RgbColor::default()))
            .collect();
        assert!(config.validate().is_err());

        config.studio.presets = vec![ColorPreset::new("  ", RgbColor::default())];
        assert!(config.validate().is_err());

        config.studio.presets.clear();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate_share() {
        let mut config = Config::new();
        config.share.max_token_len = 100;
        assert!(config.validate().is_err());

        config.share.max_token_len = MIN_MAX_TOKEN_LEN;
        assert!(config.validate().is_ok());

        config.share.origin = "keystudio.app".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_set_share_origin() {
        let mut config = Config::new();
        assert!(config.set_share_origin("mailto:someone@example.com").is_err());
        assert_eq!(config.share.origin, DEFAULT_SHARE_ORIGIN);

        config.set_share_origin("http://localhost:5173").unwrap();
        assert_eq!(config.share.origin, "http://localhost:5173");
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::new();
        config.studio.history_limit = 50;
        config.share.max_token_len = 1024;
        config.ui.show_guide_on_startup = false;
        config.save_to(&config_file).unwrap();

        assert!(!config_file.with_extension("toml.tmp").exists());
        let loaded = Config::load_from(&config_file).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = Config::load_from(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        fs::write(&config_file, "[share]\nmax_token_len = 512\n").unwrap();

        let loaded = Config::load_from(&config_file).unwrap();
        assert_eq!(loaded.share.max_token_len, 512);
        assert_eq!(loaded.share.origin, DEFAULT_SHARE_ORIGIN);
        assert_eq!(loaded.studio, StudioSettings::default());
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        fs::write(&config_file, "[studio]\nhistory_limit = 0\n").unwrap();
        assert!(Config::load_from(&config_file).is_err());
    }

    #[test]
    fn test_save_rejects_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");

        let mut config = Config::new();
        config.share.max_token_len = 1;
        assert!(config.save_to(&config_file).is_err());
        assert!(!config_file.exists());
    }
}
