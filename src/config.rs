// SPDX-License-Identifier: PMPL-1.0-or-later
//! Configuration handling for remediabot
//!
//! Every section defaults to the stock remediation heuristics, so an empty
//! or missing config file reproduces the built-in behavior exactly.

use crate::error::{RemediaError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Contrast fixer settings
    #[serde(default)]
    pub contrast: ContrastConfig,

    /// Font-size fixer settings
    #[serde(default)]
    pub font_size: FontSizeConfig,

    /// Empty link/button title fixer settings
    #[serde(default)]
    pub title: TitleConfig,

    /// Missing-language fixer settings
    #[serde(default)]
    pub language: LanguageConfig,

    /// Registry settings
    #[serde(default)]
    pub fixers: FixersConfig,
}

/// Contrast fixer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContrastConfig {
    /// Background lightness at or above which the foreground is darkened
    #[serde(default = "default_light_background")]
    pub light_background: f64,

    /// Amount added to or removed from the foreground lightness
    #[serde(default = "default_lightness_shift")]
    pub lightness_shift: f64,
}

impl Default for ContrastConfig {
    fn default() -> Self {
        Self {
            light_background: default_light_background(),
            lightness_shift: default_lightness_shift(),
        }
    }
}

fn default_light_background() -> f64 {
    0.65
}

fn default_lightness_shift() -> f64 {
    0.3
}

/// Font-size fixer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontSizeConfig {
    /// CSS length forced onto small text
    #[serde(default = "default_font_size")]
    pub size: String,
}

impl Default for FontSizeConfig {
    fn default() -> Self {
        Self { size: default_font_size() }
    }
}

fn default_font_size() -> String {
    "12pt".to_string()
}

/// Title synthesis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleConfig {
    /// Attributes never harvested for title words
    #[serde(default = "default_excluded_attributes")]
    pub excluded_attributes: Vec<String>,

    /// Tokens must be strictly longer than this many characters
    #[serde(default = "default_min_token_len")]
    pub min_token_len: usize,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            excluded_attributes: default_excluded_attributes(),
            min_token_len: default_min_token_len(),
        }
    }
}

fn default_excluded_attributes() -> Vec<String> {
    vec!["style".to_string(), "href".to_string()]
}

fn default_min_token_len() -> usize {
    3
}

/// Language inference configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguageConfig {
    /// Detections below this confidence count as "nothing detected"
    #[serde(default)]
    pub min_confidence: f64,
}

/// Fixer registry configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixersConfig {
    /// Finding types routed to the no-op fixer even when a fixer exists
    #[serde(default)]
    pub disabled: Vec<String>,
}

impl Config {
    /// Reject values the fixers cannot work with
    pub fn validate(&self) -> Result<()> {
        let unit = 0.0..=1.0;
        if !unit.contains(&self.contrast.light_background) {
            return Err(RemediaError::Config(format!(
                "contrast.light_background must be within 0..=1, got {}",
                self.contrast.light_background
            )));
        }
        if !unit.contains(&self.contrast.lightness_shift) {
            return Err(RemediaError::Config(format!(
                "contrast.lightness_shift must be within 0..=1, got {}",
                self.contrast.lightness_shift
            )));
        }
        if !unit.contains(&self.language.min_confidence) {
            return Err(RemediaError::Config(format!(
                "language.min_confidence must be within 0..=1, got {}",
                self.language.min_confidence
            )));
        }
        if self.font_size.size.trim().is_empty() {
            return Err(RemediaError::Config("font_size.size must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Load configuration from a file, falling back to defaults when it is missing
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!("Config file not found at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;

    let config: Config = if path.extension().map(|e| e == "toml").unwrap_or(false) {
        toml::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };

    config.validate()?;
    debug!(?config, "Loaded configuration");
    Ok(config)
}

/// Get the default config path for a working directory
pub fn default_config_path() -> PathBuf {
    PathBuf::from(".remediabot/config.yml")
}

/// Write default configuration to a file
pub fn write_default_config(path: &Path) -> Result<()> {
    let config = Config::default();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = if path.extension().map(|e| e == "toml").unwrap_or(false) {
        toml::to_string_pretty(&config).map_err(|e| RemediaError::Config(e.to_string()))?
    } else {
        serde_yaml::to_string(&config)?
    };

    std::fs::write(path, content)?;
    Ok(())
}
