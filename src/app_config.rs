use anyhow::{anyhow, Result, Context};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Font size for the Korean (upper) line
    #[serde(default = "default_korean_font_size")]
    pub korean_font_size: u32,

    /// Font size for the Japanese (lower) line
    #[serde(default = "default_japanese_font_size")]
    pub japanese_font_size: u32,

    /// Font name forced onto Korean lines
    #[serde(default = "default_korean_font")]
    pub korean_font: String,

    /// Font name forced onto Japanese lines
    #[serde(default = "default_japanese_font")]
    pub japanese_font: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_korean_font_size() -> u32 {
    25
}

fn default_japanese_font_size() -> u32 {
    120
}

fn default_korean_font() -> String {
    "Malgun Gothic".to_string()
}

fn default_japanese_font() -> String {
    "Meiryo".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values.
    /// Runs before any batch work starts; a failure aborts the whole run.
    pub fn validate(&self) -> Result<()> {
        if self.korean_font_size == 0 {
            return Err(anyhow!("Korean font size must be a positive integer"));
        }
        if self.japanese_font_size == 0 {
            return Err(anyhow!("Japanese font size must be a positive integer"));
        }
        if self.korean_font.trim().is_empty() {
            return Err(anyhow!("Korean font name must not be empty"));
        }
        if self.japanese_font.trim().is_empty() {
            return Err(anyhow!("Japanese font name must not be empty"));
        }
        Ok(())
    }

    /// Load a config from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to open config file: {:?}", path.as_ref()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Save the config as pretty-printed JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write config to file: {:?}", path.as_ref()))?;
        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            korean_font_size: default_korean_font_size(),
            japanese_font_size: default_japanese_font_size(),
            korean_font: default_korean_font(),
            japanese_font: default_japanese_font(),
            log_level: LogLevel::default(),
        }
    }
}
