//! Configuration for vtcursor.
//!
//! Settings are read from `~/.vtcursor/config.toml`. Every field is optional and
//! a missing file means defaults:
//!
//! ```toml
//! # tracing filter for the log file (RUST_LOG takes precedence)
//! log_level = "info"
//!
//! # Relative move used to reach a screen edge; must exceed the screen size
//! probe_distance = 999
//!
//! [glyphs]
//! vertical = "|"
//! horizontal = "-"
//!
//! [status_line]
//! visible = true
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::cursor::DEFAULT_PROBE_DISTANCE;

const CONFIG_DIR: &str = ".vtcursor";

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log filter directive
    pub log_level: String,
    /// Edge distance for the cursor-probe fallback of size detection
    pub probe_distance: i32,
    /// Line glyphs
    pub glyphs: GlyphConfig,
    /// Status line settings
    pub status_line: StatusLineConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            probe_distance: DEFAULT_PROBE_DISTANCE,
            glyphs: GlyphConfig::default(),
            status_line: StatusLineConfig::default(),
        }
    }
}

/// Glyphs used by the line drawer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlyphConfig {
    pub vertical: char,
    pub horizontal: char,
}

impl Default for GlyphConfig {
    fn default() -> Self {
        Self {
            vertical: '|',
            horizontal: '-',
        }
    }
}

/// Status line configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusLineConfig {
    pub visible: bool,
}

impl Default for StatusLineConfig {
    fn default() -> Self {
        Self { visible: true }
    }
}

impl Config {
    /// Load configuration from file. A missing file yields the defaults.
    pub fn load() -> anyhow::Result<Self> {
        let Some(path) = Self::get_config_path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Parse TOML configuration text
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content).context("invalid config TOML")?;
        if config.probe_distance <= 0 {
            anyhow::bail!("probe_distance must be positive, got {}", config.probe_distance);
        }
        Ok(config)
    }

    /// Save configuration to file, returning the path written
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = Self::get_config_path().context("could not determine config path")?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config")?;
        fs::write(&path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Get config file path
    pub fn get_config_path() -> Option<PathBuf> {
        config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get log file path
    pub fn get_log_path() -> PathBuf {
        config_dir()
            .map(|dir| dir.join("vtcursor.log"))
            .unwrap_or_else(|| PathBuf::from("vtcursor.log"))
    }
}

fn config_dir() -> Option<PathBuf> {
    home_dir().map(|home| home.join(CONFIG_DIR))
}

// Get home directory
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}
