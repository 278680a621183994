//! Application configuration.
//!
//! Loaded from `$XDG_CONFIG_HOME/hyprsnap/config.json`.  Every field is
//! optional — a minimal `{}` file is valid and all values fall back to their
//! compiled-in defaults.  Command-line flags override file values.
//!
//! # Example
//!
//! ```json
//! {
//!   "split_percent": 33,
//!   "spacer": 8,
//!   "allow_activation": true
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Percentage taken by each split step, `1..=99`.
    pub split_percent: u8,
    /// Uniform margin subtracted from every computed rectangle, in pixels.
    pub spacer: i32,
    /// Whether placements also bring the window to the foreground.
    pub allow_activation: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            split_percent: 50,
            spacer: 0,
            allow_activation: false,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// `split_percent` clamped into the valid `1..=99` range.
    pub fn effective_split_percent(&self) -> u8 {
        self.split_percent.clamp(1, 99)
    }

    /// `spacer` floored at zero.
    pub fn effective_spacer(&self) -> i32 {
        self.spacer.max(0)
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);
