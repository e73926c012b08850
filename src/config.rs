//! Configuration management for the friend suggestion engine

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Tunables shared by the CLI and host sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of suggestions kept in summaries
    pub top_n: usize,

    /// Delay between narration steps during playback
    pub playback_step_ms: u64,

    /// Load only the requester's network instead of every friendship
    pub use_network_query: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            top_n: 5,
            playback_step_ms: 400,
            use_network_query: false,
        }
    }
}

impl Config {
    /// Create a new configuration with custom values
    pub fn new(top_n: usize, playback_step_ms: u64, use_network_query: bool) -> Self {
        Self {
            top_n,
            playback_step_ms,
            use_network_query,
        }
    }

    /// Read a JSON config file; absent keys keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = serde_json::from_str(&raw)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    pub fn playback_step(&self) -> Duration {
        Duration::from_millis(self.playback_step_ms)
    }
}
