use serde::Deserialize;
use std::path::Path;

use crate::constants::{
    DEFAULT_FRESHNESS_WINDOW_MS, DEFAULT_PORT, DEFAULT_REPLAY_DELAY_MS, DEFAULT_REPLAY_URL,
    DEFAULT_STREAM_URL, DEFAULT_TABLE_COUNT,
};

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_table_count() -> u32 {
    DEFAULT_TABLE_COUNT
}

fn default_replay_delay_ms() -> u64 {
    DEFAULT_REPLAY_DELAY_MS
}

fn default_freshness_window_ms() -> i64 {
    DEFAULT_FRESHNESS_WINDOW_MS
}

fn default_stream_url() -> String {
    DEFAULT_STREAM_URL.to_string()
}

fn default_replay_url() -> String {
    DEFAULT_REPLAY_URL.to_string()
}

/// Server configuration file structure (TOML)
///
/// Every field is optional; omitted fields fall back to the defaults in
/// `constants`, so an empty file and no file at all behave identically.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// HTTP listen port (default: 3000)
    #[serde(default = "default_port")]
    pub port: u16,
    /// Number of tables seeded at startup (default: 10)
    #[serde(default = "default_table_count")]
    pub table_count: u32,
    /// Simulated replay processing delay in milliseconds (default: 3000)
    #[serde(default = "default_replay_delay_ms")]
    pub replay_delay_ms: u64,
    /// Freshness window for the list-view replay badge in milliseconds
    /// (default: 120000)
    #[serde(default = "default_freshness_window_ms")]
    pub freshness_window_ms: i64,
    /// Placeholder live stream URL used for every table
    #[serde(default = "default_stream_url")]
    pub stream_url: String,
    /// Placeholder replay URL written on every trigger completion
    #[serde(default = "default_replay_url")]
    pub replay_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            table_count: default_table_count(),
            replay_delay_ms: default_replay_delay_ms(),
            freshness_window_ms: default_freshness_window_ms(),
            stream_url: default_stream_url(),
            replay_url: default_replay_url(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {}", path.display(), e))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config file {}: {}", path.display(), e))
    }

    /// Validate option ranges that serde cannot express
    pub fn validate(&self) -> Result<(), String> {
        if self.table_count == 0 {
            return Err("table_count must be at least 1".to_string());
        }
        Ok(())
    }
}
