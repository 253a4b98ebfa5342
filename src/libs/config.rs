//! Configuration management for the ironlog application.
//!
//! Handles tracker behavior settings (persistence debounce, live status poll
//! interval, streak grace period fallback) stored as JSON in the platform
//! application data directory. Supports both file-based configuration and an
//! interactive setup wizard via `ironlog init`.

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

/// Configuration file name used for storing application settings.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Session tracker behavior settings.
///
/// Timing values control how eagerly in-memory timer state is flushed to the
/// database and how fast the live status view refreshes. Persisted durations
/// are always recomputed from wall-clock timestamps at write time, so the
/// debounce only bounds how much timer precision a hard kill can lose.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TrackerConfig {
    /// Debounce window in seconds for coalescing session state writes.
    ///
    /// Every state-affecting operation re-arms the window; the write happens
    /// once the window elapses without further changes. Teardown bypasses
    /// the debounce with an unconditional flush.
    pub save_debounce_secs: u64,

    /// Poll interval in milliseconds for the live status view.
    ///
    /// Polling is a display concern only: each tick recomputes elapsed time
    /// from stored timestamps rather than advancing a counter.
    pub poll_interval_ms: u64,

    /// Fallback streak grace period in days when no plan is active.
    pub default_grace_period_days: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            save_debounce_secs: 2,
            poll_interval_ms: 1000,
            default_grace_period_days: 2,
        }
    }
}

/// Top-level application configuration.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    pub tracker: Option<TrackerConfig>,
}

impl Config {
    /// Reads configuration from disk, falling back to defaults when the file
    /// does not exist.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Saves the configuration as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Returns the tracker settings, substituting defaults when unset.
    pub fn tracker(&self) -> TrackerConfig {
        self.tracker.clone().unwrap_or_default()
    }

    /// Interactive configuration wizard.
    pub fn init() -> Result<Self> {
        let current = Config::read()?.tracker();
        let theme = ColorfulTheme::default();

        let save_debounce_secs: u64 = Input::with_theme(&theme)
            .with_prompt(Message::ConfigDebouncePrompt.to_string())
            .default(current.save_debounce_secs)
            .interact_text()?;

        let poll_interval_ms: u64 = Input::with_theme(&theme)
            .with_prompt(Message::ConfigPollIntervalPrompt.to_string())
            .default(current.poll_interval_ms)
            .interact_text()?;

        Ok(Config {
            tracker: Some(TrackerConfig {
                save_debounce_secs,
                poll_interval_ms,
                default_grace_period_days: current.default_grace_period_days,
            }),
        })
    }
}
