use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

use crate::player::types::Quality;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub playback: PlaybackConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Seconds skipped by the arrow-key seek shortcuts.
    #[serde(default = "default_seek_step")]
    pub seek_step_secs: f64,

    /// Volume change applied by the arrow-key volume shortcuts.
    #[serde(default = "default_volume_step")]
    pub volume_step: f64,

    /// Inactivity window after which the control overlay hides.
    #[serde(default = "default_controls_timeout")]
    pub controls_timeout_ms: u64,

    #[serde(default = "default_volume")]
    pub default_volume: f64,

    #[serde(default)]
    pub default_quality: Quality,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            debug!("Loading config from {:?}", config_path);
            let contents =
                fs::read_to_string(&config_path).context("Failed to read config file")?;
            let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;
            info!("Config loaded successfully");
            Ok(config)
        } else {
            info!("No config file found, using defaults");
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, contents).context("Failed to write config file")?;

        debug!("Config saved to {:?}", config_path);
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Failed to get config directory")?;
        Ok(config_dir.join("marquee").join("config.toml"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            playback: PlaybackConfig::default(),
        }
    }
}

impl PlaybackConfig {
    pub fn controls_timeout(&self) -> Duration {
        Duration::from_millis(self.controls_timeout_ms)
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            seek_step_secs: default_seek_step(),
            volume_step: default_volume_step(),
            controls_timeout_ms: default_controls_timeout(),
            default_volume: default_volume(),
            default_quality: Quality::default(),
        }
    }
}

// Default value functions
fn default_seek_step() -> f64 {
    10.0
}
fn default_volume_step() -> f64 {
    0.1
}
fn default_controls_timeout() -> u64 {
    3000
}
fn default_volume() -> f64 {
    1.0
}
