use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to write config file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode config")]
    Encode(#[from] serde_json::Error),
}

/// User-facing text, kept out of the code so it can be swapped per locale
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Strings {
    pub notification_title: String,
    pub notification_text: String,
    pub channel_name: String,
    pub channel_description: String,
    pub settings_title: String,
}

impl Default for Strings {
    fn default() -> Self {
        Self {
            notification_title: "Stopwatch".to_string(),
            notification_text: "Time exceeded".to_string(),
            channel_name: "Stopwatch".to_string(),
            channel_description: "Alerts when the time limit is exceeded".to_string(),
            settings_title: "Set upper limit in seconds".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub tick_interval_ms: u64,
    pub notifications: bool,
    pub strings: Strings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            notifications: true,
            strings: Strings::default(),
        }
    }
}

impl Config {
    /// Replace values the clock cannot run with by their defaults
    pub fn sanitized(mut self) -> Self {
        if self.tick_interval_ms == 0 {
            log::warn!(
                "tick_interval_ms must be positive, using {}",
                DEFAULT_TICK_INTERVAL_MS
            );
            self.tick_interval_ms = DEFAULT_TICK_INTERVAL_MS;
        }
        self
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<(), ConfigError>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "stopwatch") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("stopwatch_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        match fs::read(&self.path) {
            Ok(bytes) => match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => cfg.sanitized(),
                Err(e) => {
                    log::warn!("ignoring corrupt config {}: {}", self.path.display(), e);
                    Config::default()
                }
            },
            Err(_) => Config::default(),
        }
    }

    fn save(&self, cfg: &Config) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data).map_err(write_err)
    }
}
