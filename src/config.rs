//! # Configuration Management Module
//!
//! Application settings that outlive a session: which window variant to show,
//! which external processor to run and where the bundled resources live.
//! Stored as TOML in a platform-appropriate location:
//!
//! - **Windows**: `%APPDATA%\Ivolution\config.toml`
//! - **macOS**: `~/Library/Application Support/Ivolution/config.toml`
//! - **Linux**: `~/.config/ivolution/config.toml`
//!
//! Loading never fails: a missing or corrupt file yields the defaults.

use crate::constants::{DEFAULT_POLL_INTERVAL_MS, DEFAULT_WORKER_COMMAND};
use crate::logger::log;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Which main window variant is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowMode {
    /// Job controls, file list, progress and status bar
    #[default]
    Full,
    /// File menu with About and Exit only
    Minimal,
}

/// Persistent application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct IvolutionConfig {
    /// Window variant to build at startup
    pub window_mode: WindowMode,

    /// External processor launched for each job
    pub worker_command: String,

    /// Arguments placed before the job arguments, e.g. a script path
    pub worker_args: Vec<String>,

    /// Folder containing the bundled `media` and `haarcascades` directories
    pub root_folder: PathBuf,

    /// How often worker messages are drained while a job runs (milliseconds)
    pub poll_interval_ms: u64,
}

impl Default for IvolutionConfig {
    fn default() -> Self {
        Self {
            window_mode: WindowMode::Full,
            worker_command: DEFAULT_WORKER_COMMAND.to_string(),
            worker_args: Vec::new(),
            root_folder: PathBuf::new(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl IvolutionConfig {
    /// Load configuration from the platform config directory, falling back to defaults
    pub fn load() -> Self {
        match Self::config_path() {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                log::warn!("Failed to get config path: {}", e);
                Self::default()
            }
        }
    }

    /// Load configuration from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    log::error!("Failed to parse config {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::error!("Failed to read config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save configuration to the platform config directory
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;

        log::info!("Configuration saved to: {}", path.display());
        Ok(())
    }

    /// Platform-appropriate configuration file path
    pub fn config_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        let app_dir = if cfg!(any(target_os = "windows", target_os = "macos")) {
            "Ivolution"
        } else {
            "ivolution"
        };
        let config_dir = dirs::config_dir()
            .ok_or("Could not find config directory")?
            .join(app_dir);

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: IvolutionConfig = toml::from_str("window_mode = \"minimal\"").unwrap();
        assert_eq!(config.window_mode, WindowMode::Minimal);
        assert_eq!(config.worker_command, DEFAULT_WORKER_COMMAND);
        assert_eq!(config.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
    }
}
