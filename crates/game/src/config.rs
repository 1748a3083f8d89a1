//! Game configuration (window, input). Loaded from config.ron at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config at {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Player settings. Loaded from `config.ron` in the current directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Window width in logical pixels.
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    /// Window height in logical pixels.
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    /// Start in borderless fullscreen.
    #[serde(default)]
    pub fullscreen: bool,
    /// Mouse sensitivity multiplier (1.0 = default).
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f32,
    /// Fixed RNG seed for reproducible runs. Random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_window_width() -> u32 {
    1280
}
fn default_window_height() -> u32 {
    720
}
fn default_sensitivity() -> f32 {
    1.0
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            fullscreen: false,
            sensitivity: default_sensitivity(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            log::info!("No config at {:?}, using defaults", path);
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => {
                log::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                log::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn parse(data: &str) -> Result<Self, ron::error::SpannedError> {
        let mut config: GameConfig = ron::from_str(data)?;
        if !config.sensitivity.is_finite() || config.sensitivity <= 0.0 {
            log::warn!("Ignoring sensitivity {}, using 1.0", config.sensitivity);
            config.sensitivity = default_sensitivity();
        }
        Ok(config)
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("config.ron")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config = GameConfig::parse("(sensitivity: 1.5, seed: Some(42))").unwrap();
        assert_eq!(config.window_width, 1280);
        assert_eq!(config.window_height, 720);
        assert!(!config.fullscreen);
        assert_eq!(config.sensitivity, 1.5);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn empty_struct_is_default() {
        assert_eq!(GameConfig::parse("()").unwrap(), GameConfig::default());
    }

    #[test]
    fn non_positive_sensitivity_is_replaced() {
        let config = GameConfig::parse("(sensitivity: -2.0)").unwrap();
        assert_eq!(config.sensitivity, 1.0);
    }

    #[test]
    fn load_from_reports_errors() {
        let dir = std::env::temp_dir().join(format!("arena-fps-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let missing = dir.join("missing.ron");
        assert!(matches!(GameConfig::load_from(&missing), Err(ConfigError::Io { .. })));

        let broken = dir.join("broken.ron");
        std::fs::write(&broken, "(window_width: \"wide\")").unwrap();
        assert!(matches!(GameConfig::load_from(&broken), Err(ConfigError::Parse { .. })));

        let good = dir.join("good.ron");
        std::fs::write(&good, "(window_width: 1920, window_height: 1080, fullscreen: true)").unwrap();
        let config = GameConfig::load_from(&good).unwrap();
        assert_eq!((config.window_width, config.window_height), (1920, 1080));
        assert!(config.fullscreen);

        std::fs::remove_dir_all(&dir).ok();
    }
}
