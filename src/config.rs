//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\pocket-player\config.toml
//! - macOS: ~/Library/Application Support/pocket-player/config.toml
//! - Linux: ~/.config/pocket-player/config.toml
//!
//! Every field has a default, so a partial (or missing) file is fine.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::artwork::DiskCache;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Window settings
    pub window: WindowConfig,

    /// Playback settings
    pub player: PlayerConfig,

    /// Song catalog settings
    pub library: LibraryConfig,

    /// Artwork cache settings
    pub artwork: ArtworkConfig,
}

/// Initial window size, phone-shaped by default
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 420.0,
            height: 860.0,
        }
    }
}

/// Audio playback settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Start playing as soon as a song is prepared
    pub autoplay: bool,

    /// Interval between position updates while playing, in milliseconds
    pub time_update_ms: u64,

    /// Output volume (0.0 - 1.0)
    pub volume: f32,
}

impl PlayerConfig {
    pub fn time_update_interval(&self) -> Duration {
        Duration::from_millis(self.time_update_ms.max(1))
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            autoplay: true,
            time_update_ms: 500,
            volume: 1.0,
        }
    }
}

/// Song catalog settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// JSON catalog to load instead of the bundled one
    pub catalog: Option<PathBuf>,
}

/// Artwork cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtworkConfig {
    /// Keep downloaded artwork on disk between runs
    pub disk_cache: bool,

    /// Cache directory (default: user cache dir)
    pub cache_dir: Option<PathBuf>,
}

impl ArtworkConfig {
    /// The configured disk cache, if enabled.
    pub fn disk_cache(&self) -> Option<DiskCache> {
        if !self.disk_cache {
            return None;
        }
        let dir = self.cache_dir.clone().unwrap_or_else(DiskCache::default_dir);
        Some(DiskCache::new(dir))
    }
}

impl Default for ArtworkConfig {
    fn default() -> Self {
        Self {
            disk_cache: true,
            cache_dir: None,
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pocket-player"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from the default location
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };
    load_from(&path)
}

/// Load configuration from a specific file
pub fn load_from(path: &Path) -> Config {
    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to a specific file
///
/// Creates the parent directory if it doesn't exist.
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================
