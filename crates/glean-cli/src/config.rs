//! Persistent user configuration
//!
//! Lives at `~/.glean.config` (JSON), or wherever `GLEAN_CONFIG` points.
//! Created with defaults on first run so users have a file to edit; a
//! failure to write it is only a warning because every value has a default.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GleanConfig {
    /// Root of the shared dependency cache
    pub cache_folder: PathBuf,
    pub cmake_binary: String,
    pub git_binary: String,
    pub svn_binary: String,
}

impl Default for GleanConfig {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            cache_folder: home.join(".glean_cache"),
            cmake_binary: "cmake".to_string(),
            git_binary: "git".to_string(),
            svn_binary: "svn".to_string(),
        }
    }
}

/// Where the config file lives: `GLEAN_CONFIG` wins, then `~/.glean.config`
pub fn config_path() -> PathBuf {
    if let Some(path) = env::var_os("GLEAN_CONFIG") {
        return PathBuf::from(path);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".glean.config")
}

impl GleanConfig {
    /// Load the config file, writing a default one on first run
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!(
                        "Warning: could not parse config file {}: {e}; using defaults",
                        path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                let config = Self::default();
                if let Ok(serialized) = serde_json::to_string_pretty(&config) {
                    if let Err(e) = std::fs::write(&path, serialized) {
                        eprintln!(
                            "Warning: could not write config file {}: {e}",
                            path.display()
                        );
                    }
                }
                config
            }
        }
    }
}
