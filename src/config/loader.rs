// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration discovery and loading.

use crate::error::{ConfigError, GateError, Result};
use std::path::{Path, PathBuf};

use super::schema::GateConfig;

/// Configuration file names to search for, in order of priority.
const CONFIG_FILES: &[&str] = &["pushgate.toml", ".pushgate.toml", ".config/pushgate.toml"];

/// Find the configuration file for the current process.
///
/// Hooks of bare repositories run inside the git directory, so `$GIT_DIR`
/// is searched after the working directory and its parents.
pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    if let Some(path) = find_config_file_from(&current_dir) {
        return Some(path);
    }

    if let Some(git_dir) = std::env::var_os("GIT_DIR") {
        let git_dir = current_dir.join(git_dir);
        if let Some(path) = find_in_dir(&git_dir) {
            return Some(path);
        }
    }

    find_user_config()
}

/// Find the configuration file starting from a specific directory.
pub fn find_config_file_from(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        if let Some(path) = find_in_dir(&current) {
            return Some(path);
        }

        // Try parent directory
        if !current.pop() {
            break;
        }
    }

    None
}

fn find_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

fn find_user_config() -> Option<PathBuf> {
    if let Some(home) = dirs::home_dir() {
        if let Some(path) = find_in_dir(&home) {
            return Some(path);
        }
    }

    // XDG config directory
    let config = dirs::config_dir()?.join("pushgate").join("config.toml");
    config.is_file().then_some(config)
}

/// Load configuration from the default locations.
pub fn load_config() -> Result<GateConfig> {
    match find_config_file() {
        Some(path) => load_config_from(&path),
        None => {
            tracing::debug!("No configuration file found, using defaults");
            Ok(GateConfig::default())
        }
    }
}

/// Load configuration from a specific path.
pub fn load_config_from(path: &Path) -> Result<GateConfig> {
    tracing::debug!("Loading configuration from: {:?}", path);

    if !path.exists() {
        return Err(GateError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
        }));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        GateError::Config(ConfigError::ParseError {
            message: format!("Failed to read config file: {}", e),
        })
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<GateConfig> {
    toml::from_str(content).map_err(|e| {
        GateError::Config(ConfigError::ParseError {
            message: format!("Failed to parse TOML: {}", e),
        })
    })
}
