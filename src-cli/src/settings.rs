//! User settings loaded from `settings.yaml`.
//!
//! Looked up in the user config directory:
//! - macOS: ~/Library/Application Support/pixloc/settings.yaml
//! - Windows: %APPDATA%\pixloc\settings.yaml
//! - Linux: ~/.config/pixloc/settings.yaml

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Default color tolerance when `--tolerance` is not given.
    pub tolerance: u8,
    /// Report bitmask matches with the legacy -1 offset.
    pub legacy_coordinates: bool,
}

/// Default location of the settings file, if the platform has a config dir.
pub fn default_path() -> Option<PathBuf> {
    dirs_next::config_dir().map(|dir| dir.join("pixloc").join("settings.yaml"))
}

pub fn parse(content: &str) -> anyhow::Result<Settings> {
    // An empty file deserializes to YAML null.
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }
    Ok(serde_yaml::from_str(content)?)
}

pub fn load_from(path: &Path) -> anyhow::Result<Settings> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file {}", path.display()))?;
    parse(&content).with_context(|| format!("invalid settings file {}", path.display()))
}

/// Load settings.
///
/// An explicit path must exist and parse. The default file is optional:
/// missing means defaults, broken means a warning and defaults.
pub fn load(explicit: Option<&Path>) -> anyhow::Result<Settings> {
    if let Some(path) = explicit {
        let settings = load_from(path)?;
        tracing::debug!(?path, ?settings, "loaded settings");
        return Ok(settings);
    }

    let Some(path) = default_path() else {
        return Ok(Settings::default());
    };
    if !path.exists() {
        tracing::debug!(?path, "no settings file, using defaults");
        return Ok(Settings::default());
    }

    match load_from(&path) {
        Ok(settings) => {
            tracing::debug!(?path, ?settings, "loaded settings");
            Ok(settings)
        }
        Err(e) => {
            tracing::warn!("{e:#}, using defaults");
            Ok(Settings::default())
        }
    }
}
