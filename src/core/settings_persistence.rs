//! Settings persistence
//!
//! Saves and loads [`Settings`] to/from a JSON file so defaults chosen once
//! (variant, notation, log filter, engine knobs) survive between runs.
//!
//! # File Location
//!
//! `settings.json` in the platform configuration directory, e.g.
//! `~/.config/senterej/settings.json` on Linux. `--config <PATH>` overrides it.
//!
//! # Error Handling
//!
//! A missing file is not an error: defaults are used. Read and parse failures
//! are reported to the caller, which falls back to defaults with a warning.

use super::error::CliResult;
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use senterej_engine::{EngineConfig, Notation, Variant};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Settings filename
const SETTINGS_FILENAME: &str = "settings.json";

/// Persisted user preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub engine: EngineConfig,
    /// Variant used by `new` when none is given
    pub default_variant: Variant,
    /// Alphabet used when printing FEN
    pub notation: Notation,
    /// `tracing` filter directive, used when `RUST_LOG` is unset
    pub log_filter: String,
    /// When the file was last written
    pub last_saved: Option<DateTime<Utc>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            default_variant: Variant::Senterej,
            notation: Notation::Shared,
            log_filter: "warn".to_string(),
            last_saved: None,
        }
    }
}

/// Resolve the settings file path
///
/// Falls back to a local `settings.json` when the platform config directory
/// cannot be determined.
pub fn settings_path(override_path: Option<&Path>) -> PathBuf {
    if let Some(path) = override_path {
        return path.to_path_buf();
    }
    match ProjectDirs::from("org", "senterej", "senterej") {
        Some(dirs) => dirs.config_dir().join(SETTINGS_FILENAME),
        None => PathBuf::from(SETTINGS_FILENAME),
    }
}

/// Read settings from `path`; a missing file yields the defaults
pub fn read_settings(path: &Path) -> CliResult<Settings> {
    if !path.exists() {
        debug!("[SETTINGS] No settings file at {:?}, using defaults", path);
        return Ok(Settings::default());
    }
    let contents = fs::read_to_string(path)?;
    let settings = serde_json::from_str(&contents)?;
    info!("[SETTINGS] Loaded settings from {:?}", path);
    Ok(settings)
}

/// Write `settings` to `path`, creating parent directories as needed
///
/// Stamps `last_saved` with the current time.
pub fn save_settings(path: &Path, settings: &Settings) -> CliResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let stamped = Settings {
        last_saved: Some(Utc::now()),
        ..settings.clone()
    };
    fs::write(path, serde_json::to_string_pretty(&stamped)?)?;
    info!("[SETTINGS] Saved settings to {:?}", path);
    Ok(())
}
