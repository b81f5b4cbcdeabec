//! Game settings and preferences
//!
//! Loaded once at startup from an optional JSON file; everything has a
//! sensible default so the file is never required.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Path checked when the `STARFALL_SETTINGS` override is not set
const DEFAULT_SETTINGS_FILE: &str = "starfall.json";

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,

    // === HUD ===
    /// Show the enemy/bullet counters next to score and lives
    pub show_counters: bool,
    /// Show the next-level progress line
    pub show_progress: bool,

    // === Accessibility ===
    /// Brighter sprite colors for low-contrast terminals
    pub high_contrast: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            show_counters: true,
            show_progress: true,
            high_contrast: false,
        }
    }
}

impl Settings {
    /// Load settings from `$STARFALL_SETTINGS` or `starfall.json`, falling
    /// back to defaults when the file is missing or malformed.
    pub fn load() -> Self {
        let path = std::env::var("STARFALL_SETTINGS")
            .unwrap_or_else(|_| DEFAULT_SETTINGS_FILE.to_string());
        Self::load_from(Path::new(&path))
    }

    fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("ignoring malformed {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!("no settings file at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Combined volume applied to sound effects
    pub fn effective_sfx_volume(&self) -> f32 {
        (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
    }

    /// Combined volume applied to music
    pub fn effective_music_volume(&self) -> f32 {
        (self.master_volume * self.music_volume).clamp(0.0, 1.0)
    }
}
