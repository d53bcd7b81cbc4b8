//! Player preferences
//!
//! Persisted as JSON next to the high score. Unknown or missing fields fall
//! back to defaults so older saves keep loading.

use serde::{Deserialize, Serialize};

use crate::persistence::KeyValueStore;
use crate::sim::RunnerConfig;

/// Which tuning preset to play with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    /// Dedicated game route
    #[default]
    Arcade,
    /// Smaller canvas on the 404 page
    Compact,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Arcade => "Arcade",
            Preset::Compact => "Compact",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "arcade" | "game" => Some(Preset::Arcade),
            "compact" | "404" => Some(Preset::Compact),
            _ => None,
        }
    }

    pub fn config(&self) -> RunnerConfig {
        match self {
            Preset::Arcade => RunnerConfig::arcade(),
            Preset::Compact => RunnerConfig::compact(),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub preset: Preset,

    // === Audio ===
    /// Silence every cue
    pub muted: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,

    // === Behaviour ===
    /// Pause a running game when the tab is hidden or loses focus
    pub auto_pause: bool,

    // === HUD ===
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preset: Preset::Arcade,
            muted: false,
            master_volume: 0.8,
            sfx_volume: 1.0,
            auto_pause: true,
            show_fps: false,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "synthwave-runner-settings";

    /// Volume the sound layer should use, 0 when muted
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring unreadable settings: {}", e);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Settings storage unavailable: {}", e);
                Self::default()
            }
        }
    }

    /// Save settings; failures are logged and dropped
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not serialize settings: {}", e);
                return;
            }
        };
        match store.set(Self::STORAGE_KEY, &json) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Could not save settings: {}", e),
        }
    }
}
