//! Game settings and preferences
//!
//! Read from LocalStorage on the web build; the page (or devtools) writes
//! the JSON under `Settings::STORAGE_KEY`.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::input::KeyBindings;
use crate::tuning::Tuning;

/// Player preferences
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub keys: KeyBindings,
    pub tuning: Tuning,
    /// Fixed run seed for reproducible sessions (None = time-based)
    pub seed: Option<u64>,
}

impl Settings {
    /// LocalStorage key the web build reads
    pub const STORAGE_KEY: &'static str = "dino_run_settings";

    /// Parse settings JSON, validating the tuning block
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.tuning.validate()?;
        Ok(settings)
    }

    /// Seed to use for a new session
    pub fn seed_or(&self, fallback: u64) -> u64 {
        self.seed.unwrap_or(fallback)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native builds have no storage
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
