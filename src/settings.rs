//! Lab settings
//!
//! Initial parameters for a lab session. Read from a JSON file on native and
//! from LocalStorage in the browser.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{SimulationState, SourceType};

/// Errors from loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Initial lab parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Magnet ===
    pub magnet_x: f64,
    pub magnet_y: f64,
    /// Source field magnitude (T)
    pub field_strength: f64,
    /// Start with S|N polarity
    pub reversed: bool,

    // === Coil ===
    pub turns: u32,

    // === Source ===
    pub source: SourceType,
    /// AC source frequency (Hz)
    pub ac_frequency: f64,

    /// Start paused
    pub start_paused: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let state = SimulationState::default();
        Self {
            magnet_x: state.magnet.x,
            magnet_y: state.magnet.y,
            field_strength: state.field_strength,
            reversed: state.is_reversed,
            turns: state.turns,
            source: state.source_type,
            ac_frequency: state.ac_frequency,
            start_paused: state.is_paused,
        }
    }
}

impl Settings {
    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values outside the lab's control ranges
    pub fn validate(&self) -> Result<(), SettingsError> {
        check("magnet_x", self.magnet_x, MAGNET_MIN.x, MAGNET_MAX.x)?;
        check("magnet_y", self.magnet_y, MAGNET_MIN.y, MAGNET_MAX.y)?;
        check(
            "field_strength",
            self.field_strength,
            FIELD_STRENGTH_MIN,
            FIELD_STRENGTH_MAX,
        )?;
        check("turns", self.turns as f64, TURNS_MIN as f64, TURNS_MAX as f64)?;
        check(
            "ac_frequency",
            self.ac_frequency,
            AC_FREQUENCY_MIN,
            AC_FREQUENCY_MAX,
        )?;
        Ok(())
    }

    /// Build the starting lab state
    pub fn initial_state(&self) -> SimulationState {
        let mut state = SimulationState {
            is_reversed: self.reversed,
            source_type: self.source,
            is_paused: self.start_paused,
            ..Default::default()
        };
        state.set_position(self.magnet_x, self.magnet_y);
        state.set_field_strength(self.field_strength);
        state.set_turns(self.turns);
        state.set_ac_frequency(self.ac_frequency);
        state
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "inductor_lab_settings";

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

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }
}

fn check(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), SettingsError> {
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(SettingsError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}
