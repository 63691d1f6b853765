//! Lab state and core simulation types
//!
//! The single authoritative state lives inside [`Simulation`](super::Simulation);
//! everything here is plain data that collaborators can read and serialize.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::clamp_magnet;
use crate::consts::*;

/// Which excitation drives the flux through the coil
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceType {
    /// Permanent magnet whose position is dragged by the user
    #[default]
    DcMagnet,
    /// Stationary source whose magnitude oscillates sinusoidally
    AcCoil,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::DcMagnet => "DC",
            SourceType::AcCoil => "AC",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "dc" | "dc_magnet" | "magnet" => Some(SourceType::DcMagnet),
            "ac" | "ac_coil" | "coil" => Some(SourceType::AcCoil),
            _ => None,
        }
    }
}

/// Complete lab state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Magnet position in simulation millimetres (x along the coil axis)
    pub magnet: DVec2,
    /// Backward-difference velocity from the last running tick
    pub magnet_velocity: f64,
    /// Source field magnitude (tesla-equivalent)
    pub field_strength: f64,
    /// Polarity swap
    pub is_reversed: bool,
    /// Coil windings
    pub turns: u32,
    pub is_paused: bool,
    pub source_type: SourceType,
    /// AC source frequency (Hz), only read for [`SourceType::AcCoil`]
    pub ac_frequency: f64,
    /// Simulation clock in seconds, advanced by `SIM_DT` per running tick
    pub current_time: f64,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            magnet: DVec2::new(-80.0, 0.0),
            magnet_velocity: 0.0,
            field_strength: 1.5,
            is_reversed: false,
            turns: 12,
            is_paused: false,
            source_type: SourceType::DcMagnet,
            ac_frequency: 1.0,
            current_time: 0.0,
        }
    }
}

impl SimulationState {
    /// Move the magnet, keeping it inside the lab bounds
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.magnet = clamp_magnet(DVec2::new(x, y));
    }

    pub fn set_field_strength(&mut self, value: f64) {
        self.field_strength = value.clamp(FIELD_STRENGTH_MIN, FIELD_STRENGTH_MAX);
    }

    pub fn set_turns(&mut self, value: u32) {
        self.turns = value.clamp(TURNS_MIN, TURNS_MAX);
    }

    pub fn set_ac_frequency(&mut self, value: f64) {
        self.ac_frequency = value.clamp(AC_FREQUENCY_MIN, AC_FREQUENCY_MAX);
    }

    /// Signed source strength (polarity applied)
    #[inline]
    pub fn effective_strength(&self) -> f64 {
        super::field::effective_strength(self.field_strength, self.is_reversed)
    }
}
