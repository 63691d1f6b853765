//! Flux and EMF calculator
//!
//! Turns the field model into flux through the coil, its rate of change and
//! the induced EMF. Pure: the same state always yields the same numbers.

use serde::{Deserialize, Serialize};

use super::field::{field_at, field_gradient_at};
use super::state::{SimulationState, SourceType};
use crate::consts::*;

/// Direction of induced current in the coil
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CurrentDirection {
    /// Counter-clockwise (negative EMF)
    Ccw,
    /// No meaningful current (inside the dead-zone)
    #[default]
    Static,
    /// Clockwise (positive EMF)
    Cw,
}

impl CurrentDirection {
    /// Classify an EMF, treating `|emf| < EMF_DEAD_ZONE` as no current
    pub fn from_emf(emf: f64) -> Self {
        if emf.abs() < EMF_DEAD_ZONE {
            CurrentDirection::Static
        } else if emf > 0.0 {
            CurrentDirection::Cw
        } else {
            CurrentDirection::Ccw
        }
    }

    /// Tri-state sign: -1, 0 or +1
    pub fn sign(&self) -> i8 {
        match self {
            CurrentDirection::Ccw => -1,
            CurrentDirection::Static => 0,
            CurrentDirection::Cw => 1,
        }
    }

    /// Flow label for telemetry
    pub fn label(&self) -> &'static str {
        match self {
            CurrentDirection::Ccw => "CCW",
            CurrentDirection::Static => "Static",
            CurrentDirection::Cw => "CW",
        }
    }
}

/// Telemetry derived from one tick
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CalculatedData {
    pub flux: f64,
    pub d_flux_dt: f64,
    pub emf: f64,
    pub current_direction: CurrentDirection,
}

impl CalculatedData {
    fn from_flux(flux: f64, d_flux_dt: f64) -> Self {
        // Lenz's law: the induced EMF opposes the change
        let emf = -d_flux_dt;
        Self {
            flux,
            d_flux_dt,
            emf,
            current_direction: CurrentDirection::from_emf(emf),
        }
    }

    /// Live indicator: any current outside the dead-zone
    pub fn is_inducing(&self) -> bool {
        self.emf.abs() > EMF_DEAD_ZONE
    }

    /// Highlight threshold used by the telemetry card and coil glow
    pub fn is_strong(&self) -> bool {
        self.emf.abs() > EMF_HIGHLIGHT
    }
}

/// Cross-sectional area of the coil
#[inline]
pub fn coil_area() -> f64 {
    let r = COIL_RADIUS / 10.0;
    std::f64::consts::PI * r * r
}

/// Compute flux, dΦ/dt and EMF for the given state.
///
/// Reads `magnet_velocity` (DC) and `current_time` (AC), both of which the
/// clock must have set before calling.
pub fn compute(state: &SimulationState) -> CalculatedData {
    let b0 = state.effective_strength();
    let x = state.magnet.x;
    let y = state.magnet.y;
    let area_turns = coil_area() * state.turns as f64;

    match state.source_type {
        SourceType::DcMagnet => {
            let flux = field_at(x, y, b0) * area_turns;
            // Chain rule: flux only changes because the magnet moves
            let d_flux_dx = area_turns * field_gradient_at(x, y, b0);
            CalculatedData::from_flux(flux, d_flux_dx * state.magnet_velocity)
        }
        SourceType::AcCoil => {
            let omega = std::f64::consts::TAU * state.ac_frequency;
            let phase = omega * state.current_time;
            let peak = field_at(x, y, b0) * area_turns;
            CalculatedData::from_flux(peak * phase.sin(), peak * omega * phase.cos())
        }
    }
}
