//! Paused-state snapshot for explanation collaborators
//!
//! The lab never talks to any explanation service itself. While paused it
//! hands out a frozen [`TutorSnapshot`]; whoever consumes it may be slow,
//! absent or failing without affecting the tick loop.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::sim::{CalculatedData, SimulationState};

/// Below this |dΦ/dt| the flux is described as constant
pub const STEADY_FLUX_THRESHOLD: f64 = 0.001;

/// Frozen view of the lab handed to a tutor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TutorSnapshot {
    pub position: DVec2,
    pub field_strength: f64,
    pub turns: u32,
    pub emf: f64,
    pub flux: f64,
    pub d_flux_dt: f64,
}

impl TutorSnapshot {
    pub fn capture(state: &SimulationState, data: &CalculatedData) -> Self {
        Self {
            position: state.magnet,
            field_strength: state.field_strength,
            turns: state.turns,
            emf: data.emf,
            flux: data.flux,
            d_flux_dt: data.d_flux_dt,
        }
    }

    /// Plain-text description, suitable for forwarding as-is
    pub fn summary(&self) -> String {
        format!(
            "Magnet Position: X:{}mm, Y:{}mm\n\
             Field Strength: {}T\n\
             Coil Turns: {}\n\
             Current Induced EMF: {:.4}V\n\
             Current Flux: {:.4}Wb\n\
             Current Rate of Change of Flux (dPhi/dt): {:.4}Wb/s",
            self.position.x,
            self.position.y,
            self.field_strength,
            self.turns,
            self.emf,
            self.flux,
            self.d_flux_dt
        )
    }
}

/// Short Faraday/Lenz explanation of the current telemetry
pub fn basic_explanation(data: &CalculatedData) -> String {
    if data.d_flux_dt.abs() < STEADY_FLUX_THRESHOLD {
        return "The magnetic flux is constant. No EMF is being induced because there is no \
                change in the magnetic environment of the coil."
            .to_string();
    }
    let direction = if data.d_flux_dt > 0.0 { "increasing" } else { "decreasing" };
    format!(
        "The magnetic flux through the coil is {direction}. According to Faraday's Law, this \
         change induces an EMF of {:.2}V. Lenz's Law states the induced current will create its \
         own magnetic field to oppose this {direction} flux.",
        data.emf
    )
}
