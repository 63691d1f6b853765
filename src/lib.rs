//! InductorLab - real-time Faraday's Law lab
//!
//! Core modules:
//! - `sim`: Deterministic physics (field model, flux/EMF, clock, history)
//! - `tutor`: Paused-state snapshot and plain explanations
//! - `platform`: Cancelable frame loops for native and browser hosts
//! - `settings`: Initial lab parameters

pub mod platform;
pub mod settings;
pub mod sim;
pub mod tutor;

pub use settings::{Settings, SettingsError};
pub use sim::{CalculatedData, Intent, Simulation, SimulationState, SourceType};

use glam::DVec2;

/// Lab configuration constants
pub mod consts {
    use glam::DVec2;

    /// Fixed simulation timestep (~60 Hz), independent of frame timing
    pub const SIM_DT: f64 = 0.016;

    /// Magnet drag bounds (simulation mm)
    pub const MAGNET_MIN: DVec2 = DVec2::new(-200.0, -100.0);
    pub const MAGNET_MAX: DVec2 = DVec2::new(200.0, 100.0);

    /// Coil radius scale; area is π(R/10)²
    pub const COIL_RADIUS: f64 = 20.0;
    /// Axial falloff scale of the field profile
    pub const AXIAL_SIGMA: f64 = 30.0;
    /// Lateral falloff scale
    pub const RADIAL_SIGMA: f64 = 15.0;

    /// |emf| below this counts as no current (avoids flicker at rest)
    pub const EMF_DEAD_ZONE: f64 = 0.01;
    /// |emf| above this lights up the coil
    pub const EMF_HIGHLIGHT: f64 = 0.05;

    /// Control ranges
    pub const FIELD_STRENGTH_MIN: f64 = 0.1;
    pub const FIELD_STRENGTH_MAX: f64 = 5.0;
    pub const TURNS_MIN: u32 = 1;
    pub const TURNS_MAX: u32 = 50;
    pub const AC_FREQUENCY_MIN: f64 = 0.1;
    pub const AC_FREQUENCY_MAX: f64 = 5.0;

    /// Fixed chart domains
    pub const EMF_CHART_RANGE: (f64, f64) = (-100.0, 100.0);
    pub const FLUX_CHART_RANGE: (f64, f64) = (-500.0, 500.0);
}

/// Clamp a magnet position into the lab bounds
#[inline]
pub fn clamp_magnet(pos: DVec2) -> DVec2 {
    pos.clamp(consts::MAGNET_MIN, consts::MAGNET_MAX)
}
