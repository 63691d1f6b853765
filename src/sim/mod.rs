//! Deterministic induction simulation
//!
//! All physics lives here and must stay pure and deterministic:
//! - Fixed timestep only
//! - Closed-form field model, no numeric integration
//! - State mutated only by `Simulation::tick`
//! - No rendering or platform dependencies

pub mod field;
pub mod history;
pub mod induction;
pub mod state;
pub mod tick;

pub use field::{effective_strength, field_at, field_gradient_at, radial_factor};
pub use history::{HISTORY_CAPACITY, HistoryBuffer, HistoryPoint};
pub use induction::{CalculatedData, CurrentDirection, coil_area, compute};
pub use state::{SimulationState, SourceType};
pub use tick::{ClockPhase, Intent, Simulation};
