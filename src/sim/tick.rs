//! Fixed timestep simulation tick
//!
//! [`Simulation`] owns the lab state and advances it one `SIM_DT` step per
//! host frame. Collaborators never touch the state directly: they submit
//! [`Intent`]s, which are applied together at the start of the next tick.

use super::history::{HistoryBuffer, HistoryPoint};
use super::induction::{CalculatedData, compute};
use super::state::{SimulationState, SourceType};
use crate::consts::SIM_DT;
use crate::tutor::TutorSnapshot;

/// A requested change to the lab, applied at the next tick boundary
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// Drag the magnet (clamped to lab bounds)
    SetPosition { x: f64, y: f64 },
    SetFieldStrength(f64),
    SetTurns(u32),
    SetReversed(bool),
    TogglePolarity,
    SetSourceType(SourceType),
    SetAcFrequency(f64),
    SetPaused(bool),
    TogglePause,
}

/// Phase of the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockPhase {
    Running,
    Paused,
}

/// The lab: state, last telemetry and chart history
#[derive(Debug, Clone)]
pub struct Simulation {
    state: SimulationState,
    data: CalculatedData,
    history: HistoryBuffer,
    /// Magnet x at the previous running tick (velocity reference)
    prev_x: f64,
    pending: Vec<Intent>,
    /// Inputs and results of the last running tick, handed out while paused
    snapshot: TutorSnapshot,
    /// Completed running ticks
    ticks: u64,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimulationState::default())
    }
}

impl Simulation {
    pub fn new(state: SimulationState) -> Self {
        let data = CalculatedData::default();
        Self {
            prev_x: state.magnet.x,
            snapshot: TutorSnapshot::capture(&state, &data),
            state,
            data,
            history: HistoryBuffer::new(),
            pending: Vec::new(),
            ticks: 0,
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Telemetry from the most recently completed running tick
    pub fn data(&self) -> &CalculatedData {
        &self.data
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn phase(&self) -> ClockPhase {
        if self.state.is_paused {
            ClockPhase::Paused
        } else {
            ClockPhase::Running
        }
    }

    /// Queue an intent for the next tick
    pub fn submit(&mut self, intent: Intent) {
        self.pending.push(intent);
    }

    /// Frozen snapshot of the last running tick, only available while paused.
    ///
    /// Edits made while paused do not show up here until the next running tick.
    pub fn tutor_snapshot(&self) -> Option<TutorSnapshot> {
        if self.state.is_paused {
            Some(self.snapshot.clone())
        } else {
            None
        }
    }

    /// Advance one fixed step. `now` is the host wall-clock time (ms) used to
    /// stamp the history point.
    pub fn tick(&mut self, now: f64) {
        let was_paused = self.state.is_paused;
        self.apply_pending();

        if self.state.is_paused {
            if !was_paused {
                log::info!(
                    "Paused at t={:.3}s (emf {:.4}, flux {:.4})",
                    self.state.current_time,
                    self.data.emf,
                    self.data.flux
                );
            }
            return;
        }

        if was_paused {
            // Drop the stale pre-pause reference so resuming never spikes
            self.prev_x = self.state.magnet.x;
            log::info!("Resumed at t={:.3}s", self.state.current_time);
        }

        self.state.magnet_velocity = (self.state.magnet.x - self.prev_x) / SIM_DT;
        self.data = compute(&self.state);
        self.snapshot = TutorSnapshot::capture(&self.state, &self.data);

        self.history.push(HistoryPoint {
            time: now,
            emf: self.data.emf,
            flux: self.data.flux,
        });

        self.state.current_time += SIM_DT;
        self.prev_x = self.state.magnet.x;
        self.ticks += 1;

        log::trace!(
            "tick {} x={:.2} v={:.2} flux={:.4} emf={:.4}",
            self.ticks,
            self.state.magnet.x,
            self.state.magnet_velocity,
            self.data.flux,
            self.data.emf
        );
    }

    fn apply_pending(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        for intent in pending {
            self.apply(intent);
        }
    }

    fn apply(&mut self, intent: Intent) {
        let state = &mut self.state;
        match intent {
            Intent::SetPosition { x, y } => state.set_position(x, y),
            Intent::SetFieldStrength(value) => {
                state.set_field_strength(value);
                log::debug!("Field strength {:.1}T", state.field_strength);
            }
            Intent::SetTurns(value) => {
                state.set_turns(value);
                log::debug!("Coil turns {}", state.turns);
            }
            Intent::SetReversed(reversed) => state.is_reversed = reversed,
            Intent::TogglePolarity => {
                state.is_reversed = !state.is_reversed;
                log::debug!("Polarity {}", if state.is_reversed { "S|N" } else { "N|S" });
            }
            Intent::SetSourceType(source) => {
                if state.source_type != source {
                    log::debug!("Source switched to {}", source.as_str());
                }
                state.source_type = source;
            }
            Intent::SetAcFrequency(value) => {
                state.set_ac_frequency(value);
                log::debug!("AC frequency {:.1}Hz", state.ac_frequency);
            }
            Intent::SetPaused(paused) => state.is_paused = paused,
            Intent::TogglePause => state.is_paused = !state.is_paused,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::CurrentDirection;
    use approx::assert_abs_diff_eq;

    fn run(sim: &mut Simulation, ticks: usize) {
        for _ in 0..ticks {
            let now = sim.ticks() as f64 * 16.0;
            sim.tick(now);
        }
    }

    #[test]
    fn test_first_tick_has_no_velocity() {
        let mut sim = Simulation::default();
        sim.tick(0.0);
        assert_eq!(sim.state().magnet_velocity, 0.0);
        assert_eq!(sim.data().emf, 0.0);
        assert_eq!(sim.history().len(), 1);
        assert_abs_diff_eq!(sim.state().current_time, SIM_DT);
    }

    #[test]
    fn test_drag_produces_velocity_and_emf() {
        let mut sim = Simulation::default();
        sim.tick(0.0);
        sim.submit(Intent::SetPosition { x: -79.0, y: 0.0 });
        sim.tick(16.0);

        assert_abs_diff_eq!(sim.state().magnet_velocity, 62.5, epsilon = 1e-9);
        assert!(sim.data().emf < 0.0);
        assert_eq!(sim.data().current_direction, CurrentDirection::Ccw);

        // Holding still on the next tick stops the induction
        sim.tick(32.0);
        assert_eq!(sim.state().magnet_velocity, 0.0);
        assert_eq!(sim.data().emf, 0.0);
    }

    #[test]
    fn test_intents_applied_in_order() {
        let mut sim = Simulation::default();
        sim.submit(Intent::SetPosition { x: 10.0, y: 0.0 });
        sim.submit(Intent::SetPosition { x: 500.0, y: -500.0 });
        sim.submit(Intent::SetTurns(80));
        sim.submit(Intent::TogglePolarity);
        // Nothing changes until the tick boundary
        assert_eq!(sim.state().magnet.x, -80.0);

        sim.tick(0.0);
        assert_eq!(sim.state().magnet.x, 200.0);
        assert_eq!(sim.state().magnet.y, -100.0);
        assert_eq!(sim.state().turns, 50);
        assert!(sim.state().is_reversed);
    }

    #[test]
    fn test_pause_freezes_clock_and_telemetry() {
        let mut sim = Simulation::default();
        run(&mut sim, 3);
        sim.submit(Intent::SetPosition { x: -60.0, y: 0.0 });
        sim.tick(100.0);
        let frozen = *sim.data();
        let time = sim.state().current_time;
        let len = sim.history().len();

        sim.submit(Intent::SetPaused(true));
        run(&mut sim, 10);
        assert_eq!(sim.phase(), ClockPhase::Paused);
        assert_eq!(*sim.data(), frozen);
        assert_eq!(sim.state().current_time, time);
        assert_eq!(sim.history().len(), len);
    }

    #[test]
    fn test_resume_without_motion_has_no_spike() {
        let mut sim = Simulation::default();
        run(&mut sim, 2);
        sim.submit(Intent::TogglePause);
        run(&mut sim, 5);
        sim.submit(Intent::TogglePause);
        sim.tick(500.0);

        assert_eq!(sim.phase(), ClockPhase::Running);
        assert_eq!(sim.state().magnet_velocity, 0.0);
        assert_eq!(sim.data().emf, 0.0);
    }

    #[test]
    fn test_resume_after_drag_while_paused_has_no_spike() {
        let mut sim = Simulation::default();
        run(&mut sim, 2);
        sim.submit(Intent::SetPaused(true));
        sim.tick(40.0);

        // Dragged while paused: position updates, physics stays frozen
        sim.submit(Intent::SetPosition { x: -40.0, y: 0.0 });
        sim.tick(56.0);
        assert_eq!(sim.state().magnet.x, -40.0);
        assert_eq!(sim.data().emf, 0.0);

        sim.submit(Intent::SetPaused(false));
        sim.tick(72.0);
        assert_eq!(sim.state().magnet_velocity, 0.0);
        assert_eq!(sim.data().current_direction, CurrentDirection::Static);
    }

    #[test]
    fn test_time_never_decreases() {
        let mut sim = Simulation::default();
        let mut last = sim.state().current_time;
        for i in 0..50 {
            if i % 7 == 0 {
                sim.submit(Intent::TogglePause);
            }
            sim.tick(i as f64);
            assert!(sim.state().current_time >= last);
            last = sim.state().current_time;
        }
    }

    #[test]
    fn test_ac_uses_simulation_clock() {
        let mut sim = Simulation::default();
        sim.submit(Intent::SetSourceType(SourceType::AcCoil));
        sim.tick(0.0);
        // t = 0: sin(0) = 0, cos(0) = 1
        assert_eq!(sim.data().flux, 0.0);
        assert!(sim.data().emf < 0.0);

        // History stamps come from the host clock, physics from current_time
        run(&mut sim, 4);
        let expected = {
            let mut s = sim.state().clone();
            s.current_time -= SIM_DT;
            compute(&s)
        };
        assert_abs_diff_eq!(sim.data().flux, expected.flux, epsilon = 1e-12);
    }

    #[test]
    fn test_source_switch_mid_run() {
        let mut sim = Simulation::default();
        run(&mut sim, 3);
        sim.submit(Intent::SetSourceType(SourceType::AcCoil));
        sim.submit(Intent::SetAcFrequency(2.0));
        sim.tick(64.0);
        assert!(sim.data().flux.is_finite());
        assert!(sim.data().emf.is_finite());
        sim.submit(Intent::SetSourceType(SourceType::DcMagnet));
        sim.tick(80.0);
        assert_eq!(sim.data().emf, 0.0);
    }

    #[test]
    fn test_tutor_snapshot_only_while_paused() {
        let mut sim = Simulation::default();
        sim.tick(0.0);
        assert!(sim.tutor_snapshot().is_none());
        sim.submit(Intent::SetPaused(true));
        sim.tick(16.0);
        let snapshot = sim.tutor_snapshot().unwrap();
        assert_eq!(snapshot.turns, 12);
        assert_eq!(snapshot.flux, sim.data().flux);
    }

    #[test]
    fn test_tutor_snapshot_frozen_while_editing() {
        let mut sim = Simulation::default();
        sim.tick(0.0);
        sim.submit(Intent::SetPosition { x: -70.0, y: 0.0 });
        sim.tick(16.0);

        sim.submit(Intent::SetPaused(true));
        sim.submit(Intent::SetPosition { x: -10.0, y: 0.0 });
        sim.submit(Intent::SetFieldStrength(5.0));
        sim.submit(Intent::SetTurns(40));
        sim.tick(32.0);
        let frozen = sim.tutor_snapshot().unwrap();

        // Snapshot still describes the tick its numbers came from
        assert_eq!(frozen.position.x, -70.0);
        assert_eq!(frozen.field_strength, 1.5);
        assert_eq!(frozen.turns, 12);
        assert_eq!(frozen.flux, sim.data().flux);
        assert_eq!(frozen.emf, sim.data().emf);
        let expected = compute(&SimulationState {
            magnet: glam::DVec2::new(-70.0, 0.0),
            magnet_velocity: 10.0 / SIM_DT,
            ..Default::default()
        });
        assert_abs_diff_eq!(frozen.flux, expected.flux, epsilon = 1e-9);

        // More edits while paused leave it untouched
        sim.submit(Intent::SetPosition { x: 50.0, y: 20.0 });
        sim.tick(48.0);
        assert_eq!(sim.tutor_snapshot().unwrap(), frozen);

        // The first running tick picks up the edited parameters
        sim.submit(Intent::SetPaused(false));
        sim.tick(64.0);
        sim.submit(Intent::SetPaused(true));
        sim.tick(80.0);
        let resumed = sim.tutor_snapshot().unwrap();
        assert_eq!(resumed.position.x, 50.0);
        assert_eq!(resumed.field_strength, 5.0);
        assert_eq!(resumed.turns, 40);
    }

    #[test]
    fn test_determinism() {
        let intents = [
            Intent::SetPosition { x: -70.0, y: 4.0 },
            Intent::SetFieldStrength(3.2),
            Intent::SetPosition { x: -55.0, y: 2.0 },
            Intent::TogglePolarity,
        ];
        let mut a = Simulation::default();
        let mut b = Simulation::default();
        for intent in intents {
            a.submit(intent);
            b.submit(intent);
            a.tick(1.0);
            b.tick(1.0);
        }
        assert_eq!(a.state(), b.state());
        assert_eq!(a.data(), b.data());
    }
}
