//! Browser host
//!
//! [`WebLab`] is exported to JavaScript. The page's UI layer forwards drags and
//! slider changes as intents and polls JSON snapshots every frame for the 3D
//! scene, telemetry card and charts.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use super::CancelHandle;
use crate::consts::{EMF_CHART_RANGE, FLUX_CHART_RANGE};
use crate::settings::Settings;
use crate::sim::{Intent, Simulation, SourceType};
use crate::tutor::basic_explanation;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Simulation owned by a `requestAnimationFrame` loop
#[wasm_bindgen]
pub struct WebLab {
    sim: Rc<RefCell<Simulation>>,
    cancel: Option<CancelHandle>,
    callback: FrameCallback,
    frame_id: Rc<Cell<i32>>,
}

/// Install logging and the panic hook once the module loads
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_ok() {
        log::info!("InductorLab ready");
    }
}

#[wasm_bindgen]
impl WebLab {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebLab {
        let settings = Settings::load();
        WebLab {
            sim: Rc::new(RefCell::new(Simulation::new(settings.initial_state()))),
            cancel: None,
            callback: Rc::new(RefCell::new(None)),
            frame_id: Rc::new(Cell::new(0)),
        }
    }

    /// Start ticking on every screen refresh (no-op if already running)
    pub fn start(&mut self) {
        if self.cancel.is_some() {
            return;
        }
        let cancel = CancelHandle::new();
        self.cancel = Some(cancel.clone());

        let callback = self.callback.clone();
        let next = callback.clone();
        let sim = self.sim.clone();
        let frame_id = self.frame_id.clone();

        *callback.borrow_mut() = Some(Closure::new(move |_time: f64| {
            if cancel.is_cancelled() {
                return;
            }
            sim.borrow_mut().tick(js_sys::Date::now());
            if let Some(cb) = next.borrow().as_ref() {
                frame_id.set(request_frame(cb));
            }
        }));

        if let Some(cb) = callback.borrow().as_ref() {
            self.frame_id.set(request_frame(cb));
        }
        log::info!("Lab loop started");
    }

    /// Cancel the frame loop
    pub fn stop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel.cancel();
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(self.frame_id.get());
            }
            // The pending frame will never fire, so drop the closure here
            let _ = self.callback.borrow_mut().take();
            log::info!("Lab loop stopped");
        }
    }

    pub fn set_position(&self, x: f64, y: f64) {
        self.submit(Intent::SetPosition { x, y });
    }

    pub fn set_field_strength(&self, value: f64) {
        self.submit(Intent::SetFieldStrength(value));
    }

    pub fn set_turns(&self, value: u32) {
        self.submit(Intent::SetTurns(value));
    }

    pub fn toggle_polarity(&self) {
        self.submit(Intent::TogglePolarity);
    }

    /// "DC" or "AC"; unknown names are ignored
    pub fn set_source(&self, name: &str) {
        match SourceType::from_str(name) {
            Some(source) => self.submit(Intent::SetSourceType(source)),
            None => log::warn!("Unknown source type: {}", name),
        }
    }

    pub fn set_ac_frequency(&self, value: f64) {
        self.submit(Intent::SetAcFrequency(value));
    }

    pub fn toggle_pause(&self) {
        self.submit(Intent::TogglePause);
    }

    /// Current `SimulationState` as JSON
    pub fn state_json(&self) -> String {
        serde_json::to_string(self.sim.borrow().state()).unwrap_or_default()
    }

    /// Latest telemetry as JSON, with the flow label and explanation
    pub fn telemetry_json(&self) -> String {
        let sim = self.sim.borrow();
        let data = sim.data();
        serde_json::json!({
            "flux": data.flux,
            "dFluxDt": data.d_flux_dt,
            "emf": data.emf,
            "currentDirection": data.current_direction.sign(),
            "flow": data.current_direction.label(),
            "inducing": data.is_inducing(),
            "strong": data.is_strong(),
            "explanation": basic_explanation(data),
        })
        .to_string()
    }

    /// History buffer (oldest first) plus fixed chart domains
    pub fn history_json(&self) -> String {
        let sim = self.sim.borrow();
        serde_json::json!({
            "points": sim.history(),
            "emfRange": [EMF_CHART_RANGE.0, EMF_CHART_RANGE.1],
            "fluxRange": [FLUX_CHART_RANGE.0, FLUX_CHART_RANGE.1],
        })
        .to_string()
    }

    /// Frozen snapshot while paused, `undefined` while running
    pub fn tutor_snapshot(&self) -> Option<String> {
        let snapshot = self.sim.borrow().tutor_snapshot()?;
        serde_json::to_string(&snapshot).ok()
    }

    /// Plain-text tutor summary while paused
    pub fn tutor_summary(&self) -> Option<String> {
        self.sim.borrow().tutor_snapshot().map(|s| s.summary())
    }

    /// Persist the current parameters as the next session's start
    pub fn save_settings(&self) {
        let sim = self.sim.borrow();
        let state = sim.state();
        Settings {
            magnet_x: state.magnet.x,
            magnet_y: state.magnet.y,
            field_strength: state.field_strength,
            reversed: state.is_reversed,
            turns: state.turns,
            source: state.source_type,
            ac_frequency: state.ac_frequency,
            start_paused: false,
        }
        .save();
    }
}

impl WebLab {
    fn submit(&self, intent: Intent) {
        self.sim.borrow_mut().submit(intent);
    }
}

impl Default for WebLab {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for WebLab {
    fn drop(&mut self) {
        self.stop();
    }
}

fn request_frame(callback: &Closure<dyn FnMut(f64)>) -> i32 {
    web_sys::window()
        .and_then(|w| w.request_animation_frame(callback.as_ref().unchecked_ref()).ok())
        .unwrap_or(0)
}
