//! Native frame loop

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use super::CancelHandle;
use crate::consts::SIM_DT;

/// Repeating frame task on the current thread.
///
/// Paced to `SIM_DT` when real-time, otherwise runs frames back to back.
#[derive(Debug)]
pub struct FrameLoop {
    interval: Option<Duration>,
    cancel: CancelHandle,
}

impl FrameLoop {
    pub fn new(realtime: bool) -> Self {
        Self {
            interval: realtime.then(|| Duration::from_secs_f64(SIM_DT)),
            cancel: CancelHandle::new(),
        }
    }

    /// Handle that stops the loop after the current frame
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Call `frame` with the wall-clock time (ms since the epoch) until
    /// cancelled. Returns the number of frames run.
    pub fn run<F: FnMut(f64)>(&mut self, mut frame: F) -> u64 {
        let mut frames = 0;
        while !self.cancel.is_cancelled() {
            let started = Instant::now();
            frame(wall_clock_ms());
            frames += 1;

            if let Some(interval) = self.interval {
                if let Some(rest) = interval.checked_sub(started.elapsed()) {
                    std::thread::sleep(rest);
                }
            }
        }
        log::debug!("Frame loop stopped after {} frames", frames);
        frames
    }
}

fn wall_clock_ms() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}
