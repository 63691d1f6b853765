//! Platform abstraction layer
//!
//! Frame scheduling for the two hosts:
//! - Native: a paced loop on the current thread ([`FrameLoop`])
//! - Browser: `requestAnimationFrame` driving a [`web::WebLab`]
//!
//! Both are repeating tasks stopped through a [`CancelHandle`] owned by the
//! host. Everything is single-threaded.

use std::cell::Cell;
use std::rc::Rc;

#[cfg(not(target_arch = "wasm32"))]
mod native;
#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use native::FrameLoop;

/// Shared stop flag for a frame loop
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Rc<Cell<bool>>);

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop scheduling further frames
    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}
