//! Sliding window of recent samples for the EMF and flux charts

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Maximum number of history points to keep
pub const HISTORY_CAPACITY: usize = 100;

/// One charted sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    /// Host wall-clock timestamp (ms)
    pub time: f64,
    pub emf: f64,
    pub flux: f64,
}

/// Fixed-capacity FIFO of [`HistoryPoint`]s, oldest first
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryBuffer {
    points: VecDeque<HistoryPoint>,
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryBuffer {
    pub fn new() -> Self {
        Self {
            points: VecDeque::with_capacity(HISTORY_CAPACITY),
        }
    }

    /// Append a point, evicting the oldest once full
    pub fn push(&mut self, point: HistoryPoint) {
        if self.points.len() == HISTORY_CAPACITY {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All points, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &HistoryPoint> {
        self.points.iter()
    }

    pub fn latest(&self) -> Option<&HistoryPoint> {
        self.points.back()
    }

    /// (time, emf) pairs for the EMF chart
    pub fn emf_series(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.iter().map(|p| (p.time, p.emf))
    }

    /// (time, flux) pairs for the flux chart
    pub fn flux_series(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.iter().map(|p| (p.time, p.flux))
    }
}
