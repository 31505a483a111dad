//! Deterministic parameter schedules driven by the iteration index

use serde::{Deserialize, Serialize};

/// Linear ramp: `p(t) = start + (end - start) * t / T`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearSchedule {
    pub start: f64,
    pub end: f64,
}

impl LinearSchedule {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Value at iteration `iter` of `max_iter`; `iter` is clamped to `max_iter`
    pub fn value_at(&self, iter: usize, max_iter: usize) -> f64 {
        if max_iter == 0 {
            return self.start;
        }
        let ratio = iter.min(max_iter) as f64 / max_iter as f64;
        self.start + (self.end - self.start) * ratio
    }
}
