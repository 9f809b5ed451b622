//! Fixed-quantum time accumulator
//!
//! Shared by crabs and the arena so that every simulation step has the same
//! length no matter how the caller slices wall-clock time.

use serde::{Deserialize, Serialize};

/// Banks elapsed time and releases it in fixed quanta
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedStep {
    quantum: f32,
    /// Game time left until the next step fires
    until_next: f32,
}

impl FixedStep {
    pub fn new(quantum: f32) -> Self {
        Self {
            quantum,
            until_next: 0.0,
        }
    }

    pub fn quantum(&self) -> f32 {
        self.quantum
    }

    /// Time left before the next step
    pub fn until_next(&self) -> f32 {
        self.until_next
    }

    /// Consume `dt`, calling `step` once per elapsed quantum
    ///
    /// Returns the number of steps taken. Non-positive and NaN `dt` are no-ops.
    pub fn advance(&mut self, mut dt: f32, mut step: impl FnMut()) -> u32 {
        let mut steps = 0;
        while dt > 0.0 {
            if self.until_next < dt {
                dt -= self.until_next;
                step();
                steps += 1;
                self.until_next = self.quantum;
            } else {
                self.until_next -= dt;
                dt = 0.0;
            }
        }
        steps
    }
}
