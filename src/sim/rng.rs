//! Spawn angle sources
//!
//! The arena draws one random angle per spawned ball. Anything implementing
//! [`rand::Rng`] works; [`ScriptedAngles`] replays a fixed list for tests and
//! replays.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::normalize_angle;

/// Supplies launch angles in [0, 2π)
pub trait AngleSource {
    fn next_angle(&mut self) -> f32;
}

impl<R: Rng> AngleSource for R {
    fn next_angle(&mut self) -> f32 {
        normalize_angle(self.random::<f32>() * TAU)
    }
}

/// Cycles through a fixed list of angles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedAngles {
    angles: Vec<f32>,
    next: usize,
}

impl ScriptedAngles {
    /// An empty list yields 0 forever
    pub fn new(angles: impl Into<Vec<f32>>) -> Self {
        Self {
            angles: angles.into(),
            next: 0,
        }
    }
}

impl AngleSource for ScriptedAngles {
    fn next_angle(&mut self) -> f32 {
        if self.angles.is_empty() {
            return 0.0;
        }
        let angle = self.angles[self.next % self.angles.len()];
        self.next = self.next.wrapping_add(1);
        normalize_angle(angle)
    }
}
