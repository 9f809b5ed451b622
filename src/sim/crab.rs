//! Crabs: the paddles guarding each edge of the board

use serde::{Deserialize, Serialize};

use super::timestep::FixedStep;
use crate::consts::*;

/// Lowest legal crab position (touching the right-hand barrier)
pub const MIN_CRAB_POS: f32 = BARRIER_SIZE + CRAB_LENGTH / 2.0;
/// Highest legal crab position (touching the left-hand barrier)
pub const MAX_CRAB_POS: f32 = 1.0 - BARRIER_SIZE - CRAB_LENGTH / 2.0;

/// Which way a crab is accelerating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Intent {
    /// Toward the corner on the crab's right
    Negative,
    /// Decelerate toward rest
    #[default]
    Hold,
    /// Toward the corner on the crab's left
    Positive,
}

impl Intent {
    /// Map a signed input direction to an intent
    pub fn from_direction(direction: i32) -> Self {
        match direction.signum() {
            -1 => Intent::Negative,
            1 => Intent::Positive,
            _ => Intent::Hold,
        }
    }

    /// -1, 0 or 1
    pub fn sign(self) -> i32 {
        match self {
            Intent::Negative => -1,
            Intent::Hold => 0,
            Intent::Positive => 1,
        }
    }
}

/// A single crab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crab {
    maximum_speed: f32,
    /// Distance from the crab's center to the corner on its right
    position: f32,
    intent: Intent,
    velocity: f32,
    clock: FixedStep,
}

impl Crab {
    pub fn new(maximum_speed: f32) -> Self {
        Self {
            maximum_speed,
            position: 0.5,
            intent: Intent::Hold,
            velocity: 0.0,
            clock: FixedStep::new(CRAB_STEP_TIME),
        }
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn intent(&self) -> Intent {
        self.intent
    }

    /// Intent as a signed direction
    pub fn direction(&self) -> i32 {
        self.intent.sign()
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn maximum_speed(&self) -> f32 {
        self.maximum_speed
    }

    /// Magnitude of acceleration, used both speeding up and slowing down
    pub fn acceleration(&self) -> f32 {
        self.maximum_speed / TIME_TO_MAXIMUM_SPEED
    }

    /// Where the crab would come to rest if it started decelerating now
    pub fn stop_position(&self) -> f32 {
        let d = self.velocity * self.velocity / self.acceleration();
        if self.velocity > 0.0 {
            self.position + d
        } else {
            self.position - d
        }
    }

    /// Negative accelerates toward the right corner, positive toward the
    /// left corner, zero decelerates.
    pub fn set_intent(&mut self, direction: i32) {
        self.intent = Intent::from_direction(direction);
    }

    /// Advance by `dt` seconds of game time in fixed sub-steps
    pub fn advance(&mut self, dt: f32) {
        let mut clock = self.clock;
        clock.advance(dt, || self.step());
        self.clock = clock;
    }

    fn step(&mut self) {
        let dv = CRAB_STEP_TIME * self.acceleration();
        match self.intent {
            Intent::Hold => {
                let speed = (self.velocity.abs() - dv).max(0.0);
                self.velocity = if self.velocity > 0.0 { speed } else { -speed };
            }
            intent => {
                self.velocity = (self.velocity + intent.sign() as f32 * dv)
                    .clamp(-self.maximum_speed, self.maximum_speed);
            }
        }

        self.position += CRAB_STEP_TIME * self.velocity;
        if self.position < MIN_CRAB_POS {
            self.position = MIN_CRAB_POS;
            self.velocity = 0.0;
        } else if self.position > MAX_CRAB_POS {
            self.position = MAX_CRAB_POS;
            self.velocity = 0.0;
        }
    }
}
