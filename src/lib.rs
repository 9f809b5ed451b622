//! Crab Pong - A four-sided paddle arena
//!
//! Core modules:
//! - `sim`: Deterministic simulation (paddles, balls, collisions, AI)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use sim::{AngleSource, Arena, ArenaSnapshot, Ball, Crab, GameEvent, Intent, PaddleSlot};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;
use std::f32::consts::TAU;

/// Game configuration constants
///
/// The board is the unit square in the x-z plane. Board positions are stored
/// in a `Vec2` whose `y` component holds the z coordinate.
pub mod consts {
    use std::f32::consts::PI;

    /// Length of a crab along its edge
    pub const CRAB_LENGTH: f32 = 0.2;
    /// Radius of the four barriers sitting on the board corners
    pub const BARRIER_SIZE: f32 = 0.12;

    /// Crab sub-step quantum
    pub const CRAB_STEP_TIME: f32 = 0.01;
    /// Time for a crab to go from rest to its maximum speed
    pub const TIME_TO_MAXIMUM_SPEED: f32 = 0.18;
    /// Maximum speed of the human-controlled crab
    pub const PLAYER_MAXIMUM_SPEED: f32 = 2.2;
    /// Default maximum speed of the computer-controlled crabs
    pub const OPPONENT_MAXIMUM_SPEED: f32 = 1.8;
    /// Widest angle between a crab's normal and a ball hit off its tip
    pub const MAX_CRAB_BOUNCE_ANGLE_OFFSET: f32 = 0.85 * PI / 2.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 0.04;
    pub const BALL_SPEED: f32 = 1.0;
    pub const BALL_FADE_IN_TIME: f32 = 0.5;
    pub const BALL_FADE_OUT_TIME: f32 = 0.5;
    /// Ideal number of balls in play
    pub const NUM_BALLS: usize = 2;

    /// Fixed arena tick
    pub const GAME_STEP_TIME: f32 = 0.01;
    /// Points each player starts a match with
    pub const STARTING_SCORE: u32 = 10;
    /// Seed used when the caller doesn't inject an RNG
    pub const DEFAULT_SEED: u64 = 0x00C0_FFEE;

    /// AI stops once the target falls in this fraction of the crab's half length
    pub const AI_STOP_TOLERANCE: f32 = 0.7;
    /// Events kept before the oldest are dropped
    pub const MAX_PENDING_EVENTS: usize = 256;
}

/// Normalize an angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negatives up to exactly TAU
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Unit vector pointing along `angle` (0 = +x, π/2 = +z)
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
