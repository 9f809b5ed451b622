//! Match balance settings
//!
//! Every field falls back to the value in [`crate::consts`], so a tuning file
//! only needs to list what it changes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::consts::*;
use crate::sim::BallMotion;

/// Data-driven match settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Maximum speed of the human-controlled crab
    pub player_maximum_speed: f32,
    /// Maximum speed of the computer crabs (difficulty knob)
    pub opponent_maximum_speed: f32,
    /// Points per player; 0 builds an empty placeholder arena
    pub starting_score: u32,
    /// Balls the arena tries to keep in play
    pub target_ball_count: usize,
    pub ball_speed: f32,
    pub ball_radius: f32,
    pub fade_in_time: f32,
    pub fade_out_time: f32,
    /// Seed for spawn angles
    pub seed: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_maximum_speed: PLAYER_MAXIMUM_SPEED,
            opponent_maximum_speed: OPPONENT_MAXIMUM_SPEED,
            starting_score: STARTING_SCORE,
            target_ball_count: NUM_BALLS,
            ball_speed: BALL_SPEED,
            ball_radius: BALL_RADIUS,
            fade_in_time: BALL_FADE_IN_TIME,
            fade_out_time: BALL_FADE_OUT_TIME,
            seed: DEFAULT_SEED,
        }
    }
}

/// Why a tuning could not be used
#[derive(Debug)]
pub enum TuningError {
    /// Not valid JSON for a `Tuning`
    Parse(serde_json::Error),
    /// A value outside its usable range
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(err) => write!(f, "failed to parse tuning: {err}"),
            TuningError::Invalid { field, reason } => write!(f, "invalid tuning `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(err) => Some(err),
            TuningError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        TuningError::Parse(err)
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation can't run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("player_maximum_speed", self.player_maximum_speed),
            ("opponent_maximum_speed", self.opponent_maximum_speed),
            ("ball_speed", self.ball_speed),
            ("ball_radius", self.ball_radius),
            ("fade_in_time", self.fade_in_time),
            ("fade_out_time", self.fade_out_time),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be a finite positive number",
                });
            }
        }

        // A ball wider than the gap between barriers could never reach an edge
        if self.ball_radius >= 0.5 - BARRIER_SIZE {
            return Err(TuningError::Invalid {
                field: "ball_radius",
                reason: "too large for the board",
            });
        }

        Ok(())
    }

    /// Ball speed and fade timings
    pub fn ball_motion(&self) -> BallMotion {
        BallMotion {
            speed: self.ball_speed,
            fade_in_time: self.fade_in_time,
            fade_out_time: self.fade_out_time,
        }
    }
}
