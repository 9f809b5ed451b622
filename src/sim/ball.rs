//! Balls and their fade-in/fade-out lifecycle

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::heading;

/// Speed and fade timings a ball moves with
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallMotion {
    pub speed: f32,
    pub fade_in_time: f32,
    pub fade_out_time: f32,
}

impl Default for BallMotion {
    fn default() -> Self {
        use crate::consts::*;
        Self {
            speed: BALL_SPEED,
            fade_in_time: BALL_FADE_IN_TIME,
            fade_out_time: BALL_FADE_OUT_TIME,
        }
    }
}

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    radius: f32,
    /// Board position; `y` holds the z coordinate
    pos: Vec2,
    /// Travel angle in [0, 2π). 0 is +x, π/2 is +z.
    angle: f32,
    /// 0 = invisible, 1 = fully in play
    fade_amount: f32,
    is_fading_out: bool,
    motion: BallMotion,
}

impl Ball {
    /// A new ball starts fully faded out and fades in as it advances
    pub fn new(radius: f32, pos: Vec2, angle: f32, motion: BallMotion) -> Self {
        Self {
            radius,
            pos,
            angle,
            fade_amount: 0.0,
            is_fading_out: false,
            motion,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn x(&self) -> f32 {
        self.pos.x
    }

    pub fn z(&self) -> f32 {
        self.pos.y
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn speed(&self) -> f32 {
        self.motion.speed
    }

    /// Velocity vector implied by the travel angle
    pub fn velocity(&self) -> Vec2 {
        heading(self.angle) * self.motion.speed
    }

    pub fn fade_amount(&self) -> f32 {
        self.fade_amount
    }

    pub fn is_fading_out(&self) -> bool {
        self.is_fading_out
    }

    /// Fully faded in and not leaving: takes part in collisions and scoring
    pub fn is_live(&self) -> bool {
        self.fade_amount >= 1.0 && !self.is_fading_out
    }

    /// Gone for good and safe to drop
    pub fn is_spent(&self) -> bool {
        self.is_fading_out && self.fade_amount <= 0.0
    }

    /// The angle must already be normalized to [0, 2π)
    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
    }

    pub fn begin_fade_out(&mut self) {
        self.is_fading_out = true;
    }

    /// Advance by `dt` seconds
    ///
    /// Fade transitions draw from the same time budget as motion. A ball
    /// that finishes fading in partway through `dt` moves for the remainder.
    pub fn advance(&mut self, dt: f32) {
        if dt.is_nan() || dt <= 0.0 {
            return;
        }

        if self.is_fading_out {
            self.fade_amount = (self.fade_amount - dt / self.motion.fade_out_time).max(0.0);
            return;
        }

        let mut dt = dt;
        if self.fade_amount < 1.0 {
            self.fade_amount += dt / self.motion.fade_in_time;
            if self.fade_amount > 1.0 {
                dt = (self.fade_amount - 1.0) * self.motion.fade_in_time;
                self.fade_amount = 1.0;
            } else {
                dt = 0.0;
            }
        }

        if dt > 0.0 {
            self.pos += self.velocity() * dt;
        }
    }
}
