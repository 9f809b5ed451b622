//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected RNG only
//! - Stable iteration order (crabs by edge, balls by spawn order)
//! - No rendering or platform dependencies

pub mod ai;
pub mod ball;
pub mod collision;
pub mod crab;
pub mod rng;
pub mod state;
pub mod tick;
pub mod timestep;

pub use ball::{Ball, BallMotion};
pub use collision::{Edge, reflect};
pub use crab::{Crab, Intent, MAX_CRAB_POS, MIN_CRAB_POS};
pub use rng::{AngleSource, ScriptedAngles};
pub use state::{Arena, ArenaSnapshot, BallRules, GameEvent, PLAYER, PaddleSlot};
pub use timestep::FixedStep;
