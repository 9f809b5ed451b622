//! Arena state and its public surface
//!
//! The arena owns everything: four crab slots, the balls in play and the
//! scores. Callers feed it wall-clock time through [`Arena::advance`] and read
//! snapshots back for drawing.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::ball::{Ball, BallMotion};
use super::crab::Crab;
use super::rng::AngleSource;
use super::tick;
use super::timestep::FixedStep;
use crate::consts::*;
use crate::tuning::Tuning;

/// Index of the human-controlled crab
pub const PLAYER: usize = 0;

/// One edge's crab, or the wall left behind once its owner is out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PaddleSlot {
    Present(Crab),
    Eliminated,
}

impl PaddleSlot {
    pub fn crab(&self) -> Option<&Crab> {
        match self {
            PaddleSlot::Present(crab) => Some(crab),
            PaddleSlot::Eliminated => None,
        }
    }

    pub fn crab_mut(&mut self) -> Option<&mut Crab> {
        match self {
            PaddleSlot::Present(crab) => Some(crab),
            PaddleSlot::Eliminated => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, PaddleSlot::Present(_))
    }
}

/// Things that happened during a tick, for sound and effects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BallSpawned { angle: f32 },
    BarrierBounce { corner: usize },
    BallBounce,
    CrabHit { crab: usize },
    WallBounce { edge: usize },
    Scored { crab: usize, remaining: u32 },
    Eliminated { crab: usize },
    GameOver { player_won: bool },
}

/// Per-match ball settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallRules {
    pub target_count: usize,
    pub radius: f32,
    pub motion: BallMotion,
}

impl Default for BallRules {
    fn default() -> Self {
        Self {
            target_count: NUM_BALLS,
            radius: BALL_RADIUS,
            motion: BallMotion::default(),
        }
    }
}

/// Serializable copy of everything gameplay-relevant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaSnapshot {
    pub paddles: [PaddleSlot; 4],
    pub balls: Vec<Ball>,
    pub scores: [u32; 4],
    pub game_over: bool,
    pub ticks: u64,
}

/// The game board and everything on it
#[derive(Debug, Clone)]
pub struct Arena<R = Pcg32> {
    pub(crate) paddles: [PaddleSlot; 4],
    pub(crate) balls: Vec<Ball>,
    pub(crate) scores: [u32; 4],
    pub(crate) rules: BallRules,
    pub(crate) rng: R,
    pub(crate) events: VecDeque<GameEvent>,
    /// Set once the game-over event has gone out
    pub(crate) game_over_announced: bool,
    pub(crate) ticks: u64,
    clock: FixedStep,
}

impl Arena<Pcg32> {
    /// A new match with the default seed
    ///
    /// A `starting_score` of 0 builds a placeholder arena with no crabs,
    /// used before the first match begins.
    pub fn new(maximum_opponent_speed: f32, starting_score: u32) -> Self {
        Self::with_rng(
            maximum_opponent_speed,
            starting_score,
            Pcg32::seed_from_u64(DEFAULT_SEED),
        )
    }

    /// A new match configured and seeded from `tuning`
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self::with_tuning(tuning, Pcg32::seed_from_u64(tuning.seed))
    }
}

impl<R: AngleSource> Arena<R> {
    pub fn with_rng(maximum_opponent_speed: f32, starting_score: u32, rng: R) -> Self {
        let tuning = Tuning {
            opponent_maximum_speed: maximum_opponent_speed,
            starting_score,
            ..Tuning::default()
        };
        Self::with_tuning(&tuning, rng)
    }

    pub fn with_tuning(tuning: &Tuning, rng: R) -> Self {
        let paddles = if tuning.starting_score > 0 {
            std::array::from_fn(|i| {
                let speed = if i == PLAYER {
                    tuning.player_maximum_speed
                } else {
                    tuning.opponent_maximum_speed
                };
                PaddleSlot::Present(Crab::new(speed))
            })
        } else {
            std::array::from_fn(|_| PaddleSlot::Eliminated)
        };

        if tuning.starting_score > 0 {
            log::info!(
                "New match: score={}, opponent speed={}",
                tuning.starting_score,
                tuning.opponent_maximum_speed
            );
        }

        Self {
            paddles,
            balls: Vec::new(),
            scores: [tuning.starting_score; 4],
            rules: BallRules {
                target_count: tuning.target_ball_count,
                radius: tuning.ball_radius,
                motion: tuning.ball_motion(),
            },
            rng,
            events: VecDeque::new(),
            // A placeholder arena is over before it starts; nothing to announce
            game_over_announced: tuning.starting_score == 0,
            ticks: 0,
            clock: FixedStep::new(GAME_STEP_TIME),
        }
    }

    /// Steer the human crab; ignored once it has been eliminated
    pub fn set_player_intent(&mut self, direction: i32) {
        if let Some(crab) = self.paddles[PLAYER].crab_mut() {
            crab.set_intent(direction);
        }
    }

    /// Advance by `dt` seconds of wall-clock time in fixed ticks
    pub fn advance(&mut self, dt: f32) {
        let mut clock = self.clock;
        clock.advance(dt, || tick::step(self));
        self.clock = clock;
    }
}

impl<R> Arena<R> {
    /// Score of crab `index` (0..4)
    pub fn score(&self, index: usize) -> u32 {
        self.scores[index]
    }

    pub fn scores(&self) -> [u32; 4] {
        self.scores
    }

    /// Crab slots, counter-clockwise from the edge joining (0,0) and (1,0)
    pub fn paddles(&self) -> &[PaddleSlot; 4] {
        &self.paddles
    }

    pub fn paddle(&self, index: usize) -> Option<&Crab> {
        self.paddles.get(index).and_then(PaddleSlot::crab)
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn rules(&self) -> &BallRules {
        &self.rules
    }

    /// Fixed ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Over once the player is out or every opponent is
    pub fn is_game_over(&self) -> bool {
        !self.paddles[PLAYER].is_present() || self.paddles[1..].iter().all(|p| !p.is_present())
    }

    /// The player still has a crab and the match is over
    pub fn player_won(&self) -> bool {
        self.paddles[PLAYER].is_present() && self.is_game_over()
    }

    /// Take every event queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    pub fn snapshot(&self) -> ArenaSnapshot {
        ArenaSnapshot {
            paddles: self.paddles.clone(),
            balls: self.balls.clone(),
            scores: self.scores,
            game_over: self.is_game_over(),
            ticks: self.ticks,
        }
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        push_event(&mut self.events, event);
    }
}

/// Queue an event, dropping the oldest once the queue is full
pub(crate) fn push_event(events: &mut VecDeque<GameEvent>, event: GameEvent) {
    if events.len() >= MAX_PENDING_EVENTS {
        events.pop_front();
    }
    events.push_back(event);
}
