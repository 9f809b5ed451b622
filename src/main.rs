//! Crab Pong headless driver
//!
//! Plays a match without a window: uneven frame times feed the fixed-step
//! arena, and the player's crab is steered by the same chase logic the
//! computer crabs use. Pass a tuning JSON path to override the defaults.

use anyhow::Context;

use crab_pong::sim::{Edge, GameEvent, PLAYER, ai};
use crab_pong::{Arena, Tuning};

/// Frame times alternate between 60 Hz and 144 Hz refresh
const FRAME_TIMES: [f32; 2] = [1.0 / 60.0, 1.0 / 144.0];
/// Give up on a match that runs this long (simulated seconds)
const MAX_MATCH_SECONDS: f32 = 600.0;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let tuning = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading tuning file {path}"))?;
            Tuning::from_json(&json).with_context(|| format!("loading tuning file {path}"))?
        }
        None => Tuning::default(),
    };

    log::info!("Crab Pong (headless) starting, seed {}", tuning.seed);
    let mut arena = Arena::from_tuning(&tuning);

    let mut elapsed = 0.0f32;
    let mut next_report = 1.0f32;
    let mut frame = 0usize;
    while !arena.is_game_over() && elapsed < MAX_MATCH_SECONDS {
        if let Some(crab) = arena.paddle(PLAYER) {
            let target = ai::target_position(Edge::Near, arena.balls());
            let direction = ai::chase_direction(crab, target);
            arena.set_player_intent(direction);
        }

        let dt = FRAME_TIMES[frame % FRAME_TIMES.len()];
        arena.advance(dt);
        elapsed += dt;
        frame += 1;

        for event in arena.drain_events() {
            match event {
                GameEvent::Scored { crab, remaining } => {
                    log::info!("t={elapsed:.2}s crab {crab} conceded, {remaining} left");
                }
                GameEvent::Eliminated { crab } => log::info!("t={elapsed:.2}s crab {crab} is out"),
                other => log::trace!("{other:?}"),
            }
        }

        if elapsed >= next_report {
            log::debug!("t={elapsed:.0}s scores {:?}", arena.scores());
            next_report += 1.0;
        }
    }

    let snapshot = arena.snapshot();
    println!(
        "{} after {:.1}s ({} ticks), scores {:?}",
        if arena.player_won() {
            "Player wins"
        } else if snapshot.game_over {
            "Player loses"
        } else {
            "Time limit reached"
        },
        elapsed,
        snapshot.ticks,
        snapshot.scores
    );
    Ok(())
}
