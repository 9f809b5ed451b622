use crab_pong::consts::*;
use crab_pong::sim::{GameEvent, MAX_CRAB_POS, MIN_CRAB_POS, PaddleSlot, ScriptedAngles};
use crab_pong::{Arena, Tuning};
use std::f32::consts::TAU;

/// Drive an arena with uneven frame times, steering the player from a script
fn play<R: crab_pong::AngleSource>(arena: &mut Arena<R>, frames: usize) {
    let frame_times = [1.0 / 60.0, 1.0 / 144.0, 0.033, 0.004];
    for frame in 0..frames {
        arena.set_player_intent((frame / 40 % 3) as i32 - 1);
        arena.advance(frame_times[frame % frame_times.len()]);
    }
}

#[test]
fn test_determinism() {
    let tuning = Tuning {
        seed: 99999,
        starting_score: 3,
        ..Default::default()
    };
    let mut a = Arena::from_tuning(&tuning);
    let mut b = Arena::from_tuning(&tuning);

    play(&mut a, 3000);
    play(&mut b, 3000);

    assert_eq!(a.snapshot(), b.snapshot());
    assert_eq!(
        serde_json::to_string(&a.snapshot()).unwrap(),
        serde_json::to_string(&b.snapshot()).unwrap()
    );
}

#[test]
fn test_scripted_angles_match_spawn_order() {
    let mut arena = Arena::with_rng(1.8, 3, ScriptedAngles::new([1.0, 2.0]));
    arena.advance(0.001);
    assert_eq!(arena.balls().len(), 1);
    assert_eq!(arena.balls()[0].angle(), 1.0);
    assert_eq!(
        arena.drain_events(),
        vec![GameEvent::BallSpawned { angle: 1.0 }]
    );
}

#[test]
fn test_invariants_hold_over_a_long_match() {
    let mut arena = Arena::with_rng(2.5, 2, ScriptedAngles::new([0.4, 2.1, 3.9, 5.5, 1.2]));
    let frame_times = [1.0 / 60.0, 1.0 / 144.0, 0.033];
    for frame in 0..20_000 {
        arena.set_player_intent((frame / 25 % 3) as i32 - 1);
        arena.advance(frame_times[frame % frame_times.len()]);

        for (slot, &score) in arena.paddles().iter().zip(arena.scores().iter()) {
            match slot {
                PaddleSlot::Present(crab) => {
                    assert!(score > 0);
                    assert!(crab.position() >= MIN_CRAB_POS && crab.position() <= MAX_CRAB_POS);
                    assert!(crab.velocity().abs() <= crab.maximum_speed());
                }
                PaddleSlot::Eliminated => assert_eq!(score, 0),
            }
        }
        for ball in arena.balls() {
            assert!((0.0..TAU).contains(&ball.angle()));
            assert!((0.0..=1.0).contains(&ball.fade_amount()));
        }
        assert!(arena.balls().len() <= NUM_BALLS);
    }
}

#[test]
fn test_match_end_clears_the_board() {
    // The player never moves, so somebody runs out of points eventually
    let mut arena = Arena::with_rng(1.8, 1, ScriptedAngles::new([4.3, 4.9, 4.6]));
    let mut ticks = 0;
    while !arena.is_game_over() && ticks < 100_000 {
        arena.advance(GAME_STEP_TIME);
        ticks += 1;
    }
    if !arena.is_game_over() {
        return;
    }

    if arena.paddle(0).is_none() {
        assert_eq!(arena.score(0), 0);
        assert!(!arena.player_won());
    } else {
        assert!(arena.player_won());
        assert_eq!(arena.scores()[1..], [0, 0, 0]);
    }

    // Nothing new spawns and the leftovers fade away
    arena.advance(2.0);
    assert!(arena.balls().is_empty());
    arena.advance(2.0);
    assert!(arena.balls().is_empty());

    let events = arena.drain_events();
    let over = events
        .iter()
        .filter(|e| matches!(e, GameEvent::GameOver { .. }))
        .count();
    assert_eq!(over, 1);
}

#[test]
fn test_placeholder_arena_stays_empty() {
    let mut arena = Arena::new(1.8, 0);
    assert!(arena.is_game_over());
    arena.advance(5.0);
    assert!(arena.balls().is_empty());
    assert!(arena.drain_events().is_empty());
    assert_eq!(arena.scores(), [0; 4]);
}

#[test]
fn test_non_positive_dt_is_noop() {
    let mut arena = Arena::new(1.8, 3);
    arena.advance(0.5);
    let before = arena.snapshot();
    arena.advance(0.0);
    arena.advance(-1.0);
    arena.advance(f32::NAN);
    assert_eq!(arena.snapshot(), before);
}
