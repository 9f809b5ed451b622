//! Fixed timestep simulation tick
//!
//! One call to [`step`] advances the arena by `GAME_STEP_TIME`. The passes run
//! in a fixed order: move, collide, score, cull, spawn, end-of-match, AI.

use glam::Vec2;
use std::collections::VecDeque;

use super::ai;
use super::ball::Ball;
use super::collision::{
    BARRIER_CENTERS, Edge, closing_collision, crab_bounce_angle, crab_covers, intersects_circle,
    reflect, reflect_off_point, touching_edge,
};
use super::rng::AngleSource;
use super::state::{Arena, BallRules, GameEvent, PaddleSlot, push_event};
use crate::consts::*;

/// Where new balls fade in
const BOARD_CENTER: Vec2 = Vec2::new(0.5, 0.5);

/// Advance the arena by one fixed tick
pub fn step<R: AngleSource>(arena: &mut Arena<R>) {
    arena.ticks += 1;

    for crab in arena.paddles.iter_mut().filter_map(PaddleSlot::crab_mut) {
        crab.advance(GAME_STEP_TIME);
    }
    for ball in &mut arena.balls {
        ball.advance(GAME_STEP_TIME);
    }

    handle_collisions(&mut arena.balls, &arena.paddles, &mut arena.events);
    score_departures(arena);
    arena.balls.retain(|ball| !ball.is_spent());

    if arena.is_game_over() {
        for ball in &mut arena.balls {
            ball.begin_fade_out();
        }
        if !arena.game_over_announced {
            arena.game_over_announced = true;
            let player_won = arena.player_won();
            log::info!(
                "Game over after {} ticks: {}",
                arena.ticks,
                if player_won { "player wins" } else { "player loses" }
            );
            arena.push_event(GameEvent::GameOver { player_won });
        }
    } else {
        spawn_balls(arena);
    }

    steer_opponents(arena);
}

/// Resolve every collision involving a live ball at the current instant
fn handle_collisions(
    balls: &mut [Ball],
    paddles: &[PaddleSlot; 4],
    events: &mut VecDeque<GameEvent>,
) {
    for i in 0..balls.len() {
        if !balls[i].is_live() {
            continue;
        }

        // Corner barriers
        for (corner, &center) in BARRIER_CENTERS.iter().enumerate() {
            let ball = &mut balls[i];
            if closing_collision(
                center - ball.pos(),
                ball.radius() + BARRIER_SIZE,
                ball.velocity(),
            ) {
                ball.set_angle(reflect_off_point(ball.angle(), ball.pos(), center));
                push_event(events, GameEvent::BarrierBounce { corner });
            }
        }

        // Other balls
        for j in (i + 1)..balls.len() {
            let (head, tail) = balls.split_at_mut(j);
            let (a, b) = (&mut head[i], &mut tail[0]);
            if !b.is_live() {
                continue;
            }
            if closing_collision(
                b.pos() - a.pos(),
                a.radius() + b.radius(),
                a.velocity() - b.velocity(),
            ) {
                let (pa, pb) = (a.pos(), b.pos());
                a.set_angle(reflect_off_point(a.angle(), pa, pb));
                b.set_angle(reflect_off_point(b.angle(), pb, pa));
                push_event(events, GameEvent::BallBounce);
            }
        }

        // Crabs and walls. Only balls heading out through the edge bounce, so
        // a ball still inside the edge band after bouncing isn't turned back.
        let ball = &mut balls[i];
        let Some(edge) = touching_edge(ball.pos(), ball.radius()) else {
            continue;
        };
        if !edge.is_outward(ball.angle()) {
            continue;
        }
        match &paddles[edge.index()] {
            PaddleSlot::Present(crab) => {
                let along = edge.coordinate(ball.pos());
                if crab_covers(crab.position(), along) {
                    ball.set_angle(crab_bounce_angle(edge, crab.position(), along));
                    push_event(events, GameEvent::CrabHit { crab: edge.index() });
                }
            }
            PaddleSlot::Eliminated => {
                ball.set_angle(reflect(ball.angle(), edge.normal()));
                push_event(events, GameEvent::WallBounce { edge: edge.index() });
            }
        }
    }
}

/// The edge a live ball is leaving the board through, if any
///
/// Edges are tried in crab order; near a corner a shallow ball can be
/// attributed to whichever qualifying edge comes first.
pub fn departing_edge(ball: &Ball) -> Option<Edge> {
    Edge::ALL
        .into_iter()
        .find(|edge| edge.distance(ball.pos()) < ball.radius() && edge.is_outward(ball.angle()))
}

/// Charge a point to every crab that let a ball past
fn score_departures<R>(arena: &mut Arena<R>) {
    for ball in arena.balls.iter_mut().filter(|ball| ball.is_live()) {
        let Some(edge) = departing_edge(ball) else {
            continue;
        };
        let crab = edge.index();
        if !arena.paddles[crab].is_present() {
            continue;
        }

        ball.begin_fade_out();
        let remaining = arena.scores[crab].saturating_sub(1);
        arena.scores[crab] = remaining;
        log::debug!("Crab {crab} scored on, {remaining} left");
        push_event(&mut arena.events, GameEvent::Scored { crab, remaining });

        if remaining == 0 {
            arena.paddles[crab] = PaddleSlot::Eliminated;
            log::info!("Crab {crab} eliminated");
            push_event(&mut arena.events, GameEvent::Eliminated { crab });
        }
    }
}

/// Top the board back up to the target ball count
///
/// Balls only appear at the center, so at most one spawns per tick: the new
/// ball blocks the spot until it drifts away.
fn spawn_balls<R: AngleSource>(arena: &mut Arena<R>) {
    let BallRules {
        target_count,
        radius,
        motion,
    } = arena.rules;

    while arena.balls.len() < target_count {
        let blocked = arena
            .balls
            .iter()
            .any(|ball| intersects_circle(ball.pos() - BOARD_CENTER, 2.0 * radius));
        if blocked {
            break;
        }

        let angle = arena.rng.next_angle();
        log::trace!("Spawning ball at angle {angle:.3}");
        arena.balls.push(Ball::new(radius, BOARD_CENTER, angle, motion));
        push_event(&mut arena.events, GameEvent::BallSpawned { angle });
    }
}

/// Point every computer crab at the ball nearest its edge
fn steer_opponents<R>(arena: &mut Arena<R>) {
    for edge in [Edge::Left, Edge::Far, Edge::Right] {
        let Some(crab) = arena.paddles[edge.index()].crab_mut() else {
            continue;
        };
        let target = ai::target_position(edge, &arena.balls);
        crab.set_intent(ai::chase_direction(crab, target));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize_angle;
    use crate::sim::ball::BallMotion;
    use crate::sim::rng::ScriptedAngles;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn arena(score: u32) -> Arena<ScriptedAngles> {
        Arena::with_rng(OPPONENT_MAXIMUM_SPEED, score, ScriptedAngles::new([0.3]))
    }

    /// A fully faded-in ball that hasn't moved
    fn live_ball(x: f32, z: f32, angle: f32) -> Ball {
        let motion = BallMotion::default();
        let mut ball = Ball::new(BALL_RADIUS, Vec2::new(x, z), angle, motion);
        ball.advance(motion.fade_in_time);
        assert!(ball.is_live());
        ball
    }

    /// Run only the collision pass
    fn collide<R>(arena: &mut Arena<R>) {
        handle_collisions(&mut arena.balls, &arena.paddles, &mut arena.events);
    }

    #[test]
    fn test_first_tick_spawns_one_ball_at_center() {
        let mut arena = arena(3);
        step(&mut arena);
        assert_eq!(arena.balls.len(), 1);
        let ball = &arena.balls[0];
        assert_eq!(ball.pos(), BOARD_CENTER);
        assert_eq!(ball.angle(), 0.3);
        assert_eq!(ball.fade_amount(), 0.0);

        // Center is still occupied on the next tick
        step(&mut arena);
        assert_eq!(arena.balls.len(), 1);
        assert!(matches!(
            arena.drain_events().as_slice(),
            [GameEvent::BallSpawned { .. }]
        ));
    }

    #[test]
    fn test_barrier_reflection_formula() {
        let mut arena = arena(1);
        // Touching the (0,0) barrier, heading straight at it along the diagonal
        let old = 5.0 * PI / 4.0;
        arena.balls.push(live_ball(0.1, 0.1, old));
        collide(&mut arena);

        let ball = &arena.balls[0];
        let normal = ball.z().atan2(ball.x());
        assert!((ball.angle() - normalize_angle(2.0 * normal - PI - old)).abs() < 1e-5);
        assert!((ball.angle() - PI / 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_barrier_ignores_receding_ball() {
        let mut arena = arena(1);
        arena.balls.push(live_ball(0.1, 0.1, PI / 4.0));
        collide(&mut arena);
        assert_eq!(arena.balls[0].angle(), PI / 4.0);
    }

    #[test]
    fn test_fading_ball_is_collision_exempt() {
        let mut arena = arena(1);
        let mut ball = live_ball(0.1, 0.1, 5.0 * PI / 4.0);
        ball.begin_fade_out();
        arena.balls.push(ball);
        collide(&mut arena);
        assert_eq!(arena.balls[0].angle(), 5.0 * PI / 4.0);
    }

    #[test]
    fn test_balls_bounce_off_each_other() {
        let mut arena = arena(1);
        arena.balls.push(live_ball(0.45, 0.5, 0.0));
        arena.balls.push(live_ball(0.52, 0.5, PI));
        collide(&mut arena);
        assert!((arena.balls[0].angle() - PI).abs() < 1e-5);
        assert!(arena.balls[1].angle().abs() < 1e-5);
        assert_eq!(arena.drain_events(), vec![GameEvent::BallBounce]);
    }

    #[test]
    fn test_crab_deflects_by_hit_offset() {
        let mut arena = arena(1);
        // Player crab sits at 0.5; ball arrives at 0.55, left of its center
        arena.balls.push(live_ball(0.55, 0.03, 3.0 * FRAC_PI_2));
        collide(&mut arena);
        let expected = FRAC_PI_2 - MAX_CRAB_BOUNCE_ANGLE_OFFSET * 0.5;
        assert!((arena.balls[0].angle() - expected).abs() < 1e-4);

        // Now heading back in; the scoring pass must not charge a point
        score_departures(&mut arena);
        assert_eq!(arena.scores[0], 1);
    }

    #[test]
    fn test_missed_ball_scores_and_eliminates() {
        let mut arena = arena(1);
        arena.balls.push(live_ball(0.8, 0.03, 3.0 * FRAC_PI_2));
        step(&mut arena);

        assert_eq!(arena.scores[0], 0);
        assert!(!arena.paddles[0].is_present());
        assert!(arena.balls[0].is_fading_out());
        assert!(arena.is_game_over());

        let events = arena.drain_events();
        assert!(events.contains(&GameEvent::Scored { crab: 0, remaining: 0 }));
        assert!(events.contains(&GameEvent::Eliminated { crab: 0 }));
        assert!(events.contains(&GameEvent::GameOver { player_won: false }));
    }

    #[test]
    fn test_eliminated_edge_is_a_wall() {
        let mut arena = arena(2);
        arena.paddles[2] = PaddleSlot::Eliminated;
        arena.scores[2] = 0;

        let old = PI / 3.0;
        arena.balls.push(live_ball(0.5, 0.97, old));
        for _ in 0..20 {
            step(&mut arena);
        }

        let ball = &arena.balls[0];
        assert!(!ball.is_fading_out());
        assert!((ball.angle() - reflect(old, 3.0 * FRAC_PI_2)).abs() < 1e-5);
        assert!(ball.z() < 0.97);
        assert_eq!(arena.scores[2], 0);
        assert!(!arena.paddles[2].is_present());
        let events = arena.drain_events();
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::WallBounce { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn test_spent_balls_are_dropped() {
        let mut arena = arena(1);
        let mut ball = live_ball(0.5, 0.5, 0.0);
        ball.begin_fade_out();
        arena.balls.push(ball);
        // Keep the center blocked so nothing respawns
        arena.rules.target_count = 0;

        for _ in 0..49 {
            step(&mut arena);
        }
        assert_eq!(arena.balls.len(), 1);
        for _ in 0..5 {
            step(&mut arena);
        }
        assert!(arena.balls.is_empty());
    }

    #[test]
    fn test_game_over_fades_everything_and_stops_spawning() {
        let mut arena = arena(1);
        for slot in 1..4 {
            arena.paddles[slot] = PaddleSlot::Eliminated;
            arena.scores[slot] = 0;
        }
        arena.balls.push(live_ball(0.3, 0.6, 0.0));
        step(&mut arena);

        assert!(arena.player_won());
        assert!(arena.balls.iter().all(Ball::is_fading_out));
        for _ in 0..100 {
            step(&mut arena);
        }
        assert!(arena.balls.is_empty());
        let over = arena
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(over, 1);
    }

    #[test]
    fn test_opponents_chase_nearest_ball() {
        let mut arena = arena(1);
        arena.rules.target_count = 0;
        // Close to the right edge (crab 3) near its low end
        arena.balls.push(live_ball(0.9, 0.25, 0.0));
        step(&mut arena);

        assert_eq!(arena.paddles[3].crab().unwrap().direction(), -1);
        // Same ball for the other two edges: 1 - x on the far edge, 1 - z on the left
        assert_eq!(arena.paddles[2].crab().unwrap().direction(), -1);
        assert_eq!(arena.paddles[1].crab().unwrap().direction(), 1);
        // The player is never steered by the AI
        assert_eq!(arena.paddles[0].crab().unwrap().direction(), 0);
    }

    #[test]
    fn test_departing_edge_needs_outward_angle() {
        let inward = live_ball(0.02, 0.5, 0.0);
        assert_eq!(departing_edge(&inward), None);
        let outward = live_ball(0.02, 0.5, PI);
        assert_eq!(departing_edge(&outward), Some(Edge::Left));
    }
}
