//! Computer crab steering
//!
//! Each computer crab chases the ball closest to its edge and brakes early
//! enough to stop with that ball inside the middle of its body.

use super::ball::Ball;
use super::collision::Edge;
use super::crab::Crab;
use crate::consts::*;

/// Edge coordinate of the ball nearest `edge`, or the edge midpoint if there
/// are no balls
pub fn target_position(edge: Edge, balls: &[Ball]) -> f32 {
    let mut closest = 100.0;
    let mut target = 0.5;
    for ball in balls {
        let dist = edge.distance(ball.pos()) - ball.radius();
        if dist < closest {
            closest = dist;
            target = edge.coordinate(ball.pos());
        }
    }
    target
}

/// Direction a crab should accelerate to end up stopped over `target`
pub fn chase_direction(crab: &Crab, target: f32) -> i32 {
    if (crab.stop_position() - target).abs() < AI_STOP_TOLERANCE * (CRAB_LENGTH / 2.0) {
        0
    } else if target < crab.position() {
        -1
    } else {
        1
    }
}
