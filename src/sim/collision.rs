//! Collision tests and bounce responses on the square board
//!
//! Barriers and balls are circles; the four board edges are lines. Angles
//! follow the ball convention: 0 is +x, π/2 is +z, always in [0, 2π).

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI};

use crate::consts::*;
use crate::normalize_angle;

/// Centers of the four corner barriers
pub const BARRIER_CENTERS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(1.0, 1.0),
];

/// Whether `offset` lies strictly within `r` of the origin
#[inline]
pub fn intersects_circle(offset: Vec2, r: f32) -> bool {
    offset.length_squared() < r * r
}

/// Whether a mover is overlapping a circle `offset` away and closing on it
///
/// `r` is the sum of both radii and `velocity` the mover's velocity relative
/// to the circle. Movers already separating are ignored so a bounce isn't
/// undone on the next tick while the shapes still overlap.
#[inline]
pub fn closing_collision(offset: Vec2, r: f32, velocity: Vec2) -> bool {
    intersects_circle(offset, r) && velocity.dot(offset) > 0.0
}

/// Angle after bouncing off a surface whose normal points along `normal`
#[inline]
pub fn reflect(angle: f32, normal: f32) -> f32 {
    normalize_angle(2.0 * normal - PI - angle)
}

/// Angle after bouncing off a circle centered at `center`
///
/// The surface normal runs from `center` to `pos`.
pub fn reflect_off_point(angle: f32, pos: Vec2, center: Vec2) -> f32 {
    let away = pos - center;
    reflect(angle, away.y.atan2(away.x))
}

/// The four board edges, indexed like the crabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// z = 0, between (0,0) and (1,0)
    Near,
    /// x = 0
    Left,
    /// z = 1
    Far,
    /// x = 1
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Near, Edge::Left, Edge::Far, Edge::Right];

    pub fn index(self) -> usize {
        match self {
            Edge::Near => 0,
            Edge::Left => 1,
            Edge::Far => 2,
            Edge::Right => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Edge> {
        Edge::ALL.get(index).copied()
    }

    /// Direction pointing from this edge into the board
    pub fn normal(self) -> f32 {
        normalize_angle((1.0 - self.index() as f32) * FRAC_PI_2)
    }

    /// Distance from `pos` to this edge's line
    pub fn distance(self, pos: Vec2) -> f32 {
        match self {
            Edge::Near => pos.y,
            Edge::Left => pos.x,
            Edge::Far => 1.0 - pos.y,
            Edge::Right => 1.0 - pos.x,
        }
    }

    /// Where `pos` projects along the edge, in crab coordinates (distance
    /// from the corner on the crab's right)
    pub fn coordinate(self, pos: Vec2) -> f32 {
        match self {
            Edge::Near => pos.x,
            Edge::Left => 1.0 - pos.y,
            Edge::Far => 1.0 - pos.x,
            Edge::Right => pos.y,
        }
    }

    /// Whether `angle` points out of the board through this edge
    pub fn is_outward(self, angle: f32) -> bool {
        match self {
            Edge::Near => angle > PI,
            Edge::Left => angle > FRAC_PI_2 && angle < 3.0 * FRAC_PI_2,
            Edge::Far => angle < PI,
            Edge::Right => angle < FRAC_PI_2 || angle > 3.0 * FRAC_PI_2,
        }
    }

    /// Board position of a crab centered at `crab_pos` along this edge
    pub fn point_at(self, crab_pos: f32) -> Vec2 {
        match self {
            Edge::Near => Vec2::new(crab_pos, 0.0),
            Edge::Left => Vec2::new(0.0, 1.0 - crab_pos),
            Edge::Far => Vec2::new(1.0 - crab_pos, 1.0),
            Edge::Right => Vec2::new(1.0, crab_pos),
        }
    }
}

/// The first edge a ball of radius `radius` at `pos` is within reach of
///
/// Near a corner two edges can qualify; the lower index wins.
pub fn touching_edge(pos: Vec2, radius: f32) -> Option<Edge> {
    Edge::ALL.into_iter().find(|edge| edge.distance(pos) < radius)
}

/// Whether a crab centered at `crab_pos` covers `ball_pos` along its edge
#[inline]
pub fn crab_covers(crab_pos: f32, ball_pos: f32) -> bool {
    (crab_pos - ball_pos).abs() < CRAB_LENGTH / 2.0
}

/// Angle of a ball struck by a crab
///
/// Centre hits go straight back along the edge normal; hits further out
/// leave at up to `MAX_CRAB_BOUNCE_ANGLE_OFFSET` from it.
pub fn crab_bounce_angle(edge: Edge, crab_pos: f32, ball_pos: f32) -> f32 {
    let offset = (crab_pos - ball_pos) / (CRAB_LENGTH / 2.0);
    normalize_angle(edge.normal() + MAX_CRAB_BOUNCE_ANGLE_OFFSET * offset)
}
