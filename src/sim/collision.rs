//! Impact detection for axis-aligned rectangles
//!
//! The ball is treated as its bounding box. An impact is detected when the
//! ball's leading edge lies inside a thin band (`IMPACT_BUFFER`) on the facing
//! edge of an obstacle and the perpendicular extents overlap. This is not swept
//! collision: a ball faster than the band can tunnel.

use super::placement::Placement;
use super::state::{Ball, Brick};
use crate::consts::*;

/// The leading edge of the ball under test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Descending: ball bottom against obstacle top
    Bottom,
    /// Moving left: ball left against obstacle right
    Left,
    /// Moving right: ball right against obstacle left
    Right,
    /// Ascending: ball top against obstacle bottom
    Top,
}

impl Edge {
    /// Reverse the velocity component normal to this edge
    #[inline]
    pub fn bounce(self, ball: &mut Ball) {
        match self {
            Edge::Bottom | Edge::Top => ball.flip_vy(),
            Edge::Left | Edge::Right => ball.flip_vx(),
        }
    }
}

#[inline]
fn in_band(value: i32, low: i32, high: i32) -> bool {
    value >= low && value <= high
}

/// Check whether `ball`'s `edge` is in the impact band of `obstacle`
pub fn edge_contact(ball: &Placement, obstacle: &Placement, edge: Edge) -> bool {
    match edge {
        Edge::Bottom => {
            in_band(ball.bottom(), obstacle.top(), obstacle.top() + IMPACT_BUFFER)
                && ball.spans_x(obstacle)
        }
        Edge::Top => {
            in_band(ball.top(), obstacle.bottom() - IMPACT_BUFFER, obstacle.bottom())
                && ball.spans_x(obstacle)
        }
        Edge::Left => {
            in_band(ball.left(), obstacle.right() - IMPACT_BUFFER, obstacle.right())
                && ball.spans_y(obstacle)
        }
        Edge::Right => {
            in_band(ball.right(), obstacle.left(), obstacle.left() + IMPACT_BUFFER)
                && ball.spans_y(obstacle)
        }
    }
}

/// Check whether `ball`'s `edge` has reached the matching arena boundary
pub fn wall_contact(ball: &Placement, edge: Edge) -> bool {
    match edge {
        Edge::Bottom => ball.bottom() >= ARENA_HEIGHT,
        Edge::Top => ball.top() < -1,
        Edge::Left => ball.left() < -1,
        Edge::Right => ball.right() >= ARENA_WIDTH,
    }
}

/// Remove every brick the ball's `edge` is touching and bounce once per hit.
///
/// All bricks are tested against the ball's position on entry, so an even
/// number of simultaneous hits leaves the velocity unchanged. Returns the
/// removed bricks in id order.
pub fn strike_bricks(ball: &mut Ball, bricks: &mut Vec<Brick>, edge: Edge) -> Vec<Brick> {
    let at = ball.placement;
    let mut struck = Vec::new();
    bricks.retain(|brick| {
        if edge_contact(&at, &brick.placement, edge) {
            struck.push(brick.clone());
            false
        } else {
            true
        }
    });
    for _ in &struck {
        edge.bounce(ball);
    }
    struck
}
