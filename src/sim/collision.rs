//! Collision tests for the two shapes the game cares about
//!
//! Bullets hit enemies (and the player scoops power-ups) by a circular
//! distance check; the blocky obstacles use axis-aligned rectangles.
//! Both are pure functions with no side effects.

use glam::Vec2;

/// Euclidean distance check: true when the two points are strictly closer
/// than `threshold`.
#[inline]
pub fn circular_hit(a: Vec2, b: Vec2, threshold: f32) -> bool {
    a.distance(b) < threshold
}

/// Axis-aligned rectangle overlap, strict on all four sides. Positions are
/// top-left corners.
#[inline]
pub fn rect_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    a_pos.x < b_pos.x + b_size.x
        && a_pos.x + a_size.x > b_pos.x
        && a_pos.y < b_pos.y + b_size.y
        && a_pos.y + a_size.y > b_pos.y
}
