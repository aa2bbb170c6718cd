//! Collision detection for square bubbles
//!
//! Everything in the arena is an axis-aligned square, so collisions reduce to
//! box overlap plus reflection off the two side walls.

use glam::Vec2;

use super::state::Bubble;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Square box from its top-left corner
    #[inline]
    pub fn square(top_left: Vec2, size: f32) -> Self {
        Self {
            min: top_left,
            max: top_left + Vec2::splat(size),
        }
    }

    /// Strict overlap; boxes that only share an edge do not touch
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.max.y > other.min.y
            && self.min.y < other.max.y
            && self.max.x > other.min.x
            && self.min.x < other.max.x
    }
}

/// Index of the first settled bubble overlapping a bubble at `pos`.
///
/// Scans in collection order and stops at the first hit, no nearest-hit
/// tie-break.
pub fn first_overlap(pos: Vec2, size: f32, bubbles: &[Bubble]) -> Option<usize> {
    let shot = Aabb::square(pos, size);
    bubbles.iter().position(|b| shot.overlaps(&b.bounds(size)))
}

/// Reflect off the left/right walls.
///
/// Clamps `pos.x` into `[0, max_x]` and points `vel.x` back into the arena.
/// Returns true if a wall was touched.
pub fn reflect_side_walls(pos: &mut Vec2, vel: &mut Vec2, max_x: f32) -> bool {
    if pos.x <= 0.0 {
        pos.x = 0.0;
        vel.x = vel.x.abs();
        true
    } else if pos.x >= max_x {
        pos.x = max_x;
        vel.x = -vel.x.abs();
        true
    } else {
        false
    }
}
