//! Axis-aligned placement shared by every entity
//!
//! Coordinates are integer pixels with the origin at the arena's top-left
//! corner and y growing downward.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Display color. The simulation never inspects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const LIGHT_GRAY: Color = Color::rgb(192, 192, 192);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const ORANGE: Color = Color::rgb(255, 200, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Position, size and color of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Top-left corner
    pub pos: IVec2,
    /// Width and height, both positive
    pub size: IVec2,
    pub color: Color,
}

impl Placement {
    pub fn new(pos: IVec2, size: IVec2, color: Color) -> Self {
        debug_assert!(size.x > 0 && size.y > 0, "placement size must be positive");
        Self { pos, size, color }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.pos.y + self.size.y
    }

    /// Inclusive overlap of the horizontal extents (touching counts)
    #[inline]
    pub fn spans_x(&self, other: &Placement) -> bool {
        self.right() >= other.left() && self.left() <= other.right()
    }

    /// Inclusive overlap of the vertical extents (touching counts)
    #[inline]
    pub fn spans_y(&self, other: &Placement) -> bool {
        self.bottom() >= other.top() && self.top() <= other.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: i32, y: i32, w: i32, h: i32) -> Placement {
        Placement::new(IVec2::new(x, y), IVec2::new(w, h), Color::WHITE)
    }

    #[test]
    fn test_edges() {
        let p = rect(10, 20, 30, 40);
        assert_eq!(p.left(), 10);
        assert_eq!(p.right(), 40);
        assert_eq!(p.top(), 20);
        assert_eq!(p.bottom(), 60);
    }

    #[test]
    fn test_span_overlap_is_inclusive() {
        let a = rect(0, 0, 10, 10);
        // Touching at x = 10
        assert!(a.spans_x(&rect(10, 50, 5, 5)));
        assert!(!a.spans_x(&rect(11, 50, 5, 5)));
        // Touching at y = 10
        assert!(a.spans_y(&rect(50, 10, 5, 5)));
        assert!(!a.spans_y(&rect(50, 11, 5, 5)));
    }
}
