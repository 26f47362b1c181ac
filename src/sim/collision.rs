//! Collision detection for screen-space rectangles
//!
//! Slicing only ever asks one question: is the pointer inside a fruit's
//! sprite bounds? Bounds are half-open, matching how sprite rectangles are
//! rasterized: the top-left pixel is inside, the pixel just past the far edge
//! is not.

use glam::{IVec2, Vec2};

/// Axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub origin: IVec2,
    pub size: IVec2,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            origin: IVec2::new(x, y),
            size: IVec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.origin.x as f32
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y as f32
    }

    #[inline]
    pub fn right(&self) -> f32 {
        (self.origin.x + self.size.x) as f32
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        (self.origin.y + self.size.y) as f32
    }

    /// Check whether a point lies in `[left, right) x [top, bottom)`
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }
}
