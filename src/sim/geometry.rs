//! Axis-aligned rectangles
//!
//! Screen-style coordinates: x grows right, y grows down, `pos` is the
//! top-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Overlap test with both boxes shrunk by `padding` on every side
    ///
    /// Touching edges never count as overlap.
    pub fn overlaps_padded(&self, other: &Rect, padding: f32) -> bool {
        self.left() + padding < other.right() - padding
            && self.right() - padding > other.left() + padding
            && self.top() + padding < other.bottom() - padding
            && self.bottom() - padding > other.top() + padding
    }
}
