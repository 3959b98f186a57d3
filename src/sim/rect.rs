//! Axis-aligned rectangle geometry for sprites and the playfield
//!
//! Positions are integer pixels with the origin at the top-left corner and y
//! growing downward. A rect spans `[x, x + width) × [y, y + height)`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An integer axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect whose top-left corner is a float position truncated toward zero
    pub fn at(pos: Vec2, width: i32, height: i32) -> Self {
        Self::new(pos.x as i32, pos.y as i32, width, height)
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Strict overlap test: rects that only share an edge do not collide
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Whether the top-left corner lies outside `[0, width] × [0, height]`
    ///
    /// Edges are inclusive: a corner exactly on the boundary is still inside.
    pub fn origin_outside(&self, width: i32, height: i32) -> bool {
        self.x < 0 || self.x > width || self.y < 0 || self.y > height
    }

    /// Centre point (for renderers and debugging)
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.x as f32 + self.width as f32 / 2.0,
            self.y as f32 + self.height as f32 / 2.0,
        )
    }
}
