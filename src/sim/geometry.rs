//! Axis-aligned rectangles for bodies and obstacle regions
//!
//! Rectangles are half-open: `[min.x, max.x) × [min.y, max.y)`. Two rectangles
//! that merely share an edge do not intersect.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in playfield space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Square of side `size` centred on `center`
    pub fn centered(center: Vec2, size: f32) -> Self {
        let half = Vec2::splat(size / 2.0);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Rectangle spanning `[x, x + width)` horizontally and `[top, bottom)` vertically
    pub fn from_edges(x: f32, width: f32, top: f32, bottom: f32) -> Self {
        Self {
            min: Vec2::new(x, top),
            max: Vec2::new(x + width, bottom),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// True when the rectangles overlap with positive area
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}
