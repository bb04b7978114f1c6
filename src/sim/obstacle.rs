//! Gap obstacles
//!
//! An obstacle is a full-height column with a single passable gap. Everything
//! above and below the gap is solid.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Leading (left) edge
    pub x: f32,
    /// Vertical centre of the gap
    pub gap_center_y: f32,
    /// Set once the body has cleared the trailing edge
    pub passed: bool,
}

impl Obstacle {
    pub fn new(x: f32, gap_center_y: f32) -> Self {
        Self {
            x,
            gap_center_y,
            passed: false,
        }
    }

    /// New obstacle at `x` with a gap centre drawn uniformly from the tuning's gap range
    pub fn spawn<R: Rng>(x: f32, tuning: &Tuning, rng: &mut R) -> Self {
        let (lo, hi) = tuning.gap_range();
        Self::new(x, rng.random_range(lo..=hi))
    }

    /// Scroll left by the shared obstacle speed
    #[inline]
    pub fn advance(&mut self, speed: f32, dt: f32) {
        self.x -= speed * dt;
    }

    /// Rightmost x coordinate
    #[inline]
    pub fn trailing_edge(&self, width: f32) -> f32 {
        self.x + width
    }

    /// Solid region from the playfield top down to the gap
    pub fn upper_region(&self, tuning: &Tuning) -> Rect {
        let gap_top = self.gap_center_y - tuning.gap_height / 2.0;
        Rect::from_edges(self.x, tuning.pipe_width, 0.0, gap_top)
    }

    /// Solid region from the gap down to the playfield bottom
    pub fn lower_region(&self, tuning: &Tuning) -> Rect {
        let gap_bottom = self.gap_center_y + tuning.gap_height / 2.0;
        Rect::from_edges(
            self.x,
            tuning.pipe_width,
            gap_bottom,
            tuning.playfield_height,
        )
    }

    /// True once the trailing edge has scrolled `margin` past the left boundary
    #[inline]
    pub fn is_retired(&self, width: f32, margin: f32) -> bool {
        self.trailing_edge(width) < -margin
    }
}
