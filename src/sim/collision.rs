//! Collision and scoring detection
//!
//! Runs once per playing tick, in a fixed order:
//! 1. Playfield bounds (ceiling and ground). A hit here ends the check.
//! 2. Scoring: every unpassed obstacle whose trailing edge is behind the body.
//! 3. Intersection against each obstacle's upper and lower regions.
//!
//! Scoring runs before intersection, so an obstacle clipped exactly as it is
//! passed both scores and ends the run in the same tick.

use serde::{Deserialize, Serialize};

use super::body::Body;
use super::geometry::Rect;
use super::spawner::ObstacleField;
use crate::tuning::Tuning;

/// What the body ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hit {
    /// Bounding box rose above the playfield top
    Ceiling,
    /// Bounding box fell below the ground line
    Ground,
    /// Bounding box overlapped an obstacle region (index into the active field)
    Obstacle { index: usize },
}

/// Result of one detection pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionResult {
    /// First terminal collision found, if any
    pub hit: Option<Hit>,
    /// Obstacles newly marked as passed this tick
    pub scored: u32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.hit.is_some()
    }
}

/// Check the body box against the playfield's top edge and ground line
pub fn check_bounds(body_box: &Rect, playfield_height: f32) -> Option<Hit> {
    if body_box.top() < 0.0 {
        Some(Hit::Ceiling)
    } else if body_box.bottom() > playfield_height {
        Some(Hit::Ground)
    } else {
        None
    }
}

/// Mark every obstacle the body has cleared; returns how many were newly passed
pub fn award_passes(body: &Body, field: &mut ObstacleField, pipe_width: f32) -> u32 {
    let mut scored = 0;
    for obstacle in field.iter_mut() {
        if !obstacle.passed && obstacle.trailing_edge(pipe_width) < body.pos.x {
            obstacle.passed = true;
            scored += 1;
        }
    }
    scored
}

/// Index of the first obstacle whose solid regions overlap `body_box`
pub fn first_obstacle_hit(body_box: &Rect, field: &ObstacleField, tuning: &Tuning) -> Option<usize> {
    field.iter().position(|obstacle| {
        body_box.intersects(&obstacle.upper_region(tuning))
            || body_box.intersects(&obstacle.lower_region(tuning))
    })
}

/// Full detection pass for one tick
pub fn detect(body: &Body, field: &mut ObstacleField, tuning: &Tuning) -> CollisionResult {
    let body_box = body.bounding_box();

    if let Some(hit) = check_bounds(&body_box, tuning.playfield_height) {
        return CollisionResult {
            hit: Some(hit),
            scored: 0,
        };
    }

    let scored = award_passes(body, field, tuning.pipe_width);
    let hit = first_obstacle_hit(&body_box, field, tuning).map(|index| Hit::Obstacle { index });

    CollisionResult { hit, scored }
}
