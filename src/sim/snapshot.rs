//! Read-only view of a session for an external renderer
//!
//! Everything a frame needs and nothing more. Presentation-only values such
//! as body tilt are derived from this by the renderer (see [`crate::view`]).

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::state::{GamePhase, Session};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyView {
    pub bounds: Rect,
    pub vel_y: f32,
    pub alive: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub upper: Rect,
    pub lower: Rect,
    pub passed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub body: BodyView,
    /// Active obstacles in x-ascending order
    pub obstacles: Vec<ObstacleView>,
}

impl Snapshot {
    pub fn capture<R: Rng>(session: &Session<R>) -> Self {
        let tuning = session.tuning();
        Self {
            phase: session.phase,
            score: session.score,
            body: BodyView {
                bounds: session.body.bounding_box(),
                vel_y: session.body.vel_y,
                alive: session.body.alive,
            },
            obstacles: session
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    upper: o.upper_region(tuning),
                    lower: o.lower_region(tuning),
                    passed: o.passed,
                })
                .collect(),
        }
    }
}
