//! Presentation helpers for an external renderer
//!
//! Nothing here feeds back into the simulation. A renderer reads a
//! [`Snapshot`](crate::sim::Snapshot) each frame and derives display values
//! such as body tilt and HUD text from it.

use crate::sim::GamePhase;

/// Height of the decorative ground strip drawn along the playfield bottom
pub const GROUND_HEIGHT: f32 = 90.0;

/// Maximum tilt either way, in degrees
pub const MAX_TILT_DEGREES: f32 = 45.0;

/// Body rotation for display: nose up while rising, nose down while falling
#[inline]
pub fn body_tilt_degrees(vel_y: f32) -> f32 {
    (vel_y / 8.0).clamp(-MAX_TILT_DEGREES, MAX_TILT_DEGREES)
}

/// HUD score line
pub fn score_label(score: u32) -> String {
    format!("Score: {}", score)
}

/// Centered overlay text for the current phase
pub fn banner(phase: GamePhase, score: u32) -> Option<String> {
    match phase {
        GamePhase::Idle => Some("Press Space or Click to Start".to_string()),
        GamePhase::Playing => None,
        GamePhase::GameOver => Some(format!(
            "Game Over\nScore: {}\nPress R to Restart",
            score
        )),
    }
}
