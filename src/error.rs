//! Configuration errors
//!
//! The simulation itself has no failure modes once constructed; everything
//! here is rejected up front when a session or tuning file is created.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be finite and positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("gap height {gap} does not fit in playfield height {height}")]
    GapTooTall { gap: f32, height: f32 },

    #[error("obstacle spacing {spacing} must exceed obstacle width {width}")]
    SpacingTooNarrow { spacing: f32, width: f32 },

    #[error("gap margin {margin} must exceed half the gap height {gap}")]
    MarginTooSmall { margin: f32, gap: f32 },

    #[error("gap margin {margin} leaves no room in playfield height {height}")]
    MarginTooLarge { margin: f32, height: f32 },

    #[error("body size {size} cannot pass through gap height {gap}")]
    BodyLargerThanGap { size: f32, gap: f32 },

    #[error("flap velocity {0} must be negative (upward)")]
    FlapNotUpward(f32),

    #[error("body start ({x}, {y}) lies outside the playfield")]
    BodyOutsidePlayfield { x: f32, y: f32 },

    #[error("need at least one lookahead obstacle and {initial} initial >= {lookahead} lookahead")]
    Lookahead { initial: usize, lookahead: usize },

    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
}
