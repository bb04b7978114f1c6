//! Data-driven game balance
//!
//! Every physical constant the simulation reads lives here. Defaults match the
//! reference constants in [`crate::consts`]; JSON files may override any subset.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Simulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,
    /// Logical ticks per second
    pub tick_rate: u32,

    // === Body ===
    pub body_size: f32,
    /// Fixed horizontal position of the body
    pub body_x: f32,
    /// Vertical start position on session reset
    pub body_start_y: f32,
    pub gravity: f32,
    pub flap_velocity: f32,

    // === Obstacles ===
    pub pipe_width: f32,
    pub pipe_speed: f32,
    pub gap_height: f32,
    pub pipe_spacing: f32,
    pub gap_margin: f32,
    pub spawn_offset: f32,
    pub retire_margin: f32,
    pub initial_obstacles: usize,
    pub min_lookahead: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            tick_rate: TICK_RATE,

            body_size: BODY_SIZE,
            body_x: PLAYFIELD_WIDTH * 0.25,
            body_start_y: PLAYFIELD_HEIGHT / 2.0,
            gravity: GRAVITY,
            flap_velocity: FLAP_VELOCITY,

            pipe_width: PIPE_WIDTH,
            pipe_speed: PIPE_SPEED,
            gap_height: GAP_HEIGHT,
            pipe_spacing: PIPE_SPACING,
            gap_margin: GAP_MARGIN,
            spawn_offset: SPAWN_OFFSET,
            retire_margin: RETIRE_MARGIN,
            initial_obstacles: INITIAL_OBSTACLES,
            min_lookahead: MIN_LOOKAHEAD,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON, filling unspecified fields with defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json).inspect_err(|e| {
            log::warn!("Rejected tuning file {}: {}", path.display(), e);
        })?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Fixed logical timestep in seconds
    #[inline]
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    /// X position of the first seeded obstacle, also the spawn frontier
    #[inline]
    pub fn spawn_x(&self) -> f32 {
        self.playfield_width + self.spawn_offset
    }

    /// Inclusive range gap centres are drawn from
    #[inline]
    pub fn gap_range(&self) -> (f32, f32) {
        (self.gap_margin, self.playfield_height - self.gap_margin)
    }

    /// Body centre on reset
    #[inline]
    pub fn body_start(&self) -> Vec2 {
        Vec2::new(self.body_x, self.body_start_y)
    }

    /// Reject geometry that would make the playfield impassable or overlapping
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("tick_rate", self.tick_rate as f32),
            ("body_size", self.body_size),
            ("gravity", self.gravity),
            ("pipe_width", self.pipe_width),
            ("pipe_speed", self.pipe_speed),
            ("gap_height", self.gap_height),
            ("pipe_spacing", self.pipe_spacing),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        for (field, value) in [
            ("spawn_offset", self.spawn_offset),
            ("retire_margin", self.retire_margin),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if !self.flap_velocity.is_finite() || self.flap_velocity >= 0.0 {
            return Err(ConfigError::FlapNotUpward(self.flap_velocity));
        }
        if self.gap_height >= self.playfield_height {
            return Err(ConfigError::GapTooTall {
                gap: self.gap_height,
                height: self.playfield_height,
            });
        }
        if self.body_size >= self.gap_height {
            return Err(ConfigError::BodyLargerThanGap {
                size: self.body_size,
                gap: self.gap_height,
            });
        }
        if self.pipe_spacing <= self.pipe_width {
            return Err(ConfigError::SpacingTooNarrow {
                spacing: self.pipe_spacing,
                width: self.pipe_width,
            });
        }
        if !self.gap_margin.is_finite() || self.gap_margin <= self.gap_height / 2.0 {
            return Err(ConfigError::MarginTooSmall {
                margin: self.gap_margin,
                gap: self.gap_height,
            });
        }
        if self.gap_margin * 2.0 > self.playfield_height {
            return Err(ConfigError::MarginTooLarge {
                margin: self.gap_margin,
                height: self.playfield_height,
            });
        }

        let half = self.body_size / 2.0;
        let inside_x = self.body_x >= half && self.body_x + half <= self.playfield_width;
        let inside_y = self.body_start_y >= half && self.body_start_y + half <= self.playfield_height;
        if !inside_x || !inside_y {
            return Err(ConfigError::BodyOutsidePlayfield {
                x: self.body_x,
                y: self.body_start_y,
            });
        }

        if self.min_lookahead == 0 || self.initial_obstacles < self.min_lookahead {
            return Err(ConfigError::Lookahead {
                initial: self.initial_obstacles,
                lookahead: self.min_lookahead,
            });
        }

        Ok(())
    }
}
