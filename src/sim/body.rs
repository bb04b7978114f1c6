//! The controlled body
//!
//! A single square body at a fixed horizontal position. Gravity pulls it down,
//! a flap overrides its vertical velocity with an upward impulse.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Centre position; `x` never changes during a session
    pub pos: Vec2,
    /// Vertical velocity (positive = downward)
    pub vel_y: f32,
    /// Side of the square bounding box
    pub size: f32,
    /// Cleared on a terminal collision, restored on reset
    pub alive: bool,
}

impl Body {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.body_start(),
            vel_y: 0.0,
            size: tuning.body_size,
            alive: true,
        }
    }

    /// Return to the start position with zero velocity
    pub fn reset(&mut self, tuning: &Tuning) {
        *self = Self::new(tuning);
    }

    /// Semi-implicit Euler step under constant gravity
    pub fn integrate(&mut self, gravity: f32, dt: f32) {
        if !self.alive {
            return;
        }
        self.vel_y += gravity * dt;
        self.pos.y += self.vel_y * dt;
    }

    /// Override vertical velocity with the flap impulse
    pub fn flap(&mut self, flap_velocity: f32) {
        if self.alive {
            self.vel_y = flap_velocity;
        }
    }

    pub fn bounding_box(&self) -> Rect {
        Rect::centered(self.pos, self.size)
    }
}
