//! Flappy Sim - A side-scrolling gap-obstacle arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, session state)
//! - `tuning`: Data-driven game balance
//! - `view`: Presentation helpers for an external renderer
//! - `error`: Configuration errors

pub mod error;
pub mod sim;
pub mod tuning;
pub mod view;

pub use error::ConfigError;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 400.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Body defaults
    pub const BODY_SIZE: f32 = 28.0;
    /// Downward acceleration (units/s²)
    pub const GRAVITY: f32 = 900.0;
    /// Velocity set by a flap (negative = upward)
    pub const FLAP_VELOCITY: f32 = -320.0;

    /// Obstacle defaults
    pub const PIPE_WIDTH: f32 = 60.0;
    pub const PIPE_SPEED: f32 = 140.0;
    pub const GAP_HEIGHT: f32 = 160.0;
    pub const PIPE_SPACING: f32 = 220.0;
    /// Gap centres stay this far from the top and bottom edges
    pub const GAP_MARGIN: f32 = 120.0;
    /// First obstacle spawns this far past the right edge
    pub const SPAWN_OFFSET: f32 = 40.0;
    /// Obstacles retire once their trailing edge is this far left of x=0
    pub const RETIRE_MARGIN: f32 = 50.0;
    pub const INITIAL_OBSTACLES: usize = 3;
    pub const MIN_LOOKAHEAD: usize = 2;
}
