//! Fixed timestep simulation tick
//!
//! Core game loop that advances a session deterministically.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{self, CollisionResult};
use super::state::{GamePhase, Session};
use crate::consts::MAX_SUBSTEPS;
use crate::error::ConfigError;

/// Input commands for a single tick (deterministic)
///
/// Events are recorded as they arrive and applied together at the start of
/// the next tick, never in the middle of one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Flap (space/click/tap)
    pub flap: bool,
    /// Restart after game over
    pub restart: bool,
    /// Idle/demo mode - the autopilot plays the game
    #[serde(default)]
    pub autopilot: bool,
}

impl TickInput {
    pub fn flap() -> Self {
        Self {
            flap: true,
            ..Default::default()
        }
    }

    pub fn restart() -> Self {
        Self {
            restart: true,
            ..Default::default()
        }
    }
}

/// Advance the session by one fixed timestep
///
/// Order: input events, body integration, obstacle scroll/spawn/retire, then
/// collision and scoring. Outside `Playing` only input events have an effect.
pub fn tick<R: Rng>(session: &mut Session<R>, input: &TickInput, dt: f32) -> CollisionResult {
    let mut input = input.clone();
    if input.autopilot {
        autopilot(session, &mut input);
    }

    // A flap batched with an accepted restart belongs to the finished run
    let restarted = input.restart && session.phase == GamePhase::GameOver;
    if input.restart {
        session.restart_event();
    }
    if input.flap && !restarted {
        session.flap_event();
    }

    if session.phase != GamePhase::Playing {
        return CollisionResult::miss();
    }

    session.time_ticks += 1;

    let (tuning, rng, body, obstacles) = session.parts_mut();
    body.integrate(tuning.gravity, dt);
    obstacles.step(tuning, rng, dt);
    let result = collision::detect(body, obstacles, tuning);

    session.score += result.scored;
    if let Some(hit) = result.hit {
        session.end(hit);
    }

    result
}

/// Demo-mode decisions: start, restart and keep the body near the next gap
fn autopilot<R: Rng>(session: &Session<R>, input: &mut TickInput) {
    match session.phase {
        GamePhase::Idle => input.flap = true,
        GamePhase::GameOver => input.restart = true,
        GamePhase::Playing => {
            let tuning = session.tuning();
            let body = &session.body;
            let body_left = body.bounding_box().min.x;

            // First obstacle the body can still touch
            let aim_y = session
                .obstacles
                .iter()
                .find(|o| o.trailing_edge(tuning.pipe_width) > body_left)
                .map(|o| o.gap_center_y + tuning.gap_height * 0.15)
                .unwrap_or(tuning.playfield_height / 2.0);

            let near_ground = body.pos.y + body.size > tuning.playfield_height;
            if (body.pos.y > aim_y && body.vel_y > 0.0) || near_ground {
                input.flap = true;
            }
        }
    }
}

/// Converts variable frame time into whole fixed ticks
#[derive(Debug, Clone)]
pub struct FixedStep {
    dt: f32,
    accumulator: f32,
}

impl FixedStep {
    /// Frame deltas above this are clamped (tab switches, debugger pauses)
    pub const MAX_FRAME_DT: f32 = 0.25;

    pub fn new(dt: f32) -> Result<Self, ConfigError> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(ConfigError::NonPositive { field: "dt", value: dt });
        }
        Ok(Self {
            dt,
            accumulator: 0.0,
        })
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Leftover time not yet consumed by a tick
    pub fn pending(&self) -> f32 {
        self.accumulator
    }

    /// Run as many ticks as `frame_dt` covers, capped at `MAX_SUBSTEPS`
    ///
    /// One-shot events in `input` are consumed by the first tick; the
    /// autopilot flag persists. Returns the number of ticks run.
    pub fn advance<R: Rng>(
        &mut self,
        session: &mut Session<R>,
        input: &mut TickInput,
        frame_dt: f32,
    ) -> u32 {
        // NaN slips through clamp and would stall the accumulator for good
        let frame_dt = if frame_dt.is_finite() { frame_dt } else { 0.0 };
        self.accumulator += frame_dt.clamp(0.0, Self::MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= self.dt && substeps < MAX_SUBSTEPS {
            tick(session, input, self.dt);
            self.accumulator -= self.dt;
            substeps += 1;

            // Clear one-shot inputs after processing
            input.flap = false;
            input.restart = false;
        }

        if substeps == MAX_SUBSTEPS && self.accumulator >= self.dt {
            log::debug!("Dropping {:.3}s of backlog", self.accumulator);
            self.accumulator %= self.dt;
        }

        substeps
    }
}
