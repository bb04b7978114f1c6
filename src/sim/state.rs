//! Session state and the phase machine
//!
//! A [`Session`] owns everything one run needs: the body, the obstacle field,
//! the score and the random source used for gap placement. It is owned by the
//! caller and passed by `&mut` into each tick; there is no global state.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::collision::Hit;
use super::snapshot::Snapshot;
use super::spawner::ObstacleField;
use crate::error::ConfigError;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first flap; obstacles are shown but static
    #[default]
    Idle,
    /// Active gameplay
    Playing,
    /// Run ended; everything frozen until restart
    GameOver,
}

/// One simulation session
///
/// Generic over the random source so tests and replays can inject their own;
/// the default is a seeded PCG stream.
#[derive(Debug, Clone)]
pub struct Session<R: Rng = Pcg32> {
    /// Validated constants, fixed for the session's lifetime
    tuning: Tuning,
    /// Gap placement source
    rng: R,
    /// The controlled body
    pub body: Body,
    /// Active obstacles, x-ascending
    pub obstacles: ObstacleField,
    /// Obstacles passed since the last reset
    pub score: u32,
    /// Current phase
    pub phase: GamePhase,
    /// Playing ticks since the run started
    pub time_ticks: u64,
    /// What ended the last run, if it has ended
    pub last_hit: Option<Hit>,
}

impl Session<Pcg32> {
    /// Create a session with a PCG stream seeded from `seed`
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(tuning, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Session<R> {
    /// Create a session drawing gap centres from `rng`
    ///
    /// Fails if the tuning describes impassable or overlapping geometry.
    pub fn with_rng(tuning: Tuning, mut rng: R) -> Result<Self, ConfigError> {
        tuning.validate()?;
        let obstacles = ObstacleField::seeded(&tuning, &mut rng);
        Ok(Self {
            body: Body::new(&tuning),
            obstacles,
            score: 0,
            phase: GamePhase::Idle,
            time_ticks: 0,
            last_hit: None,
            tuning,
            rng,
        })
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Flap input: starts a run from Idle, flaps while Playing, ignored otherwise
    pub fn flap_event(&mut self) {
        match self.phase {
            GamePhase::Idle => {
                self.start();
                self.body.flap(self.tuning.flap_velocity);
            }
            GamePhase::Playing => self.body.flap(self.tuning.flap_velocity),
            GamePhase::GameOver => {}
        }
    }

    /// Restart input: only accepted after a game over, returns to Idle
    pub fn restart_event(&mut self) {
        if self.phase != GamePhase::GameOver {
            return;
        }
        self.body.reset(&self.tuning);
        self.obstacles.reseed(&self.tuning, &mut self.rng);
        self.score = 0;
        self.time_ticks = 0;
        self.last_hit = None;
        self.phase = GamePhase::Idle;
        log::info!("Session reset, waiting for first flap");
    }

    /// Advance one fixed step with no new input
    pub fn tick(&mut self, dt: f32) {
        super::tick::tick(self, &super::tick::TickInput::default(), dt);
    }

    /// Immutable view for a renderer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Same reset as a fresh session, keeping the previewed obstacles
    fn start(&mut self) {
        self.body.reset(&self.tuning);
        self.obstacles.clear_passed();
        if self.obstacles.is_empty() {
            self.obstacles.seed(&self.tuning, &mut self.rng);
        }
        self.score = 0;
        self.time_ticks = 0;
        self.last_hit = None;
        self.phase = GamePhase::Playing;
        log::info!("Run started");
    }

    /// Terminal collision: freeze the body and stop the run
    pub(crate) fn end(&mut self, hit: Hit) {
        self.body.alive = false;
        self.last_hit = Some(hit);
        self.phase = GamePhase::GameOver;
        log::info!(
            "Game over ({:?}) after {} ticks, score {}",
            hit,
            self.time_ticks,
            self.score
        );
    }

    /// Split borrow used by the tick driver
    pub(crate) fn parts_mut(&mut self) -> (&Tuning, &mut R, &mut Body, &mut ObstacleField) {
        (
            &self.tuning,
            &mut self.rng,
            &mut self.body,
            &mut self.obstacles,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn session() -> Session {
        Session::new(Tuning::default(), 12345).unwrap()
    }

    #[test]
    fn test_new_session_is_idle() {
        let s = session();
        assert_eq!(s.phase, GamePhase::Idle);
        assert_eq!(s.score, 0);
        assert_eq!(s.body.pos, Vec2::new(100.0, 300.0));
        assert_eq!(s.body.vel_y, 0.0);
        assert_eq!(s.obstacles.len(), 3);
    }

    #[test]
    fn test_invalid_tuning_rejected() {
        let tuning = Tuning {
            pipe_spacing: 30.0,
            ..Default::default()
        };
        assert!(matches!(
            Session::new(tuning, 1),
            Err(ConfigError::SpacingTooNarrow { .. })
        ));
    }

    #[test]
    fn test_flap_from_idle_starts_run() {
        let mut s = session();
        s.flap_event();
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.body.vel_y, -320.0);
        assert_eq!(s.score, 0);
    }

    #[test]
    fn test_flap_while_playing_keeps_phase() {
        let mut s = session();
        s.flap_event();
        s.body.vel_y = 200.0;
        s.flap_event();
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.body.vel_y, -320.0);
    }

    #[test]
    fn test_restart_ignored_unless_game_over() {
        let mut s = session();
        let gaps: Vec<f32> = s.obstacles.iter().map(|o| o.gap_center_y).collect();
        s.restart_event();
        assert_eq!(s.phase, GamePhase::Idle);
        s.flap_event();
        s.restart_event();
        assert_eq!(s.phase, GamePhase::Playing);
        let after: Vec<f32> = s.obstacles.iter().map(|o| o.gap_center_y).collect();
        assert_eq!(gaps, after);
    }

    #[test]
    fn test_game_over_ignores_flap_and_restart_reseeds() {
        let mut s = session();
        s.flap_event();
        s.score = 4;
        s.end(Hit::Ground);
        assert!(!s.body.alive);

        let frozen = s.body.clone();
        s.flap_event();
        assert_eq!(s.phase, GamePhase::GameOver);
        assert_eq!(s.body, frozen);

        let old: Vec<f32> = s.obstacles.iter().map(|o| o.gap_center_y).collect();
        s.restart_event();
        assert_eq!(s.phase, GamePhase::Idle);
        assert_eq!(s.score, 0);
        assert!(s.body.alive);
        assert_eq!(s.body.pos, Vec2::new(100.0, 300.0));
        assert_eq!(s.body.vel_y, 0.0);
        assert_eq!(s.last_hit, None);

        let xs: Vec<f32> = s.obstacles.iter().map(|o| o.x).collect();
        assert_eq!(xs, vec![440.0, 660.0, 880.0]);
        let fresh: Vec<f32> = s.obstacles.iter().map(|o| o.gap_center_y).collect();
        assert_ne!(old, fresh);
        assert!(fresh.iter().all(|&g| (120.0..=480.0).contains(&g)));
    }

    #[test]
    fn test_start_clears_passed_flags() {
        let mut s = session();
        for obstacle in s.obstacles.iter_mut() {
            obstacle.passed = true;
        }
        s.flap_event();
        assert_eq!(s.obstacles.passed_count(), 0);
        assert_eq!(s.obstacles.passed_count() as u32, s.score);
    }

    #[test]
    fn test_injected_rng_is_deterministic() {
        let a = Session::with_rng(Tuning::default(), Pcg32::seed_from_u64(42)).unwrap();
        let b = Session::new(Tuning::default(), 42).unwrap();
        let gaps_a: Vec<f32> = a.obstacles.iter().map(|o| o.gap_center_y).collect();
        let gaps_b: Vec<f32> = b.obstacles.iter().map(|o| o.gap_center_y).collect();
        assert_eq!(gaps_a, gaps_b);
    }
}
