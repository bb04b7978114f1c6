//! Input recording and deterministic replay
//!
//! A replay is the seed, the tuning and one [`TickInput`] per tick. Running it
//! rebuilds the same seeded session and feeds the same inputs, so the final
//! score, phase and obstacle layout come out identical.

use serde::{Deserialize, Serialize};

use super::state::Session;
use super::tick::{TickInput, tick};
use crate::error::ConfigError;
use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Replay {
    pub seed: u64,
    pub tuning: Tuning,
    /// One entry per tick, in order
    pub inputs: Vec<TickInput>,
}

impl Replay {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            tuning,
            inputs: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Replay every recorded tick on a fresh session
    pub fn run(&self) -> Result<Session, ConfigError> {
        let mut session = Session::new(self.tuning.clone(), self.seed)?;
        let dt = self.tuning.dt();
        for input in &self.inputs {
            tick(&mut session, input, dt);
        }
        log::debug!(
            "Replayed {} ticks: {:?}, score {}",
            self.inputs.len(),
            session.phase,
            session.score
        );
        Ok(session)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let replay: Self = serde_json::from_str(json)?;
        replay.tuning.validate()?;
        Ok(replay)
    }
}

/// Drives a live session while recording every tick's input
#[derive(Debug)]
pub struct Recorder {
    session: Session,
    replay: Replay,
}

impl Recorder {
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, ConfigError> {
        let session = Session::new(tuning.clone(), seed)?;
        Ok(Self {
            session,
            replay: Replay::new(seed, tuning),
        })
    }

    /// Tick the live session and record the input
    pub fn tick(&mut self, input: &TickInput) {
        let dt = self.replay.tuning.dt();
        tick(&mut self.session, input, dt);
        self.replay.inputs.push(input.clone());
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Stop recording and hand back the replay
    pub fn finish(self) -> Replay {
        self.replay
    }
}
