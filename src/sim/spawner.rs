//! Obstacle field: lazy spawning and retirement
//!
//! The obstacle stream is conceptually infinite but only a handful of
//! obstacles are ever materialised. They live in a ring buffer ordered by x;
//! new ones are appended at the back, retired ones are popped from the front.
//! All obstacles share one speed, so insertion order is also positional order.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::obstacle::Obstacle;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: VecDeque<Obstacle>,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a field seeded with the initial obstacle run
    pub fn seeded<R: Rng>(tuning: &Tuning, rng: &mut R) -> Self {
        let mut field = Self::new();
        field.seed(tuning, rng);
        field
    }

    /// Fill an empty field with `initial_obstacles` obstacles starting at the spawn frontier
    pub fn seed<R: Rng>(&mut self, tuning: &Tuning, rng: &mut R) {
        if !self.obstacles.is_empty() {
            return;
        }
        let start = tuning.spawn_x();
        for i in 0..tuning.initial_obstacles {
            let x = start + i as f32 * tuning.pipe_spacing;
            self.obstacles.push_back(Obstacle::spawn(x, tuning, rng));
        }
        log::debug!(
            "Seeded {} obstacles from x={}",
            tuning.initial_obstacles,
            start
        );
    }

    /// Drop every obstacle and seed a fresh run
    pub fn reseed<R: Rng>(&mut self, tuning: &Tuning, rng: &mut R) {
        self.obstacles.clear();
        self.seed(tuning, rng);
    }

    /// Scroll every obstacle, then spawn and retire at most once each
    pub fn step<R: Rng>(&mut self, tuning: &Tuning, rng: &mut R, dt: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.advance(tuning.pipe_speed, dt);
        }

        self.spawn_if_needed(tuning, rng);
        self.retire(tuning);
    }

    /// Append one obstacle when the last one has come within a spacing of the
    /// frontier or the field has fallen below the lookahead count
    fn spawn_if_needed<R: Rng>(&mut self, tuning: &Tuning, rng: &mut R) {
        let Some(last_x) = self.obstacles.back().map(|o| o.x) else {
            self.seed(tuning, rng);
            return;
        };

        let near_frontier = last_x + tuning.pipe_spacing <= tuning.spawn_x();
        let below_lookahead = self.obstacles.len() < tuning.min_lookahead;
        if !near_frontier && !below_lookahead {
            return;
        }

        let x = last_x + tuning.pipe_spacing;
        let obstacle = Obstacle::spawn(x, tuning, rng);
        log::debug!("Spawned obstacle at x={:.1} gap={:.1}", x, obstacle.gap_center_y);
        self.obstacles.push_back(obstacle);
    }

    /// Pop retired obstacles from the front
    fn retire(&mut self, tuning: &Tuning) {
        let mut retired = 0;
        // Never retire below the lookahead count
        while self.obstacles.len() > tuning.min_lookahead
            && self
                .obstacles
                .front()
                .is_some_and(|o| o.is_retired(tuning.pipe_width, tuning.retire_margin))
        {
            self.obstacles.pop_front();
            retired += 1;
        }
        if retired > 0 {
            log::debug!("Retired {} obstacle(s), {} active", retired, self.obstacles.len());
        }
    }

    /// Clear every `passed` flag (obstacles stay where they are)
    pub fn clear_passed(&mut self) {
        for obstacle in &mut self.obstacles {
            obstacle.passed = false;
        }
    }

    /// Append an obstacle directly, keeping x-ascending order
    ///
    /// Returns the obstacle back if it would land behind the current last one.
    pub fn push(&mut self, obstacle: Obstacle) -> Result<(), Obstacle> {
        if self.obstacles.back().is_some_and(|last| obstacle.x < last.x) {
            return Err(obstacle);
        }
        self.obstacles.push_back(obstacle);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Obstacle> {
        self.obstacles.iter_mut()
    }

    pub fn front(&self) -> Option<&Obstacle> {
        self.obstacles.front()
    }

    pub fn back(&self) -> Option<&Obstacle> {
        self.obstacles.back()
    }

    /// Number of obstacles whose `passed` flag is set
    pub fn passed_count(&self) -> usize {
        self.obstacles.iter().filter(|o| o.passed).count()
    }

    /// True when obstacles are in strictly ascending x order
    pub fn is_sorted(&self) -> bool {
        self.obstacles
            .iter()
            .zip(self.obstacles.iter().skip(1))
            .all(|(a, b)| a.x < b.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_seed_positions() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let field = ObstacleField::seeded(&tuning, &mut rng);

        let xs: Vec<f32> = field.iter().map(|o| o.x).collect();
        assert_eq!(xs, vec![440.0, 660.0, 880.0]);
        assert!(field.is_sorted());
    }

    #[test]
    fn test_seed_does_not_overwrite() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut field = ObstacleField::new();
        field.push(Obstacle::new(10.0, 300.0)).unwrap();
        field.seed(&tuning, &mut rng);
        assert_eq!(field.len(), 1);
    }

    #[test]
    fn test_push_rejects_out_of_order() {
        let mut field = ObstacleField::new();
        field.push(Obstacle::new(100.0, 300.0)).unwrap();
        let rejected = field.push(Obstacle::new(50.0, 300.0));
        assert!(rejected.is_err());
        assert_eq!(field.len(), 1);
    }

    #[test]
    fn test_spawn_when_last_nears_frontier() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut field = ObstacleField::new();
        field.push(Obstacle::new(0.0, 300.0)).unwrap();
        field.push(Obstacle::new(220.5, 300.0)).unwrap();

        // Last obstacle moves to 219.5, and 219.5 + 220 <= 440
        field.step(&tuning, &mut rng, 1.0 / 140.0);
        assert_eq!(field.len(), 3);
        let last = field.back().unwrap();
        assert!((last.x - 439.5).abs() < 1e-3);
    }

    #[test]
    fn test_no_spawn_far_from_frontier() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut field = ObstacleField::seeded(&tuning, &mut rng);
        let before: Vec<f32> = field.iter().map(|o| o.gap_center_y).collect();
        field.step(&tuning, &mut rng, tuning.dt());
        assert_eq!(field.len(), 3);
        let after: Vec<f32> = field.iter().map(|o| o.gap_center_y).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_retire_head() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut field = ObstacleField::new();
        field.push(Obstacle::new(-109.0, 300.0)).unwrap();
        field.push(Obstacle::new(111.0, 300.0)).unwrap();
        field.push(Obstacle::new(331.0, 300.0)).unwrap();

        // Moves everything 2 units left; head trailing edge ends at -51
        field.step(&tuning, &mut rng, 2.0 / 140.0);
        assert_eq!(field.len(), 2);
        assert!((field.front().unwrap().x - 109.0).abs() < 1e-3);
    }

    #[test]
    fn test_empty_field_reseeds_on_step() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut field = ObstacleField::new();
        field.step(&tuning, &mut rng, tuning.dt());
        assert_eq!(field.len(), tuning.initial_obstacles);
    }

    #[test]
    fn test_long_run_keeps_lookahead_and_spacing() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut field = ObstacleField::seeded(&tuning, &mut rng);

        for _ in 0..5000 {
            field.step(&tuning, &mut rng, tuning.dt());
            assert!(field.len() >= tuning.min_lookahead);
            assert!(field.is_sorted());
            for (a, b) in field.iter().zip(field.iter().skip(1)) {
                assert!((b.x - a.x - tuning.pipe_spacing).abs() < 0.05);
            }
        }
    }

    #[test]
    fn test_clear_passed() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(2);
        let mut field = ObstacleField::seeded(&tuning, &mut rng);
        for obstacle in field.iter_mut() {
            obstacle.passed = true;
        }
        assert_eq!(field.passed_count(), 3);
        field.clear_passed();
        assert_eq!(field.passed_count(), 0);
    }
}
