//! Core domain: seeded random number generation for deterministic runs.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic integer-range sampler keyed by an explicit seed.
pub trait SeededRng {
    /// Uniform integer in `[min, max_exclusive)`. Returns `min` for an empty range.
    fn next(&mut self, min: i32, max_exclusive: i32) -> i32;

    /// Uniform float in `[min, max]`. Returns `min` when `max <= min`.
    fn next_f32(&mut self, min: f32, max: f32) -> f32;
}

/// ChaCha-backed run RNG. The plan and the spawner draw from separate streams
/// of the same seed so that spawning never shifts the plan.
#[derive(Resource, Debug, Clone)]
pub struct RunRng {
    seed: u64,
    rng: ChaCha8Rng,
}

impl RunRng {
    pub const PLAN_STREAM: u64 = 0;
    pub const SPAWN_STREAM: u64 = 1;

    pub fn new(seed: u64, stream: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(stream);
        Self { seed, rng }
    }

    pub fn for_plan(seed: u64) -> Self {
        Self::new(seed, Self::PLAN_STREAM)
    }

    pub fn for_spawns(seed: u64) -> Self {
        Self::new(seed, Self::SPAWN_STREAM)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for RunRng {
    fn default() -> Self {
        Self::for_spawns(0)
    }
}

impl SeededRng for RunRng {
    fn next(&mut self, min: i32, max_exclusive: i32) -> i32 {
        if max_exclusive <= min {
            return min;
        }
        self.rng.random_range(min..max_exclusive)
    }

    fn next_f32(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..=max)
    }
}

/// Returns `seed` unless it is 0, in which case a fresh nonzero seed is drawn.
pub fn resolve_seed(seed: u64) -> u64 {
    if seed != 0 {
        return seed;
    }
    rand::rng().random_range(1..=u64::MAX)
}

/// Replays fixed values, falling back to the low end of each range once exhausted.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ScriptedRng {
    pub ints: std::collections::VecDeque<i32>,
    pub floats: std::collections::VecDeque<f32>,
}

#[cfg(test)]
impl ScriptedRng {
    pub fn new(ints: &[i32], floats: &[f32]) -> Self {
        Self {
            ints: ints.iter().copied().collect(),
            floats: floats.iter().copied().collect(),
        }
    }
}

#[cfg(test)]
impl SeededRng for ScriptedRng {
    fn next(&mut self, min: i32, max_exclusive: i32) -> i32 {
        let value = self.ints.pop_front().unwrap_or(min);
        if max_exclusive <= min {
            min
        } else {
            value.clamp(min, max_exclusive - 1)
        }
    }

    fn next_f32(&mut self, min: f32, max: f32) -> f32 {
        self.floats.pop_front().unwrap_or(min)
    }
}
