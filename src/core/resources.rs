//! Core domain: shared resources for run configuration and room bookkeeping.

use bevy::prelude::*;

use crate::content::RunDefaults;

/// Environment variable that pins the run seed, overriding `run_defaults.ron`.
pub const SEED_ENV_VAR: &str = "DELVERUN_SEED";

/// Parameters for building a run plan.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Seed for the run; 0 means "pick one at random when the run starts"
    pub seed: u64,
    pub total_rooms: usize,
    /// Number of consecutive plan slots drawn from the same theme
    pub rooms_per_theme: usize,
    /// Theme ids in block order. Empty uses every registered theme in file order.
    pub theme_order: Vec<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            total_rooms: 6,
            rooms_per_theme: 3,
            theme_order: Vec::new(),
        }
    }
}

impl RunConfig {
    pub fn from_defaults(defaults: &RunDefaults) -> Self {
        Self {
            seed: defaults.seed,
            total_rooms: defaults.total_rooms,
            rooms_per_theme: defaults.rooms_per_theme,
            theme_order: defaults.theme_order.clone(),
        }
    }

    pub fn with_seed_override(mut self, seed: Option<u64>) -> Self {
        if let Some(seed) = seed {
            self.seed = seed;
        }
        self
    }
}

/// Reads the seed override from the environment. Unparseable values are ignored.
pub fn seed_from_env() -> Option<u64> {
    let raw = std::env::var(SEED_ENV_VAR).ok()?;
    match raw.trim().parse::<u64>() {
        Ok(seed) => Some(seed),
        Err(_) => {
            warn!("[CONFIG] Ignoring {}='{}': not a u64", SEED_ENV_VAR, raw);
            None
        }
    }
}

/// Identifies one loaded room instance. Bumped every time a room is loaded so
/// that trackers and gates from a torn-down room can never touch the new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RoomGeneration(pub u32);

impl RoomGeneration {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}
