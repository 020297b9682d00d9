//! Rooms domain: spawn profile execution, instant or staggered.

use std::collections::VecDeque;

use bevy::prelude::*;

use crate::combat::spawn_enemy;
use crate::content::{ContentRegistry, DelayRangeDef, SpawnProfileDef};
use crate::core::{RoomGeneration, SeededRng};
use crate::rooms::components::RoomScoped;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnTiming {
    /// Everything spawns while the room loads
    Instant,
    /// One enemy at a time after an initial delay
    Gradual {
        initial_delay: f32,
        per_spawn_delay: DelayRangeDef,
    },
}

/// Enemies still to spawn for the active room, with the time left until the next one.
#[derive(Debug, Clone)]
pub struct SpawnSequence {
    queue: VecDeque<String>,
    timing: SpawnTiming,
    wait: f32,
}

impl SpawnSequence {
    /// Draw a count for every profile entry and queue that many copies, in entry order.
    pub fn resolve<R: SeededRng>(profile: &SpawnProfileDef, rng: &mut R) -> Self {
        let mut queue = VecDeque::new();
        for entry in &profile.entries {
            let min = entry.min_count as i32;
            let max_exclusive = (entry.max_count as i32).saturating_add(1);
            let count = rng.next(min, max_exclusive).max(0);
            for _ in 0..count {
                queue.push_back(entry.enemy_id.clone());
            }
        }

        let (timing, wait) = if profile.gradual {
            let initial_delay = profile.initial_delay.max(0.0);
            (
                SpawnTiming::Gradual {
                    initial_delay,
                    per_spawn_delay: profile.per_spawn_delay,
                },
                initial_delay,
            )
        } else {
            (SpawnTiming::Instant, 0.0)
        };

        Self {
            queue,
            timing,
            wait,
        }
    }

    pub fn timing(&self) -> SpawnTiming {
        self.timing
    }

    /// Enemies not yet spawned
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn drain_all(&mut self) -> Vec<String> {
        self.queue.drain(..).collect()
    }

    /// Advance by `delta` seconds and return the enemies due now. A gradual
    /// sequence releases at most one enemy per tick, and the next delay only
    /// starts counting from that spawn.
    pub fn tick<R: SeededRng>(&mut self, delta: f32, rng: &mut R) -> Vec<String> {
        let per_spawn_delay = match self.timing {
            SpawnTiming::Instant => return self.drain_all(),
            SpawnTiming::Gradual {
                per_spawn_delay, ..
            } => per_spawn_delay,
        };

        if self.queue.is_empty() {
            return Vec::new();
        }

        self.wait -= delta.max(0.0);
        if self.wait > 0.0 {
            return Vec::new();
        }

        let Some(enemy_id) = self.queue.pop_front() else {
            return Vec::new();
        };
        if !self.queue.is_empty() {
            self.wait = rng
                .next_f32(per_spawn_delay.min, per_spawn_delay.max)
                .max(0.0);
        }
        vec![enemy_id]
    }
}

/// Uniform pick with replacement.
pub fn pick_spawn_point<R: SeededRng>(points: &[Vec2], rng: &mut R) -> Option<Vec2> {
    if points.is_empty() {
        return None;
    }
    let index = rng.next(0, points.len() as i32) as usize;
    points.get(index).copied()
}

/// Spawn one tracked enemy at a random spawn point of the room.
/// Returns None (and logs) when the enemy id or the spawn points are unusable.
pub(crate) fn spawn_at_random_point<R: SeededRng>(
    commands: &mut Commands,
    registry: &ContentRegistry,
    enemy_id: &str,
    points: &[Vec2],
    rng: &mut R,
    room: RoomGeneration,
) -> Option<Entity> {
    let Some(def) = registry.enemies.get(enemy_id) else {
        error!("[SPAWN] Unknown enemy '{}', skipping", enemy_id);
        return None;
    };
    let Some(position) = pick_spawn_point(points, rng) else {
        error!("[SPAWN] No spawn points for '{}', skipping", enemy_id);
        return None;
    };

    let entity = spawn_enemy(commands, def, position, room);
    commands.entity(entity).insert(RoomScoped);
    debug!(
        "[SPAWN] '{}' at ({:.0}, {:.0}) for room {}",
        enemy_id, position.x, position.y, room.0
    );
    Some(entity)
}
