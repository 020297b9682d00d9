//! Rooms domain: deterministic run plans built from themed blueprint pools.

use bevy::prelude::*;

use crate::content::{ContentRegistry, RoomBlueprintDef, ThemeDef};
use crate::core::{RunRng, SeededRng, resolve_seed};

/// One resolved slot of a run plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedRoom {
    pub slot: usize,
    pub theme_id: String,
    /// Index into the theme's pool the blueprint was drawn from
    pub pool_index: usize,
    pub blueprint_id: String,
}

/// Ordered blueprint choices for a run. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunPlan {
    /// Effective seed, never 0 for a built plan
    pub seed: u64,
    /// Number of rooms asked for. The plan is shorter if slots were skipped.
    pub requested: usize,
    rooms: Vec<PlannedRoom>,
}

impl RunPlan {
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PlannedRoom> {
        self.rooms.get(index)
    }

    pub fn rooms(&self) -> &[PlannedRoom] {
        &self.rooms
    }

    pub fn is_truncated(&self) -> bool {
        self.rooms.len() < self.requested
    }
}

/// Builds run plans by drawing blueprints from theme pools in blocks.
pub struct RunPlanBuilder<'a> {
    registry: &'a ContentRegistry,
}

impl<'a> RunPlanBuilder<'a> {
    pub fn new(registry: &'a ContentRegistry) -> Self {
        Self { registry }
    }

    /// Build a plan from `seed` (0 draws a fresh one) on the plan RNG stream.
    pub fn build(
        &self,
        seed: u64,
        total_rooms: usize,
        rooms_per_theme: usize,
        themes: &[&ThemeDef],
    ) -> RunPlan {
        let seed = resolve_seed(seed);
        let mut rng = RunRng::for_plan(seed);
        self.build_with(&mut rng, seed, total_rooms, rooms_per_theme, themes)
    }

    /// Build a plan drawing from an explicit RNG. `seed` is recorded as-is.
    pub fn build_with<R: SeededRng>(
        &self,
        rng: &mut R,
        seed: u64,
        total_rooms: usize,
        rooms_per_theme: usize,
        themes: &[&ThemeDef],
    ) -> RunPlan {
        let mut plan = RunPlan {
            seed,
            requested: total_rooms,
            rooms: Vec::with_capacity(total_rooms),
        };

        if themes.is_empty() {
            if total_rooms > 0 {
                error!("[PLAN] No themes available, the run plan is empty");
            }
            return plan;
        }

        let rooms_per_theme = if rooms_per_theme == 0 {
            warn!("[PLAN] rooms_per_theme is 0, treating it as 1");
            1
        } else {
            rooms_per_theme
        };

        for slot in 0..total_rooms {
            let block = slot / rooms_per_theme;
            let theme = themes[block.min(themes.len() - 1)];

            if theme.room_ids.is_empty() {
                error!(
                    "[PLAN] Theme '{}' has an empty pool, skipping slot {}",
                    theme.id, slot
                );
                continue;
            }

            let pool_index = rng.next(0, theme.room_ids.len() as i32) as usize;
            let blueprint_id = &theme.room_ids[pool_index];

            let Some(blueprint) = self.registry.rooms.get(blueprint_id) else {
                error!(
                    "[PLAN] Theme '{}' names unknown blueprint '{}', skipping slot {}",
                    theme.id, blueprint_id, slot
                );
                continue;
            };
            warn_missing_anchors(blueprint);

            plan.rooms.push(PlannedRoom {
                slot,
                theme_id: theme.id.clone(),
                pool_index,
                blueprint_id: blueprint_id.clone(),
            });
        }

        if plan.is_truncated() {
            error!(
                "[PLAN] Plan is shorter than requested: {} of {} rooms",
                plan.len(),
                plan.requested
            );
        }

        plan
    }
}

fn warn_missing_anchors(blueprint: &RoomBlueprintDef) {
    if blueprint.player_spawn.is_none() {
        warn!("[PLAN] Blueprint '{}' has no player spawn", blueprint.id);
    }
    if blueprint.exit_anchor.is_none() && blueprint.exit_gate.is_none() {
        warn!("[PLAN] Blueprint '{}' has no exit anchor", blueprint.id);
    }
    if blueprint.enemy_spawns.is_empty() && blueprint.spawn_profile_id.is_some() {
        warn!("[PLAN] Blueprint '{}' has no enemy spawn points", blueprint.id);
    }
}
