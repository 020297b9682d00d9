//! Rooms domain: starting a run and loading rooms from the plan.

use bevy::ecs::message::MessageWriter;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::content::{ContentRegistry, RunDefaults};
use crate::core::{RoomGeneration, RunCompletedEvent, RunConfig, RunRng};
use crate::movement::PlayerLocator;
use crate::rooms::components::RoomScoped;
use crate::rooms::events::{RoomClearedEvent, RoomEnteredEvent};
use crate::rooms::gate::{ExitGate, resolve_gate_placement, spawn_gate};
use crate::rooms::lifecycle::{ActiveRoom, RoomLifecycle};
use crate::rooms::plan::RunPlanBuilder;
use crate::rooms::spawn::spawn_room_geometry;
use crate::rooms::spawner::{SpawnSequence, SpawnTiming, spawn_at_random_point};
use crate::rooms::validator::{RoomLayout, RoomValidator};

/// Everything needed to tear down one room and build the next.
#[derive(SystemParam)]
pub struct RoomLoader<'w, 's> {
    commands: Commands<'w, 's>,
    lifecycle: ResMut<'w, RoomLifecycle>,
    registry: Res<'w, ContentRegistry>,
    defaults: Res<'w, RunDefaults>,
    rng: ResMut<'w, RunRng>,
    time: Res<'w, Time>,
    player: PlayerLocator<'w, 's>,
    scoped: Query<'w, 's, Entity, With<RoomScoped>>,
    entered_events: MessageWriter<'w, RoomEnteredEvent>,
    cleared_events: MessageWriter<'w, RoomClearedEvent>,
    completed_events: MessageWriter<'w, RunCompletedEvent>,
}

impl RoomLoader<'_, '_> {
    /// Build the plan for `config`, reseed the spawn stream and load room 0.
    pub fn start_run(&mut self, config: &RunConfig) {
        let themes = self.registry.themes_in_order(&config.theme_order);
        let plan = RunPlanBuilder::new(&self.registry).build(
            config.seed,
            config.total_rooms,
            config.rooms_per_theme,
            &themes,
        );

        info!(
            "[PLAN] Seed {} planned {} room(s): {}",
            plan.seed,
            plan.len(),
            plan.rooms()
                .iter()
                .map(|room| room.blueprint_id.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        *self.rng = RunRng::for_spawns(plan.seed);
        self.lifecycle.begin_run(plan);
        self.load_room(0);
    }

    /// Load the room an accepted advance is waiting for. Returns true if one was.
    pub fn advance_if_pending(&mut self) -> bool {
        let Some(next) = self.lifecycle.take_pending_advance() else {
            return false;
        };
        info!("[TRANSITION] Advancing to room {}", next);
        self.load_room(next);
        self.lifecycle.finish_transition();
        true
    }

    /// Tear down the current room and build room `index` of the plan.
    pub fn load_room(&mut self, index: usize) {
        self.teardown();
        let generation = self.lifecycle.reset_room();
        self.build_room(index, generation);
    }

    /// Build room `index` under `generation`. Unregistered blueprints are
    /// skipped in place, the previous room is already gone.
    fn build_room(&mut self, index: usize, generation: RoomGeneration) {
        let Some(planned) = self.lifecycle.planned_room(index).cloned() else {
            let seed = self.lifecycle.plan().seed;
            let rooms_cleared = self.lifecycle.rooms_cleared();
            self.lifecycle.complete();
            info!(
                "[TRANSITION] Plan exhausted at room {}, run complete",
                index
            );
            self.completed_events.write(RunCompletedEvent {
                seed,
                rooms_cleared,
            });
            return;
        };
        self.lifecycle.begin_loading();

        let Some(blueprint) = self.registry.rooms.get(&planned.blueprint_id) else {
            error!(
                "[ROOM] Planned blueprint '{}' is not registered, skipping room {}",
                planned.blueprint_id, index
            );
            self.build_room(index + 1, generation);
            return;
        };

        let mut layout = RoomLayout::from_blueprint(blueprint);
        for warning in RoomValidator::new(&self.defaults.auto_repair).repair(&mut layout) {
            warn!("[ROOM] '{}': {}", blueprint.id, warning);
        }

        let room_entity =
            spawn_room_geometry(&mut self.commands, index, &planned, &layout, generation);

        let placement = resolve_gate_placement(
            blueprint.exit_gate.as_ref(),
            self.defaults.exit_gate_template.as_ref(),
            layout.exit_anchor,
        );
        if placement.is_none() {
            error!(
                "[GATE] Room '{}' has no embedded gate and no template placement; it has no exit",
                blueprint.id
            );
        }

        let player_spawn = layout.player_spawn.unwrap_or_else(|| {
            warn!(
                "[ROOM] '{}' has no player spawn, placing the player at the centre",
                blueprint.id
            );
            layout.center()
        });
        if !self.player.place(player_spawn) {
            warn!("[ROOM] No player to place in '{}'", blueprint.id);
        }

        let mut sequence = match self.registry.profile_for(blueprint) {
            None => None,
            Some(profile) if layout.enemy_spawns.is_empty() => {
                warn!(
                    "[SPAWN] '{}' has profile '{}' but no spawn points, nothing spawns",
                    blueprint.id, profile.id
                );
                None
            }
            Some(profile) => Some(SpawnSequence::resolve(profile, &mut *self.rng))
                .filter(|sequence| !sequence.is_empty()),
        };

        let mut gate = ExitGate::new(generation);
        if sequence.is_none() {
            gate.unlock();
        }
        let gate_entity = placement.map(|placement| spawn_gate(&mut self.commands, &placement, gate));

        let mut alive = 0;
        if let Some(sequence) = sequence.as_mut() {
            if sequence.timing() == SpawnTiming::Instant {
                for enemy_id in sequence.drain_all() {
                    let spawned = spawn_at_random_point(
                        &mut self.commands,
                        &self.registry,
                        &enemy_id,
                        &layout.enemy_spawns,
                        &mut *self.rng,
                        generation,
                    );
                    if spawned.is_some() {
                        alive += 1;
                    }
                }
            }
        }

        info!(
            "[ROOM] Entered room {}/{} '{}' (theme '{}', generation {})",
            index + 1,
            self.lifecycle.plan().len(),
            blueprint.id,
            planned.theme_id,
            generation.0
        );

        let spawns_pending = sequence.as_ref().map_or(0, SpawnSequence::len);
        let has_sequence = sequence.is_some();
        self.lifecycle.enter_room(ActiveRoom {
            index,
            entity: room_entity,
            blueprint_id: planned.blueprint_id.clone(),
            theme_id: planned.theme_id.clone(),
            gate: gate_entity,
            spawn_points: layout.enemy_spawns,
            spawn: sequence,
            alive,
            loaded_at: self.time.elapsed_secs_f64(),
        });
        self.entered_events.write(RoomEnteredEvent {
            index,
            blueprint_id: planned.blueprint_id.clone(),
        });

        if has_sequence {
            info!(
                "[SPAWN] Room {}: {} enemies alive, {} queued",
                index, alive, spawns_pending
            );
        } else {
            self.lifecycle.mark_unlocked();
            info!(
                "[GATE] Room '{}' has nothing to clear, gate unlocked on load",
                planned.blueprint_id
            );
            self.cleared_events.write(RoomClearedEvent {
                index,
                blueprint_id: planned.blueprint_id,
            });
        }
    }

    fn teardown(&mut self) {
        let mut count = 0;
        for entity in &self.scoped {
            self.commands.entity(entity).despawn();
            count += 1;
        }
        if count > 0 {
            debug!("[ROOM] Tore down {} room entities", count);
        }
    }
}
