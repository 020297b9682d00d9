//! Rooms domain: per-frame room flow systems.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::EnemyDiedEvent;
use crate::content::ContentRegistry;
use crate::core::{RunConfig, RunRng};
use crate::movement::PlayerLocator;
use crate::rooms::components::GateBarrier;
use crate::rooms::events::{GateContactEvent, RoomClearedEvent};
use crate::rooms::gate::{ExitGate, GATE_UNLOCKED_COLOR};
use crate::rooms::lifecycle::RoomLifecycle;
use crate::rooms::loader::RoomLoader;
use crate::rooms::spawner::spawn_at_random_point;

pub(crate) fn start_run(mut loader: RoomLoader, config: Res<RunConfig>) {
    loader.start_run(&config);
}

/// Load the next room one frame after an advance was accepted.
pub(crate) fn process_pending_advance(mut loader: RoomLoader) {
    loader.advance_if_pending();
}

/// Release gradual spawns that are due this frame. Spawn timers only count
/// time that passed after the room loaded.
pub(crate) fn run_spawn_sequences(
    mut commands: Commands,
    time: Res<Time>,
    registry: Res<ContentRegistry>,
    mut lifecycle: ResMut<RoomLifecycle>,
    mut rng: ResMut<RunRng>,
) {
    let generation = lifecycle.generation();
    let Some(room) = lifecycle.active_mut() else {
        return;
    };
    let Some(sequence) = room.spawn.as_mut() else {
        return;
    };
    if sequence.is_finished() {
        return;
    }

    let since_load = (time.elapsed_secs_f64() - room.loaded_at).max(0.0) as f32;
    let due = sequence.tick(time.delta_secs().min(since_load), &mut *rng);
    let finished = sequence.is_finished();
    for enemy_id in due {
        let spawned = spawn_at_random_point(
            &mut commands,
            &registry,
            &enemy_id,
            &room.spawn_points,
            &mut *rng,
            generation,
        );
        if spawned.is_some() {
            room.alive += 1;
        }
    }

    if finished {
        info!(
            "[SPAWN] Room {} finished spawning, {} alive",
            room.index, room.alive
        );
    }
}

pub(crate) fn count_enemy_deaths(
    mut died_events: MessageReader<EnemyDiedEvent>,
    mut lifecycle: ResMut<RoomLifecycle>,
) {
    for event in died_events.read() {
        if lifecycle.record_death(event.room) {
            debug!(
                "[ROOM] Enemy {:?} died ({:?}), {} alive",
                event.enemy,
                event.cause,
                lifecycle.alive()
            );
        } else {
            debug!(
                "[ROOM] Ignoring death of {:?} from room {}",
                event.enemy, event.room.0
            );
        }
    }
}

/// Unlock the gate once spawning is done and the alive counter is back at zero.
pub(crate) fn unlock_cleared_rooms(
    mut lifecycle: ResMut<RoomLifecycle>,
    mut gates: Query<&mut ExitGate>,
    mut cleared_events: MessageWriter<RoomClearedEvent>,
) {
    if !lifecycle.is_ready_to_unlock() {
        return;
    }
    let Some(room) = lifecycle.active() else {
        return;
    };

    let index = room.index;
    let blueprint_id = room.blueprint_id.clone();
    match room.gate.map(|gate| gates.get_mut(gate)) {
        Some(Ok(mut gate)) => {
            gate.unlock();
            info!("[GATE] Room '{}' cleared, gate unlocked", blueprint_id);
        }
        Some(Err(_)) => {
            error!("[GATE] Room '{}' cleared but its gate is gone", blueprint_id);
        }
        None => {
            error!(
                "[GATE] Room '{}' cleared but it has no exit to unlock",
                blueprint_id
            );
        }
    }

    lifecycle.mark_unlocked();
    cleared_events.write(RoomClearedEvent {
        index,
        blueprint_id,
    });
}

/// Drop the barrier and recolor gates that just unlocked. A player already
/// standing in the gate when it opens counts as touching it.
pub(crate) fn sync_gate_state(
    mut commands: Commands,
    mut gates: Query<
        (Entity, &ExitGate, &mut Sprite, Option<&CollidingEntities>),
        Changed<ExitGate>,
    >,
    barriers: Query<(Entity, &GateBarrier)>,
    player: PlayerLocator,
    mut contact_events: MessageWriter<GateContactEvent>,
) {
    let player_entity = player.player();
    for (gate_entity, gate, mut sprite, colliding) in &mut gates {
        if gate.is_locked() {
            continue;
        }
        sprite.color = GATE_UNLOCKED_COLOR;
        for (barrier_entity, barrier) in &barriers {
            if barrier.gate == gate_entity {
                commands.entity(barrier_entity).despawn();
            }
        }

        let overlapping = match (player_entity, colliding) {
            (Some(player_entity), Some(colliding)) => colliding.contains(&player_entity),
            _ => false,
        };
        if overlapping {
            debug!("[GATE] Player was already inside the gate when it unlocked");
            contact_events.write(GateContactEvent { gate: gate_entity });
        }
    }
}

/// Turn player contact with an unlocked gate into a GateContactEvent.
pub(crate) fn detect_gate_contacts(
    mut collision_start_events: MessageReader<CollisionStart>,
    mut contact_events: MessageWriter<GateContactEvent>,
    gates: Query<&ExitGate>,
    player: PlayerLocator,
) {
    let Some(player_entity) = player.player() else {
        for _ in collision_start_events.read() {}
        return;
    };

    for event in collision_start_events.read() {
        let (gate_entity, other) = if gates.contains(event.collider1) {
            (event.collider1, event.collider2)
        } else if gates.contains(event.collider2) {
            (event.collider2, event.collider1)
        } else {
            continue;
        };

        if other != player_entity {
            continue;
        }

        if let Ok(gate) = gates.get(gate_entity) {
            if gate.is_locked() {
                debug!("[GATE] Player touched a locked gate");
                continue;
            }
            contact_events.write(GateContactEvent { gate: gate_entity });
        }
    }
}

/// Forward gate contact to the lifecycle. Duplicates are absorbed there.
pub(crate) fn handle_gate_contacts(
    mut contact_events: MessageReader<GateContactEvent>,
    gates: Query<&ExitGate>,
    mut lifecycle: ResMut<RoomLifecycle>,
) {
    for event in contact_events.read() {
        let Ok(gate) = gates.get(event.gate) else {
            continue;
        };
        if gate.is_locked() || gate.room() != lifecycle.generation() {
            continue;
        }

        if lifecycle.try_advance() {
            info!("[TRANSITION] Gate contact accepted, leaving room");
        } else {
            debug!("[TRANSITION] Gate contact absorbed");
        }
    }
}
