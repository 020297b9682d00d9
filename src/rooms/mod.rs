//! Rooms domain: run planning, room loading, spawning, gates and transitions.

mod components;
mod events;
mod gate;
mod lifecycle;
mod loader;
mod plan;
mod spawn;
mod spawner;
mod systems;
mod validator;

#[cfg(test)]
mod tests;

pub use components::{GateBarrier, RoomInstance, RoomScoped, RoomWall};
pub use events::{GateContactEvent, RoomClearedEvent, RoomEnteredEvent};
pub use gate::{ExitGate, GatePlacement, GateSource, GateState, resolve_gate_placement};
pub use lifecycle::{ActiveRoom, RoomLifecycle, RoomPhase};
pub use loader::RoomLoader;
pub use plan::{PlannedRoom, RunPlan, RunPlanBuilder};
pub use spawner::{SpawnSequence, SpawnTiming, pick_spawn_point};
pub use validator::{Anchor, RepairWarning, RoomLayout, RoomValidator};

use bevy::prelude::*;

use crate::core::GameState;
use crate::rooms::systems::{
    count_enemy_deaths, detect_gate_contacts, handle_gate_contacts, process_pending_advance,
    run_spawn_sequences, start_run, sync_gate_state, unlock_cleared_rooms,
};

pub struct RoomsPlugin;

impl Plugin for RoomsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RoomLifecycle>()
            .add_message::<RoomEnteredEvent>()
            .add_message::<RoomClearedEvent>()
            .add_message::<GateContactEvent>()
            .add_systems(OnEnter(GameState::Run), start_run)
            .add_systems(
                Update,
                (
                    process_pending_advance,
                    run_spawn_sequences,
                    count_enemy_deaths,
                    unlock_cleared_rooms,
                    sync_gate_state,
                    detect_gate_contacts,
                    handle_gate_contacts,
                )
                    .chain()
                    .run_if(in_state(GameState::Run)),
            );
    }
}
