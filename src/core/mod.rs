//! Core domain: run states, configuration, and the seeded RNG.

mod events;
mod resources;
mod rng;
mod state;
mod systems;


pub use events::RunCompletedEvent;
pub use resources::{RoomGeneration, RunConfig, SEED_ENV_VAR, seed_from_env};
#[cfg(test)]
pub(crate) use rng::ScriptedRng;
pub use rng::{RunRng, SeededRng, resolve_seed};
pub use state::GameState;

use bevy::prelude::*;

use crate::core::systems::{begin_run_when_content_ready, handle_run_completed};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<RunConfig>()
            .init_resource::<RunRng>()
            .add_message::<RunCompletedEvent>()
            .add_systems(
                Update,
                begin_run_when_content_ready.run_if(in_state(GameState::Boot)),
            )
            .add_systems(
                Update,
                handle_run_completed.run_if(in_state(GameState::Run)),
            );
    }
}
