//! Movement domain: the player body, keyboard locomotion and player lookup.

mod bootstrap;
mod components;
mod locator;
mod resources;
mod systems;


pub use bootstrap::PLAYER_SIZE;
pub use components::{GameLayer, Player};
pub use locator::PlayerLocator;
pub use resources::{MovementInput, MovementTuning};

use bevy::prelude::*;

use crate::core::GameState;
use crate::movement::bootstrap::spawn_player;
use crate::movement::systems::{apply_movement, read_input};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<MovementInput>()
            .add_systems(Startup, spawn_player)
            .add_systems(
                Update,
                (read_input, apply_movement)
                    .chain()
                    .run_if(in_state(GameState::Run)),
            );
    }
}
