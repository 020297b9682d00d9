//! Debug domain: hotkeys for exercising room flow without playing it.
//!
//! Hotkeys (hold Ctrl):
//! - K: kill every enemy in the room
//! - J: deal 10 damage to one enemy
//! - X: despawn one enemy without killing it
//! - N: force an advance to the next room
//! - D: toggle the run info overlay

mod state;
mod systems;

use bevy::prelude::*;

use crate::debug::state::DebugState;
use crate::debug::systems::{handle_debug_hotkeys, update_debug_info_overlay, update_status_message};

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>().add_systems(
            Update,
            (
                handle_debug_hotkeys,
                update_status_message,
                update_debug_info_overlay,
            )
                .chain(),
        );
    }
}
