//! UI domain: camera, run progress HUD and the run complete screen.

mod complete;
mod hud;

use bevy::prelude::*;

use crate::core::GameState;
use crate::ui::complete::{handle_restart, show_run_complete};
use crate::ui::hud::{setup_camera, spawn_run_hud, update_run_hud};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (setup_camera, spawn_run_hud))
            .add_systems(Update, (update_run_hud, show_run_complete))
            .add_systems(
                Update,
                handle_restart.run_if(in_state(GameState::Complete)),
            );
    }
}
