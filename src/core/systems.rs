//! Core domain: core run flow systems.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::content::ContentRegistry;
use crate::core::events::RunCompletedEvent;
use crate::core::state::GameState;

/// Leave `Boot` once the content registry has been inserted.
pub(crate) fn begin_run_when_content_ready(
    registry: Option<Res<ContentRegistry>>,
    mut game_state: ResMut<NextState<GameState>>,
) {
    if registry.is_some() {
        game_state.set(GameState::Run);
    }
}

/// Handle run completion - the plan is exhausted
pub(crate) fn handle_run_completed(
    mut events: MessageReader<RunCompletedEvent>,
    mut game_state: ResMut<NextState<GameState>>,
) {
    for event in events.read() {
        info!(
            "Run complete! {} rooms cleared (seed: {})",
            event.rooms_cleared, event.seed
        );
        game_state.set(GameState::Complete);
    }
}
