//! Debug domain: state for debug tooling.

use bevy::prelude::*;

/// Resource tracking debug mode state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    /// Whether the run info overlay is visible
    pub show_info: bool,
    /// Message to display temporarily in the overlay
    pub status_message: Option<(String, f32)>,
}

impl DebugState {
    /// Set a status message that will fade after a duration
    pub fn set_message(&mut self, message: impl Into<String>, duration: f32) {
        self.status_message = Some((message.into(), duration));
    }
}

/// Marker for the debug info overlay (seed, phase, generation)
#[derive(Component, Debug)]
pub struct DebugInfoOverlay;
