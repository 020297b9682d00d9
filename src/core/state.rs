//! Core domain: game state definitions for the run flow.

use bevy::prelude::*;

#[derive(States, Debug, Hash, Eq, PartialEq, Clone, Copy, Default)]
pub enum GameState {
    /// Content is loading; no run exists yet
    #[default]
    Boot,
    /// A run is in progress and rooms are being played
    Run,
    /// The run plan was exhausted
    Complete,
}
