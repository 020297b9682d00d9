//! Core domain: events for run flow.

use bevy::ecs::message::Message;

/// Event fired when the last planned room has been left behind
#[derive(Debug)]
pub struct RunCompletedEvent {
    pub seed: u64,
    pub rooms_cleared: usize,
}

impl Message for RunCompletedEvent {}
