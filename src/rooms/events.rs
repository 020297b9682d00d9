//! Rooms domain: events for room loads, clears and gate contact.

use bevy::ecs::message::Message;
use bevy::prelude::*;

#[derive(Debug)]
pub struct RoomEnteredEvent {
    pub index: usize,
    pub blueprint_id: String,
}

impl Message for RoomEnteredEvent {}

/// The room's gate unlocked: every spawned enemy is dead, or there was nothing to spawn.
#[derive(Debug)]
pub struct RoomClearedEvent {
    pub index: usize,
    pub blueprint_id: String,
}

impl Message for RoomClearedEvent {}

/// The player touched an unlocked gate.
#[derive(Debug)]
pub struct GateContactEvent {
    pub gate: Entity,
}

impl Message for GateContactEvent {}
