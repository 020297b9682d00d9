//! Rooms domain: entity components and markers for room flow.

use bevy::prelude::*;

use crate::core::RoomGeneration;

/// Marker for the current room entity
#[derive(Component, Debug)]
pub struct RoomInstance {
    pub index: usize,
    pub blueprint_id: String,
    pub generation: RoomGeneration,
}

/// Everything spawned for one room instance. Despawned when the room is torn down.
#[derive(Component, Debug, Default)]
pub struct RoomScoped;

/// Marker for room boundary colliders
#[derive(Component, Debug)]
pub struct RoomWall;

/// Solid barrier in front of a locked gate that keeps the player from passing.
#[derive(Component, Debug)]
pub struct GateBarrier {
    pub gate: Entity,
}
