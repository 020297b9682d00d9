//! Combat domain: damage and death events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::core::RoomGeneration;

#[derive(Debug)]
pub struct DamageEvent {
    pub target: Entity,
    pub amount: f32,
}

impl Message for DamageEvent {}

/// How an enemy stopped existing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    /// Health reached zero
    Killed,
    /// Despawned without an explicit notify (room teardown, external despawn)
    Teardown,
}

/// Written exactly once per tracked enemy.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyDiedEvent {
    pub enemy: Entity,
    /// Room generation the enemy was spawned into
    pub room: RoomGeneration,
    pub cause: DeathCause,
}

impl Message for EnemyDiedEvent {}
