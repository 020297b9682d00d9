//! Movement domain: components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Room walls and locked gate barriers
    Wall,
    /// Player character
    Player,
    /// Enemy characters
    Enemy,
    /// Sensors (exit gates) - should not block movement
    Sensor,
}

#[derive(Component, Debug)]
pub struct Player;
