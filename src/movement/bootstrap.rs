//! Movement domain: player bootstrap.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{GameLayer, Player};

pub const PLAYER_SIZE: Vec2 = Vec2::new(24.0, 24.0);

/// Spawn the player once. The room loader moves it to each room's spawn anchor.
pub(crate) fn spawn_player(mut commands: Commands, existing_player: Query<Entity, With<Player>>) {
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    commands.spawn((
        Player,
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.95),
            custom_size: Some(PLAYER_SIZE),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 1.0),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(0.0), // Top-down, no gravity
            Friction::new(0.0),
            CollisionEventsEnabled,
            CollisionLayers::new(
                GameLayer::Player,
                [GameLayer::Wall, GameLayer::Enemy, GameLayer::Sensor],
            ),
        ),
    ));
}
