//! Combat domain: enemy spawning helpers.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::components::{Enemy, EnemyIdentity, Health};
use crate::combat::death::DeathTracker;
use crate::content::EnemyDef;
use crate::core::RoomGeneration;
use crate::movement::GameLayer;

/// Bundle for a tracked enemy built from its content definition
#[derive(Bundle)]
pub struct EnemyBundle {
    pub enemy: Enemy,
    pub identity: EnemyIdentity,
    pub health: Health,
    pub tracker: DeathTracker,
    pub sprite: Sprite,
    pub transform: Transform,
    pub rigid_body: RigidBody,
    pub collider: Collider,
    pub collision_layers: CollisionLayers,
    pub velocity: LinearVelocity,
    pub damping: LinearDamping,
    pub locked_axes: LockedAxes,
    pub gravity_scale: GravityScale,
}

impl EnemyBundle {
    pub fn new(def: &EnemyDef, position: Vec2, room: RoomGeneration) -> Self {
        let size = Vec2::splat(def.size);

        Self {
            enemy: Enemy,
            identity: EnemyIdentity {
                def_id: def.id.clone(),
            },
            health: Health::new(def.health),
            tracker: DeathTracker::new(room),
            sprite: Sprite {
                color: def.color.to_color(),
                custom_size: Some(size),
                ..default()
            },
            transform: Transform::from_xyz(position.x, position.y, 0.5),
            rigid_body: RigidBody::Dynamic,
            collider: Collider::rectangle(size.x, size.y),
            collision_layers: CollisionLayers::new(
                GameLayer::Enemy,
                [GameLayer::Wall, GameLayer::Player, GameLayer::Enemy],
            ),
            velocity: LinearVelocity::default(),
            damping: LinearDamping(5.0),
            locked_axes: LockedAxes::ROTATION_LOCKED,
            gravity_scale: GravityScale(0.0),
        }
    }
}

/// Spawn an enemy whose death is reported to `room`.
pub fn spawn_enemy(
    commands: &mut Commands,
    def: &EnemyDef,
    position: Vec2,
    room: RoomGeneration,
) -> Entity {
    commands.spawn(EnemyBundle::new(def, position, room)).id()
}
