//! Rooms domain: room geometry spawning.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::core::RoomGeneration;
use crate::movement::GameLayer;
use crate::rooms::components::{RoomInstance, RoomScoped, RoomWall};
use crate::rooms::plan::PlannedRoom;
use crate::rooms::validator::RoomLayout;

const WALL_THICKNESS: f32 = 40.0;

/// Spawn the room instance entity with its floor and four boundary walls.
pub(crate) fn spawn_room_geometry(
    commands: &mut Commands,
    index: usize,
    planned: &PlannedRoom,
    layout: &RoomLayout,
    generation: RoomGeneration,
) -> Entity {
    let floor_color = Color::srgb(0.16, 0.16, 0.2);
    let wall_color = Color::srgb(0.3, 0.3, 0.4);
    let wall_layers = CollisionLayers::new(GameLayer::Wall, [GameLayer::Player, GameLayer::Enemy]);

    let room_entity = commands
        .spawn((
            RoomInstance {
                index,
                blueprint_id: planned.blueprint_id.clone(),
                generation,
            },
            RoomScoped,
            Sprite {
                color: floor_color,
                custom_size: Some(layout.size),
                ..default()
            },
            Transform::from_xyz(0.0, 0.0, -1.0),
        ))
        .id();

    let half = layout.size / 2.0;
    let horizontal = Vec2::new(layout.size.x + WALL_THICKNESS * 2.0, WALL_THICKNESS);
    let vertical = Vec2::new(WALL_THICKNESS, layout.size.y);
    let walls = [
        (Vec2::new(0.0, half.y + WALL_THICKNESS / 2.0), horizontal),
        (Vec2::new(0.0, -half.y - WALL_THICKNESS / 2.0), horizontal),
        (Vec2::new(-half.x - WALL_THICKNESS / 2.0, 0.0), vertical),
        (Vec2::new(half.x + WALL_THICKNESS / 2.0, 0.0), vertical),
    ];

    for (position, size) in walls {
        commands.spawn((
            RoomWall,
            RoomScoped,
            Sprite {
                color: wall_color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(position.x, position.y, 0.0),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            wall_layers,
        ));
    }

    room_entity
}
