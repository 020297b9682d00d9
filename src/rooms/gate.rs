//! Rooms domain: the exit gate guarding progression out of a room.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::content::{GateDef, GateTemplateDef};
use crate::core::RoomGeneration;
use crate::movement::GameLayer;
use crate::rooms::components::{GateBarrier, RoomScoped};

/// How far the contact sensor reaches past the gate's visual size
const GATE_REACH: f32 = 24.0;

pub const GATE_LOCKED_COLOR: Color = Color::srgb(0.55, 0.25, 0.25);
pub const GATE_UNLOCKED_COLOR: Color = Color::srgb(0.3, 0.7, 0.4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Locked,
    Unlocked,
}

/// Locked until the room is cleared. Unlocked is terminal for the room.
#[derive(Component, Debug, Clone)]
pub struct ExitGate {
    state: GateState,
    room: RoomGeneration,
}

impl ExitGate {
    pub fn new(room: RoomGeneration) -> Self {
        Self {
            state: GateState::Locked,
            room,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_locked(&self) -> bool {
        self.state == GateState::Locked
    }

    pub fn room(&self) -> RoomGeneration {
        self.room
    }

    /// Returns false if the gate was already unlocked; it never re-locks.
    pub fn lock(&mut self) -> bool {
        if self.state == GateState::Unlocked {
            warn!(
                "[GATE] Refusing to re-lock the unlocked gate of room {}",
                self.room.0
            );
            return false;
        }
        true
    }

    /// Returns true on the Locked -> Unlocked transition.
    pub fn unlock(&mut self) -> bool {
        if self.state == GateState::Unlocked {
            return false;
        }
        self.state = GateState::Unlocked;
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateSource {
    /// Authored into the blueprint
    Embedded,
    /// Generic template placed at the exit anchor
    Template,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GatePlacement {
    pub position: Vec2,
    pub size: Vec2,
    pub source: GateSource,
}

/// Prefer the embedded gate; otherwise put the template at the exit anchor.
pub fn resolve_gate_placement(
    embedded: Option<&GateDef>,
    template: Option<&GateTemplateDef>,
    exit_anchor: Option<Vec2>,
) -> Option<GatePlacement> {
    if let Some(gate) = embedded {
        return Some(GatePlacement {
            position: gate.position.to_vec2(),
            size: gate.size.to_vec2(),
            source: GateSource::Embedded,
        });
    }

    match (template, exit_anchor) {
        (Some(template), Some(position)) => Some(GatePlacement {
            position,
            size: template.size.to_vec2(),
            source: GateSource::Template,
        }),
        _ => None,
    }
}

/// Spawn a gate sensor, plus a solid barrier while it is locked.
pub(crate) fn spawn_gate(
    commands: &mut Commands,
    placement: &GatePlacement,
    gate: ExitGate,
) -> Entity {
    let locked = gate.is_locked();
    let position = placement.position;
    let size = placement.size;

    let gate_entity = commands
        .spawn((
            gate,
            RoomScoped,
            Sprite {
                color: if locked {
                    GATE_LOCKED_COLOR
                } else {
                    GATE_UNLOCKED_COLOR
                },
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(position.x, position.y, 0.2),
            Collider::rectangle(size.x + GATE_REACH, size.y + GATE_REACH),
            Sensor,
            CollisionEventsEnabled,
            CollidingEntities::default(),
            CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]),
        ))
        .id();

    if locked {
        commands.spawn((
            GateBarrier { gate: gate_entity },
            RoomScoped,
            Transform::from_xyz(position.x, position.y, 0.0),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            CollisionLayers::new(GameLayer::Wall, [GameLayer::Player, GameLayer::Enemy]),
        ));
    }

    gate_entity
}
