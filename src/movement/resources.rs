//! Movement domain: tuning and input resources.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct MovementTuning {
    pub max_speed: f32,
    pub accel: f32,
    pub decel: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            max_speed: 260.0,
            accel: 2400.0,
            decel: 2000.0,
        }
    }
}

#[derive(Resource, Debug, Default)]
pub struct MovementInput {
    pub axis: Vec2,
}
