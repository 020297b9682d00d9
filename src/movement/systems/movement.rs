//! Movement domain: top-down locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{MovementInput, MovementTuning, Player};

/// Step `current` toward `target` by at most `step`.
fn approach(current: f32, target: f32, step: f32) -> f32 {
    if current < target {
        (current + step).min(target)
    } else {
        (current - step).max(target)
    }
}

pub(crate) fn apply_movement(
    time: Res<Time>,
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    mut query: Query<&mut LinearVelocity, With<Player>>,
) {
    let dt = time.delta_secs();
    let target = input.axis * tuning.max_speed;
    let rate = if input.axis == Vec2::ZERO {
        tuning.decel
    } else {
        tuning.accel
    };

    for mut velocity in &mut query {
        velocity.x = approach(velocity.x, target.x, rate * dt);
        velocity.y = approach(velocity.y, target.y, rate * dt);
    }
}
