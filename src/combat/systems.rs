//! Combat domain: damage application.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::components::{Enemy, Health};
use crate::combat::death::DeathTracker;
use crate::combat::events::{DamageEvent, DeathCause, EnemyDiedEvent};

/// Apply queued damage. An enemy whose health reaches zero notifies its
/// tracker and is despawned; later damage in the same frame is ignored.
pub(crate) fn apply_damage(
    mut commands: Commands,
    mut damage_events: MessageReader<DamageEvent>,
    mut died_events: MessageWriter<EnemyDiedEvent>,
    mut query: Query<(&mut Health, Option<&mut DeathTracker>), With<Enemy>>,
) {
    for event in damage_events.read() {
        let Ok((mut health, tracker)) = query.get_mut(event.target) else {
            continue;
        };
        if health.is_dead() {
            continue;
        }

        health.take_damage(event.amount);
        if !health.is_dead() {
            continue;
        }

        if let Some(mut tracker) = tracker {
            if let Some(died) = tracker.notify_died(event.target, DeathCause::Killed) {
                died_events.write(died);
            }
        }
        commands.entity(event.target).despawn();
    }
}
