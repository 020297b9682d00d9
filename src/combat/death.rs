//! Combat domain: one-shot death notification for spawned enemies.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::events::{DeathCause, EnemyDiedEvent};
use crate::core::RoomGeneration;

/// Idempotent "this enemy has died" signal bound to the room that spawned it.
///
/// The first [`DeathTracker::notify_died`] produces the death report; every
/// later call is a no-op. If the enemy is despawned without ever being
/// notified, [`notify_on_teardown`] fires the report on its way out.
#[derive(Component, Debug, Clone)]
pub struct DeathTracker {
    fired: bool,
    room: RoomGeneration,
}

impl DeathTracker {
    pub fn new(room: RoomGeneration) -> Self {
        Self { fired: false, room }
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    pub fn notify_died(&mut self, enemy: Entity, cause: DeathCause) -> Option<EnemyDiedEvent> {
        if self.fired {
            return None;
        }
        self.fired = true;
        Some(EnemyDiedEvent {
            enemy,
            room: self.room,
            cause,
        })
    }
}

/// Fires the tracker of any enemy that leaves the world unnotified.
pub(crate) fn notify_on_teardown(
    remove: On<Remove, DeathTracker>,
    mut trackers: Query<&mut DeathTracker>,
    mut died_events: MessageWriter<EnemyDiedEvent>,
) {
    let enemy = remove.entity;
    let Ok(mut tracker) = trackers.get_mut(enemy) else {
        return;
    };

    if let Some(event) = tracker.notify_died(enemy, DeathCause::Teardown) {
        debug!(
            "[DEATH] Enemy {:?} torn down without a kill, notifying room {}",
            enemy, event.room.0
        );
        died_events.write(event);
    }
}
