//! Combat domain: enemy health, damage, and death tracking.

mod components;
mod death;
mod events;
mod spawn;
mod systems;


pub use components::{Enemy, EnemyIdentity, Health};
pub use death::DeathTracker;
pub use events::{DamageEvent, DeathCause, EnemyDiedEvent};
pub use spawn::{EnemyBundle, spawn_enemy};

use bevy::prelude::*;

use crate::combat::death::notify_on_teardown;
use crate::combat::systems::apply_damage;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<DamageEvent>()
            .add_message::<EnemyDiedEvent>()
            .add_observer(notify_on_teardown)
            .add_systems(Update, apply_damage);
    }
}
