//! Movement domain: typed lookup of the player entity.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::movement::Player;

/// Finds the player for systems that need to read or move it.
#[derive(SystemParam)]
pub struct PlayerLocator<'w, 's> {
    players: Query<'w, 's, (Entity, &'static mut Transform), With<Player>>,
}

impl PlayerLocator<'_, '_> {
    pub fn player(&self) -> Option<Entity> {
        self.players.single().ok().map(|(entity, _)| entity)
    }

    /// Move the player, keeping its z. Returns false when there is no player.
    pub fn place(&mut self, position: Vec2) -> bool {
        let Ok((_, mut transform)) = self.players.single_mut() else {
            return false;
        };
        transform.translation.x = position.x;
        transform.translation.y = position.y;
        true
    }
}
