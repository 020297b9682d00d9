//! ContentRegistry resource providing lookups for all loaded content.

use bevy::prelude::*;
use std::collections::HashMap;

use super::data::*;

/// Central registry for all loaded game content.
/// Blueprints, profiles and enemies are looked up by id; themes keep their order.
#[derive(Resource, Debug, Default, Clone)]
pub struct ContentRegistry {
    pub themes: Vec<ThemeDef>,
    pub rooms: HashMap<String, RoomBlueprintDef>,
    pub spawn_profiles: HashMap<String, SpawnProfileDef>,
    pub enemies: HashMap<String, EnemyDef>,
}

impl ContentRegistry {
    pub fn theme(&self, id: &str) -> Option<&ThemeDef> {
        self.themes.iter().find(|t| t.id == id)
    }

    /// Resolve theme ids in block order. Unknown ids are reported and skipped;
    /// an empty order selects every theme in registry order.
    pub fn themes_in_order(&self, order: &[String]) -> Vec<&ThemeDef> {
        if order.is_empty() {
            return self.themes.iter().collect();
        }

        order
            .iter()
            .filter_map(|id| {
                let theme = self.theme(id);
                if theme.is_none() {
                    error!("[CONTENT] Theme '{}' in run order is not registered", id);
                }
                theme
            })
            .collect()
    }

    /// Spawn profile for a blueprint, if it names one that exists.
    pub fn profile_for(&self, blueprint: &RoomBlueprintDef) -> Option<&SpawnProfileDef> {
        let id = blueprint.spawn_profile_id.as_ref()?;
        let profile = self.spawn_profiles.get(id);
        if profile.is_none() {
            warn!(
                "[CONTENT] Room '{}' names unknown spawn profile '{}'",
                blueprint.id, id
            );
        }
        profile
    }

    /// Returns a summary of loaded content counts for logging.
    pub fn summary(&self) -> String {
        format!(
            "ContentRegistry loaded:\n\
             - Themes: {}\n\
             - Rooms: {}\n\
             - Spawn Profiles: {}\n\
             - Enemies: {}",
            self.themes.len(),
            self.rooms.len(),
            self.spawn_profiles.len(),
            self.enemies.len(),
        )
    }
}
