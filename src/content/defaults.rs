//! Built-in content used when assets/data cannot be loaded.
//!
//! Mirrors the shipped RON files so a broken data directory still yields a
//! playable run.

use std::collections::HashMap;

use super::data::*;
use super::registry::ContentRegistry;

fn enemy(id: &str, name: &str, health: f32, size: f32, (r, g, b): (f32, f32, f32)) -> EnemyDef {
    EnemyDef {
        id: id.to_string(),
        name: name.to_string(),
        health,
        size,
        color: ColorDef { r, g, b },
    }
}

fn entry(enemy_id: &str, min_count: u32, max_count: u32) -> SpawnEntryDef {
    SpawnEntryDef {
        enemy_id: enemy_id.to_string(),
        min_count,
        max_count,
    }
}

fn instant(id: &str, entries: Vec<SpawnEntryDef>) -> SpawnProfileDef {
    SpawnProfileDef {
        id: id.to_string(),
        entries,
        gradual: false,
        initial_delay: 0.0,
        per_spawn_delay: DelayRangeDef::default(),
    }
}

fn gradual(id: &str, entries: Vec<SpawnEntryDef>, initial_delay: f32, delay: (f32, f32)) -> SpawnProfileDef {
    SpawnProfileDef {
        id: id.to_string(),
        entries,
        gradual: true,
        initial_delay,
        per_spawn_delay: DelayRangeDef {
            min: delay.0,
            max: delay.1,
        },
    }
}

fn corners(half_width: f32, half_height: f32) -> Vec<PointDef> {
    vec![
        PointDef::new(-half_width, half_height),
        PointDef::new(half_width, half_height),
        PointDef::new(-half_width, -half_height),
        PointDef::new(half_width, -half_height),
    ]
}

fn room(id: &str, name: &str, width: f32, height: f32) -> RoomBlueprintDef {
    RoomBlueprintDef {
        id: id.to_string(),
        name: name.to_string(),
        size: SizeDef::new(width, height),
        player_spawn: Some(PointDef::new(0.0, -height / 2.0 + 80.0)),
        exit_anchor: Some(PointDef::new(0.0, height / 2.0 - 40.0)),
        enemy_spawns: corners(width / 2.0 - 120.0, height / 2.0 - 140.0),
        exit_gate: None,
        spawn_profile_id: None,
    }
}

pub fn builtin_registry() -> ContentRegistry {
    let enemies = [
        enemy("skeleton", "Skeleton", 30.0, 28.0, (0.85, 0.85, 0.75)),
        enemy("ghoul", "Ghoul", 50.0, 32.0, (0.45, 0.6, 0.4)),
        enemy("ember_imp", "Ember Imp", 20.0, 22.0, (0.95, 0.45, 0.2)),
        enemy("forge_golem", "Forge Golem", 120.0, 44.0, (0.5, 0.4, 0.35)),
    ];

    let spawn_profiles = [
        instant("crypt_patrol", vec![entry("skeleton", 2, 3)]),
        gradual(
            "crypt_horde",
            vec![entry("skeleton", 2, 4), entry("ghoul", 1, 2)],
            0.5,
            (0.4, 1.0),
        ),
        gradual("forge_sparks", vec![entry("ember_imp", 3, 5)], 0.8, (0.3, 0.6)),
        instant(
            "forge_guard",
            vec![entry("forge_golem", 1, 1), entry("ember_imp", 0, 2)],
        ),
    ];

    let antechamber = room("crypt_antechamber", "Antechamber", 900.0, 600.0);
    let ossuary = RoomBlueprintDef {
        spawn_profile_id: Some("crypt_patrol".to_string()),
        ..room("crypt_ossuary", "Ossuary", 960.0, 640.0)
    };
    let catacombs = RoomBlueprintDef {
        player_spawn: None,
        enemy_spawns: Vec::new(),
        spawn_profile_id: Some("crypt_horde".to_string()),
        ..room("crypt_catacombs", "Catacombs", 1100.0, 700.0)
    };
    let bellows = RoomBlueprintDef {
        exit_gate: Some(GateDef {
            position: PointDef::new(0.0, 290.0),
            size: SizeDef::new(120.0, 36.0),
        }),
        spawn_profile_id: Some("forge_sparks".to_string()),
        ..room("forge_bellows", "Bellows", 1000.0, 640.0)
    };
    let anvil_hall = RoomBlueprintDef {
        spawn_profile_id: Some("forge_guard".to_string()),
        ..room("forge_anvil_hall", "Anvil Hall", 1000.0, 700.0)
    };
    let slag_pit = RoomBlueprintDef {
        exit_anchor: None,
        spawn_profile_id: Some("forge_sparks".to_string()),
        ..room("forge_slag_pit", "Slag Pit", 900.0, 600.0)
    };

    let themes = vec![
        ThemeDef {
            id: "crypt".to_string(),
            name: "Sunken Crypt".to_string(),
            room_ids: vec![
                antechamber.id.clone(),
                ossuary.id.clone(),
                catacombs.id.clone(),
            ],
        },
        ThemeDef {
            id: "forge".to_string(),
            name: "Cinder Forge".to_string(),
            room_ids: vec![
                bellows.id.clone(),
                anvil_hall.id.clone(),
                slag_pit.id.clone(),
            ],
        },
    ];

    ContentRegistry {
        themes,
        rooms: [antechamber, ossuary, catacombs, bellows, anvil_hall, slag_pit]
            .into_iter()
            .map(|r| (r.id.clone(), r))
            .collect(),
        spawn_profiles: spawn_profiles
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect::<HashMap<_, _>>(),
        enemies: enemies
            .into_iter()
            .map(|e| (e.id.clone(), e))
            .collect(),
    }
}
