//! Data definitions for all RON content files.
//!
//! These structs mirror the structure in assets/data/*.ron and are used
//! for deserialization. The ContentRegistry provides lookup by id.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ============================================================================
// Common wrapper for RON files with schema_version and items
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataFile<T> {
    pub schema_version: u32,
    pub items: Vec<T>,
}

// ============================================================================
// Shared geometry
// ============================================================================

/// A point in room space. Rooms are centred on the origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct PointDef {
    pub x: f32,
    pub y: f32,
}

impl PointDef {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SizeDef {
    pub width: f32,
    pub height: f32,
}

impl SizeDef {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ColorDef {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl ColorDef {
    pub fn to_color(self) -> Color {
        Color::srgb(self.r, self.g, self.b)
    }
}

// ============================================================================
// Themes (themes.ron)
// ============================================================================

/// A named pool of room blueprints assigned to a block of plan slots.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeDef {
    pub id: String,
    pub name: String,
    /// Blueprint ids, in pool order. The plan stores indices into this list.
    pub room_ids: Vec<String>,
}

// ============================================================================
// Room blueprints (rooms.ron)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RoomBlueprintDef {
    pub id: String,
    pub name: String,
    pub size: SizeDef,
    #[serde(default)]
    pub player_spawn: Option<PointDef>,
    #[serde(default)]
    pub exit_anchor: Option<PointDef>,
    #[serde(default)]
    pub enemy_spawns: Vec<PointDef>,
    /// A gate authored into the room. Preferred over the generic template.
    #[serde(default)]
    pub exit_gate: Option<GateDef>,
    #[serde(default)]
    pub spawn_profile_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct GateDef {
    pub position: PointDef,
    pub size: SizeDef,
}

// ============================================================================
// Spawn profiles (spawn_profiles.ron)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpawnProfileDef {
    pub id: String,
    pub entries: Vec<SpawnEntryDef>,
    /// Spawn one enemy at a time instead of all at once
    #[serde(default)]
    pub gradual: bool,
    /// Seconds to wait before the first gradual spawn
    #[serde(default)]
    pub initial_delay: f32,
    /// Seconds between gradual spawns, drawn uniformly
    #[serde(default)]
    pub per_spawn_delay: DelayRangeDef,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpawnEntryDef {
    pub enemy_id: String,
    pub min_count: u32,
    /// Inclusive
    pub max_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct DelayRangeDef {
    pub min: f32,
    pub max: f32,
}

// ============================================================================
// Enemies (enemies.ron)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EnemyDef {
    pub id: String,
    pub name: String,
    pub health: f32,
    pub size: f32,
    pub color: ColorDef,
}

// ============================================================================
// Run defaults (run_defaults.ron)
// ============================================================================

/// Single-struct file holding run length, theme order, repair and gate settings.
#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
pub struct RunDefaults {
    pub schema_version: u32,
    /// 0 draws a random seed per run
    pub seed: u64,
    pub total_rooms: usize,
    pub rooms_per_theme: usize,
    pub theme_order: Vec<String>,
    pub auto_repair: AutoRepairDefaults,
    /// Generic gate spawned at the exit anchor of rooms without an authored gate
    #[serde(default)]
    pub exit_gate_template: Option<GateTemplateDef>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AutoRepairDefaults {
    pub enabled: bool,
    /// Enemy spawn points synthesized for rooms that have none
    pub enemy_spawn_count: usize,
    /// Radius of the ring the synthesized spawn points sit on
    pub enemy_spawn_radius: f32,
    /// Offset of the synthesized exit anchor from the room centre
    pub exit_offset: PointDef,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct GateTemplateDef {
    pub size: SizeDef,
}

impl Default for AutoRepairDefaults {
    fn default() -> Self {
        Self {
            enabled: true,
            enemy_spawn_count: 4,
            enemy_spawn_radius: 180.0,
            exit_offset: PointDef::new(0.0, 220.0),
        }
    }
}

impl Default for RunDefaults {
    fn default() -> Self {
        Self {
            schema_version: 1,
            seed: 0,
            total_rooms: 6,
            rooms_per_theme: 3,
            theme_order: Vec::new(),
            auto_repair: AutoRepairDefaults::default(),
            exit_gate_template: Some(GateTemplateDef {
                size: SizeDef::new(96.0, 32.0),
            }),
        }
    }
}
