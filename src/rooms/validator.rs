//! Rooms domain: anchor checks and auto-repair for instantiated room layouts.

use std::f32::consts::TAU;
use std::fmt;

use bevy::prelude::*;

use crate::content::{AutoRepairDefaults, RoomBlueprintDef};

/// Distance kept between synthesized points and the room walls
const WALL_MARGIN: f32 = 48.0;

/// Room-space anchors of one room instance. Rooms are centred on the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomLayout {
    pub size: Vec2,
    pub player_spawn: Option<Vec2>,
    pub exit_anchor: Option<Vec2>,
    pub enemy_spawns: Vec<Vec2>,
}

impl RoomLayout {
    pub fn from_blueprint(blueprint: &RoomBlueprintDef) -> Self {
        Self {
            size: blueprint.size.to_vec2(),
            player_spawn: blueprint.player_spawn.map(|p| p.to_vec2()),
            exit_anchor: blueprint.exit_anchor.map(|p| p.to_vec2()),
            enemy_spawns: blueprint.enemy_spawns.iter().map(|p| p.to_vec2()).collect(),
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::ZERO
    }

    /// Largest offset from the centre that still keeps a point inside the walls.
    fn inner_half_extents(&self) -> Vec2 {
        (self.size / 2.0 - Vec2::splat(WALL_MARGIN)).max(Vec2::ZERO)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    PlayerSpawn,
    ExitAnchor,
    EnemySpawns,
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anchor::PlayerSpawn => write!(f, "player spawn"),
            Anchor::ExitAnchor => write!(f, "exit anchor"),
            Anchor::EnemySpawns => write!(f, "enemy spawn points"),
        }
    }
}

/// One thing the validator had to make up, or could not.
#[derive(Debug, Clone, PartialEq)]
pub enum RepairWarning {
    PlayerSpawnAtCenter,
    ExitAnchorSynthesized { position: Vec2 },
    EnemySpawnsSynthesized { count: usize },
    LeftMissing { anchor: Anchor },
}

impl fmt::Display for RepairWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepairWarning::PlayerSpawnAtCenter => {
                write!(f, "missing player spawn, using the room centre")
            }
            RepairWarning::ExitAnchorSynthesized { position } => write!(
                f,
                "missing exit anchor, synthesized at ({:.0}, {:.0})",
                position.x, position.y
            ),
            RepairWarning::EnemySpawnsSynthesized { count } => write!(
                f,
                "missing enemy spawn points, synthesized {} around the centre",
                count
            ),
            RepairWarning::LeftMissing { anchor } => {
                write!(f, "missing {} and auto-repair is disabled", anchor)
            }
        }
    }
}

/// Fills in missing anchors so a malformed blueprint still loads.
pub struct RoomValidator<'a> {
    settings: &'a AutoRepairDefaults,
}

impl<'a> RoomValidator<'a> {
    pub fn new(settings: &'a AutoRepairDefaults) -> Self {
        Self { settings }
    }

    pub fn missing(layout: &RoomLayout) -> Vec<Anchor> {
        let mut missing = Vec::new();
        if layout.player_spawn.is_none() {
            missing.push(Anchor::PlayerSpawn);
        }
        if layout.exit_anchor.is_none() {
            missing.push(Anchor::ExitAnchor);
        }
        if layout.enemy_spawns.is_empty() {
            missing.push(Anchor::EnemySpawns);
        }
        missing
    }

    /// Synthesize every missing anchor. Each synthesis yields one warning.
    pub fn repair(&self, layout: &mut RoomLayout) -> Vec<RepairWarning> {
        let missing = Self::missing(layout);
        if !self.settings.enabled {
            return missing
                .into_iter()
                .map(|anchor| RepairWarning::LeftMissing { anchor })
                .collect();
        }

        let mut warnings = Vec::with_capacity(missing.len());
        for anchor in missing {
            match anchor {
                Anchor::PlayerSpawn => {
                    layout.player_spawn = Some(layout.center());
                    warnings.push(RepairWarning::PlayerSpawnAtCenter);
                }
                Anchor::ExitAnchor => {
                    let position = self.exit_anchor_for(layout);
                    layout.exit_anchor = Some(position);
                    warnings.push(RepairWarning::ExitAnchorSynthesized { position });
                }
                Anchor::EnemySpawns => {
                    layout.enemy_spawns = self.radial_spawns_for(layout);
                    if layout.enemy_spawns.is_empty() {
                        warnings.push(RepairWarning::LeftMissing { anchor });
                    } else {
                        warnings.push(RepairWarning::EnemySpawnsSynthesized {
                            count: layout.enemy_spawns.len(),
                        });
                    }
                }
            }
        }
        warnings
    }

    fn exit_anchor_for(&self, layout: &RoomLayout) -> Vec2 {
        let half = layout.inner_half_extents();
        let offset = self.settings.exit_offset.to_vec2().clamp(-half, half);
        layout.center() + offset
    }

    /// Evenly spaced points on a ring around the centre, shrunk to fit the room.
    fn radial_spawns_for(&self, layout: &RoomLayout) -> Vec<Vec2> {
        let count = self.settings.enemy_spawn_count;
        let half = layout.inner_half_extents();
        let radius = self.settings.enemy_spawn_radius.max(0.0).min(half.min_element());

        (0..count)
            .map(|i| {
                let angle = TAU * i as f32 / count as f32;
                layout.center() + Vec2::from_angle(angle) * radius
            })
            .collect()
    }
}
