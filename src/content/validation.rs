//! Validation for cross-references and ranges between content definitions.

use super::data::*;
use super::registry::ContentRegistry;

/// What is wrong with a field.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationProblem {
    MissingReference {
        target_type: &'static str,
        missing_id: String,
    },
    InvertedRange {
        min: f32,
        max: f32,
    },
    NegativeValue(f32),
    EmptyPool,
}

/// A validation error with context about what failed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub source_type: &'static str,
    pub source_id: String,
    pub field: &'static str,
    pub problem: ValidationProblem,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.problem {
            ValidationProblem::MissingReference {
                target_type,
                missing_id,
            } => write!(
                f,
                "{} '{}' references missing {} '{}' in field '{}'",
                self.source_type, self.source_id, target_type, missing_id, self.field
            ),
            ValidationProblem::InvertedRange { min, max } => write!(
                f,
                "{} '{}' has min {} greater than max {} in field '{}'",
                self.source_type, self.source_id, min, max, self.field
            ),
            ValidationProblem::NegativeValue(value) => write!(
                f,
                "{} '{}' has negative value {} in field '{}'",
                self.source_type, self.source_id, value, self.field
            ),
            ValidationProblem::EmptyPool => write!(
                f,
                "{} '{}' has an empty '{}'",
                self.source_type, self.source_id, self.field
            ),
        }
    }
}

/// Helper macro for checking a reference exists
macro_rules! check_ref {
    ($errors:expr, $registry_map:expr, $source_type:expr, $source_id:expr, $field:expr, $target_type:expr, $ref_id:expr) => {
        if !$registry_map.contains_key($ref_id) {
            $errors.push(ValidationError {
                source_type: $source_type,
                source_id: $source_id.to_string(),
                field: $field,
                problem: ValidationProblem::MissingReference {
                    target_type: $target_type,
                    missing_id: $ref_id.to_string(),
                },
            });
        }
    };
}

/// Validate all cross-references in the registry and the run defaults.
/// Returns a list of validation errors, empty if everything is consistent.
pub fn validate_content(registry: &ContentRegistry, defaults: &RunDefaults) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    // Validate themes
    for theme in &registry.themes {
        if theme.room_ids.is_empty() {
            errors.push(ValidationError {
                source_type: "Theme",
                source_id: theme.id.clone(),
                field: "room_ids",
                problem: ValidationProblem::EmptyPool,
            });
        }
        for room_id in &theme.room_ids {
            check_ref!(
                errors,
                registry.rooms,
                "Theme",
                &theme.id,
                "room_ids",
                "Room",
                room_id
            );
        }
    }

    // Validate rooms
    for (id, room) in &registry.rooms {
        if let Some(ref profile_id) = room.spawn_profile_id {
            check_ref!(
                errors,
                registry.spawn_profiles,
                "Room",
                id,
                "spawn_profile_id",
                "SpawnProfile",
                profile_id
            );
        }
    }

    // Validate spawn profiles
    for (id, profile) in &registry.spawn_profiles {
        for entry in &profile.entries {
            check_ref!(
                errors,
                registry.enemies,
                "SpawnProfile",
                id,
                "entries.enemy_id",
                "Enemy",
                &entry.enemy_id
            );
            if entry.min_count > entry.max_count {
                errors.push(ValidationError {
                    source_type: "SpawnProfile",
                    source_id: id.clone(),
                    field: "entries.min_count",
                    problem: ValidationProblem::InvertedRange {
                        min: entry.min_count as f32,
                        max: entry.max_count as f32,
                    },
                });
            }
        }

        if profile.gradual {
            if profile.per_spawn_delay.min > profile.per_spawn_delay.max {
                errors.push(ValidationError {
                    source_type: "SpawnProfile",
                    source_id: id.clone(),
                    field: "per_spawn_delay",
                    problem: ValidationProblem::InvertedRange {
                        min: profile.per_spawn_delay.min,
                        max: profile.per_spawn_delay.max,
                    },
                });
            }
            if profile.initial_delay < 0.0 {
                errors.push(ValidationError {
                    source_type: "SpawnProfile",
                    source_id: id.clone(),
                    field: "initial_delay",
                    problem: ValidationProblem::NegativeValue(profile.initial_delay),
                });
            }
        }
    }

    // Validate run defaults
    for theme_id in &defaults.theme_order {
        if registry.theme(theme_id).is_none() {
            errors.push(ValidationError {
                source_type: "RunDefaults",
                source_id: "run_defaults".to_string(),
                field: "theme_order",
                problem: ValidationProblem::MissingReference {
                    target_type: "Theme",
                    missing_id: theme_id.clone(),
                },
            });
        }
    }

    errors
}
