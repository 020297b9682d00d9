//! Content domain: RON-backed themes, room blueprints, spawn profiles and enemies.

mod data;
mod defaults;
mod loader;
mod registry;
mod validation;


pub use data::*;
pub use defaults::builtin_registry;
pub use loader::{ContentLoadError, load_all_content};
pub use registry::ContentRegistry;
pub use validation::{ValidationError, ValidationProblem, validate_content};

use bevy::prelude::*;
use std::path::Path;

use crate::core::{RunConfig, seed_from_env};

/// Directory the data files are read from, relative to the working directory.
pub const CONTENT_DIR: &str = "assets/data";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_content);
    }
}

/// Load content, validate it, and derive the run configuration.
/// Falls back to built-in content with error!() logs when loading fails.
pub(crate) fn load_content(mut commands: Commands) {
    let (registry, run_defaults) = match load_all_content(Path::new(CONTENT_DIR)) {
        Ok(loaded) => loaded,
        Err(errors) => {
            for e in &errors {
                error!("[CONTENT] {}", e);
            }
            error!(
                "[CONTENT] {} content file(s) failed to load from '{}'. Using built-in content.",
                errors.len(),
                CONTENT_DIR
            );
            (builtin_registry(), RunDefaults::default())
        }
    };

    let problems = validate_content(&registry, &run_defaults);
    for problem in &problems {
        error!("[CONTENT] {}", problem);
    }

    info!("{}", registry.summary());

    let run_config = RunConfig::from_defaults(&run_defaults).with_seed_override(seed_from_env());
    info!(
        "[CONTENT] Run config: {} rooms, {} per theme, seed {}",
        run_config.total_rooms, run_config.rooms_per_theme, run_config.seed
    );

    commands.insert_resource(run_config);
    commands.insert_resource(run_defaults);
    commands.insert_resource(registry);
}
