//! Content domain: locomotion config loading, validation and assembly.

mod assembly;
mod data;
mod loader;
mod validation;

#[cfg(test)]
mod tests;

pub use assembly::{AssemblyError, build_ability, build_body, integrator_settings};
pub use data::*;
pub use loader::{
    ContentLoadError, SCHEMA_VERSION, load_locomotion_config, parse_locomotion_config,
};
pub use validation::{ValidationError, validate_config};

use bevy::prelude::*;
use std::path::Path;

/// Location of the locomotion config relative to the working directory.
pub const LOCOMOTION_CONFIG_PATH: &str = "assets/data/locomotion.ron";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        // Bodies are spawned from the config in Startup.
        app.add_systems(PreStartup, load_content);
    }
}

fn load_content(mut commands: Commands) {
    let config = match load_locomotion_config(Path::new(LOCOMOTION_CONFIG_PATH)) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            panic!("Locomotion content failed to load, see log for details");
        }
    };

    let errors = validate_config(&config);
    if !errors.is_empty() {
        for e in &errors {
            error!("Content validation: {}", e);
        }
        panic!(
            "Locomotion content has {} validation error(s), see log for details",
            errors.len()
        );
    }

    info!(
        "Locomotion content loaded: {} abilities ({}), default speed {}",
        config.abilities.len(),
        config
            .abilities
            .iter()
            .map(|a| format!("{}:{}", a.name, a.kind.label()))
            .collect::<Vec<_>>()
            .join(", "),
        config.body.default_speed
    );

    commands.insert_resource(config);
}
