//! Core domain: scene setup for the demo host.

mod systems;

use bevy::prelude::*;

use crate::movement::LocomotionSet;

/// Where the camera sits relative to the player it follows.
#[derive(Resource, Debug, Clone)]
pub struct CameraRig {
    pub offset: Vec3,
    /// Exponential follow rate, per second.
    pub follow_rate: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            offset: Vec3::new(0.0, 4.0, 9.0),
            follow_rate: 6.0,
        }
    }
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraRig>()
            .add_systems(Startup, systems::setup_scene)
            .add_systems(
                Update,
                systems::follow_player.in_set(LocomotionSet::Present),
            );
    }
}
