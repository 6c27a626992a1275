//! Movement domain: hosts the locomotion core in the Bevy frame loop.

mod bootstrap;
mod components;
#[cfg(feature = "dev-tools")]
mod dev;
mod resources;
mod systems;

#[cfg(test)]
mod tests;

pub use components::{GameLayer, Ground, LocomotionReadout, MoveIntent, Player};
pub use resources::{MovementBindings, MovementTuning};
pub use systems::movement::planar_velocity_change;

use bevy::prelude::*;

use crate::abilities::AbilitiesPlugin;

/// Frame phases of the locomotion loop, run in this order in `Update`.
/// `GroundSample` runs on the fixed step.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum LocomotionSet {
    GroundSample,
    Input,
    Arbitrate,
    Integrate,
    Present,
}

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<AbilitiesPlugin>() {
            app.add_plugins(AbilitiesPlugin);
        }

        app.init_resource::<MovementTuning>()
            .init_resource::<MovementBindings>()
            .configure_sets(
                Update,
                (
                    LocomotionSet::Input,
                    LocomotionSet::Arbitrate,
                    LocomotionSet::Integrate,
                    LocomotionSet::Present,
                )
                    .chain(),
            )
            .add_systems(Startup, bootstrap::spawn_player)
            .add_systems(PostStartup, bootstrap::verify_locomotion_bodies)
            .add_systems(
                FixedUpdate,
                systems::sample_ground.in_set(LocomotionSet::GroundSample),
            )
            .add_systems(
                Update,
                (
                    (systems::begin_locomotion_frame, systems::read_move_input)
                        .in_set(LocomotionSet::Input),
                    systems::dispatch_ability_input.in_set(LocomotionSet::Arbitrate),
                    (
                        systems::apply_planar_drive,
                        systems::apply_turn_input,
                        systems::integrate_bodies,
                    )
                        .chain()
                        .in_set(LocomotionSet::Integrate),
                    systems::publish_readout.in_set(LocomotionSet::Present),
                ),
            );

        #[cfg(feature = "dev-tools")]
        app.add_systems(Startup, dev::spawn_test_arena);
    }
}
