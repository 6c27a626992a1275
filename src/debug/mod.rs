//! Debug domain: on-screen locomotion readout for fast iteration.
//!
//! F3 toggles the overlay.

mod systems;

use bevy::prelude::*;

use crate::movement::LocomotionSet;

/// Resource tracking debug overlay state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    pub show_info: bool,
}

/// Marker for the locomotion info overlay
#[derive(Component, Debug)]
pub struct DebugInfoOverlay;

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(DebugState { show_info: true })
            .add_systems(
                Update,
                (systems::toggle_debug_info, systems::update_debug_info_overlay)
                    .chain()
                    .after(LocomotionSet::Present),
            );
    }
}
