//! Abilities domain: the per-frame key state seam polled by the arbiter.

use bevy::prelude::*;

/// Per-frame key queries.
pub trait KeyStates {
    fn just_pressed(&self, key: KeyCode) -> bool;
    fn pressed(&self, key: KeyCode) -> bool;
    fn just_released(&self, key: KeyCode) -> bool;
}

impl KeyStates for ButtonInput<KeyCode> {
    fn just_pressed(&self, key: KeyCode) -> bool {
        ButtonInput::just_pressed(self, key)
    }

    fn pressed(&self, key: KeyCode) -> bool {
        ButtonInput::pressed(self, key)
    }

    fn just_released(&self, key: KeyCode) -> bool {
        ButtonInput::just_released(self, key)
    }
}
