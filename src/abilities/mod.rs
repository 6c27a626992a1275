//! Abilities domain: guarded abilities and the arbiter that decides which may run.

mod arbiter;
pub mod behaviors;
mod events;
mod input;
mod policy;
mod unit;


pub use arbiter::{AbilityArbiter, AbilityTransition, ArbiterError};
pub use events::{AbilityEnded, AbilityStarted};
pub use input::KeyStates;
pub use policy::{AbilityId, BlockRule, EndPolicy, Exclusivity, StartPolicy};
pub use unit::{AbilityBehavior, AbilityUnit};

use bevy::prelude::*;

pub struct AbilitiesPlugin;

impl Plugin for AbilitiesPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<AbilityStarted>()
            .add_message::<AbilityEnded>();
    }
}
