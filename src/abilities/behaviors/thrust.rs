//! Thrust: a continuous force re-applied every step while active.

use bevy::prelude::*;

use crate::abilities::{AbilityBehavior, AbilityId};
use crate::physics::{ForceAccumulator, ForceMode, LocomotionIntegrator};

#[derive(Debug, Clone, Copy)]
pub struct Thrust {
    force: Vec3,
    mode: ForceMode,
}

impl Thrust {
    pub fn new(force: Vec3, mode: ForceMode) -> Self {
        Self { force, mode }
    }
}

impl AbilityBehavior for Thrust {
    fn on_enable(&mut self, id: AbilityId, body: &mut LocomotionIntegrator) {
        let Thrust { force, mode } = *self;
        body.register_tick_hook(
            id,
            Box::new(move |forces: &mut ForceAccumulator| forces.add_force(force, mode)),
        );
    }

    fn on_disable(&mut self, id: AbilityId, body: &mut LocomotionIntegrator) {
        body.unregister_tick_hook(id);
    }
}
