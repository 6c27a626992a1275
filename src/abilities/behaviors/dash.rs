//! Dash: a burst of velocity along the facing direction for a fixed time.

use crate::abilities::{AbilityBehavior, AbilityId, AbilityUnit};
use crate::physics::{ForceMode, LocomotionIntegrator};

#[derive(Debug, Clone)]
pub struct Dash {
    speed: f32,
    duration: f32,
    remaining: f32,
    owner: Option<AbilityId>,
}

impl Dash {
    pub fn new(speed: f32, duration: f32) -> Self {
        Self {
            speed,
            duration,
            remaining: 0.0,
            owner: None,
        }
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}

impl AbilityBehavior for Dash {
    /// A dash runs to completion unless forced.
    fn should_block_end(&self, candidate: &AbilityUnit) -> bool {
        self.owner == Some(candidate.id()) && self.remaining > 0.0
    }

    fn on_enable(&mut self, id: AbilityId, body: &mut LocomotionIntegrator) {
        self.owner = Some(id);
        self.remaining = self.duration;
        let burst = body.forward() * self.speed;
        body.add_force(burst, ForceMode::VelocityChange);
    }

    fn on_disable(&mut self, _id: AbilityId, _body: &mut LocomotionIntegrator) {
        self.remaining = 0.0;
    }

    fn tick(&mut self, _body: &LocomotionIntegrator, dt: f32) {
        if self.remaining > 0.0 {
            self.remaining = (self.remaining - dt).max(0.0);
        }
    }

    fn wants_to_end(&self, _body: &LocomotionIntegrator) -> bool {
        self.remaining <= 0.0
    }

    fn overrides_planar_drive(&self) -> bool {
        self.remaining > 0.0
    }

    fn phase_label(&self) -> Option<&'static str> {
        (self.remaining > 0.0).then_some("dashing")
    }
}
