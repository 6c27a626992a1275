//! Jump: an upward impulse from the ground, with optional airborne gravity.

use bevy::prelude::*;

use crate::abilities::{AbilityBehavior, AbilityId};
use crate::physics::{ForceMode, LocomotionIntegrator};

#[derive(Debug, Clone)]
pub struct Jump {
    impulse: f32,
    air_gravity: Option<Vec3>,
    saved_gravity: Option<Vec3>,
    in_flight: bool,
    left_ground: bool,
}

impl Jump {
    /// `impulse` is applied straight up on takeoff; `air_gravity` replaces
    /// the body's gravity until landing.
    pub fn new(impulse: f32, air_gravity: Option<Vec3>) -> Self {
        Self {
            impulse,
            air_gravity,
            saved_gravity: None,
            in_flight: false,
            left_ground: false,
        }
    }

    pub fn is_airborne(&self) -> bool {
        self.in_flight && self.left_ground
    }
}

impl AbilityBehavior for Jump {
    fn can_start(&self, body: &LocomotionIntegrator) -> bool {
        body.is_grounded()
    }

    fn on_enable(&mut self, _id: AbilityId, body: &mut LocomotionIntegrator) {
        self.in_flight = true;
        self.left_ground = false;
        body.add_force(Vec3::Y * self.impulse, ForceMode::Impulse);
        if let Some(gravity) = self.air_gravity {
            self.saved_gravity = Some(body.forces_mut().replace_gravity(gravity));
        }
    }

    fn on_disable(&mut self, _id: AbilityId, body: &mut LocomotionIntegrator) {
        self.in_flight = false;
        self.left_ground = false;
        if let Some(gravity) = self.saved_gravity.take() {
            body.forces_mut().replace_gravity(gravity);
        }
    }

    fn tick(&mut self, body: &LocomotionIntegrator, _dt: f32) {
        if self.in_flight && !body.is_grounded() {
            self.left_ground = true;
        }
    }

    fn wants_to_end(&self, body: &LocomotionIntegrator) -> bool {
        self.left_ground && body.is_grounded()
    }

    fn phase_label(&self) -> Option<&'static str> {
        match (self.in_flight, self.left_ground) {
            (false, _) => None,
            (true, false) => Some("takeoff"),
            (true, true) => Some("airborne"),
        }
    }
}
