//! Physics domain: per-frame locomotion integration.

use bevy::prelude::*;

use crate::abilities::AbilityId;
use crate::physics::force::{BodyConfigError, ForceAccumulator, ForceMode};
use crate::physics::probe::{GroundProbe, MotionBody};

/// Continuous force contribution re-applied at the start of every step.
pub type TickHook = Box<dyn FnMut(&mut ForceAccumulator) + Send + Sync>;

/// Sphere used to detect ground, relative to the body origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundCheck {
    pub offset: Vec3,
    pub radius: f32,
}

impl Default for GroundCheck {
    fn default() -> Self {
        Self {
            offset: Vec3::new(0.0, -0.9, 0.0),
            radius: 0.3,
        }
    }
}

/// Load-time body parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegratorSettings {
    pub mass: f32,
    pub gravity: Vec3,
    pub movement_epsilon: f32,
    /// Vertical velocity a grounded, falling body is pinned to.
    pub grounded_clamp_velocity: f32,
    pub ground_check: GroundCheck,
}

impl Default for IntegratorSettings {
    fn default() -> Self {
        Self {
            mass: 1.0,
            gravity: Vec3::new(0.0, -9.81, 0.0),
            movement_epsilon: 0.001,
            grounded_clamp_velocity: -2.0,
            ground_check: GroundCheck::default(),
        }
    }
}

/// Advances one body's velocity, position and facing once per frame.
#[derive(Component)]
pub struct LocomotionIntegrator {
    forces: ForceAccumulator,
    ground_check: GroundCheck,
    grounded_clamp_velocity: f32,
    is_grounded: bool,
    speed: f32,
    yaw: f32,
    pending_yaw: f32,
    tick_hooks: Vec<(AbilityId, TickHook)>,
}

impl std::fmt::Debug for LocomotionIntegrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let hook_owners: Vec<AbilityId> = self.tick_hooks.iter().map(|(id, _)| *id).collect();
        f.debug_struct("LocomotionIntegrator")
            .field("forces", &self.forces)
            .field("ground_check", &self.ground_check)
            .field("is_grounded", &self.is_grounded)
            .field("speed", &self.speed)
            .field("yaw", &self.yaw)
            .field("pending_yaw", &self.pending_yaw)
            .field("tick_hooks", &hook_owners)
            .finish()
    }
}

impl LocomotionIntegrator {
    pub fn new(settings: IntegratorSettings) -> Result<Self, BodyConfigError> {
        let forces = ForceAccumulator::new(
            settings.mass,
            settings.gravity,
            settings.movement_epsilon,
        )?;
        if !settings.ground_check.radius.is_finite() || settings.ground_check.radius <= 0.0 {
            return Err(BodyConfigError::NonPositiveProbeRadius(
                settings.ground_check.radius,
            ));
        }

        Ok(Self {
            forces,
            ground_check: settings.ground_check,
            grounded_clamp_velocity: settings.grounded_clamp_velocity,
            is_grounded: false,
            speed: 0.0,
            yaw: 0.0,
            pending_yaw: 0.0,
            tick_hooks: Vec::new(),
        })
    }

    pub fn forces(&self) -> &ForceAccumulator {
        &self.forces
    }

    pub fn forces_mut(&mut self) -> &mut ForceAccumulator {
        &mut self.forces
    }

    pub fn add_force(&mut self, vector: Vec3, mode: ForceMode) {
        self.forces.add_force(vector, mode);
    }

    pub fn velocity(&self) -> Vec3 {
        self.forces.velocity()
    }

    pub fn is_grounded(&self) -> bool {
        self.is_grounded
    }

    /// Speed published by the last integration step.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn facing(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    /// Forward direction on the ground plane (Bevy forward is -Z).
    pub fn forward(&self) -> Vec3 {
        self.facing() * Vec3::NEG_Z
    }

    pub fn ground_check(&self) -> GroundCheck {
        self.ground_check
    }

    /// Queue a turn; applied and cleared at the end of the next step.
    pub fn add_yaw(&mut self, delta: f32) {
        self.pending_yaw += delta;
    }

    pub fn pending_yaw(&self) -> f32 {
        self.pending_yaw
    }

    /// Register `hook` to run before every integration step. Replaces any
    /// hook already held by `owner`.
    pub fn register_tick_hook(&mut self, owner: AbilityId, hook: TickHook) {
        self.unregister_tick_hook(owner);
        self.tick_hooks.push((owner, hook));
    }

    /// Returns whether a hook was removed.
    pub fn unregister_tick_hook(&mut self, owner: AbilityId) -> bool {
        let before = self.tick_hooks.len();
        self.tick_hooks.retain(|(id, _)| *id != owner);
        before != self.tick_hooks.len()
    }

    pub fn has_tick_hook(&self, owner: AbilityId) -> bool {
        self.tick_hooks.iter().any(|(id, _)| *id == owner)
    }

    /// Record the length of the frame about to be assembled.
    pub fn begin_frame(&mut self, delta_time: f32) {
        self.forces.begin_frame(delta_time);
    }

    /// Ground check: overlap a sphere at the configured offset from `position`.
    pub fn sample_ground(&mut self, probe: &impl GroundProbe, position: Vec3) -> bool {
        let center = position + self.ground_check.offset;
        self.is_grounded = probe.overlaps_ground(center, self.ground_check.radius);
        self.is_grounded
    }

    /// Consume this frame's forces and move `body`.
    pub fn integrate(&mut self, body: &mut impl MotionBody) {
        for (_, hook) in &mut self.tick_hooks {
            hook(&mut self.forces);
        }

        let mut velocity = self.forces.velocity();
        if self.is_grounded && velocity.y < 0.0 {
            velocity.y = self.grounded_clamp_velocity;
            self.forces.set_velocity(velocity);
        }

        self.forces.consume();

        let velocity = self.forces.velocity();
        let epsilon = self.forces.movement_epsilon();
        if velocity.length_squared() > epsilon * epsilon {
            body.move_by(velocity * self.forces.delta_time());
            self.speed = velocity.length();
        } else {
            self.speed = 0.0;
        }

        if self.pending_yaw != 0.0 {
            self.yaw = (self.yaw + self.pending_yaw).rem_euclid(std::f32::consts::TAU);
            self.pending_yaw = 0.0;
            body.set_facing(self.facing());
        }
    }

    /// Ground check followed by integration, for single-phase hosts.
    pub fn step(&mut self, probe: &impl GroundProbe, body: &mut impl MotionBody) {
        let position = body.position();
        self.sample_ground(probe, position);
        self.integrate(body);
    }
}
