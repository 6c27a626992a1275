//! Movement domain: planar drive, integration and readout systems.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::abilities::AbilityArbiter;
use crate::movement::{LocomotionReadout, MoveIntent, MovementTuning};
use crate::physics::{ForceMode, LocomotionIntegrator, MotionBody};

/// Velocity change steering the planar velocity toward `speed` along `axis`.
///
/// `axis` is body space (y = forward) and is rotated by `facing`. Vertical
/// velocity is never touched. `control` scales the correction (1 = reach the
/// target this frame).
pub fn planar_velocity_change(
    current: Vec3,
    facing: Quat,
    axis: Vec2,
    speed: f32,
    control: f32,
) -> Vec3 {
    let axis = axis.clamp_length_max(1.0);
    let target = facing * Vec3::new(axis.x, 0.0, -axis.y) * speed;
    let planar = Vec3::new(current.x, 0.0, current.z);
    (target - planar) * control
}

/// Steer planar velocity toward the arbiter's effective speed.
pub(crate) fn apply_planar_drive(
    tuning: Res<MovementTuning>,
    mut bodies: Query<(&MoveIntent, &AbilityArbiter, &mut LocomotionIntegrator)>,
) {
    for (intent, arbiter, mut body) in &mut bodies {
        if arbiter.planar_drive_suppressed() {
            continue;
        }

        let control = if body.is_grounded() {
            1.0
        } else if intent.axis == Vec2::ZERO {
            // Airborne without input keeps its momentum
            0.0
        } else {
            tuning.air_control
        };

        let change = planar_velocity_change(
            body.velocity(),
            body.facing(),
            intent.axis,
            arbiter.effective_speed(),
            control,
        );
        body.add_force(change, ForceMode::VelocityChange);
    }
}

pub(crate) fn apply_turn_input(
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    mut bodies: Query<(&MoveIntent, &mut LocomotionIntegrator)>,
) {
    let dt = time.delta_secs();
    for (intent, mut body) in &mut bodies {
        if intent.turn != 0.0 {
            // Yaw grows counter-clockwise, so turning right is negative.
            body.add_yaw(-intent.turn * tuning.turn_speed * dt);
        }
    }
}

/// Drives a dynamic rigid body through its linear velocity.
///
/// Velocity starts each frame at zero so a body under the movement gate stops.
pub(crate) struct RigidBodyMotion<'a> {
    position: Vec3,
    delta_time: f32,
    velocity: &'a mut LinearVelocity,
    rotation: &'a mut Quat,
}

impl<'a> RigidBodyMotion<'a> {
    pub(crate) fn new(
        position: Vec3,
        delta_time: f32,
        velocity: &'a mut LinearVelocity,
        rotation: &'a mut Quat,
    ) -> Self {
        velocity.0 = Vec3::ZERO;
        Self {
            position,
            delta_time,
            velocity,
            rotation,
        }
    }
}

impl MotionBody for RigidBodyMotion<'_> {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn move_by(&mut self, delta: Vec3) {
        if self.delta_time > 0.0 {
            self.velocity.0 = delta / self.delta_time;
        }
        self.position += delta;
    }

    fn set_facing(&mut self, rotation: Quat) {
        *self.rotation = rotation;
    }
}

pub(crate) fn integrate_bodies(
    mut bodies: Query<(&mut LocomotionIntegrator, &mut Transform, &mut LinearVelocity)>,
) {
    for (mut body, mut transform, mut velocity) in &mut bodies {
        let dt = body.forces().delta_time();
        let transform = &mut *transform;
        let mut motion =
            RigidBodyMotion::new(transform.translation, dt, &mut velocity, &mut transform.rotation);
        body.integrate(&mut motion);
    }
}

pub(crate) fn publish_readout(
    mut bodies: Query<(&LocomotionIntegrator, &AbilityArbiter, &mut LocomotionReadout)>,
) {
    for (body, arbiter, mut readout) in &mut bodies {
        let next = LocomotionReadout {
            speed: body.speed(),
            is_grounded: body.is_grounded(),
            velocity: body.velocity(),
            current_ability: arbiter.current_exclusive(),
            effective_speed: arbiter.effective_speed(),
        };
        readout.set_if_neq(next);
    }
}
