//! Physics domain: tests for force modes and the integration order.

use bevy::prelude::*;

use super::{
    BodyConfigError, ForceAccumulator, ForceMode, GroundCheck, GroundProbe, IntegratorSettings,
    LocomotionIntegrator, MotionBody, SampledGround,
};
use crate::abilities::AbilityId;

const EPS: f32 = 1e-4;

/// Records every call the integrator makes on the body.
#[derive(Default)]
struct RecordingBody {
    position: Vec3,
    moves: Vec<Vec3>,
    facing: Option<Quat>,
}

impl MotionBody for RecordingBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn move_by(&mut self, delta: Vec3) {
        self.position += delta;
        self.moves.push(delta);
    }

    fn set_facing(&mut self, rotation: Quat) {
        self.facing = Some(rotation);
    }
}

/// Ground probe that remembers where it was asked to look.
struct SpyProbe {
    answer: bool,
    last_query: std::cell::Cell<Option<(Vec3, f32)>>,
}

impl GroundProbe for SpyProbe {
    fn overlaps_ground(&self, center: Vec3, radius: f32) -> bool {
        self.last_query.set(Some((center, radius)));
        self.answer
    }
}

fn weightless(mass: f32) -> LocomotionIntegrator {
    LocomotionIntegrator::new(IntegratorSettings {
        mass,
        gravity: Vec3::ZERO,
        ..default()
    })
    .unwrap()
}

// -----------------------------------------------------------------------------
// Force modes
// -----------------------------------------------------------------------------

#[test]
fn test_impulse_is_frame_rate_independent() {
    let mut body = weightless(10.0);
    body.begin_frame(0.1);
    body.add_force(Vec3::new(0.0, 100.0, 0.0), ForceMode::Impulse);

    body.step(&SampledGround(false), &mut RecordingBody::default());

    assert!((body.velocity().y - 10.0).abs() < EPS);
}

#[test]
fn test_impulse_same_result_at_other_frame_lengths() {
    for dt in [1.0 / 30.0, 1.0 / 60.0, 1.0 / 144.0] {
        let mut body = weightless(2.0);
        body.begin_frame(dt);
        body.add_force(Vec3::new(4.0, 0.0, 0.0), ForceMode::Impulse);
        body.step(&SampledGround(false), &mut RecordingBody::default());
        assert!((body.velocity().x - 2.0).abs() < EPS, "dt = {dt}");
    }
}

#[test]
fn test_velocity_change_ignores_mass_and_delta_time() {
    for (mass, dt) in [(1.0, 0.1), (50.0, 0.016), (0.25, 0.5)] {
        let mut forces = ForceAccumulator::new(mass, Vec3::new(0.0, -9.81, 0.0), 0.001).unwrap();
        forces.begin_frame(dt);
        let before_velocity = forces.velocity();
        let before_acceleration = forces.acceleration();

        forces.add_force(Vec3::new(1.5, -2.0, 3.0), ForceMode::VelocityChange);

        assert_eq!(forces.velocity() - before_velocity, Vec3::new(1.5, -2.0, 3.0));
        assert_eq!(forces.acceleration(), before_acceleration);
    }
}

#[test]
fn test_force_divides_by_mass_and_acceleration_does_not() {
    let mut forces = ForceAccumulator::new(4.0, Vec3::ZERO, 0.001).unwrap();
    forces.add_force(Vec3::new(8.0, 0.0, 0.0), ForceMode::Force);
    assert!((forces.acceleration().x - 2.0).abs() < EPS);

    forces.add_force(Vec3::new(0.0, 0.0, 3.0), ForceMode::Acceleration);
    assert!((forces.acceleration().z - 3.0).abs() < EPS);
}

#[test]
fn test_noise_floor_is_ignored_for_every_mode() {
    let mut forces = ForceAccumulator::new(1.0, Vec3::new(0.0, -9.81, 0.0), 0.01).unwrap();
    let noise = Vec3::new(0.005, 0.0, 0.005);

    for mode in [
        ForceMode::Force,
        ForceMode::Acceleration,
        ForceMode::Impulse,
        ForceMode::VelocityChange,
    ] {
        forces.add_force(noise, mode);
    }

    assert_eq!(forces.acceleration(), Vec3::new(0.0, -9.81, 0.0));
    assert_eq!(forces.velocity(), Vec3::ZERO);
}

#[test]
fn test_invalid_body_parameters_are_rejected() {
    assert_eq!(
        ForceAccumulator::new(0.0, Vec3::ZERO, 0.001).unwrap_err(),
        BodyConfigError::NonPositiveMass(0.0)
    );
    assert_eq!(
        ForceAccumulator::new(1.0, Vec3::ZERO, -1.0).unwrap_err(),
        BodyConfigError::NegativeEpsilon(-1.0)
    );

    let err = LocomotionIntegrator::new(IntegratorSettings {
        ground_check: GroundCheck {
            offset: Vec3::ZERO,
            radius: 0.0,
        },
        ..default()
    })
    .unwrap_err();
    assert_eq!(err, BodyConfigError::NonPositiveProbeRadius(0.0));
}

// -----------------------------------------------------------------------------
// Integration order
// -----------------------------------------------------------------------------

#[test]
fn test_acceleration_resets_to_gravity_after_step() {
    let gravity = Vec3::new(0.0, -9.81, 0.0);
    let mut body = LocomotionIntegrator::new(IntegratorSettings {
        gravity,
        ..default()
    })
    .unwrap();
    body.begin_frame(0.02);
    body.add_force(Vec3::new(30.0, 0.0, 0.0), ForceMode::Force);

    body.step(&SampledGround(false), &mut RecordingBody::default());
    assert_eq!(body.forces().acceleration(), gravity);

    // A second step without new forces only sees gravity.
    let vx = body.velocity().x;
    body.step(&SampledGround(false), &mut RecordingBody::default());
    assert!((body.velocity().x - vx).abs() < EPS);
}

#[test]
fn test_grounded_fall_is_clamped_before_gravity() {
    let mut body = LocomotionIntegrator::new(IntegratorSettings::default()).unwrap();
    body.begin_frame(0.1);
    body.forces_mut().set_velocity(Vec3::new(0.0, -5.0, 0.0));

    body.step(&SampledGround(true), &mut RecordingBody::default());

    // -2 from the clamp, then one frame of gravity on top.
    assert!((body.velocity().y - (-2.0 - 0.981)).abs() < EPS);
}

#[test]
fn test_airborne_fall_is_not_clamped() {
    let mut body = LocomotionIntegrator::new(IntegratorSettings::default()).unwrap();
    body.begin_frame(0.1);
    body.forces_mut().set_velocity(Vec3::new(0.0, -5.0, 0.0));

    body.step(&SampledGround(false), &mut RecordingBody::default());

    assert!((body.velocity().y - (-5.0 - 0.981)).abs() < EPS);
}

#[test]
fn test_ground_probe_uses_configured_offset() {
    let mut body = LocomotionIntegrator::new(IntegratorSettings {
        ground_check: GroundCheck {
            offset: Vec3::new(0.0, -1.0, 0.0),
            radius: 0.25,
        },
        ..default()
    })
    .unwrap();
    let probe = SpyProbe {
        answer: true,
        last_query: std::cell::Cell::new(None),
    };

    assert!(body.sample_ground(&probe, Vec3::new(3.0, 5.0, -2.0)));
    assert!(body.is_grounded());
    assert_eq!(
        probe.last_query.get(),
        Some((Vec3::new(3.0, 4.0, -2.0), 0.25))
    );
}

#[test]
fn test_moves_body_and_publishes_speed() {
    let mut body = weightless(1.0);
    body.begin_frame(0.5);
    body.add_force(Vec3::new(3.0, 0.0, 4.0), ForceMode::VelocityChange);
    let mut target = RecordingBody::default();

    body.step(&SampledGround(false), &mut target);

    assert_eq!(target.moves, vec![Vec3::new(1.5, 0.0, 2.0)]);
    assert!((body.speed() - 5.0).abs() < EPS);
}

#[test]
fn test_resting_body_does_not_move() {
    let mut body = weightless(1.0);
    let mut target = RecordingBody::default();

    body.step(&SampledGround(false), &mut target);

    assert!(target.moves.is_empty());
    assert_eq!(body.speed(), 0.0);
}

#[test]
fn test_pending_yaw_is_applied_once() {
    let mut body = weightless(1.0);
    let mut target = RecordingBody::default();
    body.add_yaw(0.25);
    body.add_yaw(0.25);

    body.step(&SampledGround(false), &mut target);
    assert!((body.yaw() - 0.5).abs() < EPS);
    assert_eq!(body.pending_yaw(), 0.0);
    assert!(target.facing.is_some());

    target.facing = None;
    body.step(&SampledGround(false), &mut target);
    assert!((body.yaw() - 0.5).abs() < EPS);
    assert!(target.facing.is_none());
}

// -----------------------------------------------------------------------------
// Tick hooks
// -----------------------------------------------------------------------------

#[test]
fn test_tick_hook_reapplies_every_step() {
    let mut body = weightless(2.0);
    body.begin_frame(0.5);
    body.register_tick_hook(
        AbilityId(7),
        Box::new(|forces: &mut ForceAccumulator| {
            forces.add_force(Vec3::new(4.0, 0.0, 0.0), ForceMode::Force)
        }),
    );

    body.step(&SampledGround(false), &mut RecordingBody::default());
    body.step(&SampledGround(false), &mut RecordingBody::default());

    // 4 / 2 = 2 m/s^2 for two half-second steps.
    assert!((body.velocity().x - 2.0).abs() < EPS);

    assert!(body.unregister_tick_hook(AbilityId(7)));
    assert!(!body.unregister_tick_hook(AbilityId(7)));
    body.step(&SampledGround(false), &mut RecordingBody::default());
    assert!((body.velocity().x - 2.0).abs() < EPS);
}

#[test]
fn test_registering_twice_replaces_hook() {
    let mut body = weightless(1.0);
    body.begin_frame(1.0);
    for _ in 0..2 {
        body.register_tick_hook(
            AbilityId(1),
            Box::new(|forces: &mut ForceAccumulator| {
                forces.add_force(Vec3::X, ForceMode::Acceleration)
            }),
        );
    }

    body.step(&SampledGround(false), &mut RecordingBody::default());

    assert!(body.has_tick_hook(AbilityId(1)));
    assert!((body.velocity().x - 1.0).abs() < EPS);
}
