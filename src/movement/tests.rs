//! Movement domain: tests for steering math, input mapping and the host systems.

use avian3d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

use super::bootstrap::verify_locomotion_bodies;
use super::systems::input::intent_from_keys;
use super::systems::movement::RigidBodyMotion;
use super::systems::{dispatch_ability_input, publish_readout};
use super::{
    LocomotionReadout, MoveIntent, MovementBindings, MovementTuning, planar_velocity_change,
};
use crate::abilities::{AbilitiesPlugin, AbilityArbiter, AbilityEnded, AbilityId, AbilityStarted};
use crate::content::{LocomotionConfig, build_body};
use crate::physics::{IntegratorSettings, LocomotionIntegrator, MotionBody, SampledGround};

const EPS: f32 = 1e-4;

fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < EPS
}

// -----------------------------------------------------------------------------
// Planar drive
// -----------------------------------------------------------------------------

#[test]
fn test_full_control_reaches_target_speed() {
    let change = planar_velocity_change(Vec3::ZERO, Quat::IDENTITY, Vec2::Y, 5.0, 1.0);
    assert!(approx(change, Vec3::new(0.0, 0.0, -5.0)));
}

#[test]
fn test_drive_never_touches_vertical_velocity() {
    let change = planar_velocity_change(
        Vec3::new(1.0, -3.0, 0.0),
        Quat::IDENTITY,
        Vec2::ZERO,
        5.0,
        1.0,
    );
    assert!(approx(change, Vec3::new(-1.0, 0.0, 0.0)));
}

#[test]
fn test_drive_follows_facing() {
    let facing = Quat::from_rotation_y(FRAC_PI_2);
    let change = planar_velocity_change(Vec3::ZERO, facing, Vec2::Y, 5.0, 1.0);
    assert!(approx(change, Vec3::new(-5.0, 0.0, 0.0)));
}

#[test]
fn test_diagonal_input_is_not_faster() {
    let change = planar_velocity_change(Vec3::ZERO, Quat::IDENTITY, Vec2::ONE, 5.0, 1.0);
    assert!((change.length() - 5.0).abs() < EPS);
}

#[test]
fn test_air_control_scales_correction() {
    let full = planar_velocity_change(Vec3::ZERO, Quat::IDENTITY, Vec2::X, 4.0, 1.0);
    let air = planar_velocity_change(Vec3::ZERO, Quat::IDENTITY, Vec2::X, 4.0, 0.25);
    assert!(approx(air, full * 0.25));
}

// -----------------------------------------------------------------------------
// Input mapping
// -----------------------------------------------------------------------------

#[test]
fn test_intent_from_held_keys() {
    let bindings = MovementBindings::default();
    let mut keyboard = ButtonInput::<KeyCode>::default();
    keyboard.press(KeyCode::KeyW);
    keyboard.press(KeyCode::KeyD);
    keyboard.press(KeyCode::KeyQ);

    let intent = intent_from_keys(&keyboard, &bindings);

    assert!((intent.axis.length() - 1.0).abs() < EPS);
    assert!(intent.axis.x > 0.0 && intent.axis.y > 0.0);
    assert_eq!(intent.turn, -1.0);
}

#[test]
fn test_opposite_keys_cancel() {
    let bindings = MovementBindings::default();
    let mut keyboard = ButtonInput::<KeyCode>::default();
    keyboard.press(KeyCode::KeyW);
    keyboard.press(KeyCode::ArrowDown);
    keyboard.press(KeyCode::KeyE);
    keyboard.press(KeyCode::ArrowLeft);

    assert_eq!(intent_from_keys(&keyboard, &bindings), MoveIntent::default());
}

#[test]
fn test_tuning_follows_body_config() {
    let config = LocomotionConfig::default();
    let tuning = MovementTuning::from(&config.body);
    assert_eq!(tuning.air_control, config.body.air_control);
    assert_eq!(tuning.turn_speed, config.body.turn_speed);
}

// -----------------------------------------------------------------------------
// Rigid body adapter
// -----------------------------------------------------------------------------

#[test]
fn test_motion_sets_velocity_from_delta() {
    let mut velocity = LinearVelocity(Vec3::new(9.0, 9.0, 9.0));
    let mut rotation = Quat::IDENTITY;

    {
        let mut motion = RigidBodyMotion::new(Vec3::ZERO, 0.5, &mut velocity, &mut rotation);
        motion.move_by(Vec3::new(1.0, 0.0, 0.0));
        assert!(approx(motion.position(), Vec3::X));
    }

    assert!(approx(velocity.0, Vec3::new(2.0, 0.0, 0.0)));
}

#[test]
fn test_body_at_rest_clears_stale_velocity() {
    let mut body = LocomotionIntegrator::new(IntegratorSettings {
        gravity: Vec3::ZERO,
        ..default()
    })
    .unwrap();
    let mut velocity = LinearVelocity(Vec3::new(3.0, 0.0, 0.0));
    let mut rotation = Quat::IDENTITY;

    let mut motion = RigidBodyMotion::new(Vec3::ZERO, 0.1, &mut velocity, &mut rotation);
    body.step(&SampledGround(true), &mut motion);

    assert_eq!(velocity.0, Vec3::ZERO);
}

#[test]
fn test_turn_is_written_to_rotation() {
    let mut body = LocomotionIntegrator::new(IntegratorSettings::default()).unwrap();
    let mut velocity = LinearVelocity::default();
    let mut rotation = Quat::IDENTITY;
    body.add_yaw(FRAC_PI_2);

    let mut motion = RigidBodyMotion::new(Vec3::ZERO, 0.1, &mut velocity, &mut rotation);
    body.step(&SampledGround(true), &mut motion);

    assert!(rotation.angle_between(Quat::from_rotation_y(FRAC_PI_2)) < EPS);
}

// -----------------------------------------------------------------------------
// Host systems
// -----------------------------------------------------------------------------

#[derive(Resource, Default)]
struct SeenTransitions {
    started: Vec<AbilityId>,
    ended: Vec<(AbilityId, Option<AbilityId>)>,
}

fn collect_transitions(
    mut started: MessageReader<AbilityStarted>,
    mut ended: MessageReader<AbilityEnded>,
    mut seen: ResMut<SeenTransitions>,
) {
    for message in started.read() {
        seen.started.push(message.ability);
    }
    for message in ended.read() {
        seen.ended.push((message.ability, message.superseded_by));
    }
}

fn dispatch_app() -> (App, Entity) {
    let mut app = App::new();
    app.add_plugins(AbilitiesPlugin)
        .init_resource::<Time>()
        .init_resource::<ButtonInput<KeyCode>>()
        .init_resource::<SeenTransitions>()
        .add_systems(
            Update,
            (dispatch_ability_input, collect_transitions, publish_readout).chain(),
        );

    let (mut integrator, arbiter) = build_body(&LocomotionConfig::default()).unwrap();
    integrator.sample_ground(&SampledGround(true), Vec3::ZERO);
    let entity = app
        .world_mut()
        .spawn((integrator, arbiter, LocomotionReadout::default()))
        .id();
    (app, entity)
}

fn press(app: &mut App, key: KeyCode) {
    let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
    keyboard.clear();
    keyboard.press(key);
}

#[test]
fn test_key_press_starts_ability_and_publishes_message() {
    let (mut app, entity) = dispatch_app();

    press(&mut app, KeyCode::ShiftLeft);
    app.update();

    let arbiter = app.world().get::<AbilityArbiter>(entity).unwrap();
    assert_eq!(arbiter.current_exclusive(), Some(AbilityId(1)));
    assert_eq!(app.world().resource::<SeenTransitions>().started, vec![AbilityId(1)]);

    let readout = app.world().get::<LocomotionReadout>(entity).unwrap();
    assert_eq!(readout.current_ability, Some(AbilityId(1)));
    assert_eq!(readout.effective_speed, 9.0);
    assert!(readout.is_grounded);
}

#[test]
fn test_superseded_ability_reports_its_successor() {
    let (mut app, entity) = dispatch_app();

    press(&mut app, KeyCode::ShiftLeft);
    app.update();
    press(&mut app, KeyCode::KeyF);
    app.update();

    let seen = app.world().resource::<SeenTransitions>();
    assert_eq!(seen.started, vec![AbilityId(1), AbilityId(2)]);
    assert_eq!(seen.ended, vec![(AbilityId(1), Some(AbilityId(2)))]);

    let arbiter = app.world().get::<AbilityArbiter>(entity).unwrap();
    assert_eq!(arbiter.current_exclusive(), Some(AbilityId(2)));
}

#[test]
fn test_complete_body_passes_verification() {
    let mut world = World::new();
    let (integrator, arbiter) = build_body(&LocomotionConfig::default()).unwrap();
    world.spawn((
        integrator,
        arbiter,
        RigidBody::Dynamic,
        Collider::sphere(0.5),
    ));

    world.run_system_once(verify_locomotion_bodies).unwrap();
}

#[test]
#[should_panic(expected = "missing a required collaborator")]
fn test_body_without_collider_fails_verification() {
    let mut world = World::new();
    let (integrator, arbiter) = build_body(&LocomotionConfig::default()).unwrap();
    world.spawn((integrator, arbiter, RigidBody::Dynamic));

    let _ = world.run_system_once(verify_locomotion_bodies);
}
