//! Movement domain: locomotion body bootstrap from the loaded config.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::abilities::AbilityArbiter;
use crate::content::{LocomotionConfig, build_body};
use crate::movement::{GameLayer, LocomotionReadout, MoveIntent, MovementTuning, Player};
use crate::physics::LocomotionIntegrator;

const BODY_RADIUS: f32 = 0.4;
/// Capsule segment length; total height is this plus two radii.
const BODY_LENGTH: f32 = 1.0;

/// Spawn the player body from the locomotion config.
pub(crate) fn spawn_player(
    mut commands: Commands,
    config: Res<LocomotionConfig>,
    mut tuning: ResMut<MovementTuning>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let (mut integrator, mut arbiter) = match build_body(&config) {
        Ok(parts) => parts,
        Err(e) => {
            error!("{}", e);
            panic!("Locomotion body could not be built from config");
        }
    };
    arbiter.initialize(&mut integrator);
    *tuning = MovementTuning::from(&config.body);

    info!(
        "Spawning player: mass={}, default_speed={}, abilities={}",
        integrator.forces().mass(),
        arbiter.default_speed(),
        arbiter.abilities().count()
    );

    commands.spawn((
        // Identity & Locomotion
        (
            Player,
            integrator,
            arbiter,
            MoveIntent::default(),
            LocomotionReadout::default(),
        ),
        // Rendering
        (
            Mesh3d(meshes.add(Capsule3d::new(BODY_RADIUS, BODY_LENGTH))),
            MeshMaterial3d(materials.add(Color::srgb(0.9, 0.9, 0.9))),
            Transform::from_xyz(0.0, 2.0, 0.0),
        ),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::capsule(BODY_RADIUS, BODY_LENGTH),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(0.0), // Gravity lives in the integrator
            Friction::new(0.0),
            CollisionLayers::new(GameLayer::Player, [GameLayer::Ground, GameLayer::Sensor]),
        ),
    ));
}

/// Every locomotion body needs its physics collaborators; fail loudly otherwise.
pub(crate) fn verify_locomotion_bodies(
    bodies: Query<
        (Entity, Has<RigidBody>, Has<Collider>, Has<AbilityArbiter>),
        With<LocomotionIntegrator>,
    >,
) {
    for (entity, has_body, has_collider, has_arbiter) in &bodies {
        if !(has_body && has_collider && has_arbiter) {
            error!(
                "Locomotion body {:?} is incomplete: rigid_body={}, collider={}, arbiter={}",
                entity, has_body, has_collider, has_arbiter
            );
            panic!("Locomotion body {:?} is missing a required collaborator", entity);
        }
    }
}
