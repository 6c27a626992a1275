//! Movement domain: debug-only test arena.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::movement::{GameLayer, Ground};

/// Floor plus a few steps and a ledge to exercise jump, crouch and dash.
pub(crate) fn spawn_test_arena(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let block_color = Color::srgb(0.5, 0.4, 0.3);
    let ground_layers = CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]);

    // (size, center)
    let blocks = [
        (Vec3::new(40.0, 1.0, 40.0), Vec3::new(0.0, -0.5, 0.0)),
        (Vec3::new(3.0, 0.4, 3.0), Vec3::new(4.0, 0.2, -4.0)),
        (Vec3::new(3.0, 0.8, 3.0), Vec3::new(7.0, 0.4, -4.0)),
        (Vec3::new(3.0, 1.2, 3.0), Vec3::new(10.0, 0.6, -4.0)),
        (Vec3::new(6.0, 0.3, 2.0), Vec3::new(-6.0, 2.5, -6.0)),
    ];

    for (i, (size, center)) in blocks.into_iter().enumerate() {
        let color = if i == 0 { ground_color } else { block_color };
        commands.spawn((
            Ground,
            Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
            MeshMaterial3d(materials.add(color)),
            Transform::from_translation(center),
            RigidBody::Static,
            Collider::cuboid(size.x, size.y, size.z),
            ground_layers,
        ));
    }

    info!("Spawned test arena with {} blocks", blocks.len());
}
