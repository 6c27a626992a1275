//! Core domain: camera and lighting systems.

use bevy::prelude::*;

use crate::core::CameraRig;
use crate::movement::Player;

#[derive(Component, Debug)]
pub(crate) struct FollowCamera;

pub(crate) fn setup_scene(mut commands: Commands, rig: Res<CameraRig>) {
    commands.spawn((
        FollowCamera,
        Camera3d::default(),
        Transform::from_translation(rig.offset).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(6.0, 12.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Trail the player from behind its facing.
pub(crate) fn follow_player(
    time: Res<Time>,
    rig: Res<CameraRig>,
    player: Query<&Transform, (With<Player>, Without<FollowCamera>)>,
    mut camera: Query<&mut Transform, With<FollowCamera>>,
) {
    let (Ok(target), Ok(mut camera)) = (player.single(), camera.single_mut()) else {
        return;
    };

    let desired = target.translation + target.rotation * rig.offset;
    let blend = 1.0 - (-rig.follow_rate * time.delta_secs()).exp();
    camera.translation = camera.translation.lerp(desired, blend);
    camera.look_at(target.translation + Vec3::Y, Vec3::Y);
}
