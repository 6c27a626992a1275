//! Movement domain: components and physics layers for locomotion.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::abilities::AbilityId;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Anything the ground check counts as standing surface
    Ground,
    /// Locomotion bodies
    Player,
    /// Triggers - should not block movement
    Sensor,
}

#[derive(Component, Debug)]
pub struct Player;

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Movement request for this frame, in body space.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq)]
pub struct MoveIntent {
    /// x = strafe right, y = forward. Length is at most 1.
    pub axis: Vec2,
    /// Positive turns right (clockwise seen from above).
    pub turn: f32,
}

/// Read-only locomotion state for presentation collaborators, refreshed every frame.
#[derive(Component, Debug, Default, Clone, PartialEq)]
pub struct LocomotionReadout {
    pub speed: f32,
    pub is_grounded: bool,
    pub velocity: Vec3,
    pub current_ability: Option<AbilityId>,
    pub effective_speed: f32,
}
