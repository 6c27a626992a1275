//! Physics domain: collaborator seams for collision queries and body motion.

use bevy::prelude::*;

/// Overlap query used by the ground check.
pub trait GroundProbe {
    /// True when a sphere at `center` touches anything counted as ground.
    fn overlaps_ground(&self, center: Vec3, radius: f32) -> bool;
}

/// The physical body the integrator drives.
pub trait MotionBody {
    fn position(&self) -> Vec3;

    /// Move by `delta`, letting the physics backend resolve collisions.
    fn move_by(&mut self, delta: Vec3);

    fn set_facing(&mut self, rotation: Quat);
}

/// A probe that reports a precomputed answer.
///
/// Hosts that sample the ground on the fixed step hand the cached result to
/// the variable-step integration through this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampledGround(pub bool);

impl GroundProbe for SampledGround {
    fn overlaps_ground(&self, _center: Vec3, _radius: f32) -> bool {
        self.0
    }
}
