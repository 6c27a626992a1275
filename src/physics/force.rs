//! Physics domain: per-frame force buffer and force modes.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Step length assumed until the host reports the first real frame.
pub const DEFAULT_DELTA_TIME: f32 = 1.0 / 60.0;

/// How a vector handed to [`ForceAccumulator::add_force`] is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum ForceMode {
    /// Continuous force, scaled by inverse mass.
    Force,
    /// Continuous acceleration, mass independent.
    Acceleration,
    /// One-frame velocity jump, scaled by inverse mass and normalized by the frame length.
    Impulse,
    /// Direct velocity change, ignores both mass and frame length.
    VelocityChange,
}

/// Invalid body parameters detected while building a locomotion body.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyConfigError {
    NonPositiveMass(f32),
    NegativeEpsilon(f32),
    NonPositiveProbeRadius(f32),
    NonFiniteGravity(Vec3),
}

impl std::fmt::Display for BodyConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveMass(mass) => write!(f, "mass must be positive, got {}", mass),
            Self::NegativeEpsilon(eps) => {
                write!(f, "movement epsilon must not be negative, got {}", eps)
            }
            Self::NonPositiveProbeRadius(radius) => {
                write!(f, "ground probe radius must be positive, got {}", radius)
            }
            Self::NonFiniteGravity(gravity) => write!(f, "gravity must be finite, got {}", gravity),
        }
    }
}

/// Additive force buffer for one body.
///
/// `acceleration` only ever holds the current frame's net acceleration: the
/// integrator consumes it once per step and resets it to `gravity`.
#[derive(Debug, Clone)]
pub struct ForceAccumulator {
    acceleration: Vec3,
    velocity: Vec3,
    gravity: Vec3,
    mass: f32,
    delta_time: f32,
    movement_epsilon: f32,
}

impl ForceAccumulator {
    pub fn new(mass: f32, gravity: Vec3, movement_epsilon: f32) -> Result<Self, BodyConfigError> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(BodyConfigError::NonPositiveMass(mass));
        }
        if movement_epsilon.is_nan() || movement_epsilon < 0.0 {
            return Err(BodyConfigError::NegativeEpsilon(movement_epsilon));
        }
        if !gravity.is_finite() {
            return Err(BodyConfigError::NonFiniteGravity(gravity));
        }

        Ok(Self {
            acceleration: gravity,
            velocity: Vec3::ZERO,
            gravity,
            mass,
            delta_time: DEFAULT_DELTA_TIME,
            movement_epsilon,
        })
    }

    /// Apply `vector` according to `mode`. Vectors under the noise floor are dropped.
    pub fn add_force(&mut self, vector: Vec3, mode: ForceMode) {
        if self.is_noise(vector) {
            return;
        }

        match mode {
            ForceMode::Force => self.acceleration += vector / self.mass,
            ForceMode::Acceleration => self.acceleration += vector,
            ForceMode::Impulse => {
                if self.delta_time > 0.0 {
                    self.acceleration += vector / (self.mass * self.delta_time);
                } else {
                    // Zero-length frame: integration would never see it, land it directly.
                    self.velocity += vector / self.mass;
                }
            }
            ForceMode::VelocityChange => self.velocity += vector,
        }
    }

    /// True when `vector` is below the movement epsilon.
    pub fn is_noise(&self, vector: Vec3) -> bool {
        vector.length_squared() < self.movement_epsilon * self.movement_epsilon
    }

    pub fn acceleration(&self) -> Vec3 {
        self.acceleration
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Overwrite the velocity outright (host resets, ground clamping).
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    /// Install a new gravity and return the one it replaces.
    ///
    /// Takes effect from the next reset; the acceleration already assembled
    /// for this frame keeps the old gravity.
    pub fn replace_gravity(&mut self, gravity: Vec3) -> Vec3 {
        std::mem::replace(&mut self.gravity, gravity)
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    pub fn movement_epsilon(&self) -> f32 {
        self.movement_epsilon
    }

    /// Record the length of the frame about to be assembled.
    pub fn begin_frame(&mut self, delta_time: f32) {
        self.delta_time = delta_time.max(0.0);
    }

    /// Fold this frame's acceleration into velocity, then reset it to gravity.
    pub(crate) fn consume(&mut self) {
        self.velocity += self.acceleration * self.delta_time;
        self.acceleration = self.gravity;
    }
}
