//! Physics domain: force accumulation and frame integration for locomotion bodies.

mod force;
mod integrator;
mod probe;

#[cfg(test)]
mod tests;

pub use force::{BodyConfigError, DEFAULT_DELTA_TIME, ForceAccumulator, ForceMode};
pub use integrator::{GroundCheck, IntegratorSettings, LocomotionIntegrator, TickHook};
pub use probe::{GroundProbe, MotionBody, SampledGround};
