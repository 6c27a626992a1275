//! Turns validated definitions into a locomotion body and its abilities.

use bevy::prelude::*;

use super::data::*;
use crate::abilities::behaviors::{Crouch, Dash, Jump, SpeedChange, Thrust};
use crate::abilities::{AbilityArbiter, AbilityBehavior, AbilityId, AbilityUnit, ArbiterError};
use crate::physics::{BodyConfigError, GroundCheck, IntegratorSettings, LocomotionIntegrator};

/// Failure assembling a body from config that slipped past validation.
#[derive(Debug, Clone, PartialEq)]
pub enum AssemblyError {
    Body(BodyConfigError),
    Abilities(ArbiterError),
}

impl std::fmt::Display for AssemblyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Body(e) => write!(f, "invalid body: {}", e),
            Self::Abilities(e) => write!(f, "invalid abilities: {}", e),
        }
    }
}

impl From<BodyConfigError> for AssemblyError {
    fn from(e: BodyConfigError) -> Self {
        Self::Body(e)
    }
}

impl From<ArbiterError> for AssemblyError {
    fn from(e: ArbiterError) -> Self {
        Self::Abilities(e)
    }
}

pub fn integrator_settings(body: &BodyDef) -> IntegratorSettings {
    IntegratorSettings {
        mass: body.mass,
        gravity: body.gravity.into(),
        movement_epsilon: body.movement_epsilon,
        grounded_clamp_velocity: body.grounded_clamp_velocity,
        ground_check: GroundCheck {
            offset: body.ground_check.offset.into(),
            radius: body.ground_check.radius,
        },
    }
}

fn behavior_for(kind: &AbilityKind) -> Box<dyn AbilityBehavior> {
    match kind {
        AbilityKind::Jump {
            impulse,
            air_gravity,
        } => Box::new(Jump::new(*impulse, air_gravity.map(Vec3::from))),
        AbilityKind::Crouch {
            transition_time,
            crouched_height,
        } => Box::new(Crouch::new(*transition_time, *crouched_height)),
        AbilityKind::SpeedChange => Box::new(SpeedChange),
        AbilityKind::Dash { speed, duration } => Box::new(Dash::new(*speed, *duration)),
        AbilityKind::Thrust { force, mode } => Box::new(Thrust::new((*force).into(), *mode)),
    }
}

pub fn build_ability(def: &AbilityDef) -> AbilityUnit {
    AbilityUnit::from_boxed(AbilityId(def.priority), def.name.clone(), behavior_for(&def.kind))
        .with_start(def.start)
        .with_end(def.end)
        .with_speed_override(def.movement_speed_override)
        .with_exclusivity(def.exclusivity)
        .blocking_start(def.blocks_start.clone())
        .blocking_end(def.blocks_end.clone())
}

/// Build the integrator and an arbiter holding every configured ability,
/// registered in file order. The arbiter is not initialized yet.
pub fn build_body(
    config: &LocomotionConfig,
) -> Result<(LocomotionIntegrator, AbilityArbiter), AssemblyError> {
    let integrator = LocomotionIntegrator::new(integrator_settings(&config.body))?;
    let units = config.abilities.iter().map(build_ability).collect();
    let arbiter = AbilityArbiter::new(
        units,
        config.body.default_speed,
        config.body.min_move_speed,
    )?;
    Ok((integrator, arbiter))
}
