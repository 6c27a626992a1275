//! Abilities domain: built-in behaviors.

mod crouch;
mod custom;
mod dash;
mod jump;
mod thrust;

pub use crouch::{Crouch, CrouchPhase};
pub use custom::FnBehavior;
pub use dash::Dash;
pub use jump::Jump;
pub use thrust::Thrust;

use crate::abilities::AbilityBehavior;

/// Changes nothing but the move speed, through the unit's speed override.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpeedChange;

impl AbilityBehavior for SpeedChange {}
