//! Abilities domain: transition messages for presentation collaborators.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::abilities::AbilityId;

/// Emitted when an ability on `entity` starts
#[derive(Debug)]
pub struct AbilityStarted {
    pub entity: Entity,
    pub ability: AbilityId,
    /// Set when the start bypassed blocking.
    pub forced: bool,
}

impl Message for AbilityStarted {}

/// Emitted when an ability on `entity` ends
#[derive(Debug)]
pub struct AbilityEnded {
    pub entity: Entity,
    pub ability: AbilityId,
    /// Set when the stop bypassed blocking.
    pub forced: bool,
    /// Set when the ability lost the exclusive slot to another one.
    pub superseded_by: Option<AbilityId>,
}

impl Message for AbilityEnded {}
