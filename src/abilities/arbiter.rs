//! Abilities domain: arbitration of start/stop requests between abilities.

use bevy::prelude::*;

use crate::abilities::input::KeyStates;
use crate::abilities::policy::{AbilityId, EndPolicy, StartPolicy};
use crate::abilities::unit::AbilityUnit;
use crate::physics::LocomotionIntegrator;

/// Failure building an arbiter from a set of abilities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArbiterError {
    DuplicateId(AbilityId),
    DuplicateName(String),
}

impl std::fmt::Display for ArbiterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "ability id {} registered twice", id),
            Self::DuplicateName(name) => write!(f, "ability name '{}' registered twice", name),
        }
    }
}

/// A successful start or stop, journaled for the host to publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilityTransition {
    Started {
        ability: AbilityId,
        forced: bool,
    },
    Ended {
        ability: AbilityId,
        forced: bool,
        /// Set when the ability lost the exclusive slot to another one.
        superseded_by: Option<AbilityId>,
    },
}

/// Owns a body's abilities and decides which of them may run.
///
/// Sole writer of each unit's active flag and of the exclusive slot.
#[derive(Component, Debug)]
pub struct AbilityArbiter {
    units: Vec<AbilityUnit>,
    key_down_starts: Vec<usize>,
    key_up_ends: Vec<usize>,
    current_exclusive: Option<AbilityId>,
    default_speed: f32,
    min_move_speed: f32,
    effective_speed: f32,
    journal: Vec<AbilityTransition>,
}

impl AbilityArbiter {
    /// Register `units` in order. Identities and names must be unique.
    pub fn new(
        units: Vec<AbilityUnit>,
        default_speed: f32,
        min_move_speed: f32,
    ) -> Result<Self, ArbiterError> {
        for (i, unit) in units.iter().enumerate() {
            for earlier in &units[..i] {
                if earlier.id() == unit.id() {
                    return Err(ArbiterError::DuplicateId(unit.id()));
                }
                if earlier.name() == unit.name() {
                    return Err(ArbiterError::DuplicateName(unit.name().to_string()));
                }
            }
        }

        let key_down_starts = units
            .iter()
            .enumerate()
            .filter(|(_, u)| matches!(u.start_policy(), StartPolicy::KeyDown(_)))
            .map(|(i, _)| i)
            .collect();
        let key_up_ends = units
            .iter()
            .enumerate()
            .filter(|(_, u)| matches!(u.end_policy(), EndPolicy::KeyUp(_)))
            .map(|(i, _)| i)
            .collect();

        Ok(Self {
            units,
            key_down_starts,
            key_up_ends,
            current_exclusive: None,
            default_speed,
            min_move_speed,
            effective_speed: default_speed,
            journal: Vec::new(),
        })
    }

    /// Bind the abilities to `body`, starting every automatic-start ability.
    ///
    /// The first exclusive automatic ability takes the exclusive slot; later
    /// exclusive ones stay inactive.
    pub fn initialize(&mut self, body: &mut LocomotionIntegrator) {
        for index in 0..self.units.len() {
            let unit = &self.units[index];
            if unit.start_policy() != StartPolicy::Automatic || unit.is_active() {
                continue;
            }

            let id = unit.id();
            if !unit.is_concurrent() {
                if let Some(holder) = self.current_exclusive {
                    warn!(
                        "Ability '{}' not started automatically: exclusive slot held by {}",
                        unit.name(),
                        holder
                    );
                    continue;
                }
                self.current_exclusive = Some(id);
            }

            self.units[index].request_enable(body);
            self.journal.push(AbilityTransition::Started {
                ability: id,
                forced: false,
            });
            debug!("Ability '{}' started automatically", self.units[index].name());
        }
        self.refresh_speed();
    }

    pub fn abilities(&self) -> impl Iterator<Item = &AbilityUnit> {
        self.units.iter()
    }

    /// Look up an ability by identity.
    pub fn ability(&self, id: AbilityId) -> Option<&AbilityUnit> {
        self.units.iter().find(|u| u.id() == id)
    }

    pub fn ability_by_name(&self, name: &str) -> Option<&AbilityUnit> {
        self.units.iter().find(|u| u.name() == name)
    }

    pub fn is_active(&self, id: AbilityId) -> bool {
        self.ability(id).is_some_and(AbilityUnit::is_active)
    }

    pub fn active_abilities(&self) -> impl Iterator<Item = AbilityId> + '_ {
        self.units.iter().filter(|u| u.is_active()).map(AbilityUnit::id)
    }

    pub fn current_exclusive(&self) -> Option<AbilityId> {
        self.current_exclusive
    }

    pub fn effective_speed(&self) -> f32 {
        self.effective_speed
    }

    pub fn default_speed(&self) -> f32 {
        self.default_speed
    }

    /// True while an active ability drives planar velocity itself.
    pub fn planar_drive_suppressed(&self) -> bool {
        self.units
            .iter()
            .any(|u| u.is_active() && u.behavior().overrides_planar_drive())
    }

    /// Take the transitions recorded since the last drain.
    pub fn drain_transitions(&mut self) -> std::vec::Drain<'_, AbilityTransition> {
        self.journal.drain(..)
    }

    /// Start `id`. Without `force`, any active ability may veto the start.
    /// A forced start always takes the exclusive slot, concurrent abilities included.
    pub fn try_enable(
        &mut self,
        id: AbilityId,
        force: bool,
        body: &mut LocomotionIntegrator,
    ) -> bool {
        let Some(index) = self.index_of(id) else {
            debug!("Enable rejected: ability {} is not registered", id);
            return false;
        };

        let takes_slot = force || !self.units[index].is_concurrent();

        if self.units[index].is_active() {
            // Never started twice; forcing an active ability only settles exclusivity.
            if !force {
                return false;
            }
            if self.current_exclusive != Some(id) {
                self.release_exclusive(Some(id), force, body);
                self.current_exclusive = Some(id);
                self.refresh_speed();
            }
            return true;
        }

        if !force && self.is_start_blocked(index, body) {
            debug!("Enable blocked: '{}'", self.units[index].name());
            return false;
        }

        if takes_slot {
            self.release_exclusive(Some(id), force, body);
            self.current_exclusive = Some(id);
        }

        self.units[index].request_enable(body);
        self.journal.push(AbilityTransition::Started {
            ability: id,
            forced: force,
        });
        debug!(
            "Ability '{}' started (forced={}, exclusive={:?})",
            self.units[index].name(),
            force,
            self.current_exclusive
        );

        self.refresh_speed();
        true
    }

    /// Stop `id`. Without `force`, any active ability (itself included) may veto the stop.
    pub fn try_disable(
        &mut self,
        id: AbilityId,
        force: bool,
        body: &mut LocomotionIntegrator,
    ) -> bool {
        let Some(index) = self.index_of(id) else {
            debug!("Disable rejected: ability {} is not registered", id);
            return false;
        };
        if !self.units[index].is_active() {
            return false;
        }
        if !force && self.is_end_blocked(index) {
            debug!("Disable blocked: '{}'", self.units[index].name());
            return false;
        }

        self.deactivate(index, force, None, body);
        self.refresh_speed();
        true
    }

    /// Per-frame arbitration: key starts, key ends, behavior ticks, automatic ends.
    pub fn update(&mut self, keys: &impl KeyStates, body: &mut LocomotionIntegrator, dt: f32) {
        self.poll_keys(keys, body);

        for unit in &mut self.units {
            unit.tick(body, dt);
        }

        for index in 0..self.units.len() {
            let unit = &self.units[index];
            if unit.end_policy() == EndPolicy::Automatic
                && unit.is_active()
                && unit.wants_to_end(body)
            {
                let id = unit.id();
                self.try_disable(id, false, body);
            }
        }
    }

    /// Evaluate key-triggered starts and ends in registration order.
    pub fn poll_keys(&mut self, keys: &impl KeyStates, body: &mut LocomotionIntegrator) {
        for i in 0..self.key_down_starts.len() {
            let unit = &self.units[self.key_down_starts[i]];
            let StartPolicy::KeyDown(key) = unit.start_policy() else {
                continue;
            };
            if keys.just_pressed(key) && !unit.is_active() {
                let id = unit.id();
                self.try_enable(id, false, body);
            }
        }

        for i in 0..self.key_up_ends.len() {
            let index = self.key_up_ends[i];
            let unit = &self.units[index];
            let EndPolicy::KeyUp(key) = unit.end_policy() else {
                continue;
            };
            if !unit.is_active() || keys.pressed(key) {
                self.units[index].set_release_pending(false);
                continue;
            }
            if keys.just_released(key) || unit.is_release_pending() {
                let id = unit.id();
                if !self.try_disable(id, false, body) {
                    // Retried every frame while the key stays up.
                    self.units[index].set_release_pending(true);
                }
            }
        }
    }

    fn index_of(&self, id: AbilityId) -> Option<usize> {
        self.units.iter().position(|u| u.id() == id)
    }

    fn is_start_blocked(&self, index: usize, body: &LocomotionIntegrator) -> bool {
        let candidate = &self.units[index];
        !candidate.can_start(body)
            || self
                .units
                .iter()
                .any(|u| u.is_active() && u.should_block_start(candidate))
    }

    fn is_end_blocked(&self, index: usize) -> bool {
        let candidate = &self.units[index];
        self.units
            .iter()
            .any(|u| u.is_active() && u.should_block_end(candidate))
    }

    /// Deactivate the current exclusive ability unless it is `successor`.
    fn release_exclusive(
        &mut self,
        successor: Option<AbilityId>,
        force: bool,
        body: &mut LocomotionIntegrator,
    ) {
        let Some(previous) = self.current_exclusive.take() else {
            return;
        };
        if Some(previous) == successor {
            self.current_exclusive = Some(previous);
            return;
        }
        if let Some(index) = self.index_of(previous) {
            if self.units[index].is_active() {
                self.deactivate(index, force, successor, body);
            }
        }
    }

    fn deactivate(
        &mut self,
        index: usize,
        force: bool,
        superseded_by: Option<AbilityId>,
        body: &mut LocomotionIntegrator,
    ) {
        let id = self.units[index].id();
        self.units[index].request_disable(body);
        if self.current_exclusive == Some(id) {
            self.current_exclusive = None;
        }
        self.journal.push(AbilityTransition::Ended {
            ability: id,
            forced: force,
            superseded_by,
        });
        debug!(
            "Ability '{}' ended (forced={}, superseded_by={:?})",
            self.units[index].name(),
            force,
            superseded_by
        );
    }

    fn refresh_speed(&mut self) {
        let speed = self
            .current_exclusive
            .and_then(|id| self.ability(id))
            .and_then(AbilityUnit::movement_speed_override)
            .filter(|speed| *speed > self.min_move_speed)
            .unwrap_or(self.default_speed);

        if speed != self.effective_speed {
            debug!("Effective move speed {} -> {}", self.effective_speed, speed);
        }
        self.effective_speed = speed;
    }
}
