//! Abilities domain: a single guarded ability and its behavior hooks.

use crate::abilities::policy::{AbilityId, BlockRule, EndPolicy, Exclusivity, StartPolicy};
use crate::physics::LocomotionIntegrator;

/// The side effects and vetoes of one ability.
///
/// Every hook has a no-op default. The predicates must be pure: the arbiter
/// may ask them speculatively and as often as it likes.
pub trait AbilityBehavior: Send + Sync + 'static {
    /// Self-gate checked before a non-forced start.
    fn can_start(&self, _body: &LocomotionIntegrator) -> bool {
        true
    }

    /// While this ability is active, veto `candidate` starting.
    fn should_block_start(&self, _candidate: &AbilityUnit) -> bool {
        false
    }

    /// While this ability is active, veto `candidate` ending. `candidate` may
    /// be this ability itself.
    fn should_block_end(&self, _candidate: &AbilityUnit) -> bool {
        false
    }

    fn on_enable(&mut self, _id: AbilityId, _body: &mut LocomotionIntegrator) {}

    fn on_disable(&mut self, _id: AbilityId, _body: &mut LocomotionIntegrator) {}

    /// Advance internal phases. Called every frame, active or not.
    fn tick(&mut self, _body: &LocomotionIntegrator, _dt: f32) {}

    /// Polled for active abilities whose end policy is automatic.
    fn wants_to_end(&self, _body: &LocomotionIntegrator) -> bool {
        false
    }

    /// True while the ability drives planar velocity itself.
    fn overrides_planar_drive(&self) -> bool {
        false
    }

    /// Short phase name for presentation and debugging.
    fn phase_label(&self) -> Option<&'static str> {
        None
    }
}

/// An ability registered on a body.
pub struct AbilityUnit {
    id: AbilityId,
    name: String,
    start_policy: StartPolicy,
    end_policy: EndPolicy,
    movement_speed_override: Option<f32>,
    exclusivity: Exclusivity,
    blocks_start: BlockRule,
    blocks_end: BlockRule,
    active: bool,
    release_pending: bool,
    behavior: Box<dyn AbilityBehavior>,
}

impl std::fmt::Debug for AbilityUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AbilityUnit")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("start_policy", &self.start_policy)
            .field("end_policy", &self.end_policy)
            .field("movement_speed_override", &self.movement_speed_override)
            .field("exclusivity", &self.exclusivity)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

impl AbilityUnit {
    /// A manual-start, manual-end, exclusive ability with no speed override.
    pub fn new(id: AbilityId, name: impl Into<String>, behavior: impl AbilityBehavior) -> Self {
        Self::from_boxed(id, name, Box::new(behavior))
    }

    pub fn from_boxed(
        id: AbilityId,
        name: impl Into<String>,
        behavior: Box<dyn AbilityBehavior>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            start_policy: StartPolicy::default(),
            end_policy: EndPolicy::default(),
            movement_speed_override: None,
            exclusivity: Exclusivity::default(),
            blocks_start: BlockRule::default(),
            blocks_end: BlockRule::default(),
            active: false,
            release_pending: false,
            behavior,
        }
    }

    pub fn with_start(mut self, policy: StartPolicy) -> Self {
        self.start_policy = policy;
        self
    }

    pub fn with_end(mut self, policy: EndPolicy) -> Self {
        self.end_policy = policy;
        self
    }

    pub fn with_speed_override(mut self, speed: Option<f32>) -> Self {
        self.movement_speed_override = speed;
        self
    }

    pub fn with_exclusivity(mut self, exclusivity: Exclusivity) -> Self {
        self.exclusivity = exclusivity;
        self
    }

    pub fn blocking_start(mut self, rule: BlockRule) -> Self {
        self.blocks_start = rule;
        self
    }

    pub fn blocking_end(mut self, rule: BlockRule) -> Self {
        self.blocks_end = rule;
        self
    }

    pub fn id(&self) -> AbilityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start_policy(&self) -> StartPolicy {
        self.start_policy
    }

    pub fn end_policy(&self) -> EndPolicy {
        self.end_policy
    }

    pub fn movement_speed_override(&self) -> Option<f32> {
        self.movement_speed_override
    }

    pub fn exclusivity(&self) -> Exclusivity {
        self.exclusivity
    }

    pub fn is_concurrent(&self) -> bool {
        self.exclusivity == Exclusivity::Concurrent
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// A key-up release was refused and is waiting to be retried.
    pub fn is_release_pending(&self) -> bool {
        self.release_pending
    }

    pub fn behavior(&self) -> &dyn AbilityBehavior {
        self.behavior.as_ref()
    }

    /// Whether this (active) ability vetoes `candidate` starting.
    pub fn should_block_start(&self, candidate: &AbilityUnit) -> bool {
        (candidate.id != self.id && self.blocks_start.matches(candidate.name()))
            || self.behavior.should_block_start(candidate)
    }

    /// Whether this (active) ability vetoes `candidate` ending.
    pub fn should_block_end(&self, candidate: &AbilityUnit) -> bool {
        (candidate.id != self.id && self.blocks_end.matches(candidate.name()))
            || self.behavior.should_block_end(candidate)
    }

    pub(crate) fn can_start(&self, body: &LocomotionIntegrator) -> bool {
        self.behavior.can_start(body)
    }

    pub(crate) fn request_enable(&mut self, body: &mut LocomotionIntegrator) {
        self.active = true;
        self.release_pending = false;
        self.behavior.on_enable(self.id, body);
    }

    pub(crate) fn request_disable(&mut self, body: &mut LocomotionIntegrator) {
        self.active = false;
        self.release_pending = false;
        self.behavior.on_disable(self.id, body);
    }

    pub(crate) fn set_release_pending(&mut self, pending: bool) {
        self.release_pending = pending;
    }

    pub(crate) fn tick(&mut self, body: &LocomotionIntegrator, dt: f32) {
        self.behavior.tick(body, dt);
    }

    pub(crate) fn wants_to_end(&self, body: &LocomotionIntegrator) -> bool {
        self.behavior.wants_to_end(body)
    }
}
