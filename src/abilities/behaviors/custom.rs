//! Closure-backed behavior for abilities assembled at configuration time.

use crate::abilities::{AbilityBehavior, AbilityId, AbilityUnit};
use crate::physics::LocomotionIntegrator;

type BodyHook = Box<dyn FnMut(AbilityId, &mut LocomotionIntegrator) + Send + Sync>;
type Veto = Box<dyn Fn(&AbilityUnit) -> bool + Send + Sync>;

/// A behavior whose hooks are closures bound once when the ability is built.
#[derive(Default)]
pub struct FnBehavior {
    on_enable: Option<BodyHook>,
    on_disable: Option<BodyHook>,
    block_start: Option<Veto>,
    block_end: Option<Veto>,
}

impl FnBehavior {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_enable(
        mut self,
        hook: impl FnMut(AbilityId, &mut LocomotionIntegrator) + Send + Sync + 'static,
    ) -> Self {
        self.on_enable = Some(Box::new(hook));
        self
    }

    pub fn on_disable(
        mut self,
        hook: impl FnMut(AbilityId, &mut LocomotionIntegrator) + Send + Sync + 'static,
    ) -> Self {
        self.on_disable = Some(Box::new(hook));
        self
    }

    pub fn block_start(
        mut self,
        veto: impl Fn(&AbilityUnit) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.block_start = Some(Box::new(veto));
        self
    }

    pub fn block_end(
        mut self,
        veto: impl Fn(&AbilityUnit) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.block_end = Some(Box::new(veto));
        self
    }
}

impl AbilityBehavior for FnBehavior {
    fn should_block_start(&self, candidate: &AbilityUnit) -> bool {
        self.block_start.as_ref().is_some_and(|veto| veto(candidate))
    }

    fn should_block_end(&self, candidate: &AbilityUnit) -> bool {
        self.block_end.as_ref().is_some_and(|veto| veto(candidate))
    }

    fn on_enable(&mut self, id: AbilityId, body: &mut LocomotionIntegrator) {
        if let Some(hook) = self.on_enable.as_mut() {
            hook(id, body);
        }
    }

    fn on_disable(&mut self, id: AbilityId, body: &mut LocomotionIntegrator) {
        if let Some(hook) = self.on_disable.as_mut() {
            hook(id, body);
        }
    }
}
