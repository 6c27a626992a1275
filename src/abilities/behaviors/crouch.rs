//! Crouch: a lowered stance entered and left through timed transitions.

use crate::abilities::{AbilityBehavior, AbilityId, AbilityUnit};
use crate::physics::LocomotionIntegrator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrouchPhase {
    #[default]
    Standing,
    Lowering,
    Crouched,
    Rising,
}

/// The stance advances one tick at a time; there is no waiting anywhere else.
#[derive(Debug, Clone)]
pub struct Crouch {
    transition_time: f32,
    crouched_height: f32,
    phase: CrouchPhase,
    /// 0 when standing, 1 when fully crouched.
    progress: f32,
    owner: Option<AbilityId>,
}

impl Crouch {
    pub fn new(transition_time: f32, crouched_height: f32) -> Self {
        Self {
            transition_time,
            crouched_height: crouched_height.clamp(0.0, 1.0),
            phase: CrouchPhase::Standing,
            progress: 0.0,
            owner: None,
        }
    }

    pub fn phase(&self) -> CrouchPhase {
        self.phase
    }

    /// Body height as a fraction of the standing height.
    pub fn height_fraction(&self) -> f32 {
        1.0 - (1.0 - self.crouched_height) * self.progress
    }

    fn step_progress(&self, dt: f32) -> f32 {
        if self.transition_time <= 0.0 {
            1.0
        } else {
            dt / self.transition_time
        }
    }
}

impl AbilityBehavior for Crouch {
    fn can_start(&self, _body: &LocomotionIntegrator) -> bool {
        self.phase == CrouchPhase::Standing
    }

    fn should_block_end(&self, candidate: &AbilityUnit) -> bool {
        self.owner == Some(candidate.id()) && self.phase == CrouchPhase::Lowering
    }

    fn on_enable(&mut self, id: AbilityId, _body: &mut LocomotionIntegrator) {
        self.owner = Some(id);
        self.phase = CrouchPhase::Lowering;
    }

    fn on_disable(&mut self, _id: AbilityId, _body: &mut LocomotionIntegrator) {
        self.phase = CrouchPhase::Rising;
    }

    fn tick(&mut self, _body: &LocomotionIntegrator, dt: f32) {
        match self.phase {
            CrouchPhase::Lowering => {
                self.progress = (self.progress + self.step_progress(dt)).min(1.0);
                if self.progress >= 1.0 {
                    self.phase = CrouchPhase::Crouched;
                }
            }
            CrouchPhase::Rising => {
                self.progress = (self.progress - self.step_progress(dt)).max(0.0);
                if self.progress <= 0.0 {
                    self.phase = CrouchPhase::Standing;
                }
            }
            CrouchPhase::Standing | CrouchPhase::Crouched => {}
        }
    }

    fn phase_label(&self) -> Option<&'static str> {
        match self.phase {
            CrouchPhase::Standing => None,
            CrouchPhase::Lowering => Some("lowering"),
            CrouchPhase::Crouched => Some("crouched"),
            CrouchPhase::Rising => Some("rising"),
        }
    }
}
