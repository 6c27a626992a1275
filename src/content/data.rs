//! Data definitions for the locomotion RON file.
//!
//! These structs mirror the structure in assets/data/locomotion.ron and are
//! used for deserialization. `LocomotionConfig::default()` matches the shipped
//! file so headless hosts and tests need no files on disk.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::abilities::{BlockRule, EndPolicy, Exclusivity, StartPolicy};
use crate::physics::ForceMode;

// ============================================================================
// Common
// ============================================================================

/// Vector written as `(x: .., y: .., z: ..)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct Vec3Def {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3Def {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl From<Vec3Def> for Vec3 {
    fn from(v: Vec3Def) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

// ============================================================================
// Root (locomotion.ron)
// ============================================================================

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LocomotionConfig {
    pub schema_version: u32,
    pub body: BodyDef,
    /// Registration order; key candidates are polled in this order.
    pub abilities: Vec<AbilityDef>,
}

impl LocomotionConfig {
    pub fn ability(&self, name: &str) -> Option<&AbilityDef> {
        self.abilities.iter().find(|a| a.name == name)
    }
}

// ============================================================================
// Body
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BodyDef {
    pub mass: f32,
    pub gravity: Vec3Def,
    pub default_speed: f32,
    /// Speed overrides at or below this are ignored.
    pub min_move_speed: f32,
    pub movement_epsilon: f32,
    pub grounded_clamp_velocity: f32,
    /// Fraction of planar steering available while airborne (0..=1).
    pub air_control: f32,
    /// Radians per second at full turn input.
    pub turn_speed: f32,
    pub ground_check: GroundCheckDef,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct GroundCheckDef {
    pub offset: Vec3Def,
    pub radius: f32,
}

// ============================================================================
// Abilities
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AbilityDef {
    pub priority: i32,
    pub name: String,
    pub kind: AbilityKind,
    #[serde(default)]
    pub start: StartPolicy,
    #[serde(default)]
    pub end: EndPolicy,
    #[serde(default)]
    pub movement_speed_override: Option<f32>,
    #[serde(default)]
    pub exclusivity: Exclusivity,
    #[serde(default)]
    pub blocks_start: BlockRule,
    #[serde(default)]
    pub blocks_end: BlockRule,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum AbilityKind {
    Jump {
        impulse: f32,
        #[serde(default)]
        air_gravity: Option<Vec3Def>,
    },
    Crouch {
        transition_time: f32,
        /// Crouched height as a fraction of standing height.
        crouched_height: f32,
    },
    SpeedChange,
    Dash {
        speed: f32,
        duration: f32,
    },
    Thrust {
        force: Vec3Def,
        mode: ForceMode,
    },
}

impl AbilityKind {
    pub fn label(&self) -> &'static str {
        match self {
            AbilityKind::Jump { .. } => "Jump",
            AbilityKind::Crouch { .. } => "Crouch",
            AbilityKind::SpeedChange => "SpeedChange",
            AbilityKind::Dash { .. } => "Dash",
            AbilityKind::Thrust { .. } => "Thrust",
        }
    }
}

// ============================================================================
// Defaults (keep in sync with assets/data/locomotion.ron)
// ============================================================================

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            schema_version: 1,
            body: BodyDef::default(),
            abilities: vec![
                AbilityDef {
                    priority: -1,
                    name: "jump".to_string(),
                    kind: AbilityKind::Jump {
                        impulse: 5.0,
                        air_gravity: Some(Vec3Def::new(0.0, -14.0, 0.0)),
                    },
                    start: StartPolicy::KeyDown(KeyCode::Space),
                    end: EndPolicy::Automatic,
                    movement_speed_override: None,
                    exclusivity: Exclusivity::Concurrent,
                    blocks_start: BlockRule::None,
                    blocks_end: BlockRule::None,
                },
                AbilityDef {
                    priority: -2,
                    name: "crouch".to_string(),
                    kind: AbilityKind::Crouch {
                        transition_time: 0.25,
                        crouched_height: 0.55,
                    },
                    start: StartPolicy::KeyDown(KeyCode::KeyC),
                    end: EndPolicy::KeyUp(KeyCode::KeyC),
                    movement_speed_override: Some(2.0),
                    exclusivity: Exclusivity::Exclusive,
                    blocks_start: BlockRule::Only(vec![
                        "sprint".to_string(),
                        "jump".to_string(),
                        "dash".to_string(),
                    ]),
                    blocks_end: BlockRule::None,
                },
                AbilityDef {
                    priority: 1,
                    name: "sprint".to_string(),
                    kind: AbilityKind::SpeedChange,
                    start: StartPolicy::KeyDown(KeyCode::ShiftLeft),
                    end: EndPolicy::KeyUp(KeyCode::ShiftLeft),
                    movement_speed_override: Some(9.0),
                    exclusivity: Exclusivity::Exclusive,
                    blocks_start: BlockRule::None,
                    blocks_end: BlockRule::None,
                },
                AbilityDef {
                    priority: 2,
                    name: "dash".to_string(),
                    kind: AbilityKind::Dash {
                        speed: 14.0,
                        duration: 0.2,
                    },
                    start: StartPolicy::KeyDown(KeyCode::KeyF),
                    end: EndPolicy::Automatic,
                    movement_speed_override: None,
                    exclusivity: Exclusivity::Exclusive,
                    blocks_start: BlockRule::All,
                    blocks_end: BlockRule::None,
                },
                AbilityDef {
                    priority: 3,
                    name: "thrust".to_string(),
                    kind: AbilityKind::Thrust {
                        force: Vec3Def::new(0.0, 15.0, 0.0),
                        mode: ForceMode::Force,
                    },
                    start: StartPolicy::KeyDown(KeyCode::KeyT),
                    end: EndPolicy::KeyUp(KeyCode::KeyT),
                    movement_speed_override: None,
                    exclusivity: Exclusivity::Concurrent,
                    blocks_start: BlockRule::None,
                    blocks_end: BlockRule::None,
                },
            ],
        }
    }
}

impl Default for BodyDef {
    fn default() -> Self {
        Self {
            mass: 1.0,
            gravity: Vec3Def::new(0.0, -9.81, 0.0),
            default_speed: 5.0,
            min_move_speed: 0.1,
            movement_epsilon: 0.001,
            grounded_clamp_velocity: -2.0,
            air_control: 0.3,
            turn_speed: 3.0,
            ground_check: GroundCheckDef {
                offset: Vec3Def::new(0.0, -0.9, 0.0),
                radius: 0.3,
            },
        }
    }
}
