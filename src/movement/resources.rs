//! Movement domain: tuning and input binding resources.

use bevy::prelude::*;

use crate::content::BodyDef;

/// Host-side steering parameters. Overwritten from the body config at bootstrap.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct MovementTuning {
    /// Fraction of the planar correction applied while airborne.
    pub air_control: f32,
    /// Radians per second at full turn input.
    pub turn_speed: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            air_control: 0.3,
            turn_speed: 3.0,
        }
    }
}

impl From<&BodyDef> for MovementTuning {
    fn from(body: &BodyDef) -> Self {
        Self {
            air_control: body.air_control,
            turn_speed: body.turn_speed,
        }
    }
}

/// Keys feeding [`crate::movement::MoveIntent`]. Ability keys live in the ability config.
#[derive(Resource, Debug, Clone)]
pub struct MovementBindings {
    pub forward: Vec<KeyCode>,
    pub back: Vec<KeyCode>,
    pub left: Vec<KeyCode>,
    pub right: Vec<KeyCode>,
    pub turn_left: Vec<KeyCode>,
    pub turn_right: Vec<KeyCode>,
}

impl Default for MovementBindings {
    fn default() -> Self {
        Self {
            forward: vec![KeyCode::KeyW, KeyCode::ArrowUp],
            back: vec![KeyCode::KeyS, KeyCode::ArrowDown],
            left: vec![KeyCode::KeyA],
            right: vec![KeyCode::KeyD],
            turn_left: vec![KeyCode::KeyQ, KeyCode::ArrowLeft],
            turn_right: vec![KeyCode::KeyE, KeyCode::ArrowRight],
        }
    }
}
