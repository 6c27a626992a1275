//! Validation for locomotion config values and cross-references between abilities.

use bevy::math::Vec3;
use std::collections::HashSet;

use super::data::*;

/// A validation error with context about what failed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub source_type: &'static str,
    pub source_id: String,
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} '{}' has invalid field '{}': {}",
            self.source_type, self.source_id, self.field, self.message
        )
    }
}

fn reject(
    errors: &mut Vec<ValidationError>,
    source_type: &'static str,
    source_id: &str,
    field: &'static str,
    message: String,
) {
    errors.push(ValidationError {
        source_type,
        source_id: source_id.to_string(),
        field,
        message,
    });
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn non_negative(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

/// Validate the whole config.
/// Returns a list of validation errors, empty if the config is usable.
pub fn validate_config(config: &LocomotionConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    validate_body(&config.body, &mut errors);
    validate_abilities(&config.abilities, &mut errors);
    errors
}

fn validate_body(body: &BodyDef, errors: &mut Vec<ValidationError>) {
    const SOURCE: &str = "Body";
    const ID: &str = "body";

    if !positive(body.mass) {
        reject(errors, SOURCE, ID, "mass", format!("must be positive, got {}", body.mass));
    }
    if !Vec3::from(body.gravity).is_finite() {
        reject(errors, SOURCE, ID, "gravity", "must be finite".to_string());
    }
    if !positive(body.default_speed) {
        reject(
            errors,
            SOURCE,
            ID,
            "default_speed",
            format!("must be positive, got {}", body.default_speed),
        );
    }
    if !non_negative(body.min_move_speed) {
        reject(
            errors,
            SOURCE,
            ID,
            "min_move_speed",
            format!("must not be negative, got {}", body.min_move_speed),
        );
    }
    if !non_negative(body.movement_epsilon) {
        reject(
            errors,
            SOURCE,
            ID,
            "movement_epsilon",
            format!("must not be negative, got {}", body.movement_epsilon),
        );
    }
    if !body.grounded_clamp_velocity.is_finite() || body.grounded_clamp_velocity > 0.0 {
        reject(
            errors,
            SOURCE,
            ID,
            "grounded_clamp_velocity",
            format!("must be zero or negative, got {}", body.grounded_clamp_velocity),
        );
    }
    if !(0.0..=1.0).contains(&body.air_control) {
        reject(
            errors,
            SOURCE,
            ID,
            "air_control",
            format!("must be within 0..=1, got {}", body.air_control),
        );
    }
    if !non_negative(body.turn_speed) {
        reject(
            errors,
            SOURCE,
            ID,
            "turn_speed",
            format!("must not be negative, got {}", body.turn_speed),
        );
    }
    if !positive(body.ground_check.radius) {
        reject(
            errors,
            SOURCE,
            ID,
            "ground_check.radius",
            format!("must be positive, got {}", body.ground_check.radius),
        );
    }
}

fn validate_abilities(abilities: &[AbilityDef], errors: &mut Vec<ValidationError>) {
    const SOURCE: &str = "Ability";

    let names: HashSet<&str> = abilities.iter().map(|a| a.name.as_str()).collect();
    let mut seen_priorities = HashSet::new();
    let mut seen_names = HashSet::new();

    for ability in abilities {
        let id = ability.name.as_str();

        if !seen_priorities.insert(ability.priority) {
            reject(
                errors,
                SOURCE,
                id,
                "priority",
                format!("priority {} is already taken", ability.priority),
            );
        }
        if !seen_names.insert(id) {
            reject(errors, SOURCE, id, "name", "name is already taken".to_string());
        }

        if let Some(speed) = ability.movement_speed_override {
            if !positive(speed) {
                reject(
                    errors,
                    SOURCE,
                    id,
                    "movement_speed_override",
                    format!("must be positive, got {}", speed),
                );
            }
        }

        for (field, rule) in [
            ("blocks_start", &ability.blocks_start),
            ("blocks_end", &ability.blocks_end),
        ] {
            for target in rule.named() {
                if !names.contains(target.as_str()) {
                    reject(
                        errors,
                        SOURCE,
                        id,
                        field,
                        format!("references missing ability '{}'", target),
                    );
                }
            }
        }

        validate_kind(id, &ability.kind, errors);
    }
}

fn validate_kind(id: &str, kind: &AbilityKind, errors: &mut Vec<ValidationError>) {
    const SOURCE: &str = "Ability";

    match kind {
        AbilityKind::Jump {
            impulse,
            air_gravity,
        } => {
            if !positive(*impulse) {
                reject(
                    errors,
                    SOURCE,
                    id,
                    "kind.impulse",
                    format!("must be positive, got {}", impulse),
                );
            }
            if air_gravity.is_some_and(|g| !Vec3::from(g).is_finite()) {
                reject(errors, SOURCE, id, "kind.air_gravity", "must be finite".to_string());
            }
        }
        AbilityKind::Crouch {
            transition_time,
            crouched_height,
        } => {
            if !non_negative(*transition_time) {
                reject(
                    errors,
                    SOURCE,
                    id,
                    "kind.transition_time",
                    format!("must not be negative, got {}", transition_time),
                );
            }
            if !positive(*crouched_height) || *crouched_height > 1.0 {
                reject(
                    errors,
                    SOURCE,
                    id,
                    "kind.crouched_height",
                    format!("must be within (0, 1], got {}", crouched_height),
                );
            }
        }
        AbilityKind::SpeedChange => {}
        AbilityKind::Dash { speed, duration } => {
            if !positive(*speed) {
                reject(
                    errors,
                    SOURCE,
                    id,
                    "kind.speed",
                    format!("must be positive, got {}", speed),
                );
            }
            if !positive(*duration) {
                reject(
                    errors,
                    SOURCE,
                    id,
                    "kind.duration",
                    format!("must be positive, got {}", duration),
                );
            }
        }
        AbilityKind::Thrust { force, .. } => {
            if !Vec3::from(*force).is_finite() {
                reject(errors, SOURCE, id, "kind.force", "must be finite".to_string());
            }
        }
    }
}
