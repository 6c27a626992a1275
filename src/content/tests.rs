//! Content domain: tests for parsing, validation and assembly.

use bevy::prelude::*;

use super::*;
use crate::abilities::{AbilityId, BlockRule, EndPolicy, Exclusivity, StartPolicy};

const SHIPPED: &str = include_str!("../../assets/data/locomotion.ron");

fn validation_fields(config: &LocomotionConfig) -> Vec<&'static str> {
    validate_config(config).into_iter().map(|e| e.field).collect()
}

// -----------------------------------------------------------------------------
// Parsing
// -----------------------------------------------------------------------------

#[test]
fn test_shipped_config_matches_defaults() {
    let parsed = parse_locomotion_config(SHIPPED, "locomotion.ron").unwrap();
    assert_eq!(parsed, LocomotionConfig::default());
}

#[test]
fn test_shipped_config_is_valid() {
    let parsed = parse_locomotion_config(SHIPPED, "locomotion.ron").unwrap();
    let errors = validate_config(&parsed);
    assert!(errors.is_empty(), "{:?}", errors);
}

#[test]
fn test_omitted_ability_fields_take_defaults() {
    let text = r#"(
        schema_version: 1,
        body: (
            mass: 2.0,
            gravity: (x: 0.0, y: -9.81, z: 0.0),
            default_speed: 4.0,
            min_move_speed: 0.1,
            movement_epsilon: 0.001,
            grounded_clamp_velocity: -2.0,
            air_control: 0.5,
            turn_speed: 2.0,
            ground_check: (offset: (x: 0.0, y: -1.0, z: 0.0), radius: 0.25),
        ),
        abilities: [
            (priority: 7, name: "walk", kind: SpeedChange),
        ],
    )"#;

    let config = parse_locomotion_config(text, "inline").unwrap();
    let walk = config.ability("walk").unwrap();

    assert_eq!(walk.start, StartPolicy::Manual);
    assert_eq!(walk.end, EndPolicy::Manual);
    assert_eq!(walk.movement_speed_override, None);
    assert_eq!(walk.exclusivity, Exclusivity::Exclusive);
    assert_eq!(walk.blocks_start, BlockRule::None);
}

#[test]
fn test_parse_error_names_the_file() {
    let err = parse_locomotion_config("(schema_version: 1", "broken.ron").unwrap_err();
    assert_eq!(err.file, "broken.ron");
    assert!(err.message.starts_with("Parse error"));
}

#[test]
fn test_unknown_schema_version_is_rejected() {
    let text = SHIPPED.replacen("schema_version: 1", "schema_version: 9", 1);
    let err = parse_locomotion_config(&text, "locomotion.ron").unwrap_err();
    assert!(err.message.contains("schema_version 9"));
}

#[test]
fn test_missing_file_reports_io_error() {
    let err = load_locomotion_config(std::path::Path::new("no/such/locomotion.ron")).unwrap_err();
    assert!(err.message.starts_with("IO error"));
}

// -----------------------------------------------------------------------------
// Validation
// -----------------------------------------------------------------------------

#[test]
fn test_body_values_are_checked() {
    let mut config = LocomotionConfig::default();
    config.body.mass = 0.0;
    config.body.movement_epsilon = -0.1;
    config.body.default_speed = -1.0;
    config.body.ground_check.radius = 0.0;
    config.body.air_control = 1.5;

    let fields = validation_fields(&config);

    assert_eq!(
        fields,
        vec![
            "mass",
            "default_speed",
            "movement_epsilon",
            "air_control",
            "ground_check.radius",
        ]
    );
}

#[test]
fn test_duplicate_priority_and_name_are_reported() {
    let mut config = LocomotionConfig::default();
    let mut copy = config.abilities[2].clone();
    copy.priority = config.abilities[0].priority;
    config.abilities.push(copy);

    let fields = validation_fields(&config);

    assert!(fields.contains(&"priority"));
    assert!(fields.contains(&"name"));
}

#[test]
fn test_non_positive_speed_override_is_reported() {
    let mut config = LocomotionConfig::default();
    config.abilities[2].movement_speed_override = Some(0.0);

    let errors = validate_config(&config);

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].source_id, "sprint");
    assert_eq!(errors[0].field, "movement_speed_override");
}

#[test]
fn test_block_rule_must_name_known_abilities() {
    let mut config = LocomotionConfig::default();
    config.abilities[1].blocks_end = BlockRule::Only(vec!["glide".to_string()]);

    let errors = validate_config(&config);

    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].to_string(),
        "Ability 'crouch' has invalid field 'blocks_end': references missing ability 'glide'"
    );
}

#[test]
fn test_kind_parameters_are_checked() {
    let mut config = LocomotionConfig::default();
    config.abilities[1].kind = AbilityKind::Crouch {
        transition_time: -1.0,
        crouched_height: 1.5,
    };
    config.abilities[3].kind = AbilityKind::Dash {
        speed: 10.0,
        duration: 0.0,
    };

    let fields = validation_fields(&config);

    assert_eq!(
        fields,
        vec!["kind.transition_time", "kind.crouched_height", "kind.duration"]
    );
}

// -----------------------------------------------------------------------------
// Assembly
// -----------------------------------------------------------------------------

#[test]
fn test_build_body_registers_abilities_in_file_order() {
    let config = LocomotionConfig::default();
    let (integrator, arbiter) = build_body(&config).unwrap();

    let ids: Vec<AbilityId> = arbiter.abilities().map(|u| u.id()).collect();
    assert_eq!(
        ids,
        vec![AbilityId(-1), AbilityId(-2), AbilityId(1), AbilityId(2), AbilityId(3)]
    );
    assert_eq!(arbiter.effective_speed(), config.body.default_speed);
    assert_eq!(integrator.forces().gravity(), Vec3::new(0.0, -9.81, 0.0));
    assert_eq!(integrator.ground_check().radius, 0.3);
}

#[test]
fn test_built_ability_carries_policies() {
    let config = LocomotionConfig::default();
    let crouch = build_ability(config.ability("crouch").unwrap());

    assert_eq!(crouch.id(), AbilityId(-2));
    assert_eq!(crouch.start_policy(), StartPolicy::KeyDown(KeyCode::KeyC));
    assert_eq!(crouch.end_policy(), EndPolicy::KeyUp(KeyCode::KeyC));
    assert_eq!(crouch.movement_speed_override(), Some(2.0));

    let sprint = build_ability(config.ability("sprint").unwrap());
    assert!(crouch.should_block_start(&sprint));
    assert!(!sprint.should_block_start(&crouch));
}

#[test]
fn test_invalid_body_fails_assembly() {
    let mut config = LocomotionConfig::default();
    config.body.mass = -1.0;

    let err = build_body(&config).unwrap_err();

    assert!(matches!(err, AssemblyError::Body(_)));
}

#[test]
fn test_duplicate_ids_fail_assembly() {
    let mut config = LocomotionConfig::default();
    config.abilities[4].priority = 1;

    let err = build_body(&config).unwrap_err();

    assert_eq!(
        err,
        AssemblyError::Abilities(crate::abilities::ArbiterError::DuplicateId(AbilityId(1)))
    );
}
