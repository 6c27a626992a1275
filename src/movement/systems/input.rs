//! Movement domain: input sampling and ability dispatch.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::abilities::{AbilityArbiter, AbilityEnded, AbilityStarted, AbilityTransition};
use crate::movement::{MoveIntent, MovementBindings};
use crate::physics::LocomotionIntegrator;

fn any_pressed(keyboard: &ButtonInput<KeyCode>, keys: &[KeyCode]) -> bool {
    keys.iter().any(|key| keyboard.pressed(*key))
}

/// Build this frame's move intent from the held keys.
pub(crate) fn intent_from_keys(
    keyboard: &ButtonInput<KeyCode>,
    bindings: &MovementBindings,
) -> MoveIntent {
    let mut axis = Vec2::ZERO;
    if any_pressed(keyboard, &bindings.forward) {
        axis.y += 1.0;
    }
    if any_pressed(keyboard, &bindings.back) {
        axis.y -= 1.0;
    }
    if any_pressed(keyboard, &bindings.right) {
        axis.x += 1.0;
    }
    if any_pressed(keyboard, &bindings.left) {
        axis.x -= 1.0;
    }

    let mut turn = 0.0;
    if any_pressed(keyboard, &bindings.turn_right) {
        turn += 1.0;
    }
    if any_pressed(keyboard, &bindings.turn_left) {
        turn -= 1.0;
    }

    MoveIntent {
        axis: axis.clamp_length_max(1.0),
        turn,
    }
}

/// Record the frame length before anything adds forces for this frame.
pub(crate) fn begin_locomotion_frame(
    time: Res<Time>,
    mut bodies: Query<&mut LocomotionIntegrator>,
) {
    let dt = time.delta_secs();
    for mut body in &mut bodies {
        body.begin_frame(dt);
    }
}

pub(crate) fn read_move_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    bindings: Res<MovementBindings>,
    mut intents: Query<&mut MoveIntent>,
) {
    let intent = intent_from_keys(&keyboard, &bindings);
    for mut current in &mut intents {
        *current = intent;
    }
}

/// Run each body's arbiter for this frame and publish its transitions.
pub(crate) fn dispatch_ability_input(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut bodies: Query<(Entity, &mut AbilityArbiter, &mut LocomotionIntegrator)>,
    mut started: MessageWriter<AbilityStarted>,
    mut ended: MessageWriter<AbilityEnded>,
) {
    let dt = time.delta_secs();

    for (entity, mut arbiter, mut body) in &mut bodies {
        arbiter.update(&*keyboard, &mut body, dt);

        for transition in arbiter.drain_transitions() {
            match transition {
                AbilityTransition::Started { ability, forced } => {
                    started.write(AbilityStarted {
                        entity,
                        ability,
                        forced,
                    });
                }
                AbilityTransition::Ended {
                    ability,
                    forced,
                    superseded_by,
                } => {
                    ended.write(AbilityEnded {
                        entity,
                        ability,
                        forced,
                        superseded_by,
                    });
                }
            }
        }
    }
}
