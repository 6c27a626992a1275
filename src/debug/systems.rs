//! Debug domain: overlay toggling and refresh.

use bevy::prelude::*;

use crate::abilities::AbilityArbiter;
use crate::debug::{DebugInfoOverlay, DebugState};
use crate::movement::{LocomotionReadout, Player};

pub(crate) fn toggle_debug_info(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
) {
    if keyboard.just_pressed(KeyCode::F3) {
        debug_state.show_info = !debug_state.show_info;
        info!("Debug overlay: {}", debug_state.show_info);
    }
}

fn spawn_debug_info_overlay(commands: &mut Commands) {
    commands.spawn((
        DebugInfoOverlay,
        Text::new("Loading..."),
        TextFont {
            font_size: 12.0,
            ..default()
        },
        TextColor(Color::srgb(0.8, 0.9, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            bottom: Val::Px(20.0),
            padding: UiRect::all(Val::Px(8.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ZIndex(500),
    ));
}

fn describe_abilities(arbiter: &AbilityArbiter) -> String {
    let current = arbiter
        .current_exclusive()
        .and_then(|id| arbiter.ability(id))
        .map(|unit| match unit.behavior().phase_label() {
            Some(phase) => format!("{} ({})", unit.name(), phase),
            None => unit.name().to_string(),
        })
        .unwrap_or_else(|| "-".to_string());

    let concurrent: Vec<&str> = arbiter
        .abilities()
        .filter(|unit| unit.is_active() && unit.is_concurrent())
        .map(|unit| unit.name())
        .collect();

    if concurrent.is_empty() {
        current
    } else {
        format!("{} + {}", current, concurrent.join(", "))
    }
}

/// Update the debug info overlay with current player state
pub(crate) fn update_debug_info_overlay(
    mut commands: Commands,
    debug_state: Res<DebugState>,
    player_query: Query<(&Transform, &LocomotionReadout, &AbilityArbiter), With<Player>>,
    mut overlay_query: Query<&mut Text, With<DebugInfoOverlay>>,
    existing_overlay: Query<Entity, With<DebugInfoOverlay>>,
) {
    if !debug_state.show_info {
        // Cleanup overlay if it exists
        for entity in &existing_overlay {
            commands.entity(entity).despawn();
        }
        return;
    }

    // Ensure overlay exists
    if existing_overlay.is_empty() {
        spawn_debug_info_overlay(&mut commands);
        return;
    }

    if let (Some((transform, readout, arbiter)), Ok(mut text)) =
        (player_query.iter().next(), overlay_query.single_mut())
    {
        let pos = transform.translation;
        **text = format!(
            "Pos: ({:.1}, {:.1}, {:.1})\nSpeed: {:.2} (target {:.1})\nGrounded: {}\nVelocity: ({:.2}, {:.2}, {:.2})\nAbility: {}",
            pos.x,
            pos.y,
            pos.z,
            readout.speed,
            readout.effective_speed,
            readout.is_grounded,
            readout.velocity.x,
            readout.velocity.y,
            readout.velocity.z,
            describe_abilities(arbiter)
        );
    }
}
