//! Debug domain: hotkey handling and the info overlay.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::{DamageEvent, Enemy, Health};
use crate::core::GameState;
use crate::debug::state::{DebugInfoOverlay, DebugState};
use crate::rooms::RoomLifecycle;

const DEBUG_DAMAGE: f32 = 10.0;

/// Handle Ctrl+key shortcuts for debug actions
pub(crate) fn handle_debug_hotkeys(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    mut lifecycle: ResMut<RoomLifecycle>,
    enemies: Query<(Entity, &Health), With<Enemy>>,
    mut damage_events: MessageWriter<DamageEvent>,
) {
    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    if !ctrl {
        return;
    }

    // Ctrl+K: Kill every enemy through the damage path
    if keyboard.just_pressed(KeyCode::KeyK) {
        let mut count = 0;
        for (entity, health) in &enemies {
            damage_events.write(DamageEvent {
                target: entity,
                amount: health.current,
            });
            count += 1;
        }
        debug_state.set_message(format!("Killed {} enemies", count), 2.0);
        info!("[DEBUG] Killed {} enemies", count);
    }

    // Ctrl+J: Damage one enemy
    if keyboard.just_pressed(KeyCode::KeyJ) {
        if let Some((entity, _)) = enemies.iter().next() {
            damage_events.write(DamageEvent {
                target: entity,
                amount: DEBUG_DAMAGE,
            });
            debug_state.set_message(format!("Damaged {:?}", entity), 2.0);
            info!("[DEBUG] Dealt {} damage to {:?}", DEBUG_DAMAGE, entity);
        }
    }

    // Ctrl+X: Despawn one enemy without a kill, the teardown path reports it
    if keyboard.just_pressed(KeyCode::KeyX) {
        if let Some((entity, _)) = enemies.iter().next() {
            commands.entity(entity).despawn();
            debug_state.set_message(format!("Despawned {:?}", entity), 2.0);
            info!("[DEBUG] Despawned {:?} without killing it", entity);
        }
    }

    // Ctrl+N: Force an advance regardless of the gate
    if keyboard.just_pressed(KeyCode::KeyN) {
        let accepted = lifecycle.try_advance();
        let msg = if accepted {
            "Advancing"
        } else {
            "Advance ignored"
        };
        debug_state.set_message(msg, 2.0);
        info!("[DEBUG] Forced advance: {}", msg);
    }

    // Ctrl+D: Toggle the info overlay
    if keyboard.just_pressed(KeyCode::KeyD) {
        debug_state.show_info = !debug_state.show_info;
        let msg = if debug_state.show_info {
            "Debug Info ON"
        } else {
            "Debug Info OFF"
        };
        debug_state.set_message(msg, 2.0);
        info!("[DEBUG] {}", msg);
    }
}

/// Update status message timer and fade out
pub(crate) fn update_status_message(time: Res<Time>, mut debug_state: ResMut<DebugState>) {
    if let Some((_, ref mut duration)) = debug_state.status_message {
        *duration -= time.delta_secs();
        if *duration <= 0.0 {
            debug_state.status_message = None;
        }
    }
}

/// Keep the info overlay in sync with the run
pub(crate) fn update_debug_info_overlay(
    mut commands: Commands,
    debug_state: Res<DebugState>,
    lifecycle: Res<RoomLifecycle>,
    game_state: Res<State<GameState>>,
    mut overlay_query: Query<(Entity, &mut Text), With<DebugInfoOverlay>>,
) {
    if !debug_state.show_info {
        for (entity, _) in &overlay_query {
            commands.entity(entity).despawn();
        }
        return;
    }

    let Ok((_, mut text)) = overlay_query.single_mut() else {
        spawn_debug_info_overlay(&mut commands);
        return;
    };

    let status = debug_state
        .status_message
        .as_ref()
        .map_or("", |(message, _)| message.as_str());
    **text = format!(
        "Seed: {}\nState: {:?}\nPhase: {:?}\nGeneration: {}\nRoom: {:?}\nCleared: {}\n{}",
        lifecycle.plan().seed,
        game_state.get(),
        lifecycle.phase(),
        lifecycle.generation().0,
        lifecycle.current_index(),
        lifecycle.rooms_cleared(),
        status
    );
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
