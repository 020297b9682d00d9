//! UI domain: run complete screen and restart flow.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::core::{GameState, RunCompletedEvent};

/// Marker for the run complete overlay
#[derive(Component)]
pub struct RunCompleteUI;

pub(crate) fn show_run_complete(
    mut commands: Commands,
    mut events: MessageReader<RunCompletedEvent>,
    existing: Query<Entity, With<RunCompleteUI>>,
) {
    let Some(event) = events.read().last() else {
        return;
    };
    if !existing.is_empty() {
        return;
    }

    commands
        .spawn((
            RunCompleteUI,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                right: Val::Px(0.0),
                top: Val::Px(0.0),
                bottom: Val::Px(0.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.85)),
            ZIndex(100),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("RUN COMPLETE"),
                TextFont {
                    font_size: 64.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.75, 0.3)),
                Node {
                    margin: UiRect::bottom(Val::Px(32.0)),
                    ..default()
                },
            ));

            parent.spawn((
                Text::new(format!(
                    "{} rooms cleared  (seed {})",
                    event.rooms_cleared, event.seed
                )),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgb(0.6, 0.6, 0.6)),
            ));

            parent.spawn((
                Text::new("Press [Enter] to start a new run"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.4, 0.4, 0.45)),
                Node {
                    margin: UiRect::top(Val::Px(20.0)),
                    ..default()
                },
            ));
        });
}

/// Enter starts a fresh run; re-entering `Run` builds a new plan.
pub(crate) fn handle_restart(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    overlay: Query<Entity, With<RunCompleteUI>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !keyboard.just_pressed(KeyCode::Enter) && !keyboard.just_pressed(KeyCode::NumpadEnter) {
        return;
    }

    for entity in &overlay {
        commands.entity(entity).despawn();
    }
    info!("Starting a new run");
    next_state.set(GameState::Run);
}
