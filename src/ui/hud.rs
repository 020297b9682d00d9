//! UI domain: run progress HUD text.

use bevy::prelude::*;

use crate::rooms::{ExitGate, GateState, RoomLifecycle, RoomPhase};

const HUD_PADDING: f32 = 16.0;

/// Marker for the HUD text showing room progress
#[derive(Component)]
pub struct RunHudText;

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

pub(crate) fn spawn_run_hud(mut commands: Commands) {
    commands.spawn((
        RunHudText,
        Text::new(""),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::srgb(0.9, 0.9, 0.85)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(HUD_PADDING),
            top: Val::Px(HUD_PADDING),
            padding: UiRect::all(Val::Px(8.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.05, 0.05, 0.08, 0.7)),
    ));
}

pub(crate) fn update_run_hud(
    lifecycle: Res<RoomLifecycle>,
    gates: Query<&ExitGate>,
    mut query: Query<&mut Text, With<RunHudText>>,
) {
    if !lifecycle.is_changed() {
        return;
    }

    let content = match lifecycle.active() {
        Some(room) => {
            let gate = match room.gate.map(|gate| gates.get(gate)) {
                Some(Ok(gate)) if gate.state() == GateState::Unlocked => "open",
                Some(Ok(_)) => "locked",
                _ => "none",
            };
            format!(
                "Room {}/{}  {}\nTheme: {}\nEnemies: {}\nGate: {}",
                room.index + 1,
                lifecycle.plan().len(),
                room.blueprint_id,
                room.theme_id,
                room.alive,
                gate
            )
        }
        None if lifecycle.phase() == RoomPhase::Complete => format!(
            "Run complete\n{} rooms cleared",
            lifecycle.rooms_cleared()
        ),
        None => String::new(),
    };

    for mut text in &mut query {
        **text = content.clone();
    }
}
