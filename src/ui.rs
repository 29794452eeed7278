use bevy::prelude::*;
use bevy::ui::BackgroundColor;

use roca::layout::PlayerFaction;

#[derive(Component)]
pub struct PauseOverlay;

const HELP: &str = "WASD move / Space, Shift up-down / RMB look\nR respawn / Tab switch side / G new map / Esc resume";

pub fn spawn_pause_overlay(mut commands: Commands, faction: Option<Res<PlayerFaction>>) {
    let side = faction.map(|f| f.0.to_string()).unwrap_or_else(|| "-".to_string());

    commands.spawn((
        // Fullscreen transparent overlay node
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            row_gap: Val::Px(16.0),
            ..default()
        },
        BackgroundColor(Color::linear_rgba(0.0, 0.0, 0.0, 0.7)),
        PauseOverlay,
    ))
    .with_children(|parent| {
        parent.spawn((
            Text::new(format!("Paused ({side})")),
            TextFont {
                font_size: 64.0,
                ..default()
            },
            TextLayout::new_with_justify(JustifyText::Center),
            TextColor(Color::WHITE),
        ));
        parent.spawn((
            Text::new(HELP),
            TextFont {
                font_size: 20.0,
                ..default()
            },
            TextLayout::new_with_justify(JustifyText::Center),
            TextColor(Color::srgb(0.8, 0.8, 0.8)),
        ));
    });
}

pub fn despawn_pause_overlay(
    mut commands: Commands,
    query: Query<Entity, With<PauseOverlay>>,
) {
    for entity in &query {
        commands.entity(entity).despawn();
    }
}
