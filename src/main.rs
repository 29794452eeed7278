use bevy::prelude::*;

mod setup;
mod input;
mod actions;
mod state;
mod ui;

use actions::ActionState;
use input::{camera_controller, input_mapping_system, layout_hotkeys, move_camera_to_spawn, pause_toggle_system};
use state::GameState;
use ui::{spawn_pause_overlay, despawn_pause_overlay};
use roca::layout::LayoutPlugin;

fn main() {
    App::new()
        // core engine plugins
        .add_plugins(DefaultPlugins)
        // the farmstead: settings, generation, surface -> entities
        .add_plugins(LayoutPlugin)
        // init resources & game-state
        .init_resource::<ActionState>()
        .init_state::<GameState>()
        .insert_resource(ClearColor(Color::srgb(0.53, 0.72, 0.85)))
        // camera
        .add_systems(Startup, setup::setup)
        // pause-menu UI
        .add_systems(OnEnter(GameState::Paused), spawn_pause_overlay)
        .add_systems(OnExit(GameState::Paused), despawn_pause_overlay)
        // pause toggle + spawns always; movement only while running
        .add_systems(Update, (pause_toggle_system, move_camera_to_spawn))
        .add_systems(
            Update,
            (input_mapping_system, layout_hotkeys, camera_controller).run_if(in_state(GameState::Running))
        )
        .run();
}
