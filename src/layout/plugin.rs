//! Layout plugin wiring (glue).
//! - Settings asset/loader
//! - ActiveLayout resource once settings are ready
//! - Regenerate/dispose commands + spawn requests
//! - Surface apply system

use bevy::asset::LoadState;
use bevy::prelude::*;

use super::generator::LayoutGenerator;
use super::settings::{LayoutSettings, LayoutSettingsAssetPlugin};
use super::spawns::Faction;
use super::surface::apply::{apply_surface_commands, SceneIndex};
use super::surface::QueuedSurface;

/// Where the settings file lives and which side the viewer starts on.
#[derive(Resource, Clone)]
pub struct SessionSettings {
    pub layout_path: String,
    pub starting_faction: Faction,
}
impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            layout_path: "layout/roca.layout.ron".to_string(),
            starting_faction: Faction::Police,
        }
    }
}

#[derive(Resource, Default)]
pub struct LayoutSettingsHandle(pub Handle<LayoutSettings>);

/// The live generator. Inserted once settings resolve.
#[derive(Resource)]
pub struct ActiveLayout(pub LayoutGenerator<QueuedSurface>);

/// Faction the local player currently plays.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerFaction(pub Faction);

#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutCommand {
    /// Dispose the current layout (if any) and generate a fresh one.
    Regenerate,
    Dispose,
}

#[derive(Event, Clone, Copy, Debug)]
pub struct LayoutGenerated {
    pub placements: usize,
    pub structures: usize,
}

#[derive(Event, Clone, Copy, Debug)]
pub struct PlayerSpawnRequested(pub Faction);

#[derive(Event, Clone, Copy, Debug)]
pub struct PlayerSpawned {
    pub faction: Faction,
    pub position: Vec3,
}

pub struct LayoutPlugin;
impl Plugin for LayoutPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(LayoutSettingsAssetPlugin)
            .init_resource::<SessionSettings>()
            .init_resource::<LayoutSettingsHandle>()
            .init_resource::<SceneIndex>()
            .add_event::<LayoutCommand>()
            .add_event::<LayoutGenerated>()
            .add_event::<PlayerSpawnRequested>()
            .add_event::<PlayerSpawned>()
            .add_systems(Startup, (init_player_faction, load_layout_settings))
            .add_systems(
                Update,
                (
                    build_layout_when_ready.run_if(not(resource_exists::<ActiveLayout>)),
                    (handle_layout_commands, handle_spawn_requests, apply_surface_commands)
                        .chain()
                        .run_if(resource_exists::<ActiveLayout>),
                )
                    .chain(),
            );
    }
}

fn init_player_faction(mut commands: Commands, session: Res<SessionSettings>) {
    commands.insert_resource(PlayerFaction(session.starting_faction));
}

/// Startup: request the settings file, store handle.
fn load_layout_settings(
    mut handle_res: ResMut<LayoutSettingsHandle>,
    session: Res<SessionSettings>,
    assets: Res<AssetServer>,
) {
    if handle_res.0.is_strong() { return; }
    handle_res.0 = assets.load(session.layout_path.as_str());
    info!("Layout: loading settings from '{}'", session.layout_path);
}

/// Update: once settings load (or fail), build and generate the layout.
fn build_layout_when_ready(
    mut commands: Commands,
    handle_res: Res<LayoutSettingsHandle>,
    settings_assets: Res<Assets<LayoutSettings>>,
    assets: Res<AssetServer>,
    session: Res<SessionSettings>,
    mut generated: EventWriter<LayoutGenerated>,
    mut spawn_requests: EventWriter<PlayerSpawnRequested>,
) {
    let settings = match settings_assets.get(&handle_res.0) {
        Some(s) => {
            info!("Layout: settings ready (seed={:?}, bounds={:?})", s.seed, s.bounds);
            s.clone()
        }
        None => match assets.load_state(&handle_res.0) {
            LoadState::Failed(err) => {
                warn!("Layout: failed to load '{}': {err}; using defaults", session.layout_path);
                LayoutSettings::default()
            }
            _ => return,
        },
    };

    let mut layout = LayoutGenerator::queued(settings);
    match layout.generate() {
        Ok(()) => {
            generated.write(LayoutGenerated {
                placements: layout.placements().len(),
                structures: layout.structures().len(),
            });
            spawn_requests.write(PlayerSpawnRequested(session.starting_faction));
        }
        Err(e) => error!("Layout: initial generation failed: {e}"),
    }
    // inserted even on failure so commands can retry after a dispose
    commands.insert_resource(ActiveLayout(layout));
}

fn handle_layout_commands(
    mut events: EventReader<LayoutCommand>,
    mut layout: ResMut<ActiveLayout>,
    faction: Option<Res<PlayerFaction>>,
    mut generated: EventWriter<LayoutGenerated>,
    mut spawn_requests: EventWriter<PlayerSpawnRequested>,
) {
    for cmd in events.read() {
        let gen = &mut layout.0;
        gen.dispose();
        if *cmd == LayoutCommand::Dispose {
            continue;
        }
        match gen.generate() {
            Ok(()) => {
                generated.write(LayoutGenerated {
                    placements: gen.placements().len(),
                    structures: gen.structures().len(),
                });
                if let Some(f) = faction.as_deref() {
                    spawn_requests.write(PlayerSpawnRequested(f.0));
                }
            }
            Err(e) => error!("Layout: regeneration failed: {e}"),
        }
    }
}

fn handle_spawn_requests(
    mut requests: EventReader<PlayerSpawnRequested>,
    mut layout: ResMut<ActiveLayout>,
    mut spawned: EventWriter<PlayerSpawned>,
) {
    for &PlayerSpawnRequested(faction) in requests.read() {
        match layout.0.player_spawn(faction) {
            Ok(position) => {
                debug!("Layout: {faction} spawn at {position}");
                spawned.write(PlayerSpawned { faction, position });
            }
            Err(e) => warn!("Layout: no spawn for {faction}: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::surface::components::LayoutPiece;

    fn app_with(settings: LayoutSettings) -> App {
        let mut app = App::new();
        app.init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<Assets<Image>>()
            .init_resource::<AmbientLight>()
            .init_resource::<SceneIndex>()
            .insert_resource(PlayerFaction(Faction::Criminal))
            .insert_resource(ActiveLayout(LayoutGenerator::new(QueuedSurface::new(), settings)))
            .add_event::<LayoutCommand>()
            .add_event::<LayoutGenerated>()
            .add_event::<PlayerSpawnRequested>()
            .add_event::<PlayerSpawned>()
            .add_systems(
                Update,
                (handle_layout_commands, handle_spawn_requests, apply_surface_commands).chain(),
            );
        app
    }

    fn spawned(app: &mut App) -> Vec<PlayerSpawned> {
        app.world_mut()
            .resource_mut::<Events<PlayerSpawned>>()
            .drain()
            .collect()
    }

    #[test]
    fn regenerate_replaces_the_scene_and_respawns() {
        let mut settings = LayoutSettings::seeded(12);
        settings.sky_texture_size = 8;
        let mut app = app_with(settings);

        app.world_mut().send_event(LayoutCommand::Regenerate);
        app.update();
        assert!(app.world().resource::<ActiveLayout>().0.is_generated());

        app.world_mut().send_event(LayoutCommand::Regenerate);
        app.update();
        // old pieces are gone, only the new layout's remain
        let placed = app.world().resource::<ActiveLayout>().0.placements().len();
        let mut q = app.world_mut().query::<&LayoutPiece>();
        assert_eq!(q.iter(app.world()).count(), placed);

        let events = spawned(&mut app);
        assert_eq!(events.len(), 2);
        let layout = &app.world().resource::<ActiveLayout>().0;
        assert!(events.iter().all(|e| e.faction == Faction::Criminal));
        assert!(layout.spawns().get(Faction::Criminal).contains(&events[1].position));
    }

    #[test]
    fn spawn_request_without_layout_fires_nothing() {
        let mut app = app_with(LayoutSettings::seeded(1));
        app.world_mut().send_event(PlayerSpawnRequested(Faction::Police));
        app.update();
        assert!(spawned(&mut app).is_empty());

        app.world_mut().send_event(LayoutCommand::Regenerate);
        app.world_mut().send_event(LayoutCommand::Dispose);
        app.update();
        assert!(!app.world().resource::<ActiveLayout>().0.is_generated());
    }
}
