use bevy::prelude::*;
use bevy::input::{mouse::MouseMotion, keyboard::KeyCode, ButtonInput};

use roca::layout::{ActiveLayout, LayoutCommand, PlayerFaction, PlayerSpawned};
use roca::layout::plugin::PlayerSpawnRequested;

use crate::actions::{PlayerAction, ActionState};
use crate::setup::MainCamera;
use crate::state::GameState;

pub const MOVE_SPEED: f32 = 12.0;
pub const SPRINT_FACTOR: f32 = 3.0;
pub const LOOK_SPEED: f32 = 0.15;
pub const MAX_CAMERA_DT: f32 = 0.05; // never use a dt larger than 50ms
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Free-fly camera orientation (radians). Yaw 0 looks down -Z.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct FlyCamera {
    pub yaw: f32,
    pub pitch: f32,
}

impl FlyCamera {
    pub fn looking_from(eye: Vec3, target: Vec3) -> Self {
        let d = (target - eye).normalize_or(Vec3::NEG_Z);
        Self {
            yaw: (-d.x).atan2(-d.z),
            pitch: d.y.clamp(-1.0, 1.0).asin(),
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }
}

pub fn input_mapping_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut action_state: ResMut<ActionState>,
) {
    action_state.set(PlayerAction::MoveForward, keys.pressed(KeyCode::KeyW));
    action_state.set(PlayerAction::MoveBackward, keys.pressed(KeyCode::KeyS));
    action_state.set(PlayerAction::MoveLeft, keys.pressed(KeyCode::KeyA));
    action_state.set(PlayerAction::MoveRight, keys.pressed(KeyCode::KeyD));
    action_state.set(PlayerAction::MoveUp, keys.pressed(KeyCode::Space));
    action_state.set(PlayerAction::MoveDown, keys.pressed(KeyCode::ShiftLeft));
    action_state.set(PlayerAction::Sprint, keys.pressed(KeyCode::ControlLeft));
}

pub fn pause_toggle_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
    current_state: Res<State<GameState>>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        if current_state.get() == &GameState::Running {
            next_state.set(GameState::Paused);
            info!("Paused game");
        } else if current_state.get() == &GameState::Paused {
            next_state.set(GameState::Running);
            info!("Resumed game");
        }
    }
}

/// R respawns, Tab swaps sides (and respawns), G regenerates the map.
pub fn layout_hotkeys(
    keys: Res<ButtonInput<KeyCode>>,
    faction: Option<ResMut<PlayerFaction>>,
    mut layout_cmds: EventWriter<LayoutCommand>,
    mut spawn_requests: EventWriter<PlayerSpawnRequested>,
) {
    let Some(mut faction) = faction else { return; };

    if keys.just_pressed(KeyCode::Tab) {
        faction.0 = faction.0.opponent();
        info!("Switched to {}", faction.0);
        spawn_requests.write(PlayerSpawnRequested(faction.0));
    } else if keys.just_pressed(KeyCode::KeyR) {
        spawn_requests.write(PlayerSpawnRequested(faction.0));
    }

    if keys.just_pressed(KeyCode::KeyG) {
        layout_cmds.write(LayoutCommand::Regenerate);
    }
}

/// Put the camera on a fresh spawn, facing the nearest opponent spawn.
pub fn move_camera_to_spawn(
    mut spawned: EventReader<PlayerSpawned>,
    layout: Option<Res<ActiveLayout>>,
    mut query: Query<(&mut Transform, &mut FlyCamera), With<MainCamera>>,
) {
    let Some(ev) = spawned.read().last().copied() else { return; };
    let Ok((mut tf, mut fly)) = query.single_mut() else { return; };

    let facing = layout
        .and_then(|l| l.0.enemy_spawns(ev.faction).ok())
        .and_then(|enemies| {
            enemies
                .into_iter()
                .min_by(|a, b| a.distance_squared(ev.position).total_cmp(&b.distance_squared(ev.position)))
        })
        .map(|p| Vec3::new(p.x, ev.position.y, p.z))
        .unwrap_or(Vec3::ZERO.with_y(ev.position.y));

    *fly = FlyCamera::looking_from(ev.position, facing);
    tf.translation = ev.position;
    tf.rotation = fly.rotation();
}

pub fn camera_controller(
    time: Res<Time>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut motion_evr: EventReader<MouseMotion>,
    action_state: Res<ActionState>,
    mut query: Query<(&mut Transform, &mut FlyCamera), With<MainCamera>>,
) {
    // 0) Clamp delta
    let dt = time.delta_secs().min(MAX_CAMERA_DT);

    let Ok((mut tf, mut fly)) = query.single_mut() else { return; };

    // 1) Look (right mouse held)
    if mouse_buttons.pressed(MouseButton::Right) {
        for ev in motion_evr.read() {
            fly.yaw -= ev.delta.x * LOOK_SPEED * dt;
            fly.pitch = (fly.pitch - ev.delta.y * LOOK_SPEED * dt).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }
    } else {
        motion_evr.clear();
    }
    tf.rotation = fly.rotation();

    // 2) Move: horizontal follows yaw only, vertical is world up
    let axis = action_state.move_axis();
    if axis != Vec3::ZERO {
        let yaw = Quat::from_rotation_y(fly.yaw);
        let forward = yaw * Vec3::NEG_Z;
        let right = yaw * Vec3::X;
        let dir = (forward * axis.z + right * axis.x + Vec3::Y * axis.y).normalize();
        let speed = if action_state.pressed(PlayerAction::Sprint) { MOVE_SPEED * SPRINT_FACTOR } else { MOVE_SPEED };
        tf.translation += dir * speed * dt;
    }

    // 3) Stay above ground
    tf.translation.y = tf.translation.y.max(0.5);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looking_from_points_at_target() {
        let eye = Vec3::new(0.0, 2.0, 0.0);
        let target = Vec3::new(10.0, 2.0, 0.0);
        let fly = FlyCamera::looking_from(eye, target);
        let forward = fly.rotation() * Vec3::NEG_Z;
        assert!(forward.distance(Vec3::X) < 1e-4);
        assert!(fly.pitch.abs() < 1e-6);
    }
}
