use bevy::prelude::*;
use crate::input::FlyCamera;

#[derive(Component)]
pub struct MainCamera;

pub fn setup(mut commands: Commands) {
    // Lights and sky come from the layout; just the camera here.
    // Parked behind the police line until the first spawn arrives.
    let start = Vec3::new(-70.0, 12.0, 0.0);
    let target = Vec3::new(0.0, 2.0, 0.0);
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(start).looking_at(target, Vec3::Y),
        MainCamera,
        FlyCamera::looking_from(start, target),
    ));
}
