// src/layout/surface/apply.rs
//! Drains the generator's `QueuedSurface` into Bevy entities, once per frame.

use std::collections::HashMap;
use std::f32::consts::FRAC_PI_2;

use bevy::pbr::{DirectionalLightShadowMap, NotShadowCaster, NotShadowReceiver};
use bevy::prelude::*;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::{Extent3d, Face, TextureDimension, TextureFormat};

use super::components::{Collidable, LayoutPiece, PickTarget, SkyDome, SunLight};
use super::{SurfaceCommand, SurfaceHandle};
use crate::layout::core::{Placement, Shape};
use crate::layout::lighting::{LightSpec, SkySpec};
use crate::layout::materials::{MaterialParams, MaterialTag};
use crate::layout::plugin::ActiveLayout;

/// Light units are relative; these map them onto Bevy's photometric ones.
const AMBIENT_BRIGHTNESS_PER_UNIT: f32 = 500.0;
const DIRECTIONAL_LUX_PER_UNIT: f32 = 5_000.0;
/// Share of the ground colour mixed into the ambient tint.
const AMBIENT_GROUND_MIX: f32 = 0.25;

/// Surface handle → spawned entity, plus per-tag material cache.
#[derive(Resource, Default)]
pub struct SceneIndex {
    pub entities: HashMap<SurfaceHandle, Entity>,
    /// The ambient light lives in a resource, not an entity.
    pub ambient: Option<SurfaceHandle>,
    /// Owner of the shadow map size; releasing it restores the default.
    pub sun: Option<SurfaceHandle>,
    materials: HashMap<MaterialTag, Handle<StandardMaterial>>,
}

impl SceneIndex {
    pub fn entity(&self, handle: SurfaceHandle) -> Option<Entity> {
        self.entities.get(&handle).copied()
    }
}

pub fn apply_surface_commands(
    mut commands: Commands,
    mut layout: ResMut<ActiveLayout>,
    mut index: ResMut<SceneIndex>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
    mut ambient: ResMut<AmbientLight>,
) {
    let pending = layout.0.surface_mut().drain();
    if pending.is_empty() {
        return;
    }
    let total = pending.len();

    for cmd in pending {
        match cmd {
            SurfaceCommand::Shape { handle, placement, material } => {
                let mesh = meshes.add(mesh_for(&placement.shape));
                let mat = match (placement.material, material) {
                    (Some(tag), Some(params)) => index
                        .materials
                        .entry(tag)
                        .or_insert_with(|| materials.add(standard_material(&params)))
                        .clone(),
                    (_, Some(params)) => materials.add(standard_material(&params)),
                    (_, None) => materials.add(StandardMaterial::default()),
                };
                let e = spawn_piece(&mut commands, handle, &placement, mesh, mat);
                index.entities.insert(handle, e);
            }

            SurfaceCommand::Light { handle, light } => match light {
                LightSpec::Ambient { intensity, color, ground_color, .. } => {
                    let tint: [f32; 3] =
                        std::array::from_fn(|c| color[c] + (ground_color[c] - color[c]) * AMBIENT_GROUND_MIX);
                    ambient.color = Color::srgb(tint[0], tint[1], tint[2]);
                    ambient.brightness = intensity * AMBIENT_BRIGHTNESS_PER_UNIT;
                    index.ambient = Some(handle);
                }
                LightSpec::Directional { name, direction, intensity, color, shadows } => {
                    let mut light = DirectionalLight {
                        illuminance: intensity * DIRECTIONAL_LUX_PER_UNIT,
                        color: Color::srgb(color[0], color[1], color[2]),
                        shadows_enabled: shadows.is_some(),
                        ..default()
                    };
                    if let Some(s) = shadows {
                        light.shadow_depth_bias = s.depth_bias;
                        light.shadow_normal_bias = s.normal_bias;
                        commands.insert_resource(DirectionalLightShadowMap { size: s.map_size });
                    }
                    let mut ec = commands.spawn((
                        light,
                        Transform::default().looking_to(direction, Vec3::Y),
                        Name::new(name),
                    ));
                    if shadows.is_some() {
                        ec.insert(SunLight);
                        index.sun = Some(handle);
                    }
                    index.entities.insert(handle, ec.id());
                }
            },

            SurfaceCommand::Sky { handle, sky } => {
                let e = spawn_sky(&mut commands, &mut meshes, &mut materials, &mut images, sky);
                index.entities.insert(handle, e);
            }

            SurfaceCommand::ShadowCaster { shape, .. } => {
                // one sun, so joining its pass = casting and receiving its shadows
                if let Some(e) = index.entity(shape) {
                    commands.entity(e).remove::<(NotShadowCaster, NotShadowReceiver)>();
                }
            }

            SurfaceCommand::Release(handle) => {
                if index.ambient == Some(handle) {
                    index.ambient = None;
                    *ambient = AmbientLight::default();
                } else if let Some(e) = index.entities.remove(&handle) {
                    if index.sun == Some(handle) {
                        index.sun = None;
                        commands.insert_resource(DirectionalLightShadowMap::default());
                    }
                    commands.entity(e).despawn();
                } else {
                    warn!("Layout: release of unknown surface handle {:?}", handle);
                }
            }
        }
    }

    debug!("Layout: applied {} surface commands ({} live entities)", total, index.entities.len());
}

fn spawn_piece(
    commands: &mut Commands,
    handle: SurfaceHandle,
    placement: &Placement,
    mesh: Handle<Mesh>,
    material: Handle<StandardMaterial>,
) -> Entity {
    let mut rotation = Quat::from_rotation_y(placement.yaw);
    if matches!(placement.shape, Shape::Disc { .. }) {
        // Circle is built in XY; lay it flat
        rotation *= Quat::from_rotation_x(-FRAC_PI_2);
    }
    let flags = placement.flags;

    let mut ec = commands.spawn((
        Mesh3d(mesh),
        MeshMaterial3d(material),
        Transform::from_translation(placement.position)
            .with_rotation(rotation)
            .with_scale(placement.scale),
        if flags.visible { Visibility::Inherited } else { Visibility::Hidden },
        LayoutPiece { handle, category: placement.category },
        NotShadowCaster,
        Name::new(placement.name.clone()),
    ));
    if flags.collidable {
        ec.insert(Collidable);
    }
    if flags.pickable {
        ec.insert(PickTarget);
    }
    if !flags.receives_shadows {
        ec.insert(NotShadowReceiver);
    }
    ec.id()
}

fn spawn_sky(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    images: &mut Assets<Image>,
    sky: SkySpec,
) -> Entity {
    let (w, h) = sky.texture.dimensions();
    let image = Image::new(
        Extent3d { width: w, height: h, depth_or_array_layers: 1 },
        TextureDimension::D2,
        sky.texture.into_raw(),
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    );
    let material = materials.add(StandardMaterial {
        base_color_texture: Some(images.add(image)),
        unlit: true,
        // seen from inside
        cull_mode: Some(Face::Front),
        ..default()
    });

    commands
        .spawn((
            Mesh3d(meshes.add(Sphere::new(sky.diameter * 0.5))),
            MeshMaterial3d(material),
            Transform::default(),
            SkyDome,
            NotShadowCaster,
            NotShadowReceiver,
            Name::new("sky"),
        ))
        .id()
}

fn mesh_for(shape: &Shape) -> Mesh {
    match *shape {
        Shape::Box { width, height, depth } => Cuboid::new(width, height, depth).into(),
        Shape::Cylinder { radius, height } => Cylinder::new(radius, height).into(),
        Shape::Sphere { radius } => Sphere::new(radius).into(),
        Shape::Disc { radius } => Circle::new(radius).into(),
        Shape::Plane { width, depth } => Plane3d::default().mesh().size(width, depth).build(),
    }
}

fn standard_material(params: &MaterialParams) -> StandardMaterial {
    let [r, g, b] = params.base_color;
    StandardMaterial {
        base_color: Color::srgba(r, g, b, params.alpha),
        perceptual_roughness: params.roughness,
        metallic: params.metallic,
        alpha_mode: if params.is_translucent() { AlphaMode::Blend } else { AlphaMode::Opaque },
        ..default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::generator::LayoutGenerator;
    use crate::layout::settings::LayoutSettings;
    use crate::layout::surface::QueuedSurface;

    fn app_with_layout(settings: LayoutSettings) -> App {
        let mut app = App::new();
        app.init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<Assets<Image>>()
            .init_resource::<AmbientLight>()
            .init_resource::<SceneIndex>()
            .insert_resource(ActiveLayout(LayoutGenerator::new(QueuedSurface::new(), settings)))
            .add_systems(Update, apply_surface_commands);
        app
    }

    fn count<C: Component>(app: &mut App) -> usize {
        let mut q = app.world_mut().query_filtered::<Entity, With<C>>();
        q.iter(app.world()).count()
    }

    #[test]
    fn generated_layout_becomes_entities_and_goes_away() {
        let mut settings = LayoutSettings::seeded(21);
        settings.shadow_caster_cap = 10;
        settings.sky_texture_size = 16;
        let mut app = app_with_layout(settings);

        app.world_mut().resource_mut::<ActiveLayout>().0.generate().unwrap();
        app.update();

        let placed = app.world().resource::<ActiveLayout>().0.placements().len();
        assert_eq!(count::<LayoutPiece>(&mut app), placed);
        assert_eq!(count::<SkyDome>(&mut app), 1);
        assert_eq!(count::<SunLight>(&mut app), 1);
        assert_eq!(count::<DirectionalLight>(&mut app), 2);

        let mut casters = app
            .world_mut()
            .query_filtered::<Entity, (With<LayoutPiece>, Without<NotShadowCaster>)>();
        assert_eq!(casters.iter(app.world()).count(), 10);
        assert!(app.world().resource::<AmbientLight>().brightness > 0.0);
        assert_eq!(app.world().resource::<DirectionalLightShadowMap>().size, 4096);

        // shapes are created first, so handles 0..cap are the registered prefix
        let mut markers = app
            .world_mut()
            .query::<(&LayoutPiece, Has<NotShadowCaster>, Has<NotShadowReceiver>)>();
        for (piece, no_cast, no_receive) in markers.iter(app.world()) {
            if piece.handle.0 < 10 {
                assert!(!no_cast && !no_receive, "{:?} should cast and receive", piece.handle);
            } else {
                assert!(no_cast, "{:?} is past the cap", piece.handle);
            }
        }

        app.world_mut().resource_mut::<ActiveLayout>().0.dispose();
        app.update();

        assert_eq!(count::<LayoutPiece>(&mut app), 0);
        assert_eq!(count::<SkyDome>(&mut app), 0);
        assert_eq!(count::<DirectionalLight>(&mut app), 0);
        assert!(app.world().resource::<SceneIndex>().entities.is_empty());
        assert_eq!(app.world().resource::<SceneIndex>().ambient, None);
        assert_eq!(
            app.world().resource::<DirectionalLightShadowMap>().size,
            DirectionalLightShadowMap::default().size
        );
    }

    #[test]
    fn barriers_are_hidden_but_collidable() {
        let mut app = app_with_layout(LayoutSettings::seeded(2));
        app.world_mut().resource_mut::<ActiveLayout>().0.generate().unwrap();
        app.update();

        let mut q = app
            .world_mut()
            .query_filtered::<(&Visibility, &Name), (With<Collidable>, Without<PickTarget>)>();
        let barriers: Vec<_> = q.iter(app.world()).collect();
        assert!(!barriers.is_empty());
        assert!(barriers.iter().all(|(v, _)| **v == Visibility::Hidden));
    }
}
