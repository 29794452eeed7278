// src/layout/plan.rs
//! One ordered pass over every placement routine, before anything touches the surface.

use bevy::log::debug;
use bevy::prelude::Vec2;
use rand::Rng;

use super::core::{Category, MapBounds, Placement, StructureInfo};
use super::error::LayoutError;
use super::lighting::{paint_sky_texture, plan_lights, LightSpec, SkySpec, SKY_DIAMETER};
use super::placement::{
    build_boundary, build_main_house, build_pool, build_props, build_roads,
    build_secondary_structures, build_terrain, build_trees,
};
use super::settings::LayoutSettings;
use super::spawns::{plan_spawns, SpawnSet};

/// Everything one `generate()` will put in the scene.
#[derive(Clone, Debug)]
pub struct LayoutPlan {
    /// In creation order; the first `shadow_caster_cap` cast sun shadows.
    pub placements: Vec<Placement>,
    pub structures: Vec<StructureInfo>,
    pub spawns: SpawnSet,
    pub lights: Vec<LightSpec>,
    pub sky: SkySpec,
}

/// Run the routines in their fixed order. Routines don't read each other's output;
/// the order only decides creation order (and thus which placements cast shadows).
pub fn plan_layout<R: Rng + ?Sized>(settings: &LayoutSettings, rng: &mut R) -> Result<LayoutPlan, LayoutError> {
    let mut placements = Vec::with_capacity(512);
    let mut structures = Vec::new();

    build_terrain(&mut placements, &settings.bounds, rng);
    build_boundary(&mut placements, &settings.bounds);
    build_roads(&mut placements);
    let ground_done = placements.len();

    build_main_house(&mut placements, &mut structures)?;
    build_pool(&mut placements, &mut structures);
    build_secondary_structures(&mut placements, &mut structures)?;
    let structures_done = placements.len();

    build_trees(&mut placements, rng);
    build_props(&mut placements, rng);
    check_bounds(&settings.bounds, &placements)?;

    debug!(
        "layout plan: ground={} structures={} scatter={}",
        ground_done,
        structures_done - ground_done,
        placements.len() - structures_done
    );

    let spawns = plan_spawns(rng);
    let lights = plan_lights();
    let sky = SkySpec {
        diameter: SKY_DIAMETER,
        texture: paint_sky_texture(settings.sky_texture_size, rng),
    };

    Ok(LayoutPlan { placements, structures, spawns, lights, sky })
}

/// The building and scatter tables are fixed, so the square has to be large enough
/// to hold them. Boundary colliders sit outside it and are skipped.
fn check_bounds(bounds: &MapBounds, placements: &[Placement]) -> Result<(), LayoutError> {
    let inside = placements.iter().filter(|p| p.category != Category::Collider);
    if inside.clone().all(|p| bounds.contains_footprint(p)) {
        return Ok(());
    }
    let required = inside.fold(Vec2::ZERO, |acc, p| {
        let h = p.footprint_half_xz();
        acc.max(Vec2::new(p.position.x.abs() + h.x, p.position.z.abs() + h.y))
    });
    Err(LayoutError::BoundsTooSmall { required, got: bounds.half_extents() })
}
