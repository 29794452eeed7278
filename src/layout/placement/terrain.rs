// src/layout/placement/terrain.rs
//! Ground, dry patches, boundary colliders and dirt roads.

use bevy::prelude::*;
use rand::Rng;

use super::uniform;
use crate::layout::core::{Category, MapBounds, Placement, PlacementFlags, Shape};
use crate::layout::materials::MaterialTag;

pub const DRY_PATCH_COUNT: usize = 8;
/// Patches are centred inside ±this on both axes.
pub const DRY_PATCH_REGION: f32 = 80.0;
pub const DRY_PATCH_SIZE: (f32, f32) = (15.0, 30.0);

pub const BOUNDARY_HEIGHT: f32 = 20.0;
pub const BOUNDARY_THICKNESS: f32 = 2.0;

/// Lift for flat overlays so they don't z-fight the ground.
const PATCH_Y: f32 = 0.01;
const ROAD_Y: f32 = 0.02;

/// Main ground plane plus randomly placed dry-grass patches.
pub fn build_terrain<R: Rng + ?Sized>(out: &mut Vec<Placement>, bounds: &MapBounds, rng: &mut R) {
    let size = bounds.size();
    out.push(
        Placement::new(
            "ground",
            Category::Floor,
            Shape::Plane { width: size.x, depth: size.y },
            Vec3::ZERO,
            MaterialTag::Grass,
        )
        .with_flags(PlacementFlags { collidable: true, ..PlacementFlags::GROUND }),
    );

    for i in 0..DRY_PATCH_COUNT {
        let width = uniform(rng, DRY_PATCH_SIZE.0, DRY_PATCH_SIZE.1);
        let depth = uniform(rng, DRY_PATCH_SIZE.0, DRY_PATCH_SIZE.1);
        let x = uniform(rng, -DRY_PATCH_REGION, DRY_PATCH_REGION);
        let z = uniform(rng, -DRY_PATCH_REGION, DRY_PATCH_REGION);
        out.push(
            Placement::new(
                format!("dry_patch_{i}"),
                Category::Floor,
                Shape::Plane { width, depth },
                Vec3::new(x, PATCH_Y, z),
                MaterialTag::DryGrass,
            )
            .with_flags(PlacementFlags::GROUND),
        );
    }
}

/// Four invisible walls whose inner faces sit exactly on the map edge.
/// North/south walls run the full width including the corners.
pub fn build_boundary(out: &mut Vec<Placement>, bounds: &MapBounds) {
    let t = BOUNDARY_THICKNESS;
    let y = BOUNDARY_HEIGHT * 0.5;
    let span_x = bounds.half_x * 2.0 + t * 2.0;
    let span_z = bounds.half_z * 2.0;
    let nx = bounds.half_x + t * 0.5;
    let nz = bounds.half_z + t * 0.5;

    out.push(Placement::barrier("barrier_n", Shape::cuboid(span_x, BOUNDARY_HEIGHT, t), Vec3::new(0.0, y, nz)));
    out.push(Placement::barrier("barrier_s", Shape::cuboid(span_x, BOUNDARY_HEIGHT, t), Vec3::new(0.0, y, -nz)));
    out.push(Placement::barrier("barrier_e", Shape::cuboid(t, BOUNDARY_HEIGHT, span_z), Vec3::new(nx, y, 0.0)));
    out.push(Placement::barrier("barrier_w", Shape::cuboid(t, BOUNDARY_HEIGHT, span_z), Vec3::new(-nx, y, 0.0)));
}

/// Main corridor, spur to the house and the round apron in front of it.
pub fn build_roads(out: &mut Vec<Placement>) {
    let road = |name: &str, shape: Shape, x: f32| {
        Placement::new(name, Category::Floor, shape, Vec3::new(x, ROAD_Y, 0.0), MaterialTag::Dirt)
            .with_flags(PlacementFlags::GROUND)
    };
    out.push(road("main_road", Shape::Plane { width: 8.0, depth: 200.0 }, -40.0));
    out.push(road("house_road", Shape::Plane { width: 60.0, depth: 6.0 }, -10.0));
    out.push(road("apron", Shape::Disc { radius: 12.0 }, 15.0));
}
