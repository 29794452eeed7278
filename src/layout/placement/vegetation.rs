// src/layout/placement/vegetation.rs
//! Trees: a cylinder trunk under a flattened sphere canopy, sometimes with a second lobe.

use bevy::prelude::*;
use rand::Rng;

use super::{jitter, uniform};
use crate::layout::core::{Category, Placement, PlacementFlags, Shape};
use crate::layout::materials::MaterialTag;

/// Base tree coordinates (x, z); each is jittered before use.
pub const TREE_POSITIONS: [(f32, f32); 43] = [
    // around the main house
    (-15.0, 10.0), (-18.0, 5.0), (-20.0, -5.0),
    (25.0, 10.0), (30.0, 5.0), (28.0, -10.0),
    (10.0, 15.0), (5.0, 18.0),
    // around the pool
    (15.0, -25.0), (-5.0, -25.0), (0.0, -30.0),
    // along the road
    (-45.0, -30.0), (-45.0, -10.0), (-45.0, 10.0),
    (-45.0, 30.0), (-45.0, 50.0),
    // around the smaller houses
    (10.0, 50.0), (-10.0, 50.0), (40.0, 40.0),
    (-60.0, 30.0), (-50.0, 20.0),
    (-20.0, -50.0), (-10.0, -50.0),
    (50.0, 5.0), (50.0, -5.0),
    // property edges
    (-80.0, -60.0), (-70.0, -70.0), (-60.0, -65.0),
    (60.0, -60.0), (70.0, -50.0), (75.0, -40.0),
    (80.0, 20.0), (75.0, 35.0), (70.0, 50.0),
    (-75.0, 60.0), (-65.0, 65.0), (-55.0, 70.0),
    // scatter
    (55.0, 25.0), (-30.0, 55.0), (20.0, 65.0),
    (-70.0, 0.0), (65.0, -20.0), (-25.0, -65.0),
];

pub const TREE_JITTER: f32 = 3.0;
pub const TRUNK_HEIGHT: (f32, f32) = (3.0, 5.0);
pub const TRUNK_RADIUS: (f32, f32) = (0.3, 0.5);
pub const CANOPY_RADIUS: (f32, f32) = (3.0, 5.0);
pub const CANOPY_SQUASH: f32 = 0.7;
pub const SECOND_LOBE_CHANCE: f64 = 0.5;
const SECOND_LOBE_SCALE: f32 = 0.75;
const SECOND_LOBE_OFFSET: f32 = 1.0;

pub fn build_trees<R: Rng + ?Sized>(out: &mut Vec<Placement>, rng: &mut R) {
    for (i, &(bx, bz)) in TREE_POSITIONS.iter().enumerate() {
        let x = bx + jitter(rng, TREE_JITTER);
        let z = bz + jitter(rng, TREE_JITTER);
        build_tree(out, i, x, z, rng);
    }
}

/// Trunk height and canopy radius are rolled independently.
fn build_tree<R: Rng + ?Sized>(out: &mut Vec<Placement>, id: usize, x: f32, z: f32, rng: &mut R) {
    let trunk_h = uniform(rng, TRUNK_HEIGHT.0, TRUNK_HEIGHT.1);
    let trunk_r = uniform(rng, TRUNK_RADIUS.0, TRUNK_RADIUS.1);
    let canopy_r = uniform(rng, CANOPY_RADIUS.0, CANOPY_RADIUS.1);

    out.push(Placement::new(
        format!("trunk_{id}"),
        Category::Prop,
        Shape::Cylinder { radius: trunk_r, height: trunk_h },
        Vec3::new(x, trunk_h * 0.5, z),
        MaterialTag::Trunk,
    ));
    out.push(
        Placement::new(
            format!("canopy_{id}"),
            Category::Prop,
            Shape::Sphere { radius: canopy_r },
            Vec3::new(x, trunk_h + canopy_r * 0.6, z),
            MaterialTag::Foliage,
        )
        .with_scale(Vec3::new(1.0, CANOPY_SQUASH, 1.0)),
    );

    if rng.random_bool(SECOND_LOBE_CHANCE) {
        let ox = jitter(rng, SECOND_LOBE_OFFSET);
        let oz = jitter(rng, SECOND_LOBE_OFFSET);
        out.push(
            Placement::new(
                format!("canopy2_{id}"),
                Category::Prop,
                Shape::Sphere { radius: canopy_r * SECOND_LOBE_SCALE },
                Vec3::new(x + ox, trunk_h + canopy_r * 0.3, z + oz),
                MaterialTag::Foliage,
            )
            .with_flags(PlacementFlags::DECOR),
        );
    }
}
