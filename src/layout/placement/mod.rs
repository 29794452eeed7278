// src/layout/placement/mod.rs
//! Placement routines, one per part of the map. Each appends to a shared output.

use rand::Rng;

pub mod props;
pub mod structures;
pub mod terrain;
pub mod vegetation;
pub mod walls;

pub use structures::{build_main_house, build_pool, build_secondary_structures};
pub use terrain::{build_boundary, build_roads, build_terrain};
pub use vegetation::build_trees;
pub use props::build_props;

/// Uniform sample in `[min, max)`.
#[inline]
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    rng.random_range(min..max)
}

/// Uniform offset in `[-amount, amount)`.
#[inline]
pub fn jitter<R: Rng + ?Sized>(rng: &mut R, amount: f32) -> f32 {
    uniform(rng, -amount, amount)
}
