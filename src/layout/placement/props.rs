// src/layout/placement/props.rs
//! Clutter: barrels by the barn, crates by the houses, the old tractor and the fence ring.

use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::{PI, TAU};

use super::{jitter, uniform};
use crate::layout::core::{Category, Placement, PlacementFlags, Shape};
use crate::layout::materials::MaterialTag;

pub const BARREL_COUNT: usize = 5;
const BARREL_ANCHOR: Vec2 = Vec2::new(-55.0, -35.0);
const BARREL_SPREAD: Vec2 = Vec2::new(5.0, 3.0);

pub const CRATE_POSITIONS: [(f32, f32); 5] = [(30.0, 0.0), (-50.0, 20.0), (40.0, 30.0), (-10.0, -40.0), (50.0, -5.0)];
const CRATE_SIZE: (f32, f32) = (0.8, 1.2);

const TRACTOR_POSITION: Vec3 = Vec3::new(-50.0, 0.75, -25.0);
const TRACTOR_YAW: f32 = 0.3;

pub const FENCE_POST_COUNT: usize = 20;
pub const FENCE_RADIUS: f32 = 90.0;

pub fn build_props<R: Rng + ?Sized>(out: &mut Vec<Placement>, rng: &mut R) {
    for i in 0..BARREL_COUNT {
        let x = BARREL_ANCHOR.x + jitter(rng, BARREL_SPREAD.x);
        let z = BARREL_ANCHOR.y + jitter(rng, BARREL_SPREAD.y);
        out.push(Placement::new(
            format!("barrel_{i}"),
            Category::Prop,
            Shape::Cylinder { radius: 0.3, height: 1.0 },
            Vec3::new(x, 0.5, z),
            MaterialTag::Wood,
        ));
    }

    for (i, &(x, z)) in CRATE_POSITIONS.iter().enumerate() {
        let w = uniform(rng, CRATE_SIZE.0, CRATE_SIZE.1);
        let h = uniform(rng, CRATE_SIZE.0, CRATE_SIZE.1);
        let d = uniform(rng, CRATE_SIZE.0, CRATE_SIZE.1);
        let yaw = uniform(rng, 0.0, PI);
        out.push(
            Placement::new(format!("crate_{i}"), Category::Prop, Shape::cuboid(w, h, d), Vec3::new(x, 0.5, z), MaterialTag::Wood)
                .with_yaw(yaw),
        );
    }

    out.push(
        Placement::new("tractor", Category::Prop, Shape::cuboid(2.0, 1.5, 4.0), TRACTOR_POSITION, MaterialTag::DarkRoof)
            .with_yaw(TRACTOR_YAW),
    );

    // visual only
    for i in 0..FENCE_POST_COUNT {
        let angle = i as f32 / FENCE_POST_COUNT as f32 * TAU;
        out.push(
            Placement::new(
                format!("fence_post_{i}"),
                Category::Prop,
                Shape::Cylinder { radius: 0.075, height: 1.2 },
                Vec3::new(angle.cos() * FENCE_RADIUS, 0.6, angle.sin() * FENCE_RADIUS),
                MaterialTag::Wood,
            )
            .with_flags(PlacementFlags::DECOR),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn fence_posts_ring_the_farm_and_do_not_collide() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut out = Vec::new();
        build_props(&mut out, &mut rng);

        let posts: Vec<_> = out.iter().filter(|p| p.name.starts_with("fence_post_")).collect();
        assert_eq!(posts.len(), FENCE_POST_COUNT);
        for p in posts {
            let r = Vec2::new(p.position.x, p.position.z).length();
            assert!((r - FENCE_RADIUS).abs() < 1e-3);
            assert!(!p.flags.collidable);
        }
    }

    #[test]
    fn crates_keep_their_spots_with_random_size() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut out = Vec::new();
        build_props(&mut out, &mut rng);

        for (i, &(x, z)) in CRATE_POSITIONS.iter().enumerate() {
            let c = out.iter().find(|p| p.name == format!("crate_{i}")).unwrap();
            assert_eq!((c.position.x, c.position.z), (x, z));
            assert!((0.0..PI).contains(&c.yaw));
            let Shape::Box { width, height, depth } = c.shape else { panic!("crate shape") };
            for s in [width, height, depth] {
                assert!((0.8..1.2).contains(&s));
            }
        }
        assert_eq!(out.len(), BARREL_COUNT + CRATE_POSITIONS.len() + 1 + FENCE_POST_COUNT);
    }
}
