// src/layout/core.rs
//! Core types for the farmstead layout.
//! Keep this file dependency-light; everything in `placement/` builds on it.

use bevy::prelude::*; // Vec2, Vec3
use serde::{Deserialize, Serialize};

use super::materials::MaterialTag;

// ---------- Map bounds ----------

/// Horizontal half-extents of the playable square (XZ), centred on the origin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    pub half_x: f32,
    pub half_z: f32,
}

impl Default for MapBounds {
    fn default() -> Self {
        Self { half_x: 120.0, half_z: 120.0 }
    }
}

impl MapBounds {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.half_x * 2.0, self.half_z * 2.0)
    }

    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.half_x, self.half_z)
    }

    pub fn contains_xz(&self, p: Vec3) -> bool {
        p.x >= -self.half_x && p.x <= self.half_x && p.z >= -self.half_z && p.z <= self.half_z
    }

    /// Whole XZ footprint of `p` (yaw and scale included) inside the square.
    pub fn contains_footprint(&self, p: &Placement) -> bool {
        let h = p.footprint_half_xz();
        let h = Vec3::new(h.x, 0.0, h.y);
        self.contains_xz(p.position - h) && self.contains_xz(p.position + h)
    }
}

// ---------- Shapes & categories ----------

/// What a placement is, for collision/grouping purposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Floor,
    Wall,
    Roof,
    Prop,
    Collider,
}

/// Primitive shape dimensions (metres). Centred on the placement position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// Axis-aligned box before yaw: `width` along X, `height` along Y, `depth` along Z.
    Box { width: f32, height: f32, depth: f32 },
    Cylinder { radius: f32, height: f32 },
    Sphere { radius: f32 },
    /// Flat disc lying in the XZ plane.
    Disc { radius: f32 },
    /// Flat ground rectangle lying in the XZ plane.
    Plane { width: f32, depth: f32 },
}

impl Shape {
    pub const fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Shape::Box { width, height, depth }
    }

    /// Half-extents of the un-rotated, un-scaled shape.
    pub fn half_extents(&self) -> Vec3 {
        match *self {
            Shape::Box { width, height, depth } => Vec3::new(width, height, depth) * 0.5,
            Shape::Cylinder { radius, height } => Vec3::new(radius, height * 0.5, radius),
            Shape::Sphere { radius } => Vec3::splat(radius),
            Shape::Disc { radius } => Vec3::new(radius, 0.0, radius),
            Shape::Plane { width, depth } => Vec3::new(width * 0.5, 0.0, depth * 0.5),
        }
    }
}

/// Surface-facing flags of a placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacementFlags {
    /// Blocks moving actors.
    pub collidable: bool,
    /// Hit by ray picks (shooting, interaction).
    pub pickable: bool,
    pub visible: bool,
    pub receives_shadows: bool,
}

impl PlacementFlags {
    /// Solid visible geometry (walls, floors, trunks...).
    pub const SOLID: Self = Self { collidable: true, pickable: true, visible: true, receives_shadows: false };
    /// Visible but walk-through (canopy lobes, fence posts, ridges...).
    pub const DECOR: Self = Self { collidable: false, pickable: true, visible: true, receives_shadows: false };
    /// Flat surfaces drawn on the ground.
    pub const GROUND: Self = Self { collidable: false, pickable: true, visible: true, receives_shadows: true };
    /// Invisible movement blocker.
    pub const BARRIER: Self = Self { collidable: true, pickable: false, visible: false, receives_shadows: false };
}

// ---------- Placement ----------

/// One shape + material + transform in the generated scene.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    pub name: String,
    pub category: Category,
    pub shape: Shape,
    pub position: Vec3,
    /// Rotation around +Y (radians).
    pub yaw: f32,
    pub scale: Vec3,
    /// `None` for invisible colliders.
    pub material: Option<MaterialTag>,
    pub flags: PlacementFlags,
}

impl Placement {
    pub fn new(
        name: impl Into<String>,
        category: Category,
        shape: Shape,
        position: Vec3,
        material: MaterialTag,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            shape,
            position,
            yaw: 0.0,
            scale: Vec3::ONE,
            material: Some(material),
            flags: PlacementFlags::SOLID,
        }
    }

    /// Invisible, non-pickable collider without a material.
    pub fn barrier(name: impl Into<String>, shape: Shape, position: Vec3) -> Self {
        Self {
            name: name.into(),
            category: Category::Collider,
            shape,
            position,
            yaw: 0.0,
            scale: Vec3::ONE,
            material: None,
            flags: PlacementFlags::BARRIER,
        }
    }

    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.yaw = yaw;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_flags(mut self, flags: PlacementFlags) -> Self {
        self.flags = flags;
        self
    }

    /// World-space XZ footprint half-extents, accounting for yaw and scale.
    pub fn footprint_half_xz(&self) -> Vec2 {
        let h = self.shape.half_extents() * self.scale;
        let (s, c) = self.yaw.sin_cos();
        Vec2::new(
            (h.x * c).abs() + (h.z * s).abs(),
            (h.x * s).abs() + (h.z * c).abs(),
        )
    }
}

// ---------- Structures ----------

/// Kind of building block the layout is made of.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StructureKind {
    /// One rectangular room-with-roof of the main L-shaped house.
    Wing,
    Patio,
    Pool,
    SmallHouse,
    /// Open-fronted; the only fully enterable structure without door cuts.
    Barn,
}

/// Summary of a placed structure (for callers and diagnostics).
#[derive(Clone, Debug, PartialEq)]
pub struct StructureInfo {
    pub kind: StructureKind,
    pub name: String,
    /// Centre on the ground (XZ).
    pub center: Vec2,
    /// Floor footprint (width along X, depth along Z).
    pub footprint: Vec2,
}
