use bevy::prelude::*;

use super::SurfaceHandle;
use crate::layout::core::Category;

/// Tag on every entity created from a layout placement.
#[derive(Component, Debug, Clone, Copy)]
pub struct LayoutPiece {
    pub handle: SurfaceHandle,
    pub category: Category,
}

/// Blocks moving actors.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Collidable;

/// Hit by ray picks.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PickTarget;

/// Marks the light that owns the shadow pass.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct SunLight;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct SkyDome;
