//! Error type for layout generation and spawn queries.

use bevy::prelude::Vec2;
use thiserror::Error;

use super::spawns::Faction;
use super::surface::SurfaceError;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("layout is already generated; dispose it before generating again")]
    AlreadyGenerated,

    #[error("layout has not been generated")]
    NotGenerated,

    #[error("{leftover} surface resources from a failed generation must be disposed first")]
    PendingDispose { leftover: usize },

    #[error("no spawn points for faction '{0}'")]
    EmptySpawnSet(Faction),

    #[error("opening of {opening} m does not fit a wall of {length} m")]
    DegenerateOpening { length: f32, opening: f32 },

    #[error("map half-extents {got} are too small; the layout needs at least {required}")]
    BoundsTooSmall { required: Vec2, got: Vec2 },

    #[error("rendering surface: {0}")]
    Surface(#[from] SurfaceError),
}
