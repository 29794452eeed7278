//! Farmstead map layout: plan the map, push it through a render surface,
//! answer spawn queries.

pub mod core;
pub mod error;
pub mod generator;
pub mod lighting;
pub mod materials;
pub mod placement;
pub mod plan;
pub mod plugin;
pub mod settings;
pub mod spawns;
pub mod surface;

pub use self::core::{Category, MapBounds, Placement, PlacementFlags, Shape, StructureInfo, StructureKind};
pub use error::LayoutError;
pub use generator::{LayoutGenerator, LayoutState};
pub use plan::{plan_layout, LayoutPlan};
pub use plugin::{ActiveLayout, LayoutCommand, LayoutPlugin, PlayerFaction, PlayerSpawned, SessionSettings};
pub use settings::LayoutSettings;
pub use spawns::{Faction, SpawnSet};
pub use surface::{QueuedSurface, RenderSurface, SurfaceCommand, SurfaceError, SurfaceHandle};
