// src/layout/surface/mod.rs
//! The rendering surface the generator draws into.
//! The generator only sees this trait; `QueuedSurface` records calls and
//! `apply::apply_surface_commands` turns them into Bevy entities.

use thiserror::Error;

use super::core::Placement;
use super::lighting::{LightSpec, SkySpec};
use super::materials::MaterialParams;

pub mod apply;
pub mod components;
pub mod queue;

pub use queue::{QueuedSurface, SurfaceCommand};

/// Opaque id of anything the surface created (shape, light, sky).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceHandle(pub u64);

pub trait RenderSurface: Send + Sync + 'static {
    /// Instantiate a primitive with its material and transform.
    fn create_shape(
        &mut self,
        placement: &Placement,
        material: Option<&MaterialParams>,
    ) -> Result<SurfaceHandle, SurfaceError>;

    fn create_light(&mut self, light: &LightSpec) -> Result<SurfaceHandle, SurfaceError>;

    /// Upload the sky texture and wrap it on an inward-facing sphere.
    fn create_sky(&mut self, sky: &SkySpec) -> Result<SurfaceHandle, SurfaceError>;

    /// Add `shape` to `light`'s shadow pass.
    fn add_shadow_caster(&mut self, light: SurfaceHandle, shape: SurfaceHandle) -> Result<(), SurfaceError>;

    /// Free anything created under `handle`. Unknown handles are ignored.
    fn release(&mut self, handle: SurfaceHandle);
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("surface budget of {budget} live resources exhausted")]
    Exhausted { budget: usize },
    #[error("unknown surface handle {0:?}")]
    UnknownHandle(SurfaceHandle),
}
