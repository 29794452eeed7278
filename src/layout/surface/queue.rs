// src/layout/surface/queue.rs
use std::collections::HashSet;

use super::{RenderSurface, SurfaceError, SurfaceHandle};
use crate::layout::core::Placement;
use crate::layout::lighting::{LightSpec, SkySpec};
use crate::layout::materials::MaterialParams;

/// One recorded surface call (what to create or free, and with which id).
#[derive(Clone, Debug)]
pub enum SurfaceCommand {
    Shape {
        handle: SurfaceHandle,
        placement: Placement,
        material: Option<MaterialParams>,
    },
    Light {
        handle: SurfaceHandle,
        light: LightSpec,
    },
    Sky {
        handle: SurfaceHandle,
        sky: SkySpec,
    },
    ShadowCaster {
        light: SurfaceHandle,
        shape: SurfaceHandle,
    },
    Release(SurfaceHandle),
}

/// Surface that records commands for later application (filled by the generator,
/// drained once per frame by the Bevy apply system).
#[derive(Debug, Default)]
pub struct QueuedSurface {
    pending: Vec<SurfaceCommand>,
    live: HashSet<SurfaceHandle>,
    next_id: u64,
    /// Max live resources; `None` = unbounded.
    budget: Option<usize>,
}

impl QueuedSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_budget(budget: usize) -> Self {
        Self { budget: Some(budget), ..Self::default() }
    }

    pub fn pending(&self) -> &[SurfaceCommand] {
        &self.pending
    }

    /// Take every command recorded since the last drain.
    pub fn drain(&mut self) -> Vec<SurfaceCommand> {
        std::mem::take(&mut self.pending)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn is_live(&self, handle: SurfaceHandle) -> bool {
        self.live.contains(&handle)
    }

    fn allocate(&mut self) -> Result<SurfaceHandle, SurfaceError> {
        if let Some(budget) = self.budget {
            if self.live.len() >= budget {
                return Err(SurfaceError::Exhausted { budget });
            }
        }
        let handle = SurfaceHandle(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.live.insert(handle);
        Ok(handle)
    }
}

impl RenderSurface for QueuedSurface {
    fn create_shape(
        &mut self,
        placement: &Placement,
        material: Option<&MaterialParams>,
    ) -> Result<SurfaceHandle, SurfaceError> {
        let handle = self.allocate()?;
        self.pending.push(SurfaceCommand::Shape {
            handle,
            placement: placement.clone(),
            material: material.copied(),
        });
        Ok(handle)
    }

    fn create_light(&mut self, light: &LightSpec) -> Result<SurfaceHandle, SurfaceError> {
        let handle = self.allocate()?;
        self.pending.push(SurfaceCommand::Light { handle, light: light.clone() });
        Ok(handle)
    }

    fn create_sky(&mut self, sky: &SkySpec) -> Result<SurfaceHandle, SurfaceError> {
        let handle = self.allocate()?;
        self.pending.push(SurfaceCommand::Sky { handle, sky: sky.clone() });
        Ok(handle)
    }

    fn add_shadow_caster(&mut self, light: SurfaceHandle, shape: SurfaceHandle) -> Result<(), SurfaceError> {
        for h in [light, shape] {
            if !self.live.contains(&h) {
                return Err(SurfaceError::UnknownHandle(h));
            }
        }
        self.pending.push(SurfaceCommand::ShadowCaster { light, shape });
        Ok(())
    }

    fn release(&mut self, handle: SurfaceHandle) {
        if self.live.remove(&handle) {
            self.pending.push(SurfaceCommand::Release(handle));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::core::{Category, Shape};
    use crate::layout::materials::MaterialTag;
    use bevy::prelude::Vec3;

    fn crate_box() -> Placement {
        Placement::new("crate", Category::Prop, Shape::cuboid(1.0, 1.0, 1.0), Vec3::ZERO, MaterialTag::Wood)
    }

    #[test]
    fn budget_caps_live_resources() {
        let mut surface = QueuedSurface::with_budget(2);
        let a = surface.create_shape(&crate_box(), None).unwrap();
        surface.create_shape(&crate_box(), None).unwrap();
        assert_eq!(
            surface.create_shape(&crate_box(), None),
            Err(SurfaceError::Exhausted { budget: 2 })
        );

        // freeing makes room again
        surface.release(a);
        assert!(surface.create_shape(&crate_box(), None).is_ok());
        assert_eq!(surface.live_count(), 2);
    }

    #[test]
    fn release_is_recorded_once() {
        let mut surface = QueuedSurface::new();
        let h = surface.create_shape(&crate_box(), None).unwrap();
        surface.release(h);
        surface.release(h);

        let cmds = surface.drain();
        assert_eq!(cmds.len(), 2);
        assert!(matches!(cmds[1], SurfaceCommand::Release(r) if r == h));
        assert!(surface.pending().is_empty());
    }

    #[test]
    fn shadow_caster_needs_live_handles() {
        let mut surface = QueuedSurface::new();
        let shape = surface.create_shape(&crate_box(), None).unwrap();
        let ghost = SurfaceHandle(99);
        assert_eq!(surface.add_shadow_caster(ghost, shape), Err(SurfaceError::UnknownHandle(ghost)));
    }
}
