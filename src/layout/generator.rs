// src/layout/generator.rs
//! Owns one generated layout: what was placed, which surface handles back it,
//! and the spawn sets. Lifecycle is Ungenerated -> generate() -> Generated -> dispose().

use bevy::log::{debug, info, warn};
use bevy::prelude::Vec3;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::core::{Placement, StructureInfo};
use super::error::LayoutError;
use super::materials::MaterialTable;
use super::plan::{plan_layout, LayoutPlan};
use super::settings::LayoutSettings;
use super::spawns::{Faction, SpawnSet};
use super::surface::{QueuedSurface, RenderSurface, SurfaceHandle};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LayoutState {
    #[default]
    Ungenerated,
    Generated,
}

pub struct LayoutGenerator<S: RenderSurface = QueuedSurface> {
    surface: S,
    settings: LayoutSettings,
    materials: MaterialTable,
    rng: Box<dyn RngCore + Send + Sync>,
    state: LayoutState,

    placements: Vec<Placement>,
    structures: Vec<StructureInfo>,
    spawns: SpawnSet,
    /// Every live handle this generator created, in creation order.
    owned: Vec<SurfaceHandle>,
    shadow_casters: usize,
}

impl LayoutGenerator<QueuedSurface> {
    /// Queued surface sized by `settings.surface_budget`.
    pub fn queued(settings: LayoutSettings) -> Self {
        let surface = match settings.surface_budget {
            Some(budget) => QueuedSurface::with_budget(budget),
            None => QueuedSurface::new(),
        };
        Self::new(surface, settings)
    }
}

impl<S: RenderSurface> LayoutGenerator<S> {
    /// Seeds from `settings.seed`, or from the OS when unset.
    pub fn new(surface: S, settings: LayoutSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        Self::with_rng(surface, settings, rng)
    }

    /// Use a caller-supplied random source instead of the settings seed.
    pub fn with_rng(surface: S, settings: LayoutSettings, rng: impl RngCore + Send + Sync + 'static) -> Self {
        Self {
            surface,
            settings,
            materials: MaterialTable::default(),
            rng: Box::new(rng),
            state: LayoutState::Ungenerated,
            placements: Vec::new(),
            structures: Vec::new(),
            spawns: SpawnSet::default(),
            owned: Vec::new(),
            shadow_casters: 0,
        }
    }

    /// Plan the whole map and push it through the surface.
    ///
    /// On a surface failure the layout stays `Ungenerated`, but whatever was already
    /// created is kept so `dispose()` can free it; until then this returns `PendingDispose`.
    pub fn generate(&mut self) -> Result<(), LayoutError> {
        if self.state == LayoutState::Generated {
            return Err(LayoutError::AlreadyGenerated);
        }
        if !self.owned.is_empty() {
            return Err(LayoutError::PendingDispose { leftover: self.owned.len() });
        }

        let plan = plan_layout(&self.settings, &mut *self.rng)?;
        if let Err(e) = self.realize(&plan) {
            warn!(
                "layout: generation failed after {} surface resources: {e}",
                self.owned.len()
            );
            return Err(e);
        }

        let LayoutPlan { placements, structures, spawns, .. } = plan;
        info!(
            "layout: generated {} placements, {} structures, {} shadow casters, spawns police={} criminal={}",
            placements.len(),
            structures.len(),
            self.shadow_casters,
            spawns.get(Faction::Police).len(),
            spawns.get(Faction::Criminal).len(),
        );
        self.placements = placements;
        self.structures = structures;
        self.spawns = spawns;
        self.state = LayoutState::Generated;
        Ok(())
    }

    fn realize(&mut self, plan: &LayoutPlan) -> Result<(), LayoutError> {
        let mut shapes = Vec::with_capacity(plan.placements.len());
        for placement in &plan.placements {
            let material = placement.material.map(|tag| self.materials.get(tag));
            let handle = self.surface.create_shape(placement, material)?;
            self.owned.push(handle);
            shapes.push(handle);
        }

        let mut sun = None;
        for light in &plan.lights {
            let handle = self.surface.create_light(light)?;
            self.owned.push(handle);
            if sun.is_none() && light.casts_shadows() {
                sun = Some(handle);
            }
        }

        if let Some(sun) = sun {
            for &shape in shapes.iter().take(self.settings.shadow_caster_cap) {
                self.surface.add_shadow_caster(sun, shape)?;
                self.shadow_casters += 1;
            }
        }

        let sky = self.surface.create_sky(&plan.sky)?;
        self.owned.push(sky);
        Ok(())
    }

    /// Release every surface resource and forget the layout. Safe to call in any state.
    pub fn dispose(&mut self) {
        let released = self.owned.len();
        for handle in self.owned.drain(..) {
            self.surface.release(handle);
        }
        self.placements.clear();
        self.structures.clear();
        self.spawns.clear();
        self.shadow_casters = 0;

        if self.state == LayoutState::Generated {
            info!("layout: disposed ({released} surface resources released)");
        } else if released > 0 {
            debug!("layout: released {released} leftovers from a failed generation");
        }
        self.state = LayoutState::Ungenerated;
    }

    /// Uniform pick from `faction`'s own spawn set.
    pub fn player_spawn(&mut self, faction: Faction) -> Result<Vec3, LayoutError> {
        self.ensure_generated()?;
        self.spawns
            .pick(faction, &mut *self.rng)
            .ok_or(LayoutError::EmptySpawnSet(faction))
    }

    /// The opposing faction's full spawn set (a copy).
    pub fn enemy_spawns(&self, faction: Faction) -> Result<Vec<Vec3>, LayoutError> {
        self.ensure_generated()?;
        Ok(self.spawns.get(faction.opponent()).to_vec())
    }

    fn ensure_generated(&self) -> Result<(), LayoutError> {
        match self.state {
            LayoutState::Generated => Ok(()),
            LayoutState::Ungenerated => Err(LayoutError::NotGenerated),
        }
    }

    pub fn state(&self) -> LayoutState {
        self.state
    }

    pub fn is_generated(&self) -> bool {
        self.state == LayoutState::Generated
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn structures(&self) -> &[StructureInfo] {
        &self.structures
    }

    pub fn spawns(&self) -> &SpawnSet {
        &self.spawns
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    pub fn materials(&self) -> &MaterialTable {
        &self.materials
    }

    /// Handles still owned (live layout, or leftovers of a failed generate).
    pub fn owned_handles(&self) -> &[SurfaceHandle] {
        &self.owned
    }

    pub fn shadow_caster_count(&self) -> usize {
        self.shadow_casters
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::surface::SurfaceCommand;

    fn seeded(seed: u64) -> LayoutGenerator {
        LayoutGenerator::new(QueuedSurface::new(), LayoutSettings::seeded(seed))
    }

    #[test]
    fn generate_then_dispose_releases_everything() {
        let mut gen = seeded(3);
        gen.generate().unwrap();
        assert!(gen.is_generated());
        let owned = gen.owned_handles().len();
        assert_eq!(owned, gen.placements().len() + 3 + 1);
        assert_eq!(gen.surface().live_count(), owned);

        gen.dispose();
        assert_eq!(gen.state(), LayoutState::Ungenerated);
        assert_eq!(gen.surface().live_count(), 0);
        assert!(gen.placements().is_empty());
        let releases = gen
            .surface_mut()
            .drain()
            .into_iter()
            .filter(|c| matches!(c, SurfaceCommand::Release(_)))
            .count();
        assert_eq!(releases, owned);
    }

    #[test]
    fn queries_need_a_generated_layout() {
        let mut gen = seeded(4);
        assert!(matches!(gen.player_spawn(Faction::Police), Err(LayoutError::NotGenerated)));
        assert!(matches!(gen.enemy_spawns(Faction::Police), Err(LayoutError::NotGenerated)));

        gen.generate().unwrap();
        let enemies = gen.enemy_spawns(Faction::Police).unwrap();
        assert_eq!(enemies, gen.spawns().get(Faction::Criminal));
        let me = gen.player_spawn(Faction::Criminal).unwrap();
        assert!(gen.spawns().get(Faction::Criminal).contains(&me));
    }

    #[test]
    fn second_generate_is_rejected() {
        let mut gen = seeded(5);
        gen.generate().unwrap();
        let live = gen.surface().live_count();
        assert!(matches!(gen.generate(), Err(LayoutError::AlreadyGenerated)));
        assert_eq!(gen.surface().live_count(), live);
    }

    #[test]
    fn failed_generation_must_be_disposed() {
        let settings = LayoutSettings::seeded(6);
        let mut gen = LayoutGenerator::new(QueuedSurface::with_budget(40), settings);

        assert!(matches!(gen.generate(), Err(LayoutError::Surface(_))));
        assert_eq!(gen.state(), LayoutState::Ungenerated);
        assert_eq!(gen.owned_handles().len(), 40);
        assert!(matches!(gen.generate(), Err(LayoutError::PendingDispose { leftover: 40 })));

        gen.dispose();
        assert_eq!(gen.surface().live_count(), 0);
        assert!(gen.owned_handles().is_empty());
    }

    #[test]
    fn queued_respects_the_settings_budget() {
        let mut settings = LayoutSettings::seeded(7);
        settings.surface_budget = Some(10);
        let mut gen = LayoutGenerator::queued(settings);
        assert!(gen.generate().is_err());
        assert_eq!(gen.surface().live_count(), 10);
    }

    #[test]
    fn shadow_casters_are_capped() {
        let mut settings = LayoutSettings::seeded(8);
        settings.shadow_caster_cap = 7;
        let mut gen = LayoutGenerator::new(QueuedSurface::new(), settings);
        gen.generate().unwrap();
        assert_eq!(gen.shadow_caster_count(), 7);
    }
}
