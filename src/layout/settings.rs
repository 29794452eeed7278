// src/layout/settings.rs
//! Generation knobs + `.layout.ron` loader.

use bevy::asset::{io::Reader, AssetLoader, LoadContext};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::core::MapBounds;
use super::lighting::{DEFAULT_SHADOW_CASTER_CAP, DEFAULT_SKY_TEXTURE_SIZE};

pub struct LayoutSettingsAssetPlugin;

impl Plugin for LayoutSettingsAssetPlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<LayoutSettings>()
            .register_asset_loader(LayoutSettingsLoader);
    }
}

#[derive(Asset, TypePath, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub bounds: MapBounds,
    /// Fixed seed for reproducible layouts; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// How many placements (in creation order) register with the sun's shadow pass.
    pub shadow_caster_cap: usize,
    pub sky_texture_size: u32,
    /// Max live surface resources; `None` = unbounded.
    pub surface_budget: Option<usize>,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            bounds: MapBounds::default(),
            seed: None,
            shadow_caster_cap: DEFAULT_SHADOW_CASTER_CAP,
            sky_texture_size: DEFAULT_SKY_TEXTURE_SIZE,
            surface_budget: None,
        }
    }
}

impl LayoutSettings {
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed), ..Self::default() }
    }

    pub fn from_ron(text: &str) -> Result<Self, LayoutSettingsLoadError> {
        ron::from_str(text).map_err(|e| LayoutSettingsLoadError::Ron(e.to_string()))
    }
}

#[derive(Default)]
pub struct LayoutSettingsLoader;

impl AssetLoader for LayoutSettingsLoader {
    type Asset = LayoutSettings;
    type Settings = ();
    type Error = LayoutSettingsLoadError;

    fn extensions(&self) -> &[&str] {
        &["layout.ron"]
    }

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        ron::de::from_bytes(&bytes).map_err(|e| LayoutSettingsLoadError::Ron(e.to_string()))
    }
}

#[derive(thiserror::Error, Debug)]
pub enum LayoutSettingsLoadError {
    #[error("I/O while reading layout settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Ron(String),
}
