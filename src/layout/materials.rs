// src/layout/materials.rs
//! Fixed material palette for the farmstead.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialTag {
    Grass,
    Dirt,
    DryGrass,
    Wall,
    Roof,
    DarkRoof,
    Water,
    Concrete,
    Trunk,
    Foliage,
    Wood,
}

impl MaterialTag {
    pub const ALL: [MaterialTag; 11] = [
        MaterialTag::Grass,
        MaterialTag::Dirt,
        MaterialTag::DryGrass,
        MaterialTag::Wall,
        MaterialTag::Roof,
        MaterialTag::DarkRoof,
        MaterialTag::Water,
        MaterialTag::Concrete,
        MaterialTag::Trunk,
        MaterialTag::Foliage,
        MaterialTag::Wood,
    ];
}

/// PBR parameters. Colour is sRGB in 0..1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialParams {
    pub base_color: [f32; 3],
    pub roughness: f32,
    pub metallic: f32,
    pub alpha: f32,
}

impl MaterialParams {
    const fn opaque(r: f32, g: f32, b: f32, roughness: f32) -> Self {
        Self { base_color: [r, g, b], roughness, metallic: 0.0, alpha: 1.0 }
    }

    pub fn is_translucent(&self) -> bool {
        self.alpha < 1.0
    }
}

fn params_for(tag: MaterialTag) -> MaterialParams {
    match tag {
        MaterialTag::Grass => MaterialParams::opaque(0.35, 0.45, 0.25, 0.95),
        MaterialTag::Dirt => MaterialParams::opaque(0.55, 0.42, 0.3, 0.98),
        MaterialTag::DryGrass => MaterialParams::opaque(0.55, 0.5, 0.35, 0.95),
        // white/cream paint
        MaterialTag::Wall => MaterialParams::opaque(0.92, 0.9, 0.85, 0.8),
        // terracotta tiles
        MaterialTag::Roof => MaterialParams::opaque(0.7, 0.35, 0.25, 0.85),
        MaterialTag::DarkRoof => MaterialParams { metallic: 0.1, ..MaterialParams::opaque(0.3, 0.25, 0.2, 0.7) },
        MaterialTag::Water => MaterialParams { base_color: [0.4, 0.7, 0.8], roughness: 0.1, metallic: 0.2, alpha: 0.85 },
        MaterialTag::Concrete => MaterialParams::opaque(0.75, 0.73, 0.7, 0.9),
        MaterialTag::Trunk => MaterialParams::opaque(0.35, 0.25, 0.18, 0.95),
        MaterialTag::Foliage => MaterialParams::opaque(0.15, 0.35, 0.15, 0.9),
        MaterialTag::Wood => MaterialParams::opaque(0.4, 0.28, 0.18, 0.8),
    }
}

/// Tag → parameters lookup, built once per generator.
#[derive(Clone, Debug)]
pub struct MaterialTable {
    by_tag: HashMap<MaterialTag, MaterialParams>,
}

impl Default for MaterialTable {
    fn default() -> Self {
        let by_tag = MaterialTag::ALL.iter().map(|&t| (t, params_for(t))).collect();
        Self { by_tag }
    }
}

impl MaterialTable {
    pub fn get(&self, tag: MaterialTag) -> &MaterialParams {
        // every tag is inserted in `default`
        &self.by_tag[&tag]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_every_tag() {
        let table = MaterialTable::default();
        for tag in MaterialTag::ALL {
            let p = table.get(tag);
            assert!((0.0..=1.0).contains(&p.roughness));
            assert!((0.0..=1.0).contains(&p.alpha));
        }
    }

    #[test]
    fn only_water_is_translucent() {
        let table = MaterialTable::default();
        let translucent: Vec<_> = MaterialTag::ALL
            .into_iter()
            .filter(|&t| table.get(t).is_translucent())
            .collect();
        assert_eq!(translucent, vec![MaterialTag::Water]);
        assert!((table.get(MaterialTag::DarkRoof).metallic - 0.1).abs() < f32::EPSILON);
    }
}
