// src/layout/lighting.rs
//! Afternoon lighting rig and the painted sky dome.

use bevy::prelude::*;
use image::{Rgba, RgbaImage};
use rand::Rng;

use crate::layout::placement::uniform;

pub const SKY_DIAMETER: f32 = 600.0;
pub const DEFAULT_SKY_TEXTURE_SIZE: u32 = 512;
pub const DEFAULT_SHADOW_CASTER_CAP: usize = 100;

/// Shadow map parameters for a shadow-casting directional light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowSettings {
    pub map_size: usize,
    pub depth_bias: f32,
    pub normal_bias: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum LightSpec {
    /// Hemispheric fill: sky colour from above, `ground_color` from below.
    Ambient {
        name: String,
        intensity: f32,
        color: [f32; 3],
        ground_color: [f32; 3],
    },
    Directional {
        name: String,
        direction: Vec3,
        intensity: f32,
        color: [f32; 3],
        shadows: Option<ShadowSettings>,
    },
}

impl LightSpec {
    pub fn name(&self) -> &str {
        match self {
            LightSpec::Ambient { name, .. } | LightSpec::Directional { name, .. } => name,
        }
    }

    pub fn casts_shadows(&self) -> bool {
        matches!(self, LightSpec::Directional { shadows: Some(_), .. })
    }
}

/// Ambient, the shadow-casting sun, then a soft sky fill. The sun is always index 1.
pub fn plan_lights() -> Vec<LightSpec> {
    vec![
        LightSpec::Ambient {
            name: "ambient".into(),
            intensity: 0.4,
            color: [1.0, 1.0, 1.0],
            ground_color: [0.2, 0.18, 0.15],
        },
        LightSpec::Directional {
            name: "sun".into(),
            direction: Vec3::new(-0.5, -0.7, -0.3),
            intensity: 2.0,
            color: [1.0, 0.95, 0.85],
            shadows: Some(ShadowSettings { map_size: 4096, depth_bias: 0.001, normal_bias: 0.02 }),
        },
        LightSpec::Directional {
            name: "fill".into(),
            direction: Vec3::new(0.3, -0.4, 0.6),
            intensity: 0.5,
            color: [0.8, 0.9, 1.0],
            shadows: None,
        },
    ]
}

/// Inward-facing sky sphere and its texture.
#[derive(Clone, Debug, PartialEq)]
pub struct SkySpec {
    pub diameter: f32,
    pub texture: RgbaImage,
}

/// Top-to-bottom colour stops: deep blue overhead to a greenish horizon.
const SKY_STOPS: [(f32, [u8; 3]); 7] = [
    (0.0, [0x1e, 0x3a, 0x5f]),
    (0.2, [0x3d, 0x6a, 0x8a]),
    (0.4, [0x6a, 0x9f, 0xc0]),
    (0.6, [0x8f, 0xc1, 0xd8]),
    (0.75, [0xb5, 0xd8, 0xe8]),
    (0.9, [0xd4, 0xe8, 0xf0]),
    (1.0, [0xe8, 0xf0, 0xe8]),
];

const CLOUD_COUNT: usize = 30;
const CLOUD_ALPHA: f32 = 0.15;
/// Cloud band and size, in units of a 512 px texture.
const CLOUD_BAND: (f32, f32) = (50.0, 300.0);
const CLOUD_RADIUS: (f32, f32) = (30.0, 110.0);
const CLOUD_FLATTEN: f32 = 0.4;

fn gradient_at(t: f32) -> [f32; 3] {
    let t = t.clamp(0.0, 1.0);
    let mut lo = SKY_STOPS[0];
    for &hi in &SKY_STOPS[1..] {
        if t <= hi.0 {
            let k = (t - lo.0) / (hi.0 - lo.0);
            return std::array::from_fn(|c| lo.1[c] as f32 + (hi.1[c] as f32 - lo.1[c] as f32) * k);
        }
        lo = hi;
    }
    lo.1.map(f32::from)
}

/// Paint a `size`×`size` gradient and blend soft white ellipses into the upper half.
pub fn paint_sky_texture<R: Rng + ?Sized>(size: u32, rng: &mut R) -> RgbaImage {
    let size = size.max(2);
    let mut img = RgbaImage::new(size, size);
    for y in 0..size {
        let [r, g, b] = gradient_at((y as f32 + 0.5) / size as f32);
        for x in 0..size {
            img.put_pixel(x, y, Rgba([r.round() as u8, g.round() as u8, b.round() as u8, 255]));
        }
    }

    let s = size as f32 / DEFAULT_SKY_TEXTURE_SIZE as f32;
    for _ in 0..CLOUD_COUNT {
        let cx = uniform(rng, 0.0, size as f32);
        let cy = uniform(rng, CLOUD_BAND.0, CLOUD_BAND.1) * s;
        let rx = uniform(rng, CLOUD_RADIUS.0, CLOUD_RADIUS.1) * s;
        let ry = rx * CLOUD_FLATTEN;
        blend_ellipse(&mut img, cx, cy, rx, ry);
    }
    img
}

fn blend_ellipse(img: &mut RgbaImage, cx: f32, cy: f32, rx: f32, ry: f32) {
    let (w, h) = img.dimensions();
    let x0 = (cx - rx).floor().max(0.0) as u32;
    let x1 = ((cx + rx).ceil() as u32).min(w);
    let y0 = (cy - ry).floor().max(0.0) as u32;
    let y1 = ((cy + ry).ceil() as u32).min(h);

    for y in y0..y1 {
        for x in x0..x1 {
            let dx = (x as f32 + 0.5 - cx) / rx;
            let dy = (y as f32 + 0.5 - cy) / ry;
            if dx * dx + dy * dy > 1.0 {
                continue;
            }
            let px = img.get_pixel_mut(x, y);
            for c in 0..3 {
                let v = px.0[c] as f32;
                px.0[c] = (v + (255.0 - v) * CLOUD_ALPHA).round() as u8;
            }
        }
    }
}
