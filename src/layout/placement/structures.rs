// src/layout/placement/structures.rs
//! Buildings: the L-shaped main house with its patio, the pool, small houses and the barn.

use bevy::prelude::*;

use super::walls::{push_wall_with_opening, solid_wall, WallAxis, WallSpec};
use crate::layout::core::{
    Category, Placement, PlacementFlags, Shape, StructureInfo, StructureKind,
};
use crate::layout::error::LayoutError;
use crate::layout::materials::MaterialTag;

// ---------- Main house ----------

pub const WING_WALL_HEIGHT: f32 = 3.5;
pub const WING_WALL_THICKNESS: f32 = 0.3;
pub const WING_OPENING: Vec2 = Vec2::new(4.0, 3.0);
/// Roof overhang added to each floor axis.
pub const WING_EAVE: f32 = 2.0;

/// (centre x, centre z, width, depth) of each wing of the L.
pub const WINGS: [(f32, f32, f32, f32); 2] = [
    // long wing, east-west
    (0.0, 0.0, 25.0, 12.0),
    // short wing, north-south, off the east end
    (18.0, -15.0, 12.0, 18.0),
];

pub const PATIO_CENTER: Vec3 = Vec3::new(5.0, 3.0, -10.0);
pub const PATIO_ROOF: Vec3 = Vec3::new(15.0, 0.15, 10.0);
/// Fixed pillar (x, z). Not derived from `PATIO_ROOF`: resizing the patio roof
/// or the wings means moving these by hand as well.
pub const PATIO_PILLARS: [(f32, f32); 4] = [(-2.0, -5.0), (12.0, -5.0), (-2.0, -15.0), (12.0, -15.0)];
const PATIO_PILLAR_RADIUS: f32 = 0.2;
const PATIO_PILLAR_HEIGHT: f32 = 3.0;

// ---------- Pool ----------

pub const POOL_CENTER: Vec2 = Vec2::new(5.0, -18.0);
pub const POOL_SIZE: Vec2 = Vec2::new(10.0, 6.0);
pub const POOL_DEPTH: f32 = 1.5;
const POOL_DECK_MARGIN: f32 = 4.0;

// ---------- Secondary structures ----------

pub const SMALL_HOUSE_HEIGHT: f32 = 3.0;
pub const SMALL_HOUSE_WALL: f32 = 0.25;
pub const SMALL_HOUSE_OPENING: Vec2 = Vec2::new(3.5, 2.4);
const SMALL_HOUSE_EAVE: f32 = 1.5;

/// (name, centre x, centre z, width, depth)
pub const SMALL_HOUSES: [(&str, f32, f32, f32, f32); 5] = [
    ("north_house", 0.0, 45.0, 10.0, 8.0),
    ("northeast_house", 35.0, 35.0, 8.0, 7.0),
    // across the road
    ("northwest_house", -55.0, 25.0, 9.0, 8.0),
    ("south_house", -15.0, -45.0, 8.0, 7.0),
    ("east_shed", 45.0, 0.0, 6.0, 5.0),
];

pub const BARN: (f32, f32, f32, f32) = (-60.0, -30.0, 15.0, 10.0);
const BARN_HEIGHT: f32 = 4.0;
const BARN_WALL: f32 = 0.3;

fn record(structures: &mut Vec<StructureInfo>, kind: StructureKind, name: &str, x: f32, z: f32, w: f32, d: f32) {
    structures.push(StructureInfo {
        kind,
        name: name.to_string(),
        center: Vec2::new(x, z),
        footprint: Vec2::new(w, d),
    });
}

/// Two perpendicular wings plus the covered patio towards the pool.
pub fn build_main_house(
    out: &mut Vec<Placement>,
    structures: &mut Vec<StructureInfo>,
) -> Result<(), LayoutError> {
    for (i, &(x, z, w, d)) in WINGS.iter().enumerate() {
        build_wing(out, &format!("wing_{i}"), x, z, w, d)?;
        record(structures, StructureKind::Wing, &format!("wing_{i}"), x, z, w, d);
    }

    out.push(
        Placement::new(
            "patio_roof",
            Category::Roof,
            Shape::cuboid(PATIO_ROOF.x, PATIO_ROOF.y, PATIO_ROOF.z),
            PATIO_CENTER,
            MaterialTag::DarkRoof,
        ),
    );
    for (i, &(px, pz)) in PATIO_PILLARS.iter().enumerate() {
        out.push(Placement::new(
            format!("patio_pillar_{i}"),
            Category::Wall,
            Shape::Cylinder { radius: PATIO_PILLAR_RADIUS, height: PATIO_PILLAR_HEIGHT },
            Vec3::new(px, PATIO_PILLAR_HEIGHT * 0.5, pz),
            MaterialTag::Wall,
        ));
    }
    record(structures, StructureKind::Patio, "patio", PATIO_CENTER.x, PATIO_CENTER.z, PATIO_ROOF.x, PATIO_ROOF.z);
    Ok(())
}

/// Floor, four walls each with a door, overhanging roof and a ridge accent.
fn build_wing(out: &mut Vec<Placement>, name: &str, x: f32, z: f32, w: f32, d: f32) -> Result<(), LayoutError> {
    let h = WING_WALL_HEIGHT;
    out.push(Placement::new(
        format!("{name}_floor"),
        Category::Floor,
        Shape::cuboid(w, 0.2, d),
        Vec3::new(x, 0.1, z),
        MaterialTag::Concrete,
    ));

    let wall = |center: Vec2, axis: WallAxis, length: f32| WallSpec {
        center,
        axis,
        length,
        height: h,
        thickness: WING_WALL_THICKNESS,
        opening_width: WING_OPENING.x,
        opening_height: WING_OPENING.y,
    };
    let walls = [
        ("front", wall(Vec2::new(x, z - d * 0.5), WallAxis::X, w)),
        ("back", wall(Vec2::new(x, z + d * 0.5), WallAxis::X, w)),
        ("left", wall(Vec2::new(x - w * 0.5, z), WallAxis::Z, d)),
        ("right", wall(Vec2::new(x + w * 0.5, z), WallAxis::Z, d)),
    ];
    for (side, spec) in &walls {
        push_wall_with_opening(out, &format!("{name}_wall_{side}"), spec, MaterialTag::Wall)?;
    }

    out.push(Placement::new(
        format!("{name}_roof"),
        Category::Roof,
        Shape::cuboid(w + WING_EAVE, 0.3, d + WING_EAVE),
        Vec3::new(x, h + 0.15, z),
        MaterialTag::Roof,
    ));
    // ridge gives the flat roof a sloped silhouette
    out.push(
        Placement::new(
            format!("{name}_ridge"),
            Category::Roof,
            Shape::cuboid(w + WING_EAVE, 1.0, 1.0),
            Vec3::new(x, h + 0.8, z),
            MaterialTag::Roof,
        )
        .with_flags(PlacementFlags::DECOR),
    );
    Ok(())
}

/// Deck, water surface and a lower slab for the look of depth. Not a physical volume.
pub fn build_pool(out: &mut Vec<Placement>, structures: &mut Vec<StructureInfo>) {
    let (x, z) = (POOL_CENTER.x, POOL_CENTER.y);
    let deck = POOL_SIZE + Vec2::splat(POOL_DECK_MARGIN);

    out.push(Placement::new(
        "pool_deck",
        Category::Floor,
        Shape::cuboid(deck.x, 0.3, deck.y),
        Vec3::new(x, 0.15, z),
        MaterialTag::Concrete,
    ));
    out.push(
        Placement::new(
            "pool_water",
            Category::Floor,
            Shape::cuboid(POOL_SIZE.x, 0.1, POOL_SIZE.y),
            Vec3::new(x, 0.2, z),
            MaterialTag::Water,
        )
        .with_flags(PlacementFlags::DECOR),
    );
    out.push(
        Placement::new(
            "pool_bottom",
            Category::Floor,
            Shape::cuboid(POOL_SIZE.x, 0.1, POOL_SIZE.y),
            Vec3::new(x, -POOL_DEPTH, z),
            MaterialTag::Water,
        )
        .with_flags(PlacementFlags::DECOR),
    );
    record(structures, StructureKind::Pool, "pool", x, z, deck.x, deck.y);
}

/// Five single-room houses and the open barn.
pub fn build_secondary_structures(
    out: &mut Vec<Placement>,
    structures: &mut Vec<StructureInfo>,
) -> Result<(), LayoutError> {
    for &(name, x, z, w, d) in &SMALL_HOUSES {
        build_small_house(out, name, x, z, w, d)?;
        record(structures, StructureKind::SmallHouse, name, x, z, w, d);
    }
    let (x, z, w, d) = BARN;
    build_barn(out, x, z, w, d);
    record(structures, StructureKind::Barn, "barn", x, z, w, d);
    Ok(())
}

fn build_small_house(out: &mut Vec<Placement>, name: &str, x: f32, z: f32, w: f32, d: f32) -> Result<(), LayoutError> {
    let h = SMALL_HOUSE_HEIGHT;
    out.push(Placement::new(
        format!("{name}_floor"),
        Category::Floor,
        Shape::cuboid(w, 0.15, d),
        Vec3::new(x, 0.075, z),
        MaterialTag::Concrete,
    ));

    for (side, dz) in [("front", -d * 0.5), ("back", d * 0.5)] {
        let spec = WallSpec {
            center: Vec2::new(x, z + dz),
            axis: WallAxis::X,
            length: w,
            height: h,
            thickness: SMALL_HOUSE_WALL,
            opening_width: SMALL_HOUSE_OPENING.x,
            opening_height: SMALL_HOUSE_OPENING.y,
        };
        push_wall_with_opening(out, &format!("{name}_wall_{side}"), &spec, MaterialTag::Wall)?;
    }

    // side walls stay solid
    for (side, dx) in [("left", -w * 0.5), ("right", w * 0.5)] {
        out.push(solid_wall(
            format!("{name}_wall_{side}"),
            Vec2::new(x + dx, z),
            WallAxis::Z,
            d,
            h,
            SMALL_HOUSE_WALL,
            MaterialTag::Wall,
        ));
    }

    out.push(Placement::new(
        format!("{name}_roof"),
        Category::Roof,
        Shape::cuboid(w + SMALL_HOUSE_EAVE, 0.2, d + SMALL_HOUSE_EAVE),
        Vec3::new(x, h + 0.1, z),
        MaterialTag::Roof,
    ));
    Ok(())
}

/// Dirt floor, wooden back and side walls, open front, dark metal roof.
fn build_barn(out: &mut Vec<Placement>, x: f32, z: f32, w: f32, d: f32) {
    let h = BARN_HEIGHT;
    out.push(Placement::new(
        "barn_floor",
        Category::Floor,
        Shape::cuboid(w, 0.15, d),
        Vec3::new(x, 0.075, z),
        MaterialTag::Dirt,
    ));
    out.push(solid_wall("barn_wall_back", Vec2::new(x, z + d * 0.5), WallAxis::X, w, h, BARN_WALL, MaterialTag::Wood));
    for (side, sign) in [("left", -1.0), ("right", 1.0)] {
        out.push(solid_wall(
            format!("barn_wall_{side}"),
            Vec2::new(x + w * 0.5 * sign, z),
            WallAxis::Z,
            d,
            h,
            BARN_WALL,
            MaterialTag::Wood,
        ));
    }
    out.push(Placement::new(
        "barn_roof",
        Category::Roof,
        Shape::cuboid(w + 2.0, 0.15, d + 2.0),
        Vec3::new(x, h, z),
        MaterialTag::DarkRoof,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wing_has_floor_twelve_wall_pieces_roof_and_ridge() {
        let mut out = Vec::new();
        build_wing(&mut out, "w", 0.0, 0.0, 25.0, 12.0).unwrap();
        assert_eq!(out.len(), 1 + 4 * 3 + 2);
        assert_eq!(out.iter().filter(|p| p.category == Category::Wall).count(), 12);

        let roof = out.iter().find(|p| p.name == "w_roof").unwrap();
        assert_eq!(roof.shape, Shape::cuboid(27.0, 0.3, 14.0));
    }

    #[test]
    fn barn_has_no_front_wall() {
        let mut out = Vec::new();
        let mut structures = Vec::new();
        build_secondary_structures(&mut out, &mut structures).unwrap();

        let barn_walls: Vec<_> = out
            .iter()
            .filter(|p| p.name.starts_with("barn_wall"))
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(barn_walls, vec!["barn_wall_back", "barn_wall_left", "barn_wall_right"]);
        assert_eq!(structures.len(), 6);
        assert_eq!(structures.last().map(|s| s.kind), Some(StructureKind::Barn));
    }

    #[test]
    fn patio_pillars_stay_where_they_were_placed() {
        let mut out = Vec::new();
        let mut structures = Vec::new();
        build_main_house(&mut out, &mut structures).unwrap();

        let pillars: Vec<_> = out
            .iter()
            .filter(|p| p.name.starts_with("patio_pillar"))
            .map(|p| (p.position.x, p.position.z))
            .collect();
        assert_eq!(pillars, PATIO_PILLARS.to_vec());
        assert_eq!(structures.iter().filter(|s| s.kind == StructureKind::Wing).count(), 2);
    }
}
