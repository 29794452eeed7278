// src/layout/placement/walls.rs
//! Walls with a centred door opening: left jamb, right jamb, lintel.

use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

use crate::layout::core::{Category, Placement, Shape};
use crate::layout::error::LayoutError;
use crate::layout::materials::MaterialTag;

/// Direction the wall runs in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WallAxis {
    /// Runs along X (front/back walls).
    X,
    /// Runs along Z (side walls), placed with a quarter-turn yaw.
    Z,
}

impl WallAxis {
    pub fn yaw(self) -> f32 {
        match self {
            WallAxis::X => 0.0,
            WallAxis::Z => FRAC_PI_2,
        }
    }

    fn offset(self, along: f32) -> Vec3 {
        match self {
            WallAxis::X => Vec3::new(along, 0.0, 0.0),
            WallAxis::Z => Vec3::new(0.0, 0.0, along),
        }
    }
}

/// An undivided wall and the opening to cut in it.
#[derive(Clone, Copy, Debug)]
pub struct WallSpec {
    /// Centre of the wall on the ground (XZ).
    pub center: Vec2,
    pub axis: WallAxis,
    pub length: f32,
    pub height: f32,
    pub thickness: f32,
    pub opening_width: f32,
    pub opening_height: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PieceRole {
    LeftJamb,
    RightJamb,
    Lintel,
}

/// One box of a split wall, in wall-local terms.
#[derive(Clone, Copy, Debug)]
pub struct WallPiece {
    pub role: PieceRole,
    /// Offset of the piece centre along the wall axis.
    pub along: f32,
    /// Height of the piece centre above the ground.
    pub center_y: f32,
    /// Extent along the wall axis.
    pub width: f32,
    pub height: f32,
}

impl WallPiece {
    /// (start, end) along the wall axis.
    pub fn span(&self) -> (f32, f32) {
        (self.along - self.width * 0.5, self.along + self.width * 0.5)
    }
}

/// Decompose a wall into exactly three pieces whose union is the wall minus the opening.
pub fn split_wall(spec: &WallSpec) -> Result<[WallPiece; 3], LayoutError> {
    let fits = spec.opening_width > 0.0
        && spec.opening_width < spec.length
        && spec.opening_height > 0.0
        && spec.opening_height < spec.height;
    if !fits {
        return Err(LayoutError::DegenerateOpening {
            length: spec.length,
            opening: spec.opening_width,
        });
    }

    let side = (spec.length - spec.opening_width) * 0.5;
    let lintel_h = spec.height - spec.opening_height;

    Ok([
        WallPiece {
            role: PieceRole::LeftJamb,
            along: -spec.length * 0.5 + side * 0.5,
            center_y: spec.height * 0.5,
            width: side,
            height: spec.height,
        },
        WallPiece {
            role: PieceRole::RightJamb,
            along: spec.length * 0.5 - side * 0.5,
            center_y: spec.height * 0.5,
            width: side,
            height: spec.height,
        },
        WallPiece {
            role: PieceRole::Lintel,
            along: 0.0,
            center_y: spec.opening_height + lintel_h * 0.5,
            width: spec.opening_width,
            height: lintel_h,
        },
    ])
}

/// Split `spec` and append the three resulting placements to `out`.
pub fn push_wall_with_opening(
    out: &mut Vec<Placement>,
    name: &str,
    spec: &WallSpec,
    material: MaterialTag,
) -> Result<(), LayoutError> {
    let base = Vec3::new(spec.center.x, 0.0, spec.center.y);
    for piece in split_wall(spec)? {
        let suffix = match piece.role {
            PieceRole::LeftJamb => "left",
            PieceRole::RightJamb => "right",
            PieceRole::Lintel => "top",
        };
        let position = base + spec.axis.offset(piece.along) + Vec3::Y * piece.center_y;
        out.push(
            Placement::new(
                format!("{name}_{suffix}"),
                Category::Wall,
                Shape::cuboid(piece.width, piece.height, spec.thickness),
                position,
                material,
            )
            .with_yaw(spec.axis.yaw()),
        );
    }
    Ok(())
}

/// Solid wall without an opening.
pub fn solid_wall(
    name: impl Into<String>,
    center: Vec2,
    axis: WallAxis,
    length: f32,
    height: f32,
    thickness: f32,
    material: MaterialTag,
) -> Placement {
    Placement::new(
        name,
        Category::Wall,
        Shape::cuboid(length, height, thickness),
        Vec3::new(center.x, height * 0.5, center.y),
        material,
    )
    .with_yaw(axis.yaw())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(length: f32, opening: f32) -> WallSpec {
        WallSpec {
            center: Vec2::new(3.0, -6.0),
            axis: WallAxis::X,
            length,
            height: 3.5,
            thickness: 0.3,
            opening_width: opening,
            opening_height: 3.0,
        }
    }

    #[test]
    fn pieces_rebuild_the_wall() {
        for &(length, opening) in &[(25.0, 4.0), (12.0, 4.0), (6.0, 3.5), (18.0, 4.0)] {
            let [left, right, top] = split_wall(&spec(length, opening)).unwrap();

            // jambs + gap cover the whole length
            assert!((left.span().0 + length * 0.5).abs() < 1e-4);
            assert!((right.span().1 - length * 0.5).abs() < 1e-4);
            assert!((left.width + opening + right.width - length).abs() < 1e-4);

            // the gap is exactly the opening and the lintel fills it
            assert!((right.span().0 - left.span().1 - opening).abs() < 1e-4);
            assert_eq!(top.span(), (left.span().1, right.span().0));

            // lintel sits on top of the opening up to the wall height
            assert!((top.center_y - top.height * 0.5 - 3.0).abs() < 1e-4);
            assert!((top.center_y + top.height * 0.5 - 3.5).abs() < 1e-4);
        }
    }

    #[test]
    fn opening_must_fit() {
        assert!(matches!(
            split_wall(&spec(4.0, 4.0)),
            Err(LayoutError::DegenerateOpening { .. })
        ));
        let mut tall = spec(10.0, 2.0);
        tall.opening_height = 3.5;
        assert!(split_wall(&tall).is_err());
    }

    #[test]
    fn z_walls_offset_along_z_with_quarter_turn() {
        let mut s = spec(12.0, 4.0);
        s.axis = WallAxis::Z;
        let mut out = Vec::new();
        push_wall_with_opening(&mut out, "side", &s, MaterialTag::Wall).unwrap();

        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|p| p.position.x == 3.0 && p.yaw == FRAC_PI_2));
        assert!((out[0].position.z - (-6.0 - 4.0)).abs() < 1e-4);
        assert!((out[1].position.z - (-6.0 + 4.0)).abs() < 1e-4);
        assert_eq!(out[2].name, "side_top");
    }
}
