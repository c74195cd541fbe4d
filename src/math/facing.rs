//! Horizontal facings and the local→world transform
//!
//! Every piece is authored once in a local frame: x runs across the piece,
//! y up, z along the direction the piece faces. [`Facing::to_world`] maps that
//! frame onto the world, anchored at the piece's bounding box. The painter and
//! the forward exits both go through it.

use crate::core::types::IVec3;
use crate::math::bounds::BoundingBox;

/// Horizontal direction a piece is oriented toward
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Facing {
    /// +z
    South,
    /// -x
    West,
    /// -z
    North,
    /// +x
    East,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::South, Facing::West, Facing::North, Facing::East];

    /// Facing from its numeric id (0 = south, 1 = west, 2 = north, 3 = east)
    ///
    /// # Panics
    /// If `id` is outside `0..4`.
    pub fn from_id(id: i32) -> Self {
        match id {
            0 => Facing::South,
            1 => Facing::West,
            2 => Facing::North,
            3 => Facing::East,
            _ => panic!("invalid facing id {id}"),
        }
    }

    pub fn id(self) -> i32 {
        match self {
            Facing::South => 0,
            Facing::West => 1,
            Facing::North => 2,
            Facing::East => 3,
        }
    }

    /// True when the piece's length runs along the z axis
    pub fn is_z_axis(self) -> bool {
        matches!(self, Facing::South | Facing::North)
    }

    /// Map a local coordinate inside `bounds` to world space
    pub fn to_world(self, bounds: &BoundingBox, lx: i32, ly: i32, lz: i32) -> IVec3 {
        let y = bounds.min_y() + ly;
        match self {
            Facing::South => IVec3::new(bounds.min_x() + lx, y, bounds.min_z() + lz),
            Facing::North => IVec3::new(bounds.min_x() + lx, y, bounds.max_z() - lz),
            Facing::West => IVec3::new(bounds.max_x() - lz, y, bounds.min_z() + lx),
            Facing::East => IVec3::new(bounds.min_x() + lz, y, bounds.min_z() + lx),
        }
    }

    /// Length of `bounds` along this facing
    pub fn length_of(self, bounds: &BoundingBox) -> i32 {
        let size = bounds.size();
        if self.is_z_axis() { size.z } else { size.x }
    }

    /// Anchor just past the far end of a piece, continuing in the same facing.
    ///
    /// `dx` is measured across the piece and `dy` up from its floor.
    pub fn forward_exit(self, bounds: &BoundingBox, dx: i32, dy: i32) -> Exit {
        Exit {
            pos: self.to_world(bounds, dx, dy, self.length_of(bounds)),
            facing: self,
        }
    }

    /// Anchor on the low-coordinate side of a piece (-x for south/north
    /// facings, -z for west/east), `dz` along the piece from its min corner.
    pub fn left_exit(self, bounds: &BoundingBox, dy: i32, dz: i32) -> Exit {
        let y = bounds.min_y() + dy;
        if self.is_z_axis() {
            Exit { pos: IVec3::new(bounds.min_x() - 1, y, bounds.min_z() + dz), facing: Facing::West }
        } else {
            Exit { pos: IVec3::new(bounds.min_x() + dz, y, bounds.min_z() - 1), facing: Facing::North }
        }
    }

    /// Anchor on the high-coordinate side of a piece (+x for south/north
    /// facings, +z for west/east), `dz` along the piece from its min corner.
    pub fn right_exit(self, bounds: &BoundingBox, dy: i32, dz: i32) -> Exit {
        let y = bounds.min_y() + dy;
        if self.is_z_axis() {
            Exit { pos: IVec3::new(bounds.max_x() + 1, y, bounds.min_z() + dz), facing: Facing::East }
        } else {
            Exit { pos: IVec3::new(bounds.min_x() + dz, y, bounds.max_z() + 1), facing: Facing::South }
        }
    }
}

/// Where a child piece would attach, and which way it would face
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Exit {
    pub pos: IVec3,
    pub facing: Facing,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_box() -> BoundingBox {
        BoundingBox::from_coords(10, 20, 30, 14, 24, 36)
    }

    #[test]
    fn test_id_roundtrip() {
        for facing in Facing::ALL {
            assert_eq!(Facing::from_id(facing.id()), facing);
        }
    }

    #[test]
    fn test_to_world_origin_corner() {
        let b = sample_box();
        assert_eq!(Facing::South.to_world(&b, 0, 0, 0), IVec3::new(10, 20, 30));
        assert_eq!(Facing::North.to_world(&b, 0, 0, 0), IVec3::new(10, 20, 36));
        assert_eq!(Facing::West.to_world(&b, 0, 0, 0), IVec3::new(14, 20, 30));
        assert_eq!(Facing::East.to_world(&b, 0, 0, 0), IVec3::new(10, 20, 30));
    }

    #[test]
    fn test_to_world_stays_inside_box() {
        let b = BoundingBox::from_coords(0, 0, 0, 6, 4, 4);
        for facing in [Facing::West, Facing::East] {
            for lx in 0..5 {
                for lz in 0..7 {
                    assert!(b.contains(facing.to_world(&b, lx, 2, lz)));
                }
            }
        }
    }

    #[test]
    fn test_forward_exit_leaves_box() {
        let b = sample_box();
        let south = Facing::South.forward_exit(&b, 1, 1);
        assert_eq!(south.pos, IVec3::new(11, 21, 37));
        let north = Facing::North.forward_exit(&b, 1, 1);
        assert_eq!(north.pos, IVec3::new(11, 21, 29));
        let west = Facing::West.forward_exit(&b, 1, 1);
        assert_eq!(west.pos, IVec3::new(9, 21, 31));
        let east = Facing::East.forward_exit(&b, 1, 1);
        assert_eq!(east.pos, IVec3::new(15, 21, 31));
        assert!(!b.contains(south.pos) && !b.contains(west.pos));
    }

    #[test]
    fn test_side_exits() {
        let b = sample_box();
        let left = Facing::South.left_exit(&b, 1, 2);
        assert_eq!(left, Exit { pos: IVec3::new(9, 21, 32), facing: Facing::West });
        let right = Facing::East.right_exit(&b, 1, 2);
        assert_eq!(right, Exit { pos: IVec3::new(12, 21, 37), facing: Facing::South });
    }
}
