//! Inclusive integer bounding boxes

use crate::core::types::IVec3;
use crate::math::facing::Facing;

/// Axis-aligned box over block coordinates, inclusive on both ends.
///
/// `min <= max` holds on every axis for the whole life of a box; the
/// constructors panic otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    min: IVec3,
    max: IVec3,
}

impl BoundingBox {
    /// Create a box from min and max corners
    ///
    /// # Panics
    /// If `min > max` on any axis.
    pub fn new(min: IVec3, max: IVec3) -> Self {
        assert!(
            min.cmple(max).all(),
            "malformed bounding box: min {min} exceeds max {max}"
        );
        Self { min, max }
    }

    pub fn from_coords(min_x: i32, min_y: i32, min_z: i32, max_x: i32, max_y: i32, max_z: i32) -> Self {
        Self::new(IVec3::new(min_x, min_y, min_z), IVec3::new(max_x, max_y, max_z))
    }

    /// Full-height column over a horizontal rectangle (y 1..=512)
    pub fn column(min_x: i32, min_z: i32, max_x: i32, max_z: i32) -> Self {
        Self::from_coords(min_x, 1, min_z, max_x, 512, max_z)
    }

    /// Box for a piece of local size `size`, placed at `origin` facing
    /// `facing`, with the template shifted by `offset` in the local frame.
    ///
    /// The local frame has x across the piece, y up and z along the facing.
    pub fn oriented(origin: IVec3, offset: IVec3, size: IVec3, facing: Facing) -> Self {
        assert!(size.cmpgt(IVec3::ZERO).all(), "piece size must be positive, got {size}");
        let IVec3 { x, y, z } = origin;
        let IVec3 { x: ox, y: oy, z: oz } = offset;
        let IVec3 { x: sx, y: sy, z: sz } = size;
        let (min_y, max_y) = (y + oy, y + sy - 1 + oy);

        match facing {
            Facing::South => Self::from_coords(x + ox, min_y, z + oz, x + sx - 1 + ox, max_y, z + sz - 1 + oz),
            Facing::West => Self::from_coords(x - sz + 1 + oz, min_y, z + ox, x + oz, max_y, z + sx - 1 + ox),
            Facing::North => Self::from_coords(x + ox, min_y, z - sz + 1 + oz, x + sx - 1 + ox, max_y, z + oz),
            Facing::East => Self::from_coords(x + oz, min_y, z + ox, x + sz - 1 + oz, max_y, z + sx - 1 + ox),
        }
    }

    pub fn min(&self) -> IVec3 {
        self.min
    }

    pub fn max(&self) -> IVec3 {
        self.max
    }

    pub fn min_x(&self) -> i32 { self.min.x }
    pub fn min_y(&self) -> i32 { self.min.y }
    pub fn min_z(&self) -> i32 { self.min.z }
    pub fn max_x(&self) -> i32 { self.max.x }
    pub fn max_y(&self) -> i32 { self.max.y }
    pub fn max_z(&self) -> i32 { self.max.z }

    /// Number of blocks covered along each axis
    pub fn size(&self) -> IVec3 {
        self.max - self.min + IVec3::ONE
    }

    pub fn height(&self) -> i32 {
        self.max.y - self.min.y + 1
    }

    /// Check if two boxes share at least one block
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.max.x >= other.min.x && self.min.x <= other.max.x &&
        self.max.z >= other.min.z && self.min.z <= other.max.z &&
        self.max.y >= other.min.y && self.min.y <= other.max.y
    }

    /// Check if a block position lies inside the box
    pub fn contains(&self, p: IVec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Smallest box containing both
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Union of every box in `boxes`, or `None` for an empty sequence
    pub fn union_all<'a>(boxes: impl IntoIterator<Item = &'a BoundingBox>) -> Option<BoundingBox> {
        boxes.into_iter().fold(None, |acc: Option<BoundingBox>, b| {
            Some(acc.map_or(*b, |acc| acc.union(b)))
        })
    }

    /// Shift the box by `delta`
    pub fn translate(&mut self, delta: IVec3) {
        self.min += delta;
        self.max += delta;
    }

    /// Copy shifted by `delta`
    pub fn translated(&self, delta: IVec3) -> BoundingBox {
        let mut b = *self;
        b.translate(delta);
        b
    }

    /// Overlap of two boxes, if any
    pub fn intersection(&self, other: &BoundingBox) -> Option<BoundingBox> {
        if !self.intersects(other) {
            return None;
        }
        Some(BoundingBox {
            min: self.min.max(other.min),
            max: self.max.min(other.max),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_and_height() {
        let b = BoundingBox::from_coords(0, 64, 0, 4, 74, 4);
        assert_eq!(b.size(), IVec3::new(5, 11, 5));
        assert_eq!(b.height(), 11);
    }

    #[test]
    fn test_intersects_is_inclusive() {
        let a = BoundingBox::from_coords(0, 0, 0, 4, 4, 4);
        let touching = BoundingBox::from_coords(4, 0, 0, 8, 4, 4);
        let apart = BoundingBox::from_coords(5, 0, 0, 8, 4, 4);
        assert!(a.intersects(&touching));
        assert!(!a.intersects(&apart));
    }

    #[test]
    #[should_panic]
    fn test_malformed_box_panics() {
        BoundingBox::from_coords(5, 0, 0, 4, 0, 0);
    }

    #[test]
    fn test_oriented_south_and_north() {
        let origin = IVec3::new(10, 40, 20);
        let south = BoundingBox::oriented(origin, IVec3::new(-1, -1, 0), IVec3::new(5, 5, 7), Facing::South);
        assert_eq!(south, BoundingBox::from_coords(9, 39, 20, 13, 43, 26));

        let north = BoundingBox::oriented(origin, IVec3::new(-1, -1, 0), IVec3::new(5, 5, 7), Facing::North);
        assert_eq!(north, BoundingBox::from_coords(9, 39, 14, 13, 43, 20));
    }

    #[test]
    fn test_oriented_west_and_east_swap_axes() {
        let origin = IVec3::new(10, 40, 20);
        let west = BoundingBox::oriented(origin, IVec3::new(-1, -1, 0), IVec3::new(5, 5, 7), Facing::West);
        assert_eq!(west, BoundingBox::from_coords(4, 39, 19, 10, 43, 23));

        let east = BoundingBox::oriented(origin, IVec3::new(-1, -1, 0), IVec3::new(5, 5, 7), Facing::East);
        assert_eq!(east, BoundingBox::from_coords(10, 39, 19, 16, 43, 23));
    }

    #[test]
    fn test_union_all() {
        let boxes = [
            BoundingBox::from_coords(0, 10, 0, 4, 14, 4),
            BoundingBox::from_coords(-3, 20, 2, 1, 22, 9),
        ];
        let u = BoundingBox::union_all(&boxes).unwrap();
        assert_eq!(u, BoundingBox::from_coords(-3, 10, 0, 4, 22, 9));
        assert!(BoundingBox::union_all(std::iter::empty()).is_none());
    }

    #[test]
    fn test_translate_and_intersection() {
        let mut b = BoundingBox::from_coords(0, 0, 0, 3, 3, 3);
        b.translate(IVec3::new(0, -2, 0));
        assert_eq!(b.min_y(), -2);
        let other = BoundingBox::from_coords(2, 0, 2, 9, 9, 9);
        assert_eq!(b.intersection(&other), Some(BoundingBox::from_coords(2, 0, 2, 3, 1, 3)));
    }
}
