//! Placed items and emitted placement records.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 2D placement decided by an allocator, before the layer assigns z.
///
/// `width`/`height` are the extents of the committed orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement2D {
    /// Min-corner x coordinate.
    pub x: u32,
    /// Min-corner y coordinate.
    pub y: u32,
    /// Committed x-extent.
    pub width: u32,
    /// Committed y-extent.
    pub height: u32,
    /// Whether the in-plane orientation was swapped.
    pub rotated: bool,
}

/// A box that has been assigned a position inside a layer.
///
/// Coordinates are 1-based and inclusive: a box at `x` with width `w`
/// occupies columns `x ..= x + w - 1`. The recorded `width`/`height` are
/// the extents of the orientation the allocator committed, so the
/// occupying region always matches them exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacedItem {
    /// Item id.
    pub id: u64,
    /// Min-corner x coordinate.
    pub x: u32,
    /// Min-corner y coordinate.
    pub y: u32,
    /// Min-corner z coordinate (bottom of the box).
    pub z: u32,
    /// Committed x-extent.
    pub width: u32,
    /// Committed y-extent.
    pub height: u32,
    /// z-extent.
    pub depth: u32,
    /// Whether the in-plane orientation was swapped at placement.
    pub rotated: bool,
}

impl PlacedItem {
    /// Highest occupied x coordinate.
    pub fn x2(&self) -> u32 {
        self.x + self.width - 1
    }

    /// Highest occupied y coordinate.
    pub fn y2(&self) -> u32 {
        self.y + self.height - 1
    }

    /// Highest occupied z coordinate (top of the box).
    pub fn z2(&self) -> u32 {
        self.z + self.depth - 1
    }

    /// Returns true if the 2D footprints of the two boxes intersect.
    pub fn footprint_overlaps(&self, other: &PlacedItem) -> bool {
        if self.x2() < other.x || self.x > other.x2() {
            return false;
        }
        if self.y2() < other.y || self.y > other.y2() {
            return false;
        }
        true
    }
}

/// One emitted placement record: the item id and the eight corner
/// vertices of its placed bounding cuboid.
///
/// Vertex ordering is fixed as
/// `(x1,y1,z1) (x1,y2,z1) (x2,y1,z1) (x2,y2,z1)` followed by the same four
/// with `z2`, where `x1 < x2` bound the x-extent and likewise for y.
/// The z coordinates are reported inverted against the global `max_z`
/// (`z' = max_z - z + 1`) so the vertical axis matches the sink's
/// floor/ceiling convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacementRecord {
    /// Item id.
    pub id: u64,
    /// Corner vertices, `[x, y, z]` each.
    pub vertices: [[u32; 3]; 8],
}

impl PlacementRecord {
    /// Builds the record for a placed item, inverting z against `max_z`.
    pub fn new(item: &PlacedItem, max_z: u32) -> Self {
        let (x1, x2) = (item.x, item.x2());
        let (y1, y2) = (item.y, item.y2());
        let z1 = max_z - item.z + 1;
        let z2 = max_z - item.z2() + 1;

        Self {
            id: item.id,
            vertices: [
                [x1, y1, z1],
                [x1, y2, z1],
                [x2, y1, z1],
                [x2, y2, z1],
                [x1, y1, z2],
                [x1, y2, z2],
                [x2, y1, z2],
                [x2, y2, z2],
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(id: u64, x: u32, y: u32, w: u32, h: u32) -> PlacedItem {
        PlacedItem {
            id,
            x,
            y,
            z: 1,
            width: w,
            height: h,
            depth: 1,
            rotated: false,
        }
    }

    #[test]
    fn test_inclusive_extents() {
        let p = placed(1, 1, 1, 500, 500);
        assert_eq!(p.x2(), 500);
        assert_eq!(p.y2(), 500);
    }

    #[test]
    fn test_footprint_overlap() {
        let a = placed(1, 1, 1, 500, 500);
        let b = placed(2, 501, 1, 500, 500);
        let c = placed(3, 400, 400, 200, 200);

        assert!(!a.footprint_overlaps(&b));
        assert!(!b.footprint_overlaps(&a));
        assert!(a.footprint_overlaps(&c));
        assert!(c.footprint_overlaps(&b));
        assert!(a.footprint_overlaps(&a));
    }

    #[test]
    fn test_record_vertex_order_and_z_inversion() {
        let p = PlacedItem {
            id: 9,
            x: 1,
            y: 11,
            z: 5,
            width: 10,
            height: 20,
            depth: 3,
            rotated: false,
        };
        // max_z = 100: z1 = 100 - 5 + 1 = 96, z2 = 100 - 7 + 1 = 94.
        let rec = PlacementRecord::new(&p, 100);

        assert_eq!(rec.id, 9);
        assert_eq!(rec.vertices[0], [1, 11, 96]);
        assert_eq!(rec.vertices[1], [1, 30, 96]);
        assert_eq!(rec.vertices[2], [10, 11, 96]);
        assert_eq!(rec.vertices[3], [10, 30, 96]);
        assert_eq!(rec.vertices[4], [1, 11, 94]);
        assert_eq!(rec.vertices[7], [10, 30, 94]);
    }
}
