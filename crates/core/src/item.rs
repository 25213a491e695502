//! Item (box) model.

use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rectangular box to be packed.
///
/// Dimensions are sorted at construction: the smallest extent becomes
/// the depth (z-axis) and the remaining two form the footprint with
/// `width <= height`, width on the x-axis and height on y. Boxes lie
/// flat, keeping layers shallow. The depth never rotates; the in-plane
/// orientation (width and height swapped) is chosen by the allocator at
/// placement time and recorded on the resulting
/// [`PlacedItem`](crate::PlacedItem), so an `Item` itself stays
/// immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Item {
    id: u64,
    width: u32,
    height: u32,
    depth: u32,
}

impl Item {
    /// Creates an item from raw input dimensions, in any order.
    ///
    /// Returns [`Error::InvalidItem`] if any dimension is zero; the
    /// allocators assume strictly positive extents.
    pub fn new(id: u64, d1: u32, d2: u32, d3: u32) -> Result<Self> {
        if d1 == 0 || d2 == 0 || d3 == 0 {
            return Err(Error::InvalidItem(format!(
                "item {} has a non-positive dimension ({}, {}, {})",
                id, d1, d2, d3
            )));
        }
        let mut dims = [d1, d2, d3];
        dims.sort_unstable();
        Ok(Self {
            id,
            width: dims[1],
            height: dims[2],
            depth: dims[0],
        })
    }

    /// Returns the item id.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the x-extent in the default orientation.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the y-extent in the default orientation.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the z-extent. Never affected by rotation.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Returns the in-plane dimensions for one of the two orientations.
    pub fn footprint(&self, rotated: bool) -> (u32, u32) {
        if rotated {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }

    /// Footprint area, independent of orientation.
    pub fn footprint_area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}
