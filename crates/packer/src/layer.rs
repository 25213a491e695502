//! Layer accumulation: one horizontal slab of the container, packed as an
//! independent 2D problem.

use layerpack_core::{Allocator, Item, PlacedItem, Placement2D, PlacementRecord};

use crate::free_rect::FreeRectAllocator;
use crate::tree::PartitionTree;

/// The spatial index owned by one layer. Its lifetime equals the layer's;
/// no index is ever shared across layers.
#[derive(Debug)]
enum SpatialIndex {
    Tree(PartitionTree),
    FreeRects(FreeRectAllocator),
}

impl SpatialIndex {
    fn new(kind: Allocator, side: u32) -> Self {
        match kind {
            Allocator::Guillotine => Self::Tree(PartitionTree::new(side)),
            Allocator::BestFit => Self::FreeRects(FreeRectAllocator::new(side)),
        }
    }

    fn try_place(&mut self, item: &Item) -> Option<Placement2D> {
        match self {
            Self::Tree(tree) => tree.try_place(item),
            Self::FreeRects(rects) => rects.try_place(item),
        }
    }
}

/// One layer of the container: a base z, the boxes placed in it, and the
/// spatial index over its footprint.
#[derive(Debug)]
pub struct Layer {
    pub(crate) id: usize,
    pub(crate) side: u32,
    pub(crate) z_base: u32,
    pub(crate) z_max: u32,
    pub(crate) items: Vec<PlacedItem>,
    /// Buffered, not-yet-placed items (batch mode only).
    pending: Vec<Item>,
    /// Footprint area accounted to this layer, for the soft budget.
    used_area: u64,
    index: SpatialIndex,
}

impl Layer {
    /// Opens a layer with the given 1-based id and base z.
    pub fn new(id: usize, z_base: u32, side: u32, allocator: Allocator) -> Self {
        Self {
            id,
            side,
            z_base,
            z_max: z_base,
            items: Vec::new(),
            pending: Vec::new(),
            used_area: 0,
            index: SpatialIndex::new(allocator, side),
        }
    }

    /// Layer id, 1-based.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Base z of the layer (inclusive lower bound).
    pub fn z_base(&self) -> u32 {
        self.z_base
    }

    /// Highest occupied z coordinate within the layer.
    pub fn z_max(&self) -> u32 {
        self.z_max
    }

    /// Boxes placed in this layer so far.
    pub fn items(&self) -> &[PlacedItem] {
        &self.items
    }

    /// True if the layer holds neither placed nor buffered items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.pending.is_empty()
    }

    /// Soft area budget: an item is only attempted while the accounted
    /// area plus the item's stays within the footprint capacity, so an
    /// exact fill is still admitted. The budget is a cheap pre-filter,
    /// not a fit guarantee: the allocator can reject earlier due to
    /// fragmentation.
    fn admits(&self, item: &Item) -> bool {
        let capacity = u64::from(self.side) * u64::from(self.side);
        self.used_area + item.footprint_area() <= capacity
    }

    /// Places an item immediately (online mode). On rejection the item is
    /// handed back unchanged, signalling layer rollover.
    pub fn try_insert(&mut self, item: Item) -> Result<(), Item> {
        if !self.admits(&item) {
            return Err(item);
        }
        match self.index.try_place(&item) {
            Some(placement) => {
                self.used_area += item.footprint_area();
                self.commit(&item, placement);
                Ok(())
            }
            None => Err(item),
        }
    }

    /// Buffers an item for a later batch pack. Only the area budget is
    /// consulted here; geometry is checked in [`Layer::pack_pending`].
    pub fn try_buffer(&mut self, item: Item) -> Result<(), Item> {
        if !self.admits(&item) {
            return Err(item);
        }
        self.used_area += item.footprint_area();
        self.pending.push(item);
        Ok(())
    }

    /// Seeds a fresh layer with the previous layer's batch leftovers.
    /// Seeded items bypass the budget; their area is accounted.
    pub fn seed(&mut self, leftovers: Vec<Item>) {
        for item in &leftovers {
            self.used_area += item.footprint_area();
        }
        self.pending.extend(leftovers);
    }

    /// Packs the buffered batch: the leading `sort_fraction` of the buffer
    /// is re-sorted by descending footprint area (stable, so equal areas
    /// keep arrival order) and packed first, the tail follows in arrival
    /// order. The first rejection marks the layer full; every remaining
    /// item becomes a leftover. Placed items and leftovers both end up
    /// sorted by id.
    pub fn pack_pending(&mut self, sort_fraction: f64) -> Vec<Item> {
        let mut ordered = std::mem::take(&mut self.pending);
        let head = (ordered.len() as f64 * sort_fraction) as usize;
        ordered[..head].sort_by(|a, b| b.footprint_area().cmp(&a.footprint_area()));

        let mut leftovers = Vec::new();
        let mut full = false;
        for item in ordered {
            if full {
                leftovers.push(item);
                continue;
            }
            match self.index.try_place(&item) {
                Some(placement) => self.commit(&item, placement),
                None => {
                    full = true;
                    leftovers.push(item);
                }
            }
        }

        self.items.sort_by_key(|p| p.id);
        leftovers.sort_by_key(|i| i.id());
        for item in &leftovers {
            self.used_area -= item.footprint_area();
        }
        leftovers
    }

    /// Mirrors the layer's in-plane coordinates about both axes, so seams
    /// between stacked layers do not align. The transform is its own
    /// inverse.
    pub fn reflect(&mut self) {
        for p in &mut self.items {
            p.x = 1 + self.side - (p.x + p.width - 1);
            p.y = 1 + self.side - (p.y + p.height - 1);
        }
    }

    /// Builds the emission records, one per box in id order, with z
    /// inverted against the run-wide `max_z`.
    pub fn records(&self, max_z: u32) -> Vec<PlacementRecord> {
        self.items
            .iter()
            .map(|p| PlacementRecord::new(p, max_z))
            .collect()
    }

    fn commit(&mut self, item: &Item, placement: Placement2D) {
        let placed = PlacedItem {
            id: item.id(),
            x: placement.x,
            y: placement.y,
            z: self.z_base,
            width: placement.width,
            height: placement.height,
            depth: item.depth(),
            rotated: placement.rotated,
        };
        self.z_max = self.z_max.max(placed.z2());
        self.items.push(placed);
    }
}
