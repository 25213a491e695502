//! Guillotine-cut binary partition tree.
//!
//! The tree indexes one layer's square footprint. Every internal node has
//! exactly two children produced by a single straight cut, so the children
//! partition the parent with no gap and no overlap. A box is placed by a
//! depth-first search for the first free leaf large enough in both axes;
//! oversized leaves are split so that the occupied leaf always matches the
//! box exactly.
//!
//! Nodes live in an arena and refer to their children by index, so the
//! whole index is dropped with its layer.

use layerpack_core::{Item, Placement2D};

/// One region of the footprint.
#[derive(Debug, Clone, Copy)]
struct Node {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    /// Indices of the two children, present only on internal nodes.
    children: Option<[usize; 2]>,
    /// Occupying item id, present only on leaves.
    occupant: Option<u64>,
}

impl Node {
    fn region(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            children: None,
            occupant: None,
        }
    }
}

/// Guillotine-cut spatial index over a square footprint.
#[derive(Debug)]
pub struct PartitionTree {
    nodes: Vec<Node>,
}

impl PartitionTree {
    /// Creates a tree whose root covers the full `side` x `side`
    /// footprint, anchored at (1, 1).
    pub fn new(side: u32) -> Self {
        Self {
            nodes: vec![Node::region(1, 1, side, side)],
        }
    }

    /// Tries to place an item, attempting the default orientation first
    /// and the rotated one if that fails. At most two orientations are
    /// ever tried; `None` means the layer has no room for this item.
    pub fn try_place(&mut self, item: &Item) -> Option<Placement2D> {
        for rotated in [false, true] {
            let (w, h) = item.footprint(rotated);
            if let Some((x, y)) = self.insert(0, w, h, item.id()) {
                return Some(Placement2D {
                    x,
                    y,
                    width: w,
                    height: h,
                    rotated,
                });
            }
        }
        None
    }

    /// Inserts a `w` x `h` rectangle for `id`, searching from `idx`.
    /// Returns the anchor of the occupied leaf.
    fn insert(&mut self, idx: usize, w: u32, h: u32, id: u64) -> Option<(u32, u32)> {
        if let Some([first, second]) = self.nodes[idx].children {
            // DFS, always into the first child before the second.
            return self
                .insert(first, w, h, id)
                .or_else(|| self.insert(second, w, h, id));
        }

        let node = self.nodes[idx];
        if node.occupant.is_some() {
            return None;
        }
        if node.width < w || node.height < h {
            return None;
        }
        if node.width == w && node.height == h {
            self.nodes[idx].occupant = Some(id);
            return Some((node.x, node.y));
        }

        // Split along the axis with the larger leftover, so the second
        // child keeps the widest usable remainder. The first child takes
        // the box's extent at the parent's anchor.
        let dw = node.width - w;
        let dh = node.height - h;
        let (a, b) = if dw > dh {
            (
                Node::region(node.x, node.y, w, node.height),
                Node::region(node.x + w, node.y, dw, node.height),
            )
        } else {
            (
                Node::region(node.x, node.y, node.width, h),
                Node::region(node.x, node.y + h, node.width, dh),
            )
        };

        let first = self.push(a);
        let second = self.push(b);
        self.nodes[idx].children = Some([first, second]);

        self.insert(first, w, h, id)
    }

    fn push(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Inserts raw dimensions without the orientation retry. Exposed for
    /// the free-standing invariant tests.
    #[cfg(test)]
    fn insert_dims(&mut self, w: u32, h: u32, id: u64) -> Option<(u32, u32)> {
        self.insert(0, w, h, id)
    }
}
