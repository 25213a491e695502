//! Free-rectangle allocator with Best Short Side Fit scoring.
//!
//! The alternative to the partition tree: free space is tracked as an
//! explicit set of maximal rectangles. Placement scans every free
//! rectangle in both item orientations and keeps the candidate with the
//! smallest short-side leftover, breaking ties on the long side. After a
//! commit, every overlapped free rectangle is replaced by its up-to-four
//! residuals and the set is pruned of contained entries.

use layerpack_core::{Item, Placement2D};

/// An axis-aligned free region, 1-based inclusive coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    fn x2(&self) -> u32 {
        self.x + self.width - 1
    }

    fn y2(&self) -> u32 {
        self.y + self.height - 1
    }

    fn overlaps(&self, other: &Rect) -> bool {
        self.x <= other.x2() && other.x <= self.x2() && self.y <= other.y2() && other.y <= self.y2()
    }

    fn contains(&self, other: &Rect) -> bool {
        self.x <= other.x && self.y <= other.y && self.x2() >= other.x2() && self.y2() >= other.y2()
    }
}

/// Explicit free-rectangle allocator over a square footprint.
#[derive(Debug)]
pub struct FreeRectAllocator {
    free: Vec<Rect>,
}

impl FreeRectAllocator {
    /// Creates an allocator whose free set is the full footprint.
    pub fn new(side: u32) -> Self {
        Self {
            free: vec![Rect {
                x: 1,
                y: 1,
                width: side,
                height: side,
            }],
        }
    }

    /// Number of free rectangles currently tracked.
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Tries to place an item using Best Short Side Fit with a Best Long
    /// Side Fit tie-break, over both orientations of the item. `None`
    /// means no free rectangle admits the item either way.
    pub fn try_place(&mut self, item: &Item) -> Option<Placement2D> {
        let mut best: Option<(u32, u32, Rect, bool)> = None;

        for rect in &self.free {
            for rotated in [false, true] {
                let (w, h) = item.footprint(rotated);
                if rect.width < w || rect.height < h {
                    continue;
                }
                let leftover_horiz = rect.width - w;
                let leftover_vert = rect.height - h;
                let short_side = leftover_horiz.min(leftover_vert);
                let long_side = leftover_horiz.max(leftover_vert);

                let better = match best {
                    None => true,
                    Some((bs, bl, _, _)) => short_side < bs || (short_side == bs && long_side < bl),
                };
                if better {
                    let used = Rect {
                        x: rect.x,
                        y: rect.y,
                        width: w,
                        height: h,
                    };
                    best = Some((short_side, long_side, used, rotated));
                }
            }
        }

        let (_, _, used, rotated) = best?;
        self.split_overlapping(used);
        self.prune();

        Some(Placement2D {
            x: used.x,
            y: used.y,
            width: used.width,
            height: used.height,
            rotated,
        })
    }

    /// Replaces every free rectangle overlapping `used` with its residual
    /// parts to the left, right, below and above the used region. Each
    /// residual spans the full extent of its parent along the other axis,
    /// so residuals may overlap one another; pruning removes the redundant
    /// ones.
    fn split_overlapping(&mut self, used: Rect) {
        let old = std::mem::take(&mut self.free);
        let mut next = Vec::with_capacity(old.len() + 4);

        for rect in old {
            if !rect.overlaps(&used) {
                next.push(rect);
                continue;
            }
            if used.x > rect.x {
                next.push(Rect {
                    x: rect.x,
                    y: rect.y,
                    width: used.x - rect.x,
                    height: rect.height,
                });
            }
            if used.x2() < rect.x2() {
                next.push(Rect {
                    x: used.x2() + 1,
                    y: rect.y,
                    width: rect.x2() - used.x2(),
                    height: rect.height,
                });
            }
            if used.y > rect.y {
                next.push(Rect {
                    x: rect.x,
                    y: rect.y,
                    width: rect.width,
                    height: used.y - rect.y,
                });
            }
            if used.y2() < rect.y2() {
                next.push(Rect {
                    x: rect.x,
                    y: used.y2() + 1,
                    width: rect.width,
                    height: rect.y2() - used.y2(),
                });
            }
        }

        self.free = next;
    }

    /// Removes every free rectangle fully contained in another. Quadratic
    /// in the free count, run once per placed item.
    fn prune(&mut self) {
        let mut i = 0;
        while i < self.free.len() {
            let mut removed = false;
            let mut j = i + 1;
            while j < self.free.len() {
                if self.free[j].contains(&self.free[i]) {
                    self.free.swap_remove(i);
                    removed = true;
                    break;
                }
                if self.free[i].contains(&self.free[j]) {
                    self.free.swap_remove(j);
                } else {
                    j += 1;
                }
            }
            if !removed {
                i += 1;
            }
        }
    }
}
