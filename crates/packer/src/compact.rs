//! Inter-layer compaction: lowering a layer's boxes onto whatever
//! supports them in the layer below.

use layerpack_core::PlacedItem;

use crate::layer::Layer;

/// Lowers each of `layer`'s boxes onto its support in `prev`.
///
/// Boxes are processed strictly in ascending id order. For each box the
/// previous layer is scanned by descending top z (ties broken by
/// ascending id, keeping the scan a total order) for the first box whose
/// footprint overlaps; if that support's top sits strictly below the
/// current box's bottom, the box drops so it rests directly on the
/// support, bounded below by a running floor that starts at
/// `prev.z_base - 1` and never decreases. This is a single pass, not a
/// fixed point: a box is examined once and is not re-checked against
/// boxes of its own layer beyond the monotone floor.
///
/// The layer's `z_max` is recomputed along the way.
pub fn compact(layer: &mut Layer, prev: &Layer) {
    let mut supports: Vec<&PlacedItem> = prev.items().iter().collect();
    supports.sort_by(|a, b| b.z2().cmp(&a.z2()).then_with(|| a.id.cmp(&b.id)));

    let mut z_min = prev.z_base() - 1;
    layer.z_max = layer.z_base;

    for item in layer.items.iter_mut() {
        if let Some(support) = supports.iter().find(|s| s.footprint_overlaps(item)) {
            // First free z above the support's top cell.
            let rest = support.z + support.depth;
            if item.z > rest && rest >= z_min {
                item.z = rest;
            }
        }
        z_min = z_min.max(item.z);
        layer.z_max = layer.z_max.max(item.z2());
    }
}
