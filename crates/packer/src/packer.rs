//! The packing orchestrator.
//!
//! Drives the incoming item stream through layers in arrival order,
//! decides when a layer is full, runs the finalize pipeline
//! (batch pack, reflect, compact) and emits each finished layer to the
//! sink.

use std::time::Instant;

use layerpack_core::{Item, Mode, PackConfig, PackSummary, Result};

use crate::compact::compact;
use crate::layer::Layer;
use crate::sink::{NullSink, PlacementSink};

/// Layered box packer.
///
/// Fully sequential: items are consumed strictly in input order and every
/// operation is a bounded, synchronous computation over at most one
/// layer's worth of boxes.
#[derive(Debug)]
pub struct LayerPacker {
    config: PackConfig,
}

impl LayerPacker {
    /// Creates a packer with the given configuration.
    pub fn new(config: PackConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Creates a packer with default configuration.
    pub fn default_config() -> Self {
        Self {
            config: PackConfig::default(),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &PackConfig {
        &self.config
    }

    /// Runs a measuring pass over the stream and returns the final
    /// occupied height. Emission inverts z against this value, so a
    /// writing pass is normally preceded by a measuring pass over the
    /// same input.
    pub fn measure<I>(&self, items: I) -> Result<u32>
    where
        I: IntoIterator<Item = Result<Item>>,
    {
        let mut sink = NullSink;
        Ok(self.pack(items, &mut sink)?.max_z)
    }

    /// Packs the stream, emitting every finalized layer to `sink`.
    ///
    /// Input validation failures abort the run; allocator rejections are
    /// recovered internally by layer rollover; reaching the layer cap
    /// drops the remaining stream and marks the summary as truncated.
    pub fn pack<I, S>(&self, items: I, sink: &mut S) -> Result<PackSummary>
    where
        I: IntoIterator<Item = Result<Item>>,
        S: PlacementSink,
    {
        let start = Instant::now();
        let cfg = &self.config;

        let mut summary = PackSummary::default();
        let mut prev: Option<Layer> = None;
        let mut layer = Layer::new(1, 1, cfg.container_side, cfg.allocator);
        let mut truncated = false;

        for next in items {
            let item = next?;
            if truncated {
                summary.items_dropped += 1;
                continue;
            }

            let Err(item) = self.admit(&mut layer, item) else {
                continue;
            };

            // The current layer has no room: finalize it and roll over.
            let leftovers = self.finalize(&mut layer, prev.as_ref(), sink, &mut summary)?;

            if layer.id() >= cfg.max_layers {
                log::warn!(
                    "layer cap {} reached; dropping the remaining input stream",
                    cfg.max_layers
                );
                summary.items_dropped += 1 + leftovers.len() as u64;
                truncated = true;
                continue;
            }

            let opened = Layer::new(
                layer.id() + 1,
                layer.z_max() + 1,
                cfg.container_side,
                cfg.allocator,
            );
            prev = Some(std::mem::replace(&mut layer, opened));
            layer.seed(leftovers);

            if let Err(item) = self.admit(&mut layer, item) {
                log::warn!("item {} does not fit an empty layer; dropping it", item.id());
                summary.items_dropped += 1;
            }
        }

        if !truncated {
            // Trailing, unflushed layer, then the leftover cascade.
            while !layer.is_empty() {
                let leftovers = self.finalize(&mut layer, prev.as_ref(), sink, &mut summary)?;
                let placed_any = !layer.items().is_empty();

                if leftovers.is_empty() {
                    break;
                }
                if layer.id() >= cfg.max_layers {
                    log::warn!(
                        "layer cap {} reached; dropping {} leftover items",
                        cfg.max_layers,
                        leftovers.len()
                    );
                    summary.items_dropped += leftovers.len() as u64;
                    summary.truncated = true;
                    break;
                }
                if !placed_any {
                    // A seeded layer that placed nothing cannot make
                    // progress; its items are unplaceable.
                    log::warn!("dropping {} unplaceable leftover items", leftovers.len());
                    summary.items_dropped += leftovers.len() as u64;
                    break;
                }

                let opened = Layer::new(
                    layer.id() + 1,
                    layer.z_max() + 1,
                    cfg.container_side,
                    cfg.allocator,
                );
                prev = Some(std::mem::replace(&mut layer, opened));
                layer.seed(leftovers);
            }
        } else {
            summary.truncated = true;
        }

        summary.computation_time_ms = start.elapsed().as_millis() as u64;
        Ok(summary)
    }

    /// Routes an item into the open layer according to the flow mode.
    fn admit(&self, layer: &mut Layer, item: Item) -> std::result::Result<(), Item> {
        match self.config.mode {
            Mode::Online => layer.try_insert(item),
            Mode::Batch => layer.try_buffer(item),
        }
    }

    /// Finalize pipeline: batch pack, reflect every even layer, compact
    /// against the previous layer, emit. Returns the batch leftovers.
    fn finalize<S: PlacementSink>(
        &self,
        layer: &mut Layer,
        prev: Option<&Layer>,
        sink: &mut S,
        summary: &mut PackSummary,
    ) -> Result<Vec<Item>> {
        let cfg = &self.config;

        let leftovers = layer.pack_pending(cfg.sort_fraction);

        if cfg.reflect_alternate && layer.id() % 2 == 0 {
            layer.reflect();
        }
        if cfg.compact {
            if let Some(prev) = prev {
                compact(layer, prev);
            }
        }

        log::debug!(
            "layer {}: {} items, z {}..={}, {} leftover",
            layer.id(),
            layer.items().len(),
            layer.z_base(),
            layer.z_max(),
            leftovers.len()
        );

        if !layer.items().is_empty() {
            sink.emit_layer(layer)?;
            summary.layers_emitted += 1;
            summary.items_placed += layer.items().len() as u64;
            summary.max_z = summary.max_z.max(layer.z_max());
        }

        Ok(leftovers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::CollectSink;
    use layerpack_core::Allocator;

    fn items(list: &[(u64, u32, u32, u32)]) -> Vec<Result<Item>> {
        list.iter()
            .map(|&(id, d1, d2, d3)| Item::new(id, d1, d2, d3))
            .collect()
    }

    #[test]
    fn test_rollover_opens_layer_above_previous_max() {
        let packer = LayerPacker::default_config();
        let mut sink = CollectSink::new();

        let summary = packer
            .pack(
                items(&[(1, 500, 500, 10), (2, 500, 500, 10), (3, 1000, 1000, 10)]),
                &mut sink,
            )
            .unwrap();

        assert_eq!(summary.layers_emitted, 2);
        assert_eq!(summary.items_placed, 3);
        assert!(summary.all_placed());
        assert_eq!(summary.max_z, 20);

        let first = &sink.layers[0];
        assert_eq!(first.items.len(), 2);
        assert!(!first.items[0].footprint_overlaps(&first.items[1]));
        assert_eq!(first.z_max, 10);

        let second = &sink.layers[1];
        assert_eq!(second.z_base, 11);
        assert_eq!(second.items.len(), 1);
        assert_eq!(second.items[0].id, 3);
    }

    #[test]
    fn test_batch_mode_same_scenario() {
        let config = PackConfig::new().with_mode(Mode::Batch);
        let packer = LayerPacker::new(config).unwrap();
        let mut sink = CollectSink::new();

        let summary = packer
            .pack(
                items(&[(1, 500, 500, 10), (2, 500, 500, 10), (3, 1000, 1000, 10)]),
                &mut sink,
            )
            .unwrap();

        assert_eq!(summary.layers_emitted, 2);
        assert!(summary.all_placed());
        assert_eq!(sink.layers[1].z_base, 11);
    }

    #[test]
    fn test_truncation_is_surfaced() {
        let config = PackConfig::new()
            .with_container_side(10)
            .with_max_layers(1);
        let packer = LayerPacker::new(config).unwrap();
        let mut sink = CollectSink::new();

        let summary = packer
            .pack(
                items(&[
                    (1, 10, 10, 2),
                    (2, 10, 10, 2),
                    (3, 10, 10, 2),
                    (4, 10, 10, 2),
                ]),
                &mut sink,
            )
            .unwrap();

        assert!(summary.truncated);
        assert_eq!(summary.layers_emitted, 1);
        assert_eq!(summary.items_placed, 1);
        assert_eq!(summary.items_dropped, 3);
        assert_eq!(summary.items_seen(), 4);
    }

    #[test]
    fn test_unplaceable_item_dropped_with_run_intact() {
        let config = PackConfig::new().with_container_side(10);
        let packer = LayerPacker::new(config).unwrap();
        let mut sink = CollectSink::new();

        // Item 2 exceeds the footprint in both orientations.
        let summary = packer
            .pack(
                items(&[(1, 10, 10, 2), (2, 11, 11, 2), (3, 10, 10, 2)]),
                &mut sink,
            )
            .unwrap();

        assert_eq!(summary.items_dropped, 1);
        assert_eq!(summary.items_placed, 2);
        assert!(!summary.truncated);
    }

    #[test]
    fn test_invalid_item_aborts() {
        let packer = LayerPacker::default_config();
        let mut sink = CollectSink::new();

        let stream = vec![Item::new(1, 5, 5, 5), Item::new(2, 0, 5, 5)];
        assert!(packer.pack(stream, &mut sink).is_err());
    }

    #[test]
    fn test_measure_matches_pack() {
        let packer = LayerPacker::default_config();
        let mut sink = CollectSink::new();

        let list = [(1u64, 500u32, 500u32, 7u32), (2, 500, 500, 9), (3, 900, 900, 4)];
        let max_z = packer.measure(items(&list)).unwrap();
        let summary = packer.pack(items(&list), &mut sink).unwrap();

        assert_eq!(max_z, summary.max_z);
    }

    #[test]
    fn test_empty_stream_emits_nothing() {
        let packer = LayerPacker::default_config();
        let mut sink = CollectSink::new();
        let summary = packer.pack(Vec::new(), &mut sink).unwrap();

        assert_eq!(summary.layers_emitted, 0);
        assert_eq!(summary.items_seen(), 0);
        assert!(sink.layers.is_empty());
    }

    #[test]
    fn test_best_fit_batch_end_to_end() {
        let config = PackConfig::new()
            .with_container_side(100)
            .with_mode(Mode::Batch)
            .with_allocator(Allocator::BestFit);
        let packer = LayerPacker::new(config).unwrap();
        let mut sink = CollectSink::new();

        let list: Vec<(u64, u32, u32, u32)> =
            (0..40).map(|i| (i, 10 + (i as u32 % 4) * 5, 20, 5)).collect();
        let summary = packer.pack(items(&list), &mut sink).unwrap();

        assert!(summary.all_placed());
        for layer in &sink.layers {
            for (i, a) in layer.items.iter().enumerate() {
                for b in layer.items.iter().skip(i + 1) {
                    assert!(!a.footprint_overlaps(b));
                }
            }
        }
    }
}
