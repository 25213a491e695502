//! Placement emission.
//!
//! The packer streams finalized layers to a caller-supplied sink, one
//! call per layer plus one for the trailing unflushed layer, and never
//! mutates a layer after emitting it. Sinks must therefore accept
//! incremental writes.

use layerpack_core::{PlacedItem, Result};

use crate::layer::Layer;

/// Receiver for finalized layers.
pub trait PlacementSink {
    /// Accepts one finalized, immutable layer.
    fn emit_layer(&mut self, layer: &Layer) -> Result<()>;
}

/// Sink that discards everything; used for the measuring pass.
#[derive(Debug, Default)]
pub struct NullSink;

impl PlacementSink for NullSink {
    fn emit_layer(&mut self, _layer: &Layer) -> Result<()> {
        Ok(())
    }
}

/// A snapshot of an emitted layer, kept by [`CollectSink`].
#[derive(Debug, Clone)]
pub struct LayerSnapshot {
    /// Layer id, 1-based.
    pub id: usize,
    /// Base z of the layer.
    pub z_base: u32,
    /// Highest occupied z within the layer.
    pub z_max: u32,
    /// The layer's boxes, in id order.
    pub items: Vec<PlacedItem>,
}

/// Sink that keeps a snapshot of every emitted layer in memory.
#[derive(Debug, Default)]
pub struct CollectSink {
    /// Emitted layers, in emission order.
    pub layers: Vec<LayerSnapshot>,
}

impl CollectSink {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// All collected items across layers, in emission order.
    pub fn all_items(&self) -> impl Iterator<Item = &PlacedItem> {
        self.layers.iter().flat_map(|l| l.items.iter())
    }
}

impl PlacementSink for CollectSink {
    fn emit_layer(&mut self, layer: &Layer) -> Result<()> {
        self.layers.push(LayerSnapshot {
            id: layer.id(),
            z_base: layer.z_base(),
            z_max: layer.z_max(),
            items: layer.items().to_vec(),
        });
        Ok(())
    }
}
