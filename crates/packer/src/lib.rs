//! # Layerpack
//!
//! Layered 3D box packing for a square-footprint container of unbounded
//! height.
//!
//! The container is filled bottom-up as a stack of layers; each layer is
//! packed as an independent 2D rectangle problem (guillotine partition
//! tree or best-short-side free-rectangle allocator), then alternate
//! layers are mirrored in-plane and every layer is compacted down onto
//! the one below it before being emitted.

pub mod compact;
pub mod free_rect;
pub mod io;
pub mod layer;
pub mod packer;
pub mod sink;
pub mod tree;

// Re-exports
pub use compact::compact;
pub use free_rect::FreeRectAllocator;
pub use io::{CsvItemSource, SubmissionWriter};
pub use layer::Layer;
pub use packer::LayerPacker;
pub use sink::{CollectSink, LayerSnapshot, NullSink, PlacementSink};
pub use tree::PartitionTree;
pub use layerpack_core::{
    Allocator, Error, Item, Mode, PackConfig, PackSummary, PlacedItem, Placement2D,
    PlacementRecord, Result,
};
