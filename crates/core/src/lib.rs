//! # Layerpack Core
//!
//! Core types for the layerpack layered box packing engine.
//!
//! This crate holds the data model shared by the allocators and the
//! orchestrator: items, placements, emitted records, configuration and
//! run summaries. It contains no packing logic.
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod config;
pub mod error;
pub mod item;
pub mod placement;
pub mod result;

// Re-exports
pub use config::{Allocator, Mode, PackConfig};
pub use error::{Error, Result};
pub use item::Item;
pub use placement::{PlacedItem, Placement2D, PlacementRecord};
pub use result::PackSummary;
