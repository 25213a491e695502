//! Error types for layerpack.

use thiserror::Error;

/// Result type alias for layerpack operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while packing.
///
/// Allocator rejection is deliberately absent: failing to fit a box in the
/// current layer is the normal rollover signal, not an error, and is
/// reported as `None` by the allocators.
#[derive(Debug, Error)]
pub enum Error {
    /// An item with a non-positive dimension reached the packer.
    #[error("Invalid item: {0}")]
    InvalidItem(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error from a source or sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV record in the item stream or submission output.
    #[error("CSV error: {0}")]
    Csv(String),
}
