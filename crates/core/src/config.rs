//! Packing configuration.

use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which 2D spatial allocator a layer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Allocator {
    /// Recursive guillotine-cut partition tree.
    #[default]
    Guillotine,
    /// Explicit free-rectangle set with Best Short Side Fit scoring.
    BestFit,
}

/// How items flow into a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mode {
    /// Each item is placed the moment it arrives.
    #[default]
    Online,
    /// Items are buffered per layer and packed in one pass, with the
    /// leading fraction re-sorted largest-first and leftovers carried into
    /// the next layer.
    Batch,
}

/// Configuration for a packing run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PackConfig {
    /// Side length of the square container footprint.
    pub container_side: u32,

    /// Item flow mode.
    pub mode: Mode,

    /// Spatial allocator used by each layer.
    pub allocator: Allocator,

    /// In batch mode, the leading fraction of a layer's buffer that is
    /// re-sorted by descending footprint area before packing. The
    /// remaining tail keeps arrival order.
    pub sort_fraction: f64,

    /// Maximum number of layers; the remaining stream is dropped once
    /// reached and the run is reported as truncated.
    pub max_layers: usize,

    /// Mirror every even-id layer about both in-plane axes before
    /// compaction, so seams between stacked layers do not align.
    pub reflect_alternate: bool,

    /// Lower each finalized layer's boxes onto their supports in the
    /// layer below.
    pub compact: bool,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            container_side: 1000,
            mode: Mode::default(),
            allocator: Allocator::default(),
            sort_fraction: 0.7,
            max_layers: 999_999,
            reflect_alternate: true,
            compact: true,
        }
    }
}

impl PackConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the container side length.
    pub fn with_container_side(mut self, side: u32) -> Self {
        self.container_side = side;
        self
    }

    /// Sets the item flow mode.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the layer allocator.
    pub fn with_allocator(mut self, allocator: Allocator) -> Self {
        self.allocator = allocator;
        self
    }

    /// Sets the batch sort fraction.
    pub fn with_sort_fraction(mut self, fraction: f64) -> Self {
        self.sort_fraction = fraction;
        self
    }

    /// Sets the maximum layer count.
    pub fn with_max_layers(mut self, layers: usize) -> Self {
        self.max_layers = layers;
        self
    }

    /// Enables or disables alternate-layer reflection.
    pub fn with_reflect_alternate(mut self, enabled: bool) -> Self {
        self.reflect_alternate = enabled;
        self
    }

    /// Enables or disables inter-layer compaction.
    pub fn with_compact(mut self, enabled: bool) -> Self {
        self.compact = enabled;
        self
    }

    /// Container footprint area.
    pub fn footprint_capacity(&self) -> u64 {
        u64::from(self.container_side) * u64::from(self.container_side)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.container_side == 0 {
            return Err(Error::Config(
                "container side must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.sort_fraction) {
            return Err(Error::Config(format!(
                "sort fraction must lie in [0, 1], got {}",
                self.sort_fraction
            )));
        }
        if self.max_layers == 0 {
            return Err(Error::Config("max layers must be at least 1".to_string()));
        }
        Ok(())
    }
}
