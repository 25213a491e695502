//! Pack run summary.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Summary of a completed packing run.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PackSummary {
    /// Number of layers emitted to the sink.
    pub layers_emitted: usize,

    /// Number of items placed across all emitted layers.
    pub items_placed: u64,

    /// Number of input items dropped (capacity exhausted or unplaceable).
    pub items_dropped: u64,

    /// Highest occupied z coordinate across the whole run.
    pub max_z: u32,

    /// True if the layer cap was reached and the rest of the stream was
    /// dropped.
    pub truncated: bool,

    /// Computation time in milliseconds.
    pub computation_time_ms: u64,
}

impl PackSummary {
    /// Returns true if every input item was placed.
    pub fn all_placed(&self) -> bool {
        self.items_dropped == 0
    }

    /// Total number of items consumed from the source.
    pub fn items_seen(&self) -> u64 {
        self.items_placed + self.items_dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let summary = PackSummary {
            layers_emitted: 3,
            items_placed: 10,
            items_dropped: 2,
            max_z: 42,
            truncated: true,
            computation_time_ms: 5,
        };
        assert!(!summary.all_placed());
        assert_eq!(summary.items_seen(), 12);
    }
}
