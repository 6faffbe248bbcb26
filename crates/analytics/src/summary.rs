use serde::{Deserialize, Serialize};

use stockmap_catalog::Location;

/// Headline stock-health counters for a (possibly filtered) set of
/// locations. `filled + empty == total` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub total_locations: usize,
    pub filled_locations: usize,
    pub empty_locations: usize,
    pub total_quantity: i64,
    /// `filled / total`; `0.0` for an empty input, never a division fault.
    pub utilization: f64,
}

pub fn summary_metrics<'a>(locations: impl IntoIterator<Item = &'a Location>) -> SummaryMetrics {
    let mut total = 0usize;
    let mut filled = 0usize;
    let mut quantity = 0i64;
    for location in locations {
        total += 1;
        if location.is_filled() {
            filled += 1;
        }
        quantity += location.quantity;
    }

    let utilization = if total == 0 {
        0.0
    } else {
        filled as f64 / total as f64
    };

    SummaryMetrics {
        total_locations: total,
        filled_locations: filled,
        empty_locations: total - filled,
        total_quantity: quantity,
        utilization,
    }
}
