use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use stockmap_catalog::Location;

/// Group label used for locations that were never assigned a product.
pub const UNASSIGNED_LABEL: &str = "(unassigned)";

/// Categorical axis a grouping runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Zone,
    ProductType,
    StorageType,
}

impl Dimension {
    /// The group label of a location along this axis.
    pub fn label_of(self, location: &Location) -> &str {
        match self {
            Dimension::Zone => location.zone.as_str(),
            Dimension::ProductType => location
                .product_type
                .as_ref()
                .map_or(UNASSIGNED_LABEL, |p| p.as_str()),
            Dimension::StorageType => location.storage_type.as_str(),
        }
    }
}

/// Per-group aggregate. Groups only exist with at least one member, so the
/// average is always defined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupMetrics {
    pub count: usize,
    pub total_quantity: i64,
    pub avg_quantity: f64,
}

/// Aggregate locations along a dimension. The map is keyed by tag label in
/// lexicographic order, so derived tables are deterministic.
pub fn group_by<'a>(
    locations: impl IntoIterator<Item = &'a Location>,
    dimension: Dimension,
) -> BTreeMap<String, GroupMetrics> {
    let mut groups: BTreeMap<String, (usize, i64)> = BTreeMap::new();
    for location in locations {
        let entry = groups
            .entry(dimension.label_of(location).to_string())
            .or_insert((0, 0));
        entry.0 += 1;
        entry.1 += location.quantity;
    }

    groups
        .into_iter()
        .map(|(label, (count, total))| {
            (
                label,
                GroupMetrics {
                    count,
                    total_quantity: total,
                    avg_quantity: total as f64 / count as f64,
                },
            )
        })
        .collect()
}
