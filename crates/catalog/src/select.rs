//! Filter/selection layer: composable predicates over a catalog.
//!
//! Selection is a pure function of catalog + criteria: identical inputs
//! always yield an identically ordered result, which every downstream
//! consumer (analytics, stocktaking progress) relies on.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use stockmap_core::{ProductType, ValueObject, Zone};

use crate::catalog::Catalog;
use crate::location::Location;

/// Inclusive quantity bounds; either side may be left open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityRange {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl QuantityRange {
    pub fn new(min: impl Into<Option<i64>>, max: impl Into<Option<i64>>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }

    pub fn contains(&self, quantity: i64) -> bool {
        self.min.is_none_or(|min| quantity >= min) && self.max.is_none_or(|max| quantity <= max)
    }
}

impl ValueObject for QuantityRange {}

/// Stocktaking pre-filter prioritizing certain locations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusMode {
    #[default]
    All,
    /// Only locations with `quantity > threshold`.
    OverstockOnly { threshold: i64 },
    /// Only locations with `quantity == 0`.
    EmptyOnly,
}

/// Ordering of the selected locations. Every key tie-breaks by location id
/// so the result is a total, deterministic order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    LocationId,
    Zone,
    QuantityAsc,
    QuantityDesc,
}

/// Filter criteria, combined with logical AND.
///
/// Empty tag sets mean "all"; an omitted quantity range is unbounded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionCriteria {
    #[serde(default)]
    pub zones: BTreeSet<Zone>,
    #[serde(default)]
    pub product_types: BTreeSet<ProductType>,
    #[serde(default)]
    pub quantity_range: Option<QuantityRange>,
    #[serde(default)]
    pub focus: FocusMode,
    #[serde(default)]
    pub sort: SortKey,
}

impl SelectionCriteria {
    /// Select-all criteria, sorted by location id.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn matches(&self, location: &Location) -> bool {
        if !self.zones.is_empty() && !self.zones.contains(&location.zone) {
            return false;
        }
        if !self.product_types.is_empty() {
            match &location.product_type {
                Some(product_type) if self.product_types.contains(product_type) => {}
                _ => return false,
            }
        }
        if let Some(range) = &self.quantity_range {
            if !range.contains(location.quantity) {
                return false;
            }
        }
        match self.focus {
            FocusMode::All => true,
            FocusMode::OverstockOnly { threshold } => location.quantity > threshold,
            FocusMode::EmptyOnly => location.quantity == 0,
        }
    }
}

impl ValueObject for SelectionCriteria {}

/// Read-only projection of the catalog under the given criteria.
pub fn select<'a>(catalog: &'a Catalog, criteria: &SelectionCriteria) -> Vec<&'a Location> {
    let mut selected: Vec<&Location> = catalog.iter().filter(|l| criteria.matches(l)).collect();
    match criteria.sort {
        SortKey::LocationId => selected.sort_by(|a, b| a.id.cmp(&b.id)),
        SortKey::Zone => selected.sort_by(|a, b| a.zone.cmp(&b.zone).then_with(|| a.id.cmp(&b.id))),
        SortKey::QuantityAsc => {
            selected.sort_by(|a, b| a.quantity.cmp(&b.quantity).then_with(|| a.id.cmp(&b.id)))
        }
        SortKey::QuantityDesc => {
            selected.sort_by(|a, b| b.quantity.cmp(&a.quantity).then_with(|| a.id.cmp(&b.id)))
        }
    }
    selected
}
