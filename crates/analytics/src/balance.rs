//! Balance statistics: dispersion of stock within each group.
//!
//! The coefficient of variation (population standard deviation over mean)
//! surfaces zones or product types with uneven stock even when the mean
//! looks acceptable. Conventions: a group of size 1 has CV 0; a group with
//! mean 0 has no defined CV and reports `None`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use stockmap_catalog::Location;

use crate::grouping::Dimension;

/// Dispersion summary for one group along a dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceStat {
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation of quantity within the group.
    pub std_dev: f64,
    /// `std_dev / mean`; `None` when the mean is 0.
    pub coefficient_of_variation: Option<f64>,
}

pub fn balance_statistics<'a>(
    locations: impl IntoIterator<Item = &'a Location>,
    dimension: Dimension,
) -> BTreeMap<String, BalanceStat> {
    let mut quantities: BTreeMap<String, Vec<i64>> = BTreeMap::new();
    for location in locations {
        quantities
            .entry(dimension.label_of(location).to_string())
            .or_default()
            .push(location.quantity);
    }

    quantities
        .into_iter()
        .map(|(label, group)| {
            let count = group.len();
            let mean = group.iter().sum::<i64>() as f64 / count as f64;
            let variance = group
                .iter()
                .map(|&q| {
                    let delta = q as f64 - mean;
                    delta * delta
                })
                .sum::<f64>()
                / count as f64;
            let std_dev = variance.sqrt();
            let coefficient_of_variation = if mean == 0.0 {
                None
            } else {
                Some(std_dev / mean)
            };
            (
                label,
                BalanceStat {
                    count,
                    mean,
                    std_dev,
                    coefficient_of_variation,
                },
            )
        })
        .collect()
}
