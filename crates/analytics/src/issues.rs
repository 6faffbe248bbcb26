//! Threshold-based stock issue classification.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use stockmap_catalog::Location;
use stockmap_core::{DomainError, DomainResult, LocationId, ValueObject};

/// Caller-supplied understock/overstock boundaries.
///
/// The defaults (5 / 15) are the documented sane fallbacks; every call
/// accepts an override. `overstock` must be at least `understock`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockThresholds {
    pub understock: i64,
    pub overstock: i64,
}

impl Default for StockThresholds {
    fn default() -> Self {
        Self {
            understock: 5,
            overstock: 15,
        }
    }
}

impl StockThresholds {
    pub fn new(understock: i64, overstock: i64) -> DomainResult<Self> {
        let thresholds = Self {
            understock,
            overstock,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.understock < 0 || self.overstock < 0 {
            return Err(DomainError::invalid_threshold(format!(
                "thresholds must be non-negative (understock {}, overstock {})",
                self.understock, self.overstock
            )));
        }
        if self.overstock < self.understock {
            return Err(DomainError::invalid_threshold(format!(
                "overstock {} below understock {}",
                self.overstock, self.understock
            )));
        }
        Ok(())
    }
}

impl ValueObject for StockThresholds {}

/// Stock condition of a single location relative to the thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockIssue {
    Understocked,
    Overstocked,
}

/// Classified issue lists, in selection order, plus O(1) membership so the
/// rendering collaborator can color-code without recomputing.
///
/// Understocked means `0 < quantity < understock`; an empty slot is a
/// distinct condition and is never folded in. Overstocked means
/// `quantity > overstock`. The two sets are disjoint.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueReport<'a> {
    pub understocked: Vec<&'a Location>,
    pub overstocked: Vec<&'a Location>,
    by_id: HashMap<LocationId, StockIssue>,
}

impl<'a> IssueReport<'a> {
    pub fn issue_for(&self, id: &LocationId) -> Option<StockIssue> {
        self.by_id.get(id).copied()
    }

    pub fn is_clear(&self) -> bool {
        self.by_id.is_empty()
    }
}

pub fn classify_issues<'a>(
    locations: impl IntoIterator<Item = &'a Location>,
    thresholds: &StockThresholds,
) -> DomainResult<IssueReport<'a>> {
    thresholds.validate()?;

    let mut understocked = Vec::new();
    let mut overstocked = Vec::new();
    let mut by_id = HashMap::new();
    for location in locations {
        if location.quantity > 0 && location.quantity < thresholds.understock {
            understocked.push(location);
            by_id.insert(location.id.clone(), StockIssue::Understocked);
        } else if location.quantity > thresholds.overstock {
            overstocked.push(location);
            by_id.insert(location.id.clone(), StockIssue::Overstocked);
        }
    }

    Ok(IssueReport {
        understocked,
        overstocked,
        by_id,
    })
}

/// Stock levels of one zone's filled locations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneStockLevels {
    pub total_quantity: i64,
    pub understocked: usize,
    pub normal: usize,
    pub overstocked: usize,
}

/// Breakdown of filled locations into understocked/normal/overstocked,
/// overall and per zone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockLevelAnalysis {
    pub filled: usize,
    pub understocked: usize,
    pub normal: usize,
    pub overstocked: usize,
    pub by_zone: BTreeMap<String, ZoneStockLevels>,
}

impl StockLevelAnalysis {
    fn share(&self, count: usize) -> f64 {
        if self.filled == 0 {
            0.0
        } else {
            count as f64 / self.filled as f64
        }
    }

    /// Share of filled locations that are understocked, in `0.0..=1.0`.
    pub fn understocked_share(&self) -> f64 {
        self.share(self.understocked)
    }

    pub fn normal_share(&self) -> f64 {
        self.share(self.normal)
    }

    pub fn overstocked_share(&self) -> f64 {
        self.share(self.overstocked)
    }
}

/// Per-zone stock level breakdown over filled locations only. Empty slots
/// are excluded here the same way they are excluded from understock.
pub fn stock_level_analysis<'a>(
    locations: impl IntoIterator<Item = &'a Location>,
    thresholds: &StockThresholds,
) -> DomainResult<StockLevelAnalysis> {
    thresholds.validate()?;

    let mut analysis = StockLevelAnalysis::default();
    for location in locations {
        if !location.is_filled() {
            continue;
        }
        analysis.filled += 1;
        let zone = analysis
            .by_zone
            .entry(location.zone.as_str().to_string())
            .or_default();
        zone.total_quantity += location.quantity;
        if location.quantity < thresholds.understock {
            analysis.understocked += 1;
            zone.understocked += 1;
        } else if location.quantity > thresholds.overstock {
            analysis.overstocked += 1;
            zone.overstocked += 1;
        } else {
            analysis.normal += 1;
            zone.normal += 1;
        }
    }
    Ok(analysis)
}
