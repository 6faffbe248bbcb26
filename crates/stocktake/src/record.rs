use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockmap_core::{DomainError, LocationId};

/// Operator identity, non-blank by construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperatorName(String);

impl OperatorName {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("operator name cannot be blank"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for OperatorName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl core::str::FromStr for OperatorName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// One operator-recorded observation for one location.
///
/// `system_quantity` is snapshotted from the catalog at verification time
/// and stays fixed even if the catalog is later regenerated. The
/// discrepancy is always derived, never stored, so it cannot drift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationRecord {
    pub location_id: LocationId,
    pub system_quantity: i64,
    pub actual_quantity: i64,
    pub note: Option<String>,
    pub verified_by: OperatorName,
    pub verified_at: DateTime<Utc>,
}

impl VerificationRecord {
    /// Observed minus recorded quantity. Positive means surplus on the
    /// shelf, negative means shrinkage.
    pub fn discrepancy(&self) -> i64 {
        self.actual_quantity - self.system_quantity
    }

    pub fn has_discrepancy(&self) -> bool {
        self.discrepancy() != 0
    }
}
