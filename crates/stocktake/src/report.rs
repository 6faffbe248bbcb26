//! Session read models: progress, derived state, discrepancy and stale
//! reports. Everything here is computed on read from the verification
//! ledger, never cached, so there is no second source of truth to drift.

use serde::{Deserialize, Serialize};

use stockmap_catalog::{Catalog, Location};
use stockmap_core::DomainError;

use crate::record::VerificationRecord;
use crate::session::StocktakeSession;

/// Verified-vs-selected counters for the currently visible selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub verified: usize,
    pub selected: usize,
}

/// Derived session state, always relative to the current selection.
///
/// Shrinking the selection can move a session from `InProgress` straight
/// to `Complete` without another verification; "complete" means "every
/// location the operator can currently see is verified".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Empty,
    InProgress,
    Complete,
}

/// A verification record orphaned by a catalog regeneration.
///
/// Kept visible rather than dropped or re-matched: the operator decides
/// what to do with counts taken against a layout that no longer exists.
#[derive(Debug, Clone, PartialEq)]
pub struct StaleReference<'a> {
    pub record: &'a VerificationRecord,
}

impl StaleReference<'_> {
    /// The error marker surfaced alongside the record in reports.
    pub fn marker(&self) -> DomainError {
        DomainError::stale_reference(self.record.location_id.to_string())
    }
}

/// Split of the ledger against a (possibly regenerated) catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionAudit<'a> {
    /// Records whose location still exists in the catalog.
    pub active: Vec<&'a VerificationRecord>,
    /// Records referencing locations the catalog no longer has.
    pub stale: Vec<StaleReference<'a>>,
}

impl SessionAudit<'_> {
    pub fn has_stale(&self) -> bool {
        !self.stale.is_empty()
    }
}

impl StocktakeSession {
    /// Count of selected locations already verified, against the size of
    /// the selection.
    pub fn progress(&self, selection: &[&Location]) -> Progress {
        let verified = selection
            .iter()
            .filter(|location| self.records.contains_key(&location.id))
            .count();
        Progress {
            verified,
            selected: selection.len(),
        }
    }

    /// Derived state for the current selection; recomputed on every call.
    pub fn state(&self, selection: &[&Location]) -> SessionState {
        if self.records.is_empty() {
            return SessionState::Empty;
        }
        let progress = self.progress(selection);
        if progress.verified == progress.selected {
            SessionState::Complete
        } else {
            SessionState::InProgress
        }
    }

    /// Records with a non-zero discrepancy, largest absolute discrepancy
    /// first, location id as tie-break.
    pub fn discrepancy_report(&self) -> Vec<&VerificationRecord> {
        let mut report: Vec<&VerificationRecord> = self
            .records()
            .filter(|record| record.has_discrepancy())
            .collect();
        report.sort_by(|a, b| {
            b.discrepancy()
                .abs()
                .cmp(&a.discrepancy().abs())
                .then_with(|| a.location_id.cmp(&b.location_id))
        });
        report
    }

    /// Split the ledger into records still anchored in the catalog and
    /// records stranded by a regeneration.
    pub fn audit<'a>(&'a self, catalog: &Catalog) -> SessionAudit<'a> {
        let mut active = Vec::new();
        let mut stale = Vec::new();
        for record in self.records() {
            if catalog.contains(&record.location_id) {
                active.push(record);
            } else {
                stale.push(StaleReference { record });
            }
        }
        SessionAudit { active, stale }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::OperatorName;
    use crate::session::VerifyLocation;
    use chrono::Utc;
    use stockmap_catalog::{select, Position, SelectionCriteria};
    use stockmap_core::{LocationId, ProductType, StorageType, TagRegistry, Zone};

    fn location(id: &str, zone: &str, quantity: i64) -> Location {
        Location {
            id: LocationId::new(id).unwrap(),
            zone: Zone::new(zone).unwrap(),
            storage_type: StorageType::new("Folded Shelves").unwrap(),
            product_type: Some(ProductType::new("T-shirts").unwrap()),
            quantity,
            capacity: None,
            position: Position::new(0.0, 0.0, 0.0),
        }
    }

    fn catalog_of(locations: Vec<Location>) -> Catalog {
        Catalog::ingest(locations, &TagRegistry::open()).unwrap()
    }

    fn verify_cmd(id: &str, actual: i64) -> VerifyLocation {
        VerifyLocation {
            location_id: LocationId::new(id).unwrap(),
            actual_quantity: actual,
            note: None,
            verified_by: OperatorName::new("dana").unwrap(),
            occurred_at: Utc::now(),
        }
    }

    fn session() -> StocktakeSession {
        StocktakeSession::begin(OperatorName::new("dana").unwrap(), Utc::now())
    }

    #[test]
    fn fresh_session_is_empty_regardless_of_selection() {
        let catalog = catalog_of(vec![location("A-01", "A", 5)]);
        let session = session();
        let selection = select(&catalog, &SelectionCriteria::all());

        assert_eq!(session.progress(&selection), Progress { verified: 0, selected: 1 });
        assert_eq!(session.state(&selection), SessionState::Empty);
    }

    #[test]
    fn shrinking_the_selection_can_complete_the_session() {
        // Ten locations across two zones; verify the five in zone A.
        let mut locations = Vec::new();
        for i in 0..5 {
            locations.push(location(&format!("A-{i:02}"), "A", 5));
            locations.push(location(&format!("B-{i:02}"), "B", 5));
        }
        let catalog = catalog_of(locations);
        let mut session = session();
        for i in 0..5 {
            session.verify(&catalog, verify_cmd(&format!("A-{i:02}"), 5)).unwrap();
        }

        let all = select(&catalog, &SelectionCriteria::all());
        assert_eq!(session.progress(&all), Progress { verified: 5, selected: 10 });
        assert_eq!(session.state(&all), SessionState::InProgress);

        let zone_a = SelectionCriteria {
            zones: [Zone::new("A").unwrap()].into(),
            ..SelectionCriteria::all()
        };
        let narrowed = select(&catalog, &zone_a);
        assert_eq!(session.progress(&narrowed), Progress { verified: 5, selected: 5 });
        assert_eq!(session.state(&narrowed), SessionState::Complete);
    }

    #[test]
    fn discrepancy_report_orders_by_magnitude_then_id() {
        let catalog = catalog_of(vec![
            location("A-01", "A", 10),
            location("A-02", "A", 10),
            location("A-03", "A", 10),
            location("A-04", "A", 10),
        ]);
        let mut session = session();
        session.verify(&catalog, verify_cmd("A-01", 7)).unwrap(); // -3
        session.verify(&catalog, verify_cmd("A-02", 10)).unwrap(); // 0, excluded
        session.verify(&catalog, verify_cmd("A-03", 15)).unwrap(); // +5
        session.verify(&catalog, verify_cmd("A-04", 13)).unwrap(); // +3, ties with A-01

        let report = session.discrepancy_report();
        let ids: Vec<&str> = report.iter().map(|r| r.location_id.as_str()).collect();
        assert_eq!(ids, vec!["A-03", "A-01", "A-04"]);
    }

    #[test]
    fn audit_separates_stale_records_after_regeneration() {
        let catalog = catalog_of(vec![location("A-01", "A", 5), location("A-02", "A", 8)]);
        let mut session = session();
        session.verify(&catalog, verify_cmd("A-01", 5)).unwrap();
        session.verify(&catalog, verify_cmd("A-02", 8)).unwrap();

        // Regenerated layout dropped A-02.
        let regenerated = catalog_of(vec![location("A-01", "A", 5)]);
        let audit = session.audit(&regenerated);

        assert_eq!(audit.active.len(), 1);
        assert_eq!(audit.stale.len(), 1);
        assert!(audit.has_stale());
        assert_eq!(audit.stale[0].record.location_id.as_str(), "A-02");
        assert!(matches!(
            audit.stale[0].marker(),
            DomainError::StaleSessionReference(_)
        ));
    }

    #[test]
    fn audit_is_clean_while_catalog_is_unchanged() {
        let catalog = catalog_of(vec![location("A-01", "A", 5)]);
        let mut session = session();
        session.verify(&catalog, verify_cmd("A-01", 4)).unwrap();

        let audit = session.audit(&catalog);
        assert_eq!(audit.active.len(), 1);
        assert!(!audit.has_stale());
    }

    #[test]
    fn state_with_records_and_empty_selection_is_vacuously_complete() {
        let catalog = catalog_of(vec![location("A-01", "A", 5)]);
        let mut session = session();
        session.verify(&catalog, verify_cmd("A-01", 5)).unwrap();

        assert_eq!(session.state(&[]), SessionState::Complete);
    }
}
