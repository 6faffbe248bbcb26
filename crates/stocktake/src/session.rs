use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockmap_catalog::Catalog;
use stockmap_core::{
    Aggregate, AggregateRoot, DomainError, DomainResult, Event, LocationId, SessionId,
};

use crate::record::{OperatorName, VerificationRecord};

/// Aggregate root: StocktakeSession.
///
/// Owns the verification ledger for one counting walk: an ordered mapping
/// from location id to its single verification record. Decisions are made
/// against the active catalog snapshot (the `Context` of `handle`); the
/// catalog itself is never mutated. One operator per session; callers
/// sharing a session across threads must serialize verify/reset.
#[derive(Debug, Clone, PartialEq)]
pub struct StocktakeSession {
    id: SessionId,
    operator: OperatorName,
    started_at: DateTime<Utc>,
    pub(crate) records: BTreeMap<LocationId, VerificationRecord>,
    version: u64,
}

impl StocktakeSession {
    /// Begin an empty session for an operator.
    pub fn begin(operator: OperatorName, started_at: DateTime<Utc>) -> Self {
        Self::with_id(SessionId::new(), operator, started_at)
    }

    /// Begin with an explicit id (tests, replication).
    pub fn with_id(id: SessionId, operator: OperatorName, started_at: DateTime<Utc>) -> Self {
        Self {
            id,
            operator,
            started_at,
            records: BTreeMap::new(),
            version: 0,
        }
    }

    pub fn id_typed(&self) -> SessionId {
        self.id
    }

    pub fn operator(&self) -> &OperatorName {
        &self.operator
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Verification records in location-id order.
    pub fn records(&self) -> impl Iterator<Item = &VerificationRecord> {
        self.records.values()
    }

    pub fn record_for(&self, id: &LocationId) -> Option<&VerificationRecord> {
        self.records.get(id)
    }

    pub fn verified_count(&self) -> usize {
        self.records.len()
    }

    /// Decide and immediately apply a command.
    pub fn execute(
        &mut self,
        catalog: &Catalog,
        command: &SessionCommand,
    ) -> DomainResult<Vec<SessionEvent>> {
        let events = self.handle(catalog, command)?;
        for event in &events {
            self.apply(event);
        }
        Ok(events)
    }

    /// Record an observed count for a location, replacing any prior record
    /// for the same id.
    pub fn verify(
        &mut self,
        catalog: &Catalog,
        cmd: VerifyLocation,
    ) -> DomainResult<&VerificationRecord> {
        let location_id = cmd.location_id.clone();
        self.execute(catalog, &SessionCommand::VerifyLocation(cmd))?;
        self.records
            .get(&location_id)
            .ok_or_else(|| DomainError::unknown_location(location_id.to_string()))
    }

    /// Clear the verification ledger. Unconditional and irreversible; the
    /// catalog is untouched. Callers wanting fresh session metadata begin
    /// a new session instead.
    pub fn reset(&mut self, occurred_at: DateTime<Utc>) {
        self.apply(&SessionEvent::SessionReset(SessionReset { occurred_at }));
    }
}

impl AggregateRoot for StocktakeSession {
    type Id = SessionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: VerifyLocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyLocation {
    pub location_id: LocationId,
    /// Operator-entered observed quantity; must be non-negative.
    pub actual_quantity: i64,
    pub note: Option<String>,
    pub verified_by: OperatorName,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ResetSession.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResetSession {
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionCommand {
    VerifyLocation(VerifyLocation),
    ResetSession(ResetSession),
}

/// Event: LocationVerified.
///
/// Carries the `system_quantity` snapshotted at decide time so the event
/// is a self-contained fact even after the catalog is regenerated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationVerified {
    pub location_id: LocationId,
    pub system_quantity: i64,
    pub actual_quantity: i64,
    pub note: Option<String>,
    pub verified_by: OperatorName,
    pub occurred_at: DateTime<Utc>,
}

/// Event: SessionReset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReset {
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    LocationVerified(LocationVerified),
    SessionReset(SessionReset),
}

impl Event for SessionEvent {
    fn event_type(&self) -> &'static str {
        match self {
            SessionEvent::LocationVerified(_) => "stocktake.location.verified",
            SessionEvent::SessionReset(_) => "stocktake.session.reset",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            SessionEvent::LocationVerified(e) => e.occurred_at,
            SessionEvent::SessionReset(e) => e.occurred_at,
        }
    }
}

impl Aggregate for StocktakeSession {
    type Context = Catalog;
    type Command = SessionCommand;
    type Event = SessionEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            SessionEvent::LocationVerified(e) => {
                // Upsert: at most one record per location per session.
                self.records.insert(
                    e.location_id.clone(),
                    VerificationRecord {
                        location_id: e.location_id.clone(),
                        system_quantity: e.system_quantity,
                        actual_quantity: e.actual_quantity,
                        note: e.note.clone(),
                        verified_by: e.verified_by.clone(),
                        verified_at: e.occurred_at,
                    },
                );
            }
            SessionEvent::SessionReset(_) => {
                self.records.clear();
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, catalog: &Catalog, command: &Self::Command) -> DomainResult<Vec<SessionEvent>> {
        match command {
            SessionCommand::VerifyLocation(cmd) => self.handle_verify(catalog, cmd),
            SessionCommand::ResetSession(cmd) => Ok(vec![SessionEvent::SessionReset(
                SessionReset {
                    occurred_at: cmd.occurred_at,
                },
            )]),
        }
    }
}

impl StocktakeSession {
    fn handle_verify(
        &self,
        catalog: &Catalog,
        cmd: &VerifyLocation,
    ) -> DomainResult<Vec<SessionEvent>> {
        if cmd.actual_quantity < 0 {
            return Err(DomainError::invalid_quantity(format!(
                "observed quantity {} at {}",
                cmd.actual_quantity, cmd.location_id
            )));
        }
        let location = catalog
            .get(&cmd.location_id)
            .ok_or_else(|| DomainError::unknown_location(cmd.location_id.to_string()))?;

        tracing::debug!(
            location = %cmd.location_id,
            system = location.quantity,
            actual = cmd.actual_quantity,
            "location verified"
        );

        Ok(vec![SessionEvent::LocationVerified(LocationVerified {
            location_id: cmd.location_id.clone(),
            system_quantity: location.quantity,
            actual_quantity: cmd.actual_quantity,
            note: cmd.note.clone(),
            verified_by: cmd.verified_by.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }
}
