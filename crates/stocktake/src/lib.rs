//! Stocktaking reconciliation: a guided counting walk against the active
//! location catalog.
//!
//! The session accumulates one verification record per visited location
//! and derives everything else (progress, state, discrepancy report) on
//! read. It never mutates the catalog; its output is a reconciliation
//! ledger, not a rewrite of system quantities.

pub mod record;
pub mod report;
pub mod session;

pub use record::{OperatorName, VerificationRecord};
pub use report::{Progress, SessionAudit, SessionState, StaleReference};
pub use session::{
    LocationVerified, ResetSession, SessionCommand, SessionEvent, SessionReset, StocktakeSession,
    VerifyLocation,
};
