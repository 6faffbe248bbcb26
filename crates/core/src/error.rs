//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (schema
/// validation, thresholds, session updates). There is no transient or
/// networked failure mode in this core; nothing here is retryable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Catalog ingestion found malformed data (duplicate id, negative
    /// quantity, capacity below quantity, unknown tag). The catalog is
    /// rejected wholesale; no partial load.
    #[error("schema violation: {0}")]
    SchemaViolation(String),

    /// Threshold configuration was rejected (negative, or overstock below
    /// understock). Prior results are untouched.
    #[error("invalid threshold: {0}")]
    InvalidThreshold(String),

    /// A verify call referenced a location absent from the active catalog.
    #[error("unknown location: {0}")]
    UnknownLocation(String),

    /// A verify call carried a negative observed quantity.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    /// A verification record points at a location that no longer exists in
    /// the regenerated catalog. Not fatal; surfaced by the session audit.
    #[error("stale session reference: {0}")]
    StaleSessionReference(String),

    /// A value failed validation (e.g. blank tag or identifier).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::SchemaViolation(msg.into())
    }

    pub fn invalid_threshold(msg: impl Into<String>) -> Self {
        Self::InvalidThreshold(msg.into())
    }

    pub fn unknown_location(msg: impl Into<String>) -> Self {
        Self::UnknownLocation(msg.into())
    }

    pub fn invalid_quantity(msg: impl Into<String>) -> Self {
        Self::InvalidQuantity(msg.into())
    }

    pub fn stale_reference(msg: impl Into<String>) -> Self {
        Self::StaleSessionReference(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
