//! Aggregate root trait for stateful domain models.

/// Aggregate root marker + minimal interface.
///
/// This is intentionally small so domain modules can decide how they model
/// state transitions (pure functions, event application, etc.) without
/// bringing in any infrastructure concerns.
pub trait AggregateRoot {
    /// Strongly-typed aggregate identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the aggregate identifier.
    fn id(&self) -> &Self::Id;

    /// Monotonically increasing version of the aggregate's state.
    ///
    /// Typically corresponds to the number of events applied.
    fn version(&self) -> u64;
}

/// Aggregate execution semantics (pure, deterministic).
///
/// - **Decision logic**: `handle(&self, ctx, cmd)` returns events.
/// - **State mutation**: `apply(&mut self, event)` evolves state.
///
/// `Context` carries the read-only world the aggregate decides against.
/// The stocktaking session, for example, decides against the active
/// location catalog snapshot: validation and quantity snapshotting happen
/// at decide time, so applied events are self-contained facts.
///
/// Aggregates must not perform IO or side effects. They should only return
/// events describing what happened.
pub trait Aggregate: AggregateRoot {
    type Context: ?Sized;
    type Command: Clone + core::fmt::Debug;
    type Event: Clone + core::fmt::Debug;
    type Error: core::fmt::Debug;

    /// Evolve in-memory state from a single event.
    ///
    /// Implementations should remain deterministic and should typically update
    /// their internal `version()` tracking consistently (e.g. +1 per applied event).
    fn apply(&mut self, event: &Self::Event);

    /// Decide which events to emit given the current state, the context, and
    /// a command.
    ///
    /// This must not mutate state. State evolution is done through `apply`.
    fn handle(
        &self,
        ctx: &Self::Context,
        command: &Self::Command,
    ) -> Result<Vec<Self::Event>, Self::Error>;
}
