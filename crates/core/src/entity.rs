//! Entity trait: identity + continuity across state changes.
//!
//! A storage location is the canonical entity here: the same slot keeps
//! its id while its stock changes from one catalog snapshot to the next.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
