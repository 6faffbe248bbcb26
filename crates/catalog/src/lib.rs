//! Warehouse location catalog: the physical storage model plus the
//! filter/selection layer every other component consumes.
//!
//! The catalog is produced by an external layout generator and validated
//! wholesale on ingestion; analytics and stocktaking only ever read it.

pub mod catalog;
pub mod demo;
pub mod location;
pub mod select;

pub use catalog::Catalog;
pub use location::{Location, Position};
pub use select::{select, FocusMode, QuantityRange, SelectionCriteria, SortKey};
