//! Flat tabular projections of the catalog, analytics tables, and the
//! stocktaking ledger: one row per entity, one column per named attribute.
//!
//! This is the whole export contract the core guarantees; turning the rows
//! into CSV/JSON files is the caller's concern.

pub mod rows;

pub use rows::{
    balance_rows, group_rows, location_rows, verification_rows, BalanceRow, GroupRow, LocationRow,
    VerificationRow,
};
