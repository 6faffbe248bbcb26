//! Stateless analytics over a (possibly filtered) set of locations.
//!
//! Every operation takes locations by reference and returns a value;
//! nothing here mutates its input or holds state between calls.

pub mod balance;
pub mod grouping;
pub mod issues;
pub mod summary;

pub use balance::{balance_statistics, BalanceStat};
pub use grouping::{group_by, Dimension, GroupMetrics, UNASSIGNED_LABEL};
pub use issues::{
    classify_issues, stock_level_analysis, IssueReport, StockIssue, StockLevelAnalysis,
    StockThresholds, ZoneStockLevels,
};
pub use summary::{summary_metrics, SummaryMetrics};
