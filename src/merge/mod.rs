//! Joining population and adjacency tables, and the integrity checks run before solving.

mod integrity;
mod merge;

pub use integrity::{IntegrityIssue, IntegrityReport};
pub use merge::{MergedTable, merge};
