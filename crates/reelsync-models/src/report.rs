//! End-of-run tally.

use serde::{Deserialize, Serialize};

/// Success/failure counts for one batch run.
///
/// Serializes to the `Success Count,Failure Count` report row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    #[serde(rename = "Success Count")]
    pub success_count: u64,
    #[serde(rename = "Failure Count")]
    pub failure_count: u64,
}

impl Report {
    pub fn record_success(&mut self) {
        self.success_count += 1;
    }

    pub fn record_failure(&mut self) {
        self.failure_count += 1;
    }

    /// Number of records tallied.
    pub fn total(&self) -> u64 {
        self.success_count + self.failure_count
    }
}
