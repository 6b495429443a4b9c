use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchTerminationKind {
    #[display("{non_success} non-success responses at concurrency {concurrency}")]
    FailureObserved { concurrency: u32, non_success: u64 },
    #[display("dispatch failed at concurrency {concurrency}: {reason}")]
    DispatchFailed { concurrency: u32, reason: String },
    #[display("cancelled")]
    Cancelled,
    #[display("concurrency ceiling reached")]
    CeilingReached,
}

/// Outcome of a breaking-point search.
///
/// `breaking_point` is the largest burst that produced only 200 responses. A single
/// non-success response ends the search, so this is a lower bound sensitive to transient
/// errors on the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct SearchSummary {
    pub breaking_point: u32,
    pub increment: u32,
    pub rounds: u32,
    pub termination: SearchTerminationKind,
}
