use crate::utils::round_float;
use serde::{Deserialize, Serialize};

/// Figures across every batch of a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RunSummary {
    pub batches: u32,
    pub total_requests: u64,
    pub total_non_success: u64,
    pub total_transport_failures: u64,
    pub total_bytes: u64,
    #[serde(serialize_with = "round_float")]
    pub average_throughput_rps: f64,
    #[serde(serialize_with = "round_float")]
    pub average_latency_ms: f64,
    /// Share of all requests that did not return 200.
    #[serde(serialize_with = "round_float")]
    pub failure_share: f64,
    /// Part of the average throughput attributable to non-success responses.
    #[serde(serialize_with = "round_float")]
    pub failure_throughput_rps: f64,
    #[serde(serialize_with = "round_float")]
    pub failure_adjusted_throughput_rps: f64,
}
