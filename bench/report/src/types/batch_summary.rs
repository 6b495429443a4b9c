use crate::utils::round_float;
use serde::{Deserialize, Serialize};

/// Summary of one dispatched batch.
///
/// `throughput_rps` is the batch-level figure: requests divided by the wall-clock span from
/// the first launch to the last completion, not by the sum of latencies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BatchSummary {
    pub iteration: u32,
    pub total_requests: u64,
    #[serde(serialize_with = "round_float")]
    pub elapsed_secs: f64,
    #[serde(serialize_with = "round_float")]
    pub throughput_rps: f64,
    #[serde(serialize_with = "round_float")]
    pub avg_latency_ms: f64,
    #[serde(serialize_with = "round_float")]
    pub p50_latency_ms: f64,
    #[serde(serialize_with = "round_float")]
    pub p90_latency_ms: f64,
    #[serde(serialize_with = "round_float")]
    pub p95_latency_ms: f64,
    #[serde(serialize_with = "round_float")]
    pub p99_latency_ms: f64,
    #[serde(serialize_with = "round_float")]
    pub max_latency_ms: f64,
    /// Responses whose status code is not 200, transport failures included.
    pub non_success_count: u64,
    /// Requests that never received a response (status code 0).
    pub transport_failures: u64,
    pub total_bytes: u64,
}

impl BatchSummary {
    pub fn is_clean(&self) -> bool {
        self.non_success_count == 0
    }
}
