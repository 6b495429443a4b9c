use chrono::{DateTime, Utc};
use std::time::Duration;

/// Status code recorded when no HTTP response was received.
pub const TRANSPORT_FAILURE_STATUS: u16 = 0;
pub const SUCCESS_STATUS: u16 = 200;

/// Outcome of a single request unit.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestRecord {
    /// Launch index of the unit within its batch.
    pub unit: u32,
    /// Dispatch to completion, full body read included.
    pub latency: Duration,
    /// Body bytes actually read, 0 on transport or read failure.
    pub byte_size: u64,
    pub status_code: u16,
    /// Wall clock time of completion.
    pub timestamp: DateTime<Utc>,
    /// Requests per second of the whole batch, stamped by the aggregator.
    pub throughput: f64,
}

impl RequestRecord {
    pub fn new(unit: u32, latency: Duration, byte_size: u64, status_code: u16) -> Self {
        Self {
            unit,
            latency,
            byte_size,
            status_code,
            timestamp: Utc::now(),
            throughput: 0.0,
        }
    }

    pub fn transport_failure(unit: u32, latency: Duration) -> Self {
        Self::new(unit, latency, 0, TRANSPORT_FAILURE_STATUS)
    }

    pub fn is_success(&self) -> bool {
        self.status_code == SUCCESS_STATUS
    }

    pub fn is_transport_failure(&self) -> bool {
        self.status_code == TRANSPORT_FAILURE_STATUS
    }

    pub fn latency_ms(&self) -> f64 {
        self.latency.as_secs_f64() * 1_000.0
    }
}
