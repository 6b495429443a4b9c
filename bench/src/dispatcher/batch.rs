use crate::analytics::record::RequestRecord;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Records of one dispatcher invocation.
///
/// A batch is sealed on construction: records can be read or moved out, never changed.
#[derive(Debug, Clone)]
pub struct Batch {
    iteration: u32,
    target_url: String,
    started_at: DateTime<Utc>,
    elapsed: Duration,
    records: Vec<RequestRecord>,
}

impl Batch {
    pub fn new(
        iteration: u32,
        target_url: impl Into<String>,
        started_at: DateTime<Utc>,
        elapsed: Duration,
        records: Vec<RequestRecord>,
    ) -> Self {
        Self {
            iteration,
            target_url: target_url.into(),
            started_at,
            elapsed,
            records,
        }
    }

    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Wall clock span from the first launch to the last completion.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn records(&self) -> &[RequestRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn into_records(self) -> Vec<RequestRecord> {
        self.records
    }
}
