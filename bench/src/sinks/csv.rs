use super::BatchWriter;
use crate::analytics::aggregate::AggregatedBatch;
use crate::analytics::record::RequestRecord;
use crate::error::StrainError;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// One CSV row per request. `timestamp` is the unix second of completion, `latency_ms` has
/// microsecond precision.
#[derive(Debug, Serialize, PartialEq)]
struct CsvRow {
    timestamp: i64,
    latency_ms: f64,
    status_code: u16,
    bytes: u64,
    throughput_rps: f64,
}

impl From<&RequestRecord> for CsvRow {
    fn from(record: &RequestRecord) -> Self {
        Self {
            timestamp: record.timestamp.timestamp(),
            latency_ms: round_to_thousandths(record.latency_ms()),
            status_code: record.status_code,
            bytes: record.byte_size,
            throughput_rps: round_to_thousandths(record.throughput),
        }
    }
}

fn round_to_thousandths(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Writes every batch to `<dir>/<iteration>data.csv`.
#[derive(Debug)]
pub struct CsvSink {
    dir: PathBuf,
}

impl CsvSink {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StrainError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn batch_path(&self, iteration: u32) -> PathBuf {
        self.dir.join(format!("{iteration}data.csv"))
    }
}

impl BatchWriter for CsvSink {
    fn write(&mut self, batch: &AggregatedBatch) -> Result<(), StrainError> {
        let path = self.batch_path(batch.iteration);
        let mut writer = csv::Writer::from_path(&path)?;
        for record in &batch.records {
            writer.serialize(CsvRow::from(record))?;
        }
        writer.flush()?;
        info!(
            "Batch #{} → {} records written to {}",
            batch.iteration,
            batch.records.len(),
            path.display()
        );
        Ok(())
    }
}
