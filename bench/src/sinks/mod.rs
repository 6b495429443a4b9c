use crate::analytics::aggregate::AggregatedBatch;
use crate::error::StrainError;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{error, warn};

pub mod csv;
pub mod progress;

/// Persists finished batches. Runs on a blocking thread, never on the dispatch path.
pub trait BatchWriter: Send + 'static {
    fn write(&mut self, batch: &AggregatedBatch) -> Result<(), StrainError>;
}

/// Hands finished batches to a writer without blocking the caller.
#[derive(Debug, Clone)]
pub struct BatchSink {
    tx: UnboundedSender<AggregatedBatch>,
}

impl BatchSink {
    /// The returned handle resolves once every `BatchSink` clone is dropped and the queue is
    /// drained.
    pub fn spawn<W: BatchWriter>(mut writer: W) -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<AggregatedBatch>();
        let handle = tokio::task::spawn_blocking(move || {
            while let Some(batch) = rx.blocking_recv() {
                if let Err(error) = writer.write(&batch) {
                    error!("Failed to persist batch #{}: {error}", batch.iteration);
                }
            }
        });
        (Self { tx }, handle)
    }

    pub fn submit(&self, batch: AggregatedBatch) {
        if let Err(error) = self.tx.send(batch) {
            warn!(
                "Sink is gone, batch #{} will not be persisted",
                error.0.iteration
            );
        }
    }
}
