pub mod arrival;
pub mod batch;

use crate::actors::Requester;
use crate::analytics::record::RequestRecord;
use crate::error::StrainError;
use crate::sinks::progress::Progress;
use arrival::ArrivalPolicy;
use batch::Batch;
use chrono::Utc;
use futures::future::join_all;
use human_repr::HumanDuration;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::Sender;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};
use tracing::{debug, error, info};

/// Launches the request units of a batch and collects exactly one record per unit.
///
/// Every unit runs as its own task and the task handle of unit `i` is slot `i` of the batch,
/// so units never share storage and the batch is in launch order once sealed.
pub struct Dispatcher {
    requester: Arc<dyn Requester>,
    limiter: Option<Arc<Semaphore>>,
    progress: Option<Sender<Progress>>,
}

impl Dispatcher {
    pub fn new(requester: Arc<dyn Requester>) -> Self {
        Self {
            requester,
            limiter: None,
            progress: None,
        }
    }

    /// Caps the number of outstanding requests, unbounded when `None`.
    pub fn with_max_in_flight(mut self, max_in_flight: Option<NonZeroUsize>) -> Self {
        self.limiter = max_in_flight.map(|max| Arc::new(Semaphore::new(max.get())));
        self
    }

    /// Progress of ramp batches is published here, best effort.
    pub fn with_progress(mut self, progress: Sender<Progress>) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn target(&self) -> &str {
        self.requester.target()
    }

    /// Runs `size` units under `policy` and returns once every unit has reported in.
    pub async fn dispatch(
        &self,
        iteration: u32,
        size: u32,
        policy: &ArrivalPolicy,
    ) -> Result<Batch, StrainError> {
        info!(
            "Batch #{iteration} → dispatching {size} requests to {} ({policy})...",
            self.target()
        );
        let completed = Arc::new(AtomicU64::new(0));
        let progress = if policy.is_ramp() {
            self.progress.clone()
        } else {
            None
        };
        let mut handles: Vec<JoinHandle<RequestRecord>> = Vec::with_capacity(size as usize);

        let started_at = Utc::now();
        let start = Instant::now();
        for unit in 0..size {
            let permit = match &self.limiter {
                Some(limiter) => match limiter.clone().acquire_owned().await {
                    Ok(permit) => Some(permit),
                    Err(_) => {
                        handles.iter().for_each(|handle| handle.abort());
                        return Err(StrainError::ConcurrencyLimiterClosed(iteration));
                    }
                },
                None => None,
            };

            let requester = self.requester.clone();
            let unit_completed = completed.clone();
            let progress = progress.clone();
            handles.push(tokio::spawn(async move {
                let record = requester.request(unit).await;
                drop(permit);
                let done = unit_completed.fetch_add(1, Ordering::AcqRel) + 1;
                if let Some(progress) = progress {
                    let _ = progress.try_send(Progress::new(iteration, done, size as u64));
                }
                record
            }));

            if unit + 1 < size {
                let delay = policy.delay(unit as u64, completed.load(Ordering::Acquire));
                if !delay.is_zero() {
                    sleep(delay).await;
                }
            }
        }

        let results = join_all(handles).await;
        let elapsed = start.elapsed();

        let mut records = Vec::with_capacity(results.len());
        for (unit, result) in results.into_iter().enumerate() {
            match result {
                Ok(record) => records.push(record),
                Err(join_error) => {
                    error!("Batch #{iteration} → request unit #{unit} did not complete: {join_error}");
                    return Err(StrainError::RequestUnitFailed {
                        iteration,
                        unit: unit as u32,
                        reason: join_error.to_string(),
                    });
                }
            }
        }

        debug!(
            "Batch #{iteration} → collected {} records in {}",
            records.len(),
            elapsed.human_duration()
        );
        Ok(Batch::new(
            iteration,
            self.target(),
            started_at,
            elapsed,
            records,
        ))
    }
}
