use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio::task::JoinHandle;
use tracing::info;

const PROGRESS_STEP_PERCENT: u64 = 10;

/// Completion state of a ramp batch after one more unit finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub iteration: u32,
    pub completed: u64,
    pub total: u64,
}

impl Progress {
    pub fn new(iteration: u32, completed: u64, total: u64) -> Self {
        Self {
            iteration,
            completed,
            total,
        }
    }

    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.completed as f64 / self.total as f64
    }

    fn percent(&self) -> u64 {
        (self.fraction() * 100.0) as u64
    }
}

/// Spawns a task logging ramp progress every 10%.
///
/// Senders must use `try_send`: a full channel drops the update instead of slowing dispatch.
pub fn spawn_progress_logger(capacity: usize) -> (Sender<Progress>, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    let handle = tokio::spawn(log_progress(rx));
    (tx, handle)
}

async fn log_progress(mut rx: Receiver<Progress>) {
    let mut current_iteration = None;
    let mut last_step = 0;
    while let Some(progress) = rx.recv().await {
        if current_iteration != Some(progress.iteration) {
            current_iteration = Some(progress.iteration);
            last_step = 0;
        }

        let step = progress.percent() / PROGRESS_STEP_PERCENT;
        if step > last_step {
            last_step = step;
            info!(
                "Batch #{} → {}/{} requests completed ({}%)",
                progress.iteration,
                progress.completed,
                progress.total,
                step * PROGRESS_STEP_PERCENT
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_should_be_completed_over_total() {
        assert_eq!(Progress::new(1, 25, 100).fraction(), 0.25);
        assert_eq!(Progress::new(1, 0, 0).fraction(), 1.0);
    }

    #[tokio::test]
    async fn logger_should_stop_when_all_senders_are_dropped() {
        let (tx, handle) = spawn_progress_logger(4);
        for completed in 1..=10 {
            let _ = tx.try_send(Progress::new(1, completed, 10));
        }
        drop(tx);
        handle.await.unwrap();
    }
}
