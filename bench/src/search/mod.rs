use crate::analytics::aggregate::aggregate;
use crate::dispatcher::arrival::ArrivalPolicy;
use crate::dispatcher::Dispatcher;
use crate::sinks::BatchSink;
use std::num::NonZeroU32;
use strain_report::batch_summary::BatchSummary;
use strain_report::search_summary::{SearchSummary, SearchTerminationKind};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Owned exclusively by the search between rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchState {
    pub current_concurrency: u32,
    pub last_successful_concurrency: u32,
    pub increment: u32,
}

impl SearchState {
    pub fn new(increment: NonZeroU32) -> Self {
        Self {
            current_concurrency: increment.get(),
            last_successful_concurrency: 0,
            increment: increment.get(),
        }
    }

    fn record_success(&mut self) {
        self.last_successful_concurrency = self.current_concurrency;
        self.current_concurrency = self.current_concurrency.saturating_add(self.increment);
    }
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub breaking_point: u32,
    pub increment: u32,
    pub rounds: u32,
    pub termination: SearchTerminationKind,
    pub batches: Vec<BatchSummary>,
}

impl From<&SearchOutcome> for SearchSummary {
    fn from(outcome: &SearchOutcome) -> Self {
        SearchSummary::new(
            outcome.breaking_point,
            outcome.increment,
            outcome.rounds,
            outcome.termination.clone(),
        )
    }
}

/// Bursts of growing size until the first non-success response.
///
/// One non-success response is enough to stop, so the reported breaking point is a lower
/// bound that transient errors on the target can pull down. Without `max_concurrency` the
/// search only ends on a failure or through the cancellation token.
pub struct BreakingPointSearch<'a> {
    dispatcher: &'a Dispatcher,
    increment: NonZeroU32,
    max_concurrency: Option<NonZeroU32>,
    cancellation: CancellationToken,
    sink: Option<BatchSink>,
}

impl<'a> BreakingPointSearch<'a> {
    pub fn new(dispatcher: &'a Dispatcher, increment: NonZeroU32) -> Self {
        Self {
            dispatcher,
            increment,
            max_concurrency: None,
            cancellation: CancellationToken::new(),
            sink: None,
        }
    }

    pub fn with_max_concurrency(mut self, max_concurrency: Option<NonZeroU32>) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub fn with_sink(mut self, sink: Option<BatchSink>) -> Self {
        self.sink = sink;
        self
    }

    pub async fn run(&self) -> SearchOutcome {
        let mut state = SearchState::new(self.increment);
        let mut batches = Vec::new();
        let mut rounds = 0;

        let termination = loop {
            if self.cancellation.is_cancelled() {
                warn!("Breaking point search cancelled at concurrency {}", state.current_concurrency);
                break SearchTerminationKind::Cancelled;
            }
            if let Some(max) = self.max_concurrency {
                if state.current_concurrency > max.get() {
                    info!("Concurrency ceiling {max} reached without failures");
                    break SearchTerminationKind::CeilingReached;
                }
            }

            rounds += 1;
            let concurrency = state.current_concurrency;
            let batch = match self
                .dispatcher
                .dispatch(rounds, concurrency, &ArrivalPolicy::Burst)
                .await
            {
                Ok(batch) => batch,
                Err(dispatch_error) => {
                    error!("Probe at concurrency {concurrency} failed: {dispatch_error}");
                    break SearchTerminationKind::DispatchFailed {
                        concurrency,
                        reason: dispatch_error.to_string(),
                    };
                }
            };

            let aggregated = aggregate(batch);
            let non_success = aggregated.summary.non_success_count;
            info!("{}", aggregated.summary.formatted_string());
            batches.push(aggregated.summary.clone());
            if let Some(sink) = &self.sink {
                sink.submit(aggregated);
            }

            if non_success > 0 {
                break SearchTerminationKind::FailureObserved {
                    concurrency,
                    non_success,
                };
            }
            state.record_success();
        };

        info!(
            "Breaking point: {} concurrent requests ({termination})",
            state.last_successful_concurrency
        );
        SearchOutcome {
            breaking_point: state.last_successful_concurrency,
            increment: state.increment,
            rounds,
            termination,
            batches,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::Requester;
    use crate::analytics::record::RequestRecord;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    /// Answers 200 for the first `healthy_calls` requests and 500 afterwards.
    struct DegradingRequester {
        calls: AtomicU64,
        healthy_calls: u64,
    }

    #[async_trait]
    impl Requester for DegradingRequester {
        async fn request(&self, unit: u32) -> RequestRecord {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            let status = if call <= self.healthy_calls { 200 } else { 500 };
            RequestRecord::new(unit, Duration::from_millis(1), 2, status)
        }

        fn target(&self) -> &str {
            "http://degrading.invalid/"
        }
    }

    fn degrading_dispatcher(healthy_calls: u64) -> Dispatcher {
        Dispatcher::new(Arc::new(DegradingRequester {
            calls: AtomicU64::new(0),
            healthy_calls,
        }))
    }

    #[tokio::test]
    async fn should_report_last_clean_burst() {
        // Bursts of 10 + 20 + 30 + 40 + 50 requests are served, the burst of 60 is not.
        let dispatcher = degrading_dispatcher(150);

        let outcome = BreakingPointSearch::new(&dispatcher, nonzero_lit::u32!(10)).run().await;

        assert_eq!(outcome.breaking_point, 50);
        assert_eq!(outcome.rounds, 6);
        assert_eq!(
            outcome.termination,
            SearchTerminationKind::FailureObserved {
                concurrency: 60,
                non_success: 60
            }
        );
        let sizes: Vec<u64> = outcome.batches.iter().map(|b| b.total_requests).collect();
        assert_eq!(sizes, vec![10, 20, 30, 40, 50, 60]);
    }

    #[tokio::test]
    async fn single_failure_should_stop_the_search() {
        let dispatcher = degrading_dispatcher(29);

        let outcome = BreakingPointSearch::new(&dispatcher, nonzero_lit::u32!(10)).run().await;

        assert_eq!(outcome.breaking_point, 10);
        assert_eq!(
            outcome.termination,
            SearchTerminationKind::FailureObserved {
                concurrency: 20,
                non_success: 1
            }
        );
    }

    #[tokio::test]
    async fn failing_first_probe_should_report_zero() {
        let dispatcher = degrading_dispatcher(0);

        let outcome = BreakingPointSearch::new(&dispatcher, nonzero_lit::u32!(5)).run().await;

        assert_eq!(outcome.breaking_point, 0);
        assert_eq!(outcome.rounds, 1);
    }

    #[tokio::test]
    async fn cancelled_search_should_not_probe() {
        let dispatcher = degrading_dispatcher(u64::MAX);
        let cancellation = CancellationToken::new();
        cancellation.cancel();

        let outcome = BreakingPointSearch::new(&dispatcher, nonzero_lit::u32!(10))
            .with_cancellation(cancellation)
            .run()
            .await;

        assert_eq!(outcome.termination, SearchTerminationKind::Cancelled);
        assert_eq!(outcome.rounds, 0);
        assert_eq!(outcome.breaking_point, 0);
    }

    #[tokio::test]
    async fn cancellation_should_stop_a_never_failing_search() {
        let dispatcher = degrading_dispatcher(u64::MAX);
        let cancellation = CancellationToken::new();
        let trigger = cancellation.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let outcome = BreakingPointSearch::new(&dispatcher, nonzero_lit::u32!(1))
            .with_cancellation(cancellation)
            .run()
            .await;

        assert_eq!(outcome.termination, SearchTerminationKind::Cancelled);
        assert!(outcome.rounds > 0);
        assert_eq!(outcome.breaking_point, outcome.rounds);
    }

    #[tokio::test]
    async fn ceiling_should_end_a_clean_search() {
        let dispatcher = degrading_dispatcher(u64::MAX);

        let outcome = BreakingPointSearch::new(&dispatcher, nonzero_lit::u32!(10))
            .with_max_concurrency(Some(nonzero_lit::u32!(35)))
            .run()
            .await;

        assert_eq!(outcome.termination, SearchTerminationKind::CeilingReached);
        assert_eq!(outcome.breaking_point, 30);
        assert_eq!(outcome.rounds, 3);
    }
}
