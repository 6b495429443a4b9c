use crate::actors::http_requester::HttpRequester;
use crate::actors::Requester;
use crate::analytics::aggregate::aggregate;
use crate::analytics::report_builder::RunReportBuilder;
use crate::args::common::StrainArgs;
use crate::args::kind::RunKindCommand;
use crate::configs::engine::EngineConfig;
use crate::dispatcher::arrival::ArrivalPolicy;
use crate::dispatcher::Dispatcher;
use crate::error::StrainError;
use crate::plot::{plot_chart, ChartType};
use crate::search::BreakingPointSearch;
use crate::sinks::csv::CsvSink;
use crate::sinks::progress::spawn_progress_logger;
use crate::sinks::BatchSink;
use std::num::{NonZeroU32, NonZeroUsize};
use std::sync::Arc;
use strain_report::batch_summary::BatchSummary;
use strain_report::hardware::HostHardware;
use strain_report::report::RunReport;
use strain_report::search_summary::SearchSummary;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

pub struct StrainRunner {
    args: StrainArgs,
    config: EngineConfig,
    cancellation: CancellationToken,
}

impl StrainRunner {
    pub fn new(args: StrainArgs, config: EngineConfig) -> Self {
        Self {
            args,
            config,
            cancellation: CancellationToken::new(),
        }
    }

    /// Cancelling the token stops the run before its next batch.
    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub async fn run(&self) -> Result<RunReport, StrainError> {
        let requester = HttpRequester::new(
            self.args.url(),
            self.config.http.timeout.get_duration(),
            self.config.http.connect_timeout.get_duration(),
        )?;
        self.run_with_requester(Arc::new(requester)).await
    }

    pub async fn run_with_requester(
        &self,
        requester: Arc<dyn Requester>,
    ) -> Result<RunReport, StrainError> {
        info!(
            "Starting {} run against {}",
            self.args.kind.as_run_kind(),
            requester.target()
        );
        let (progress, progress_handle) =
            spawn_progress_logger(self.config.dispatch.progress_channel_capacity);
        let dispatcher = Dispatcher::new(requester)
            .with_max_in_flight(self.config.dispatch.max_in_flight.and_then(NonZeroUsize::new))
            .with_progress(progress);

        let (sink, sink_handle) = match &self.config.output.output_dir {
            Some(output_dir) => {
                let (sink, handle) = BatchSink::spawn(CsvSink::new(output_dir)?);
                (Some(sink), Some(handle))
            }
            None => (None, None),
        };

        let (batches, search) = match &self.args.kind {
            RunKindCommand::Ramp(ramp) => {
                let per_iteration = NonZeroU32::new(self.config.ramp.requests_per_iteration)
                    .ok_or_else(|| {
                        StrainError::InvalidConfiguration(
                            "ramp.requests_per_iteration must be greater than zero".to_owned(),
                        )
                    })?;
                let batches = run_ramp(
                    &dispatcher,
                    ramp.iterations,
                    per_iteration,
                    &self.config.ramp.arrival_policy(),
                    sink.as_ref(),
                    &self.cancellation,
                )
                .await;
                (batches, None)
            }
            RunKindCommand::Search(_) => {
                let increment = NonZeroU32::new(self.config.search.increment).ok_or_else(|| {
                    StrainError::InvalidConfiguration(
                        "search.increment must be greater than zero".to_owned(),
                    )
                })?;
                let outcome = BreakingPointSearch::new(&dispatcher, increment)
                    .with_max_concurrency(self.config.search.max_concurrency.and_then(NonZeroU32::new))
                    .with_cancellation(self.cancellation.clone())
                    .with_sink(sink.clone())
                    .run()
                    .await;
                let summary = SearchSummary::from(&outcome);
                (outcome.batches, Some(summary))
            }
        };

        drop(dispatcher);
        drop(sink);
        join_background("progress logger", progress_handle).await;
        if let Some(handle) = sink_handle {
            join_background("batch sink", handle).await;
        }

        let params = self.args.run_params(&self.config);
        let hardware = HostHardware::snapshot(self.config.output.identifier.clone());
        let report = RunReportBuilder::build(hardware, params, batches, search);

        report.print_summary();

        if let Some(output_dir) = &self.config.output.output_dir {
            report.dump_to_json(output_dir)?;
            let dark = !self.config.output.light_charts;
            for chart_type in [ChartType::Throughput, ChartType::Latency] {
                plot_chart(&report, output_dir, chart_type, dark).map_err(|e| {
                    error!("Failed to generate plots: {e}");
                    StrainError::CannotWriteToFile(e)
                })?;
            }
        }

        Ok(report)
    }
}

/// Iterations `1..=iterations`, iteration `i` dispatches `i * per_iteration` requests.
///
/// A failed iteration is logged and skipped, the ramp goes on with the next one.
pub async fn run_ramp(
    dispatcher: &Dispatcher,
    iterations: NonZeroU32,
    per_iteration: NonZeroU32,
    policy: &ArrivalPolicy,
    sink: Option<&BatchSink>,
    cancellation: &CancellationToken,
) -> Vec<BatchSummary> {
    let mut batches = Vec::with_capacity(iterations.get() as usize);
    for iteration in 1..=iterations.get() {
        if cancellation.is_cancelled() {
            warn!("Ramp cancelled before iteration {iteration}");
            break;
        }

        let size = iteration.saturating_mul(per_iteration.get());
        match dispatcher.dispatch(iteration, size, policy).await {
            Ok(batch) => {
                let aggregated = aggregate(batch);
                info!("{}", aggregated.summary.formatted_string());
                batches.push(aggregated.summary.clone());
                if let Some(sink) = sink {
                    sink.submit(aggregated);
                }
            }
            Err(dispatch_error) => {
                error!("Iteration {iteration} failed, continuing with the next one: {dispatch_error}");
            }
        }
    }
    batches
}

async fn join_background(name: &str, handle: JoinHandle<()>) {
    if let Err(join_error) = handle.await {
        warn!("Background {name} did not finish cleanly: {join_error}");
    }
}
