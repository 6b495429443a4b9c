use strain_report::batch_summary::BatchSummary;
use strain_report::run_summary::RunSummary;

/// Folds per-batch summaries into run-level figures.
///
/// The failure share weighs every batch by its request count, so large batches dominate.
pub fn from_batches(batches: &[BatchSummary]) -> RunSummary {
    if batches.is_empty() {
        return RunSummary::default();
    }

    let count = batches.len() as f64;
    let total_requests: u64 = batches.iter().map(|b| b.total_requests).sum();
    let total_non_success: u64 = batches.iter().map(|b| b.non_success_count).sum();
    let total_transport_failures = batches.iter().map(|b| b.transport_failures).sum();
    let total_bytes = batches.iter().map(|b| b.total_bytes).sum();

    let average_throughput_rps = batches.iter().map(|b| b.throughput_rps).sum::<f64>() / count;
    let average_latency_ms = if total_requests == 0 {
        0.0
    } else {
        batches
            .iter()
            .map(|b| b.avg_latency_ms * b.total_requests as f64)
            .sum::<f64>()
            / total_requests as f64
    };

    let failure_share = if total_requests == 0 {
        0.0
    } else {
        total_non_success as f64 / total_requests as f64
    };
    let failure_throughput_rps = average_throughput_rps * failure_share;

    RunSummary {
        batches: batches.len() as u32,
        total_requests,
        total_non_success,
        total_transport_failures,
        total_bytes,
        average_throughput_rps,
        average_latency_ms,
        failure_share,
        failure_throughput_rps,
        failure_adjusted_throughput_rps: average_throughput_rps - failure_throughput_rps,
    }
}
