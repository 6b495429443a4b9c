use crate::analytics::record::RequestRecord;
use crate::dispatcher::batch::Batch;
use std::time::Duration;
use strain_report::batch_summary::BatchSummary;

/// A sealed batch whose records carry the batch-level throughput.
#[derive(Debug, Clone)]
pub struct AggregatedBatch {
    pub iteration: u32,
    pub target_url: String,
    pub records: Vec<RequestRecord>,
    pub summary: BatchSummary,
}

/// Requests per second over the wall clock span of a batch, 0 when undefined.
pub fn throughput(total_requests: usize, elapsed: Duration) -> f64 {
    let elapsed_secs = elapsed.as_secs_f64();
    if total_requests == 0 || elapsed_secs <= 0.0 {
        return 0.0;
    }
    total_requests as f64 / elapsed_secs
}

pub fn aggregate(batch: Batch) -> AggregatedBatch {
    let iteration = batch.iteration();
    let target_url = batch.target_url().to_owned();
    let elapsed = batch.elapsed();
    let mut records = batch.into_records();

    let throughput_rps = throughput(records.len(), elapsed);
    records
        .iter_mut()
        .for_each(|record| record.throughput = throughput_rps);

    let summary = summarize(iteration, elapsed, throughput_rps, &records);
    AggregatedBatch {
        iteration,
        target_url,
        records,
        summary,
    }
}

fn summarize(
    iteration: u32,
    elapsed: Duration,
    throughput_rps: f64,
    records: &[RequestRecord],
) -> BatchSummary {
    let total_requests = records.len() as u64;
    let non_success_count = records.iter().filter(|r| !r.is_success()).count() as u64;
    let transport_failures = records.iter().filter(|r| r.is_transport_failure()).count() as u64;
    let total_bytes = records.iter().map(|r| r.byte_size).sum();

    let mut latencies_ms: Vec<f64> = records.iter().map(RequestRecord::latency_ms).collect();
    latencies_ms.sort_by(|a, b| a.total_cmp(b));
    let avg_latency_ms = if latencies_ms.is_empty() {
        0.0
    } else {
        latencies_ms.iter().sum::<f64>() / latencies_ms.len() as f64
    };

    BatchSummary {
        iteration,
        total_requests,
        elapsed_secs: elapsed.as_secs_f64(),
        throughput_rps,
        avg_latency_ms,
        p50_latency_ms: calculate_percentile(&latencies_ms, 50.0),
        p90_latency_ms: calculate_percentile(&latencies_ms, 90.0),
        p95_latency_ms: calculate_percentile(&latencies_ms, 95.0),
        p99_latency_ms: calculate_percentile(&latencies_ms, 99.0),
        max_latency_ms: latencies_ms.last().copied().unwrap_or_default(),
        non_success_count,
        transport_failures,
        total_bytes,
    }
}

fn calculate_percentile(sorted_data: &[f64], percentile: f64) -> f64 {
    if sorted_data.is_empty() {
        return 0.0;
    }

    let rank = percentile / 100.0 * (sorted_data.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;

    if upper >= sorted_data.len() {
        return sorted_data[sorted_data.len() - 1];
    }

    let weight = rank - lower as f64;
    sorted_data[lower] * (1.0 - weight) + sorted_data[upper] * weight
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn batch_of(elapsed: Duration, records: Vec<RequestRecord>) -> Batch {
        Batch::new(1, "http://localhost/", Utc::now(), elapsed, records)
    }

    #[test]
    fn throughput_should_use_wall_clock_span_only() {
        let records = (0..100)
            .map(|unit| RequestRecord::new(unit, Duration::from_millis(100 + unit as u64 * 13), 10, 200))
            .collect();

        let aggregated = aggregate(batch_of(Duration::from_secs(2), records));

        assert_eq!(aggregated.summary.throughput_rps, 50.0);
        assert!(aggregated.records.iter().all(|r| r.throughput == 50.0));
    }

    #[test]
    fn empty_batch_should_have_zero_throughput() {
        let aggregated = aggregate(batch_of(Duration::from_secs(1), Vec::new()));

        assert_eq!(aggregated.summary.throughput_rps, 0.0);
        assert_eq!(aggregated.summary.avg_latency_ms, 0.0);
        assert_eq!(aggregated.summary.p99_latency_ms, 0.0);
        assert!(aggregated.summary.throughput_rps.is_finite());
    }

    #[test]
    fn zero_elapsed_time_should_not_divide_by_zero() {
        assert_eq!(throughput(10, Duration::ZERO), 0.0);
    }

    #[test]
    fn should_count_non_success_and_average_all_latencies() {
        let records = vec![
            RequestRecord::new(0, Duration::from_millis(10), 100, 200),
            RequestRecord::new(1, Duration::from_millis(20), 0, 503),
            RequestRecord::transport_failure(2, Duration::from_millis(30)),
            RequestRecord::new(3, Duration::from_millis(40), 50, 201),
        ];

        let summary = aggregate(batch_of(Duration::from_secs(1), records)).summary;

        assert_eq!(summary.total_requests, 4);
        assert_eq!(summary.non_success_count, 3);
        assert_eq!(summary.transport_failures, 1);
        assert_eq!(summary.total_bytes, 150);
        assert!((summary.avg_latency_ms - 25.0).abs() < 1e-9);
        assert!((summary.max_latency_ms - 40.0).abs() < 1e-9);
        assert!(!summary.is_clean());
    }

    #[test]
    fn percentile_should_interpolate_between_ranks() {
        let data = [10.0, 20.0, 30.0, 40.0, 50.0];
        assert_eq!(calculate_percentile(&data, 50.0), 30.0);
        assert_eq!(calculate_percentile(&data, 100.0), 50.0);
        assert!((calculate_percentile(&data, 90.0) - 46.0).abs() < 1e-9);
    }
}
