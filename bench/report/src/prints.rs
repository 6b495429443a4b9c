use colored::{Color, ColoredString, Colorize};
use human_repr::HumanCount;
use tracing::info;

use crate::{batch_summary::BatchSummary, report::RunReport, run_summary::RunSummary};

impl RunReport {
    pub fn print_summary(&self) {
        println!();
        let params_print = format!(
            "Run: {}, target: {}, {}, timeout: {}\n",
            self.params.kind,
            self.params.target_url,
            self.params.format_load_info(),
            self.params.timeout,
        )
        .blue();

        info!("{}", params_print);
        info!("Host: {}", self.hardware.describe());

        self.batches
            .iter()
            .for_each(|b| info!("{}", b.formatted_string()));

        info!("{}\n", self.summary.formatted_string());

        if let Some(search) = &self.search {
            info!(
                "{}\n",
                format!(
                    "Breaking point: {} concurrent requests after {} rounds ({})",
                    search.breaking_point, search.rounds, search.termination
                )
                .bold()
                .yellow()
            );
        }
    }
}

impl BatchSummary {
    pub fn formatted_string(&self) -> ColoredString {
        let color = if self.is_clean() {
            Color::Green
        } else {
            Color::Red
        };

        format!(
            "Batch #{}: {} requests in {:.2} s, throughput: {:.2} req/s, \
            average latency: {:.2} ms, p50: {:.2} ms, p95: {:.2} ms, p99: {:.2} ms, \
            non-success: {} ({} transport failures), received: {}",
            self.iteration,
            self.total_requests,
            self.elapsed_secs,
            self.throughput_rps,
            self.avg_latency_ms,
            self.p50_latency_ms,
            self.p95_latency_ms,
            self.p99_latency_ms,
            self.non_success_count,
            self.transport_failures,
            self.total_bytes.human_count_bytes(),
        )
        .color(color)
    }
}

impl RunSummary {
    pub fn formatted_string(&self) -> ColoredString {
        format!(
            "Total: {} requests in {} batches, average throughput: {:.2} req/s, \
            average latency: {:.2} ms, failure share: {:.2}%, \
            failure-adjusted throughput: {:.2} req/s",
            self.total_requests.human_count_bare(),
            self.batches,
            self.average_throughput_rps,
            self.average_latency_ms,
            self.failure_share * 100.0,
            self.failure_adjusted_throughput_rps,
        )
        .green()
    }
}
