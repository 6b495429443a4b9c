use crate::report::RunReport;
use human_repr::HumanCount;

impl RunReport {
    pub fn subtext(&self) -> String {
        let mut lines = vec![
            self.format_params(),
            format!(
                "Average throughput: {:.2} req/s, failure-adjusted: {:.2} req/s",
                self.summary.average_throughput_rps, self.summary.failure_adjusted_throughput_rps
            ),
            format!(
                "Average latency: {:.2} ms, non-success: {} of {}",
                self.summary.average_latency_ms,
                self.summary.total_non_success.human_count_bare(),
                self.summary.total_requests.human_count_bare()
            ),
        ];

        if let Some(search) = &self.search {
            lines.push(format!(
                "Breaking point: {} ({})",
                search.breaking_point, search.termination
            ));
        }

        lines.push(format!("Host: {}", self.hardware.describe()));
        lines.join("\n")
    }

    fn format_params(&self) -> String {
        format!(
            "{} - {}, timeout {}",
            self.params.target_url,
            self.params.format_load_info(),
            self.params.timeout
        )
    }
}
