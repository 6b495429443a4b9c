mod plotting;
mod prints;
mod types;
mod utils;

pub use types::*;

use charming::{element::Symbol, Chart};
use plotting::chart::StrainChart;
use plotting::chart_kind::ChartKind;

const THROUGHPUT_COLOR: &str = "#5470c6";
const FAILURES_COLOR: &str = "#ee6666";
const AVG_LATENCY_COLOR: &str = "#91cc75";
const P50_LATENCY_COLOR: &str = "#fac858";
const P95_LATENCY_COLOR: &str = "#73c0de";
const P99_LATENCY_COLOR: &str = "#9a60b4";

/// Throughput per batch (left axis) against non-success responses per batch (right axis).
pub fn create_throughput_chart(report: &report::RunReport, dark: bool) -> Chart {
    let title = report.title(ChartKind::Throughput);

    StrainChart::new(&title, &report.subtext(), dark, false)
        .with_category_x_axis(report.params.kind.batch_axis_label(), report.batch_labels())
        .with_dual_y_axis("Throughput [req/s]", "Non-success responses")
        .add_dual_series(
            "Throughput",
            report.batches.iter().map(|b| b.throughput_rps).collect(),
            Symbol::Circle,
            THROUGHPUT_COLOR,
            0,
        )
        .add_dual_series(
            "Non-success",
            report
                .batches
                .iter()
                .map(|b| b.non_success_count as f64)
                .collect(),
            Symbol::Triangle,
            FAILURES_COLOR,
            1,
        )
        .inner
}

/// Latency distribution per batch.
pub fn create_latency_chart(report: &report::RunReport, dark: bool) -> Chart {
    let title = report.title(ChartKind::Latency);
    let series = |f: fn(&batch_summary::BatchSummary) -> f64| -> Vec<f64> {
        report.batches.iter().map(f).collect()
    };

    StrainChart::new(&title, &report.subtext(), dark, false)
        .with_category_x_axis(report.params.kind.batch_axis_label(), report.batch_labels())
        .with_y_axis("Latency [ms]")
        .add_series(
            "Average",
            series(|b| b.avg_latency_ms),
            Symbol::Circle,
            AVG_LATENCY_COLOR,
        )
        .add_series(
            "P50",
            series(|b| b.p50_latency_ms),
            Symbol::Diamond,
            P50_LATENCY_COLOR,
        )
        .add_series(
            "P95",
            series(|b| b.p95_latency_ms),
            Symbol::Triangle,
            P95_LATENCY_COLOR,
        )
        .add_series(
            "P99",
            series(|b| b.p99_latency_ms),
            Symbol::Rect,
            P99_LATENCY_COLOR,
        )
        .inner
}
