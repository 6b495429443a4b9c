use charming::theme::Theme;
use charming::{Chart, HtmlRenderer};
use human_repr::HumanCount;
use std::path::Path;
use std::time::Instant;
use strain_report::report::RunReport;
use tracing::info;

const CHART_WIDTH: u64 = 1600;
const CHART_HEIGHT: u64 = 1200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartType {
    Throughput,
    Latency,
}

impl ChartType {
    fn name(&self) -> &'static str {
        match self {
            ChartType::Throughput => "throughput",
            ChartType::Latency => "latency",
        }
    }

    fn create_chart(&self) -> fn(&RunReport, bool) -> Chart {
        match self {
            ChartType::Throughput => strain_report::create_throughput_chart,
            ChartType::Latency => strain_report::create_latency_chart,
        }
    }
}

/// Renders `<output_directory>/<chart>.html`. Expects `report.json` to be dumped already.
pub fn plot_chart(
    report: &RunReport,
    output_directory: &str,
    chart_type: ChartType,
    dark: bool,
) -> std::io::Result<()> {
    let data_processing_start = Instant::now();
    let chart = (chart_type.create_chart())(report, dark);
    let data_processing_time = data_processing_start.elapsed();

    let chart_render_start = Instant::now();
    let chart_path = save_chart(&chart, chart_type.name(), output_directory, dark)?;
    let chart_render_time = chart_render_start.elapsed();

    let report_path = Path::new(output_directory).join("report.json");
    let report_size = std::fs::metadata(&report_path)?.len();

    info!(
        "Generated {} plot at: {} ({} batches, report.json size: {}, data processing: {:.2?}, chart render: {:.2?})",
        chart_type.name(),
        chart_path.display(),
        report.batches.len(),
        report_size.human_count_bytes(),
        data_processing_time,
        chart_render_time
    );
    Ok(())
}

fn save_chart(
    chart: &Chart,
    file_name: &str,
    output_directory: &str,
    dark: bool,
) -> std::io::Result<std::path::PathBuf> {
    std::fs::create_dir_all(output_directory)?;
    let full_output_path = Path::new(output_directory).join(format!("{file_name}.html"));

    let theme = if dark { Theme::Dark } else { Theme::Default };
    let mut renderer = HtmlRenderer::new(file_name, CHART_WIDTH, CHART_HEIGHT).theme(theme);
    renderer
        .save(chart, &full_output_path)
        .map_err(|e| std::io::Error::other(format!("Failed to save HTML plot: {e}")))?;
    Ok(full_output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strain_report::batch_summary::BatchSummary;

    #[test]
    fn should_render_both_charts_next_to_the_report() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().to_string_lossy().to_string();
        let report = RunReport {
            batches: vec![
                BatchSummary {
                    iteration: 1,
                    total_requests: 100,
                    throughput_rps: 95.0,
                    ..Default::default()
                },
                BatchSummary {
                    iteration: 2,
                    total_requests: 200,
                    throughput_rps: 180.0,
                    non_success_count: 3,
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        report.dump_to_json(&output_dir).unwrap();

        plot_chart(&report, &output_dir, ChartType::Throughput, true).unwrap();
        plot_chart(&report, &output_dir, ChartType::Latency, false).unwrap();

        assert!(dir.path().join("throughput.html").exists());
        assert!(dir.path().join("latency.html").exists());
    }
}
