use super::batch_summary::BatchSummary;
use super::hardware::HostHardware;
use super::params::RunParams;
use super::run_kind::RunKind;
use super::run_summary::RunSummary;
use super::search_summary::SearchSummary;
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct RunReport {
    /// Run unique identifier
    pub uuid: Uuid,

    /// Timestamp when the run was finished
    pub timestamp: String,

    /// Load generator hardware
    pub hardware: HostHardware,

    /// Run parameters
    pub params: RunParams,

    /// Summary across all batches
    pub summary: RunSummary,

    /// One summary per dispatched batch, in dispatch order
    pub batches: Vec<BatchSummary>,

    /// Present for breaking-point runs only
    pub search: Option<SearchSummary>,
}

impl RunReport {
    pub fn dump_to_json(&self, output_dir: &str) -> std::io::Result<()> {
        std::fs::create_dir_all(output_dir)?;

        let report_path = Path::new(output_dir).join("report.json");
        let report_json = serde_json::to_string(self)?;
        std::fs::write(report_path, report_json)
    }

    pub fn batch_labels(&self) -> Vec<String> {
        self.batches
            .iter()
            .map(|b| match self.params.kind {
                RunKind::Ramp => b.iteration.to_string(),
                RunKind::BreakingPoint => b.total_requests.to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_dump_report_as_json() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path().join("run").to_string_lossy().to_string();
        let report = RunReport {
            batches: vec![BatchSummary {
                iteration: 1,
                total_requests: 100,
                ..Default::default()
            }],
            ..Default::default()
        };

        report.dump_to_json(&dir).unwrap();

        let json = std::fs::read_to_string(Path::new(&dir).join("report.json")).unwrap();
        let parsed: RunReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.batches.len(), 1);
        assert_eq!(parsed.batches[0].total_requests, 100);
    }

    #[test]
    fn should_label_breaking_point_batches_by_concurrency() {
        let report = RunReport {
            params: RunParams {
                kind: RunKind::BreakingPoint,
                ..Default::default()
            },
            batches: vec![
                BatchSummary {
                    iteration: 1,
                    total_requests: 10,
                    ..Default::default()
                },
                BatchSummary {
                    iteration: 2,
                    total_requests: 20,
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        assert_eq!(report.batch_labels(), vec!["10", "20"]);
    }
}
