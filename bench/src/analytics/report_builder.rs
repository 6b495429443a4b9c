use super::run_summary::from_batches;
use chrono::Utc;
use strain_report::{
    batch_summary::BatchSummary, hardware::HostHardware, params::RunParams, report::RunReport,
    search_summary::SearchSummary,
};

pub struct RunReportBuilder;

impl RunReportBuilder {
    pub fn build(
        hardware: HostHardware,
        params: RunParams,
        batches: Vec<BatchSummary>,
        search: Option<SearchSummary>,
    ) -> RunReport {
        let uuid = uuid::Uuid::new_v4();
        let timestamp = Utc::now().to_rfc3339();
        let summary = from_batches(&batches);

        RunReport {
            uuid,
            timestamp,
            hardware,
            params,
            summary,
            batches,
            search,
        }
    }
}
