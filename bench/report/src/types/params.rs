use super::run_kind::RunKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct RunParams {
    pub kind: RunKind,
    pub target_url: String,
    pub iterations: Option<u32>,
    pub requests_per_iteration: Option<u32>,
    pub schedule: Option<String>,
    pub increment: Option<u32>,
    pub max_concurrency: Option<u32>,
    pub max_in_flight: Option<usize>,
    pub timeout: String,
    pub remark: Option<String>,
    pub pretty_name: String,
}

impl RunParams {
    pub fn format_load_info(&self) -> String {
        match self.kind {
            RunKind::Ramp => format!(
                "{} iterations x {} requests, {} schedule",
                self.iterations.unwrap_or_default(),
                self.requests_per_iteration.unwrap_or_default(),
                self.schedule.as_deref().unwrap_or("unknown"),
            ),
            RunKind::BreakingPoint => format!(
                "burst increment {}{}",
                self.increment.unwrap_or_default(),
                self.max_concurrency
                    .map(|max| format!(", up to {max}"))
                    .unwrap_or_default(),
            ),
        }
    }
}
