use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize, Default,
)]
pub enum RunKind {
    #[default]
    #[display("Ramp")]
    #[serde(rename = "ramp")]
    Ramp,
    #[display("Breaking Point")]
    #[serde(rename = "breaking_point")]
    BreakingPoint,
}

impl RunKind {
    pub fn batch_axis_label(&self) -> &'static str {
        match self {
            RunKind::Ramp => "Iteration",
            RunKind::BreakingPoint => "Concurrency",
        }
    }
}
