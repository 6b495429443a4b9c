use crate::args::defaults::*;
use crate::dispatcher::arrival::ArrivalPolicy;
use crate::utils::duration::StrainDuration;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub http: HttpConfig,
    pub dispatch: DispatchConfig,
    pub ramp: RampConfig,
    pub search: SearchConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Bound for a whole request, body read included. Exceeding it is a transport failure.
    pub timeout: StrainDuration,
    pub connect_timeout: StrainDuration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Upper bound of outstanding requests per batch, unbounded when absent.
    pub max_in_flight: Option<usize>,
    pub progress_channel_capacity: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RampSchedule {
    #[default]
    Concave,
    InverseSqrt,
}

impl Display for RampSchedule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RampSchedule::Concave => write!(f, "concave"),
            RampSchedule::InverseSqrt => write!(f, "inverse_sqrt"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RampConfig {
    pub requests_per_iteration: u32,
    pub schedule: RampSchedule,
    pub concave_k: u64,
    pub concave_unit: StrainDuration,
    pub inverse_sqrt_scale: StrainDuration,
    pub inverse_sqrt_floor: StrainDuration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub increment: u32,
    /// Stop probing above this concurrency, the search runs until failure when absent.
    pub max_concurrency: Option<u32>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for per-batch CSV files, `report.json` and charts.
    pub output_dir: Option<String>,
    pub identifier: Option<String>,
    pub remark: Option<String>,
    pub light_charts: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            max_in_flight: None,
            progress_channel_capacity: DEFAULT_PROGRESS_CHANNEL_CAPACITY,
        }
    }
}

impl Default for RampConfig {
    fn default() -> Self {
        Self {
            requests_per_iteration: DEFAULT_REQUESTS_PER_ITERATION.get(),
            schedule: RampSchedule::default(),
            concave_k: DEFAULT_CONCAVE_K,
            concave_unit: DEFAULT_CONCAVE_UNIT,
            inverse_sqrt_scale: DEFAULT_INVERSE_SQRT_SCALE,
            inverse_sqrt_floor: DEFAULT_INVERSE_SQRT_FLOOR,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            increment: DEFAULT_SEARCH_INCREMENT.get(),
            max_concurrency: None,
        }
    }
}

impl RampConfig {
    pub fn arrival_policy(&self) -> ArrivalPolicy {
        match self.schedule {
            RampSchedule::Concave => ArrivalPolicy::ConcaveRamp {
                k: self.concave_k,
                unit: self.concave_unit.get_duration(),
            },
            RampSchedule::InverseSqrt => ArrivalPolicy::InverseSqrtRamp {
                scale: self.inverse_sqrt_scale.get_duration(),
                floor: self.inverse_sqrt_floor.get_duration(),
            },
        }
    }
}
