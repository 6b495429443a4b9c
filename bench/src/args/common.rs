use super::kind::RunKindCommand;
use super::output::RunOutputArgs;
use crate::configs::engine::EngineConfig;
use crate::utils::duration::StrainDuration;
use clap::Parser;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::str::FromStr;
use strain_report::params::RunParams;
use strain_report::run_kind::RunKind;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct StrainArgs {
    /// Run kind
    #[command(subcommand)]
    pub kind: RunKindCommand,

    /// Configuration file (TOML or JSON), falls back to STRAIN_CONFIG_PATH
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    /// Bound for a whole request including the body read, e.g. 5s or 500ms [default: 30s]
    #[arg(long, short = 't', global = true, value_parser = StrainDuration::from_str)]
    pub timeout: Option<StrainDuration>,

    /// TCP connect timeout [default: 10s]
    #[arg(long, global = true, value_parser = StrainDuration::from_str)]
    pub connect_timeout: Option<StrainDuration>,

    /// Maximum number of outstanding requests per batch, unbounded by default
    #[arg(long, global = true)]
    pub max_in_flight: Option<NonZeroUsize>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(flatten)]
    pub output: RunOutputArgs,
}

impl StrainArgs {
    pub fn url(&self) -> &str {
        self.kind.url()
    }

    /// Explicit flags win over the file and environment layers.
    pub fn apply(&self, config: &mut EngineConfig) {
        if let Some(timeout) = self.timeout {
            config.http.timeout = timeout;
        }
        if let Some(connect_timeout) = self.connect_timeout {
            config.http.connect_timeout = connect_timeout;
        }
        if let Some(max_in_flight) = self.max_in_flight {
            config.dispatch.max_in_flight = Some(max_in_flight.get());
        }

        match &self.kind {
            RunKindCommand::Ramp(ramp) => {
                if let Some(per_iteration) = ramp.per_iteration {
                    config.ramp.requests_per_iteration = per_iteration.get();
                }
                if let Some(schedule) = ramp.schedule {
                    config.ramp.schedule = schedule;
                }
            }
            RunKindCommand::Search(search) => {
                if let Some(increment) = search.increment {
                    config.search.increment = increment.get();
                }
                if let Some(max_concurrency) = search.max_concurrency {
                    config.search.max_concurrency = Some(max_concurrency.get());
                }
            }
        }

        let output = &self.output;
        if output.output_dir.is_some() {
            config.output.output_dir.clone_from(&output.output_dir);
        }
        if output.identifier.is_some() {
            config.output.identifier.clone_from(&output.identifier);
        }
        if output.remark.is_some() {
            config.output.remark.clone_from(&output.remark);
        }
        if output.light_charts {
            config.output.light_charts = true;
        }
    }

    pub fn iterations(&self) -> Option<u32> {
        match &self.kind {
            RunKindCommand::Ramp(ramp) => Some(ramp.iterations.get()),
            RunKindCommand::Search(_) => None,
        }
    }

    /// Parameters recorded in the report, resolved against the effective configuration.
    pub fn run_params(&self, config: &EngineConfig) -> RunParams {
        let kind = self.kind.as_run_kind();
        let mut params = RunParams {
            kind,
            target_url: self.url().to_owned(),
            max_in_flight: config.dispatch.max_in_flight,
            timeout: config.http.timeout.to_string(),
            remark: config.output.remark.clone(),
            ..Default::default()
        };

        match kind {
            RunKind::Ramp => {
                params.iterations = self.iterations();
                params.requests_per_iteration = Some(config.ramp.requests_per_iteration);
                params.schedule = Some(config.ramp.schedule.to_string());
            }
            RunKind::BreakingPoint => {
                params.increment = Some(config.search.increment);
                params.max_concurrency = config.search.max_concurrency;
            }
        }
        params.pretty_name = generate_pretty_name(&params);
        params
    }
}

fn generate_pretty_name(params: &RunParams) -> String {
    let mut name = format!("{} → {}, {}", params.kind, params.target_url, params.format_load_info());
    if let Some(remark) = &params.remark {
        name.push_str(&format!(" ({remark})"));
    }
    name
}
