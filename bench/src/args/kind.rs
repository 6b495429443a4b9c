use crate::configs::engine::RampSchedule;
use crate::args::defaults::DEFAULT_ITERATIONS;
use clap::{Parser, Subcommand};
use std::num::NonZeroU32;
use strain_report::run_kind::RunKind;

#[derive(Subcommand, Debug, Clone)]
pub enum RunKindCommand {
    #[command(
        about = "Ramp benchmark",
        long_about = "N iterations, iteration i sends i x M requests spread by the ramp schedule",
        visible_alias = "r",
        verbatim_doc_comment
    )]
    Ramp(RampArgs),

    #[command(
        about = "Breaking point search",
        long_about = "Bursts growing by a fixed increment until the first non-success response",
        visible_alias = "bp",
        verbatim_doc_comment
    )]
    Search(SearchArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct RampArgs {
    /// Target URL
    #[arg(long, short = 'u')]
    pub url: String,

    /// Number of iterations, iteration i sends i x per-iteration requests
    #[arg(long, short = 'a', default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: NonZeroU32,

    /// Requests per iteration step [config: ramp.requests_per_iteration, default: 100]
    #[arg(long)]
    pub per_iteration: Option<NonZeroU32>,

    /// Delay schedule between launches [config: ramp.schedule, default: concave]
    #[arg(long, value_enum)]
    pub schedule: Option<RampSchedule>,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Target URL
    #[arg(long, short = 'u')]
    pub url: String,

    /// Concurrency added after every clean burst [config: search.increment, default: 10]
    #[arg(long, short = 'i')]
    pub increment: Option<NonZeroU32>,

    /// Stop once the next burst would exceed this concurrency [config: search.max_concurrency]
    #[arg(long, short = 'm')]
    pub max_concurrency: Option<NonZeroU32>,
}

impl RunKindCommand {
    pub fn as_run_kind(&self) -> RunKind {
        match self {
            RunKindCommand::Ramp(_) => RunKind::Ramp,
            RunKindCommand::Search(_) => RunKind::BreakingPoint,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            RunKindCommand::Ramp(args) => &args.url,
            RunKindCommand::Search(args) => &args.url,
        }
    }
}
