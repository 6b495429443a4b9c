use clap::Parser;

#[derive(Parser, Debug, Clone, Default)]
pub struct RunOutputArgs {
    /// Output directory for per-batch CSV files, report.json and HTML charts
    #[arg(long, short = 'o')]
    pub output_dir: Option<String>,

    /// Identifier for the run (defaults to hostname if not provided)
    #[arg(long)]
    pub identifier: Option<String>,

    /// Additional remark for the run (e.g., cold-cache)
    #[arg(long)]
    pub remark: Option<String>,

    /// Render charts with the light theme
    #[arg(long, default_value_t = false)]
    pub light_charts: bool,
}
