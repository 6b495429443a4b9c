use clap::Parser;
use strain::args::common::StrainArgs;
use strain::configs::config_provider::{self, ConfigProvider};
use strain::configs::validators::Validatable;
use strain::error::StrainError;
use strain::logging::Logging;
use strain::runner::StrainRunner;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), StrainError> {
    let args = StrainArgs::parse();
    let mut logging = Logging::new();
    logging.init(args.log_file.as_deref())?;

    let mut config = config_provider::resolve(args.config.clone())
        .load_config()
        .await?;
    args.apply(&mut config);
    config.validate()?;

    let cancellation = CancellationToken::new();
    let ctrl_c_cancellation = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Received Ctrl-C, stopping after the current batch...");
            ctrl_c_cancellation.cancel();
        }
    });

    let runner = StrainRunner::new(args, config).with_cancellation(cancellation);
    let report = runner.run().await?;
    info!(
        "Finished run {}: {} batches, {} requests",
        report.uuid,
        report.batches.len(),
        report.summary.total_requests
    );
    Ok(())
}
