use crate::error::StrainError;
use std::path::Path;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt,
    layer::{Layer, SubscriberExt},
    EnvFilter,
};

/// Keeps the non-blocking writers alive, logs still buffered are flushed on drop.
pub struct Logging {
    stdout_guard: Option<WorkerGuard>,
    file_guard: Option<WorkerGuard>,
}

impl Logging {
    pub fn new() -> Self {
        Logging {
            stdout_guard: None,
            file_guard: None,
        }
    }

    /// `RUST_LOG` selects the level, `info` when unset.
    pub fn init(&mut self, log_file: Option<&Path>) -> Result<&mut Self, StrainError> {
        let mut layers = vec![];

        let (stdout_writer, stdout_guard) = tracing_appender::non_blocking(std::io::stdout());
        let stdout_layer = fmt::Layer::default()
            .with_target(false)
            .with_writer(stdout_writer)
            .with_filter(env_filter())
            .boxed();
        self.stdout_guard = Some(stdout_guard);
        layers.push(stdout_layer);

        if let Some(file_path) = log_file {
            let directory = file_path.parent().unwrap_or_else(|| Path::new(""));
            let file_name = file_path.file_name().ok_or_else(|| {
                StrainError::CannotInitializeLogging(format!(
                    "log file path {} has no file name",
                    file_path.display()
                ))
            })?;
            let file_appender = tracing_appender::rolling::never(directory, file_name);
            let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);

            let file_layer = fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(file_writer)
                .with_filter(env_filter())
                .boxed();
            self.file_guard = Some(file_guard);
            layers.push(file_layer);
        }

        let subscriber = tracing_subscriber::registry().with(layers);
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| StrainError::CannotInitializeLogging(error.to_string()))?;

        Ok(self)
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self::new()
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy()
}
