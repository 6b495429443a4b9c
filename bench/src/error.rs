use thiserror::Error;

#[derive(Debug, Error)]
pub enum StrainError {
    #[error("Cannot parse URL: {0}")]
    CannotParseUrl(String),
    #[error("Unsupported URL scheme: {0}, only http and https are supported")]
    UnsupportedUrlScheme(String),
    #[error("Cannot create HTTP client")]
    CannotCreateHttpClient(#[source] reqwest::Error),
    #[error("Concurrency limiter was closed while launching batch #{0}")]
    ConcurrencyLimiterClosed(u32),
    #[error("Request unit #{unit} of batch #{iteration} did not complete: {reason}")]
    RequestUnitFailed {
        iteration: u32,
        unit: u32,
        reason: String,
    },
    #[error("Cannot load configuration")]
    CannotLoadConfiguration(#[from] Box<figment::Error>),
    #[error("Cannot load configuration: invalid file extension of {0}, only .json and .toml are supported")]
    InvalidConfigurationFile(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Cannot write CSV file")]
    CannotWriteCsv(#[from] csv::Error),
    #[error("Cannot write to file")]
    CannotWriteToFile(#[from] std::io::Error),
    #[error("Cannot initialize logging: {0}")]
    CannotInitializeLogging(String),
}

impl StrainError {
    /// Errors that abort a single batch without ending the run.
    pub fn is_batch_failure(&self) -> bool {
        matches!(
            self,
            StrainError::ConcurrencyLimiterClosed(_) | StrainError::RequestUnitFailed { .. }
        )
    }
}
