use super::engine::{DispatchConfig, EngineConfig, HttpConfig, RampConfig, SearchConfig};
use crate::error::StrainError;
use tracing::error;

pub trait Validatable<E> {
    fn validate(&self) -> Result<(), E>;
}

impl Validatable<StrainError> for EngineConfig {
    fn validate(&self) -> Result<(), StrainError> {
        self.http.validate()?;
        self.dispatch.validate()?;
        self.ramp.validate()?;
        self.search.validate()?;

        Ok(())
    }
}

impl Validatable<StrainError> for HttpConfig {
    fn validate(&self) -> Result<(), StrainError> {
        if self.timeout.is_zero() {
            error!("HTTP configuration -> timeout must be greater than zero.");
            return Err(StrainError::InvalidConfiguration(
                "http.timeout must be greater than zero".to_owned(),
            ));
        }

        Ok(())
    }
}

impl Validatable<StrainError> for DispatchConfig {
    fn validate(&self) -> Result<(), StrainError> {
        if self.max_in_flight == Some(0) {
            error!("Dispatch configuration -> max in flight cannot be zero, omit it for no limit.");
            return Err(StrainError::InvalidConfiguration(
                "dispatch.max_in_flight cannot be zero".to_owned(),
            ));
        }

        Ok(())
    }
}

impl Validatable<StrainError> for RampConfig {
    fn validate(&self) -> Result<(), StrainError> {
        if self.requests_per_iteration == 0 {
            error!("Ramp configuration -> requests per iteration must be greater than zero.");
            return Err(StrainError::InvalidConfiguration(
                "ramp.requests_per_iteration must be greater than zero".to_owned(),
            ));
        }

        Ok(())
    }
}

impl Validatable<StrainError> for SearchConfig {
    fn validate(&self) -> Result<(), StrainError> {
        if self.increment == 0 {
            error!("Search configuration -> increment must be greater than zero.");
            return Err(StrainError::InvalidConfiguration(
                "search.increment must be greater than zero".to_owned(),
            ));
        }
        if matches!(self.max_concurrency, Some(max) if max < self.increment) {
            error!("Search configuration -> max concurrency is below the first probe.");
            return Err(StrainError::InvalidConfiguration(
                "search.max_concurrency must not be lower than search.increment".to_owned(),
            ));
        }

        Ok(())
    }
}
