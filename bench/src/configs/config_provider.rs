use super::engine::EngineConfig;
use crate::args::defaults::{CONFIG_PATH_ENV, ENV_PREFIX};
use crate::error::StrainError;
use async_trait::async_trait;
use figment::providers::{Env, Format, Json, Serialized, Toml};
use figment::Figment;
use std::env;
use tracing::{error, info};

#[async_trait]
pub trait ConfigProvider {
    async fn load_config(&self) -> Result<EngineConfig, StrainError>;
}

/// Defaults, then the optional file, then `STRAIN_` variables (`__` separates sections,
/// e.g. `STRAIN_HTTP__TIMEOUT=5s`).
#[derive(Debug)]
pub struct FileConfigProvider {
    path: Option<String>,
}

/// Explicit path first, `STRAIN_CONFIG_PATH` otherwise.
pub fn resolve(path: Option<String>) -> FileConfigProvider {
    FileConfigProvider::new(path.or_else(|| env::var(CONFIG_PATH_ENV).ok()))
}

impl FileConfigProvider {
    pub fn new(path: Option<String>) -> FileConfigProvider {
        FileConfigProvider { path }
    }
}

#[async_trait]
impl ConfigProvider for FileConfigProvider {
    async fn load_config(&self) -> Result<EngineConfig, StrainError> {
        let config_builder = Figment::from(Serialized::defaults(EngineConfig::default()));
        let config_builder = match &self.path {
            Some(path) => {
                info!("Loading config from path: '{path}'...");
                let extension = path.rsplit('.').next().unwrap_or("");
                match extension {
                    "json" => config_builder.merge(Json::file(path)),
                    "toml" => config_builder.merge(Toml::file(path)),
                    _ => {
                        error!("Cannot load configuration: invalid file extension, only .json and .toml are supported.");
                        return Err(StrainError::InvalidConfigurationFile(path.clone()));
                    }
                }
            }
            None => config_builder,
        };

        let config: EngineConfig = config_builder
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|error| {
                error!("Cannot load configuration: {error}");
                StrainError::CannotLoadConfiguration(Box::new(error))
            })?;

        if let Some(path) = &self.path {
            info!("Config loaded from path: '{path}'");
        }
        Ok(config)
    }
}
