pub mod config_provider;
pub mod engine;
pub mod validators;
