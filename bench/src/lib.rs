pub mod actors;
pub mod analytics;
pub mod args;
pub mod configs;
pub mod dispatcher;
pub mod error;
pub mod logging;
pub mod plot;
pub mod runner;
pub mod search;
pub mod sinks;
pub mod utils;
