pub mod batch_summary;
pub mod hardware;
pub mod params;
pub mod report;
pub mod run_kind;
pub mod run_summary;
pub mod search_summary;
