pub mod aggregate;
pub mod record;
pub mod report_builder;
pub mod run_summary;
