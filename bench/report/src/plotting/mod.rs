pub mod chart;
pub mod chart_kind;
mod text;
