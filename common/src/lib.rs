pub mod dataset;
pub mod error;
pub mod metrics;
pub mod plot;
pub mod report;
pub mod runner;
pub mod scan;

pub const DEFAULT_CHART_FILE: &str = "jacobi_performance.png";
