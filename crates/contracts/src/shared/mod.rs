pub mod analytics;
pub mod dataset;
pub mod indicators;
