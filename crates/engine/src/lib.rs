//! Aggregation engine of the retail analytics dashboard.
//!
//! Callers hand in decoded spreadsheet rows plus a field mapping and get back
//! plain, serializable summaries: rankings, distributions, statistics, time
//! series, stock positions and KPI indicators.

pub mod analysis;
pub mod dashboards;
pub mod runner;
pub mod shared;
