//! Pure aggregation passes over caller-owned rows.
//!
//! Nothing here keeps state between calls or fails on dirty data: missing
//! fields, unparsable numbers and dates degrade to zeros and exclusions.

pub mod grouping;
pub mod period;
pub mod ranking;
pub mod stats;
pub mod stock;

pub use grouping::{group_and_aggregate, AggregateGroups};
pub use period::{bucket_by_period, filter_by_period};
pub use ranking::{classify_abc, concentration_alert, distribution, rank, top_n};
pub use stats::{ranking_spread, summarize, team_performance};
pub use stock::analyze_stock;
