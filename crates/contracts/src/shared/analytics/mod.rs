//! Plain result records produced by the aggregation engine.
//!
//! Every type here is JSON-serializable and directly consumable by chart,
//! table and report renderers.

pub mod period;
pub mod ranking;
pub mod stats;
pub mod stock;

pub use period::*;
pub use ranking::*;
pub use stats::*;
pub use stock::*;
