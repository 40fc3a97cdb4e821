use serde::{Deserialize, Serialize};

/// Running totals for one value of a grouping dimension (one seller, one
/// category, ...). Lives for a single aggregation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateGroup {
    pub key: String,
    pub total_value: f64,
    pub count: u64,
    pub total_quantity: f64,
}

impl AggregateGroup {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            total_value: 0.0,
            count: 0,
            total_quantity: 0.0,
        }
    }

    /// Average value per row (ticket médio), 0 for an empty group.
    pub fn average_value(&self) -> f64 {
        if self.count > 0 {
            self.total_value / self.count as f64
        } else {
            0.0
        }
    }

    /// Average units per row, 0 for an empty group.
    pub fn average_quantity(&self) -> f64 {
        if self.count > 0 {
            self.total_quantity / self.count as f64
        } else {
            0.0
        }
    }
}

/// One position of a ranking.
///
/// Ranks are contiguous from 1 in non-increasing `value` order; `percentage`
/// is the share of the full dataset total (0..=100).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    pub key: String,
    pub value: f64,
    pub percentage: f64,
    pub rank: u32,
}

/// ABC (Pareto) class of a ranked entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbcClass {
    A,
    B,
    C,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbcEntry {
    #[serde(flatten)]
    pub entry: RankedEntry,
    /// Cumulative share up to and including this entry.
    pub cumulative_percentage: f64,
    pub class: AbcClass,
}

/// Entry count and value per ABC class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbcSummary {
    pub a_count: usize,
    pub b_count: usize,
    pub c_count: usize,
    pub a_value: f64,
    pub b_value: f64,
    pub c_value: f64,
}

/// Raised when a single seller/category concentrates too much of the total
/// ("alta dependência").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcentrationAlert {
    /// Semantic dimension the alert refers to ("vendedor", "categoria").
    pub dimension: String,
    pub key: String,
    pub percentage: f64,
    pub message: String,
}
