//! Executive KPIs: identifiers, computed values and the catalogue that
//! names and formats them.

use serde::{Deserialize, Serialize};

use crate::shared::analytics::{AnalysisPeriod, PeriodWindow};
use crate::shared::dataset::FieldMapping;

/// KPI key, e.g. `sales_revenue`. Serializes as the bare string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorId(pub String);

impl IndicatorId {
    pub fn new(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueFormat {
    Money { currency: String },
    Integer,
    Number { decimals: u8 },
}

/// Direction of the change against the previous window (±5% band).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorStatus {
    Good,
    Bad,
    Neutral,
}

/// Catalogue entry of one KPI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorDefinition {
    pub id: IndicatorId,
    pub label: String,
    pub short_label: Option<String>,
    pub format: ValueFormat,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorCatalog {
    pub indicators: Vec<IndicatorDefinition>,
}

/// One KPI over the current window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorValue {
    pub id: IndicatorId,
    pub value: f64,
    /// Same KPI over the previous window; `None` without a comparable window
    pub previous_value: Option<f64>,
    /// `None` when there is nothing to compare with or the previous value is ~0
    pub change_percent: Option<f64>,
    pub status: IndicatorStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndicatorContext {
    #[serde(default)]
    pub period: AnalysisPeriod,
    #[serde(default)]
    pub field_mapping: FieldMapping,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeIndicatorsRequest {
    pub indicator_ids: Vec<IndicatorId>,
    pub context: IndicatorContext,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeIndicatorsResponse {
    pub values: Vec<IndicatorValue>,
    /// Window the values were computed over; `None` for `all` or undated data
    pub window: Option<PeriodWindow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_wire_format() {
        let value = IndicatorValue {
            id: IndicatorId::new("sales_count"),
            value: 12.0,
            previous_value: Some(10.0),
            change_percent: Some(20.0),
            status: IndicatorStatus::Good,
        };

        let json = serde_json::to_value(&value).unwrap();

        assert_eq!(json["id"], "sales_count");
        assert_eq!(json["previousValue"], 10.0);
        assert_eq!(json["changePercent"], 20.0);
        assert_eq!(json["status"], "good");
    }

    #[test]
    fn test_format_is_tagged() {
        let json = serde_json::to_value(ValueFormat::Money {
            currency: "R$".into(),
        })
        .unwrap();
        assert_eq!(json["kind"], "money");
        assert_eq!(json["currency"], "R$");
    }
}
