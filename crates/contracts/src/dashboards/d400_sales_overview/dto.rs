use serde::{Deserialize, Serialize};

use crate::shared::analytics::{
    AbcEntry, AbcSummary, AnalysisPeriod, ConcentrationAlert, Granularity, PeriodBucket,
    PeriodWindow, RankedEntry, TeamPerformance,
};
use crate::shared::dataset::FieldMapping;
use crate::shared::indicators::IndicatorValue;

fn default_top_n() -> usize {
    10
}

/// Options for the sales overview (executive report) over one dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesOverviewRequest {
    #[serde(default)]
    pub field_mapping: FieldMapping,
    #[serde(default)]
    pub period: AnalysisPeriod,
    /// Length of the seller/category/supplier rankings
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default)]
    pub granularity: Granularity,
    /// Insert zero buckets for periods without sales
    #[serde(default)]
    pub fill_gaps: bool,
}

impl Default for SalesOverviewRequest {
    fn default() -> Self {
        Self {
            field_mapping: FieldMapping::default(),
            period: AnalysisPeriod::default(),
            top_n: default_top_n(),
            granularity: Granularity::default(),
            fill_gaps: false,
        }
    }
}

/// Sales overview ready for charts, tables and the PDF report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesOverviewResponse {
    pub period: AnalysisPeriod,
    /// pt-BR name of `period` for report headers
    pub period_label: String,
    /// Date range actually analysed, None for "all" or undated data
    pub window: Option<PeriodWindow>,
    /// Rows left after the period filter
    pub row_count: usize,
    pub total_revenue: f64,
    pub seller_ranking: Vec<RankedEntry>,
    pub category_distribution: Vec<RankedEntry>,
    pub supplier_distribution: Vec<RankedEntry>,
    pub product_abc: Vec<AbcEntry>,
    pub abc_summary: AbcSummary,
    pub team_performance: TeamPerformance,
    pub alerts: Vec<ConcentrationAlert>,
    pub timeline: Vec<PeriodBucket>,
    pub indicators: Vec<IndicatorValue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request: SalesOverviewRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.period, AnalysisPeriod::All);
        assert_eq!(request.top_n, 10);
        assert_eq!(request.granularity, Granularity::Auto);
        assert!(!request.fill_gaps);
    }

    #[test]
    fn test_request_from_json() {
        let json = r#"{
            "field_mapping": {"valor": "Total", "data": "Dia"},
            "period": "6months",
            "top_n": 5,
            "granularity": "week",
            "fill_gaps": true
        }"#;
        let request: SalesOverviewRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.field_mapping.column("data"), Some("Dia"));
        assert_eq!(request.period, AnalysisPeriod::SixMonths);
        assert_eq!(request.top_n, 5);
        assert_eq!(request.granularity, Granularity::Week);
        assert!(request.fill_gaps);
    }
}
