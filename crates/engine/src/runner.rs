//! One-shot report runs over a JSON file of already-decoded rows.

use contracts::dashboards::d400_sales_overview::SalesOverviewRequest;
use contracts::shared::analytics::AnalysisPeriod;
use contracts::shared::dataset::{FieldMapping, Row};
use contracts::shared::indicators::{ComputeIndicatorsRequest, IndicatorContext};
use serde::Deserialize;
use std::path::Path;

use crate::analysis::stock::analyze_stock;
use crate::dashboards::d400_sales_overview::build_sales_overview;
use crate::shared::config::Config;
use crate::shared::error::Result;
use crate::shared::fields::FieldResolver;
use crate::shared::format::format_number;
use crate::shared::indicators::compute_indicators;
use crate::shared::indicators::metadata::{build_catalog, ids};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    #[default]
    SalesOverview,
    Stock,
    Indicators,
    /// KPI labels and formats; ignores the rows
    IndicatorCatalog,
}

/// Input file of the report runner.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportInput {
    #[serde(default)]
    pub report: ReportKind,
    #[serde(default)]
    pub rows: Vec<Row>,
    #[serde(default)]
    pub field_mapping: FieldMapping,
    /// Full sales overview options; config defaults when absent. Its own
    /// mapping wins over `field_mapping` for fields mapped in both.
    #[serde(default)]
    pub request: Option<SalesOverviewRequest>,
    /// Indicator period; config default when absent
    #[serde(default)]
    pub period: Option<AnalysisPeriod>,
}

pub fn run_report(input: ReportInput, config: &Config) -> Result<serde_json::Value> {
    let aliases = config.field_aliases();
    tracing::info!(
        "running {:?} report over {} rows",
        input.report,
        format_number(input.rows.len())
    );

    let output = match input.report {
        ReportKind::SalesOverview => {
            let request = match input.request {
                Some(mut request) => {
                    request.field_mapping =
                        request.field_mapping.with_fallback(&input.field_mapping);
                    request
                }
                None => config.default_request(input.field_mapping),
            };
            serde_json::to_value(build_sales_overview(&input.rows, &request, &aliases))?
        }
        ReportKind::Stock => {
            let fields = FieldResolver::new(&input.field_mapping, &aliases);
            let report = analyze_stock(&input.rows, &fields, config.report.low_stock_threshold);
            serde_json::to_value(report)?
        }
        ReportKind::Indicators => {
            let request = ComputeIndicatorsRequest {
                indicator_ids: ids::all(),
                context: IndicatorContext {
                    period: input.period.unwrap_or(config.report.default_period),
                    field_mapping: input.field_mapping,
                },
            };
            serde_json::to_value(compute_indicators(&input.rows, &request, &aliases))?
        }
        ReportKind::IndicatorCatalog => serde_json::to_value(build_catalog())?,
    };

    Ok(output)
}

pub fn run_report_json(json: &str, config: &Config) -> Result<serde_json::Value> {
    let input: ReportInput = serde_json::from_str(json)?;
    run_report(input, config)
}

pub fn run_report_file(path: &Path, config: &Config) -> Result<serde_json::Value> {
    let contents = std::fs::read_to_string(path)?;
    run_report_json(&contents, config)
}
