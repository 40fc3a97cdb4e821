use contracts::shared::analytics::{AnalysisPeriod, PeriodWindow};
use contracts::shared::dataset::Row;
use contracts::shared::indicators::*;
use std::borrow::Borrow;

use crate::analysis::period::{dataset_window, filter_by_window, previous_window};
use crate::shared::fields::{semantic, FieldResolver};
use crate::shared::indicators::metadata::ids;

// ---------------------------------------------------------------------------
// Internal aggregation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SalesAgg {
    pub total_revenue: f64,
    pub sale_count: u64,
    pub total_quantity: f64,
}

impl SalesAgg {
    fn from_rows<R: Borrow<Row>>(rows: &[R], fields: &FieldResolver) -> Self {
        rows.iter().fold(SalesAgg::default(), |mut agg, row| {
            let row: &Row = row.borrow();
            agg.total_revenue += fields.number(row, semantic::VALOR);
            agg.sale_count += 1;
            agg.total_quantity += fields.number_opt(row, semantic::QUANTIDADE).unwrap_or(1.0);
            agg
        })
    }

    fn avg_ticket(&self) -> f64 {
        if self.sale_count > 0 {
            self.total_revenue / self.sale_count as f64
        } else {
            0.0
        }
    }
}

/// Current and previous-window aggregates of one dataset.
///
/// With `AnalysisPeriod::All` the whole dataset is current and there is
/// nothing to compare with. Any other period over data without a valid date
/// selects no rows.
#[derive(Debug, Clone, Default)]
pub struct SalesScope {
    pub current: SalesAgg,
    pub previous: Option<SalesAgg>,
    pub window: Option<PeriodWindow>,
}

impl SalesScope {
    pub fn compute(rows: &[Row], fields: &FieldResolver, period: AnalysisPeriod) -> Self {
        let Some(window) = dataset_window(rows, semantic::DATA, fields, period) else {
            let current = if period.months().is_some() {
                SalesAgg::default()
            } else {
                SalesAgg::from_rows(rows, fields)
            };
            return Self {
                current,
                previous: None,
                window: None,
            };
        };

        let current_rows = filter_by_window(rows, semantic::DATA, fields, &window);
        let previous = previous_window(&window, period).map(|prev| {
            SalesAgg::from_rows(&filter_by_window(rows, semantic::DATA, fields, &prev), fields)
        });

        Self {
            current: SalesAgg::from_rows(&current_rows, fields),
            previous,
            window: Some(window),
        }
    }
}

fn pct_change(cur: f64, prev: f64) -> Option<f64> {
    if prev.abs() < 0.01 {
        None
    } else {
        Some(((cur - prev) / prev.abs()) * 100.0)
    }
}

fn status_by_change(change: Option<f64>, higher_is_good: bool) -> IndicatorStatus {
    match change {
        Some(c) if c > 5.0 => {
            if higher_is_good {
                IndicatorStatus::Good
            } else {
                IndicatorStatus::Bad
            }
        }
        Some(c) if c < -5.0 => {
            if higher_is_good {
                IndicatorStatus::Bad
            } else {
                IndicatorStatus::Good
            }
        }
        _ => IndicatorStatus::Neutral,
    }
}

fn indicator(id: IndicatorId, scope: &SalesScope, metric: fn(&SalesAgg) -> f64) -> IndicatorValue {
    let cur = metric(&scope.current);
    let prev = scope.previous.as_ref().map(metric);
    let change = prev.and_then(|p| pct_change(cur, p));
    IndicatorValue {
        id,
        value: cur,
        previous_value: prev,
        change_percent: change,
        status: status_by_change(change, true),
    }
}

// ---------------------------------------------------------------------------
// Public compute functions
// ---------------------------------------------------------------------------

pub fn compute_sales_revenue(scope: &SalesScope) -> IndicatorValue {
    indicator(ids::sales_revenue(), scope, |agg| agg.total_revenue)
}

pub fn compute_sales_count(scope: &SalesScope) -> IndicatorValue {
    indicator(ids::sales_count(), scope, |agg| agg.sale_count as f64)
}

pub fn compute_sales_avg_ticket(scope: &SalesScope) -> IndicatorValue {
    indicator(ids::sales_avg_ticket(), scope, SalesAgg::avg_ticket)
}

pub fn compute_sales_quantity(scope: &SalesScope) -> IndicatorValue {
    indicator(ids::sales_quantity(), scope, |agg| agg.total_quantity)
}
