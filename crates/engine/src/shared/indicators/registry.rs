use contracts::shared::dataset::Row;
use contracts::shared::indicators::*;
use std::collections::HashMap;

use super::compute::sales::{self, SalesScope};
use super::metadata::ids;
use crate::shared::fields::{FieldAliases, FieldResolver};

type ComputeFn = fn(&SalesScope) -> IndicatorValue;

/// Central registry: maps `IndicatorId` to its compute function.
pub struct IndicatorRegistry {
    fns: HashMap<String, ComputeFn>,
}

impl IndicatorRegistry {
    pub fn new() -> Self {
        let mut fns: HashMap<String, ComputeFn> = HashMap::new();

        fns.insert(ids::sales_revenue().0, sales::compute_sales_revenue);
        fns.insert(ids::sales_count().0, sales::compute_sales_count);
        fns.insert(ids::sales_avg_ticket().0, sales::compute_sales_avg_ticket);
        fns.insert(ids::sales_quantity().0, sales::compute_sales_quantity);

        Self { fns }
    }

    /// Compute a batch of indicators over one scope, in request order.
    pub fn compute(&self, ids: &[IndicatorId], scope: &SalesScope) -> Vec<IndicatorValue> {
        let mut results = Vec::with_capacity(ids.len());

        for id in ids {
            if let Some(compute_fn) = self.fns.get(&id.0) {
                results.push(compute_fn(scope));
            } else {
                tracing::warn!("indicator {} not found in registry", id.0);
            }
        }

        results
    }
}

impl Default for IndicatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute the requested indicators over a dataset.
pub fn compute_indicators(
    rows: &[Row],
    request: &ComputeIndicatorsRequest,
    aliases: &FieldAliases,
) -> ComputeIndicatorsResponse {
    let fields = FieldResolver::new(&request.context.field_mapping, aliases);
    let scope = SalesScope::compute(rows, &fields, request.context.period);

    ComputeIndicatorsResponse {
        values: IndicatorRegistry::new().compute(&request.indicator_ids, &scope),
        window: scope.window,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::analytics::AnalysisPeriod;

    #[test]
    fn test_unknown_ids_are_skipped() {
        let rows = vec![Row::new().with("Valor", 10.0), Row::new().with("Valor", "5,5")];
        let request = ComputeIndicatorsRequest {
            indicator_ids: vec![
                IndicatorId::new("sales_count"),
                IndicatorId::new("margin"),
                IndicatorId::new("sales_revenue"),
            ],
            context: IndicatorContext {
                period: AnalysisPeriod::All,
                ..Default::default()
            },
        };

        let response = compute_indicators(&rows, &request, FieldAliases::builtin());

        assert_eq!(response.values.len(), 2);
        assert_eq!(response.values[0].id, ids::sales_count());
        assert_eq!(response.values[0].value, 2.0);
        assert_eq!(response.values[1].value, 15.5);
        assert!(response.window.is_none());
    }
}
