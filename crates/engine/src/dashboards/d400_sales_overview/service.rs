use contracts::dashboards::d400_sales_overview::{SalesOverviewRequest, SalesOverviewResponse};
use contracts::shared::dataset::Row;

use crate::analysis::grouping::{group_and_aggregate, sum_field};
use crate::analysis::period::{bucket_by_period, dataset_window, filter_by_window};
use crate::analysis::ranking::{
    abc_summary, classify_abc, concentration_alert, distribution, rank,
};
use crate::analysis::stats::team_performance;
use crate::shared::fields::{semantic, FieldAliases, FieldResolver};
use crate::shared::indicators::compute::sales::SalesScope;
use crate::shared::indicators::metadata::ids;
use crate::shared::indicators::IndicatorRegistry;

/// Build the sales overview (executive report) for one dataset
pub fn build_sales_overview(
    rows: &[Row],
    request: &SalesOverviewRequest,
    aliases: &FieldAliases,
) -> SalesOverviewResponse {
    let fields = FieldResolver::new(&request.field_mapping, aliases);

    // Anchored window; only "all" keeps undated rows
    let window = dataset_window(rows, semantic::DATA, &fields, request.period);
    let period_rows: Vec<&Row> = match &window {
        Some(w) => filter_by_window(rows, semantic::DATA, &fields, w),
        None if request.period.months().is_some() => Vec::new(),
        None => rows.iter().collect(),
    };

    let total_revenue = sum_field(&period_rows, semantic::VALOR, &fields);

    // === SELLERS (Vendedores) ===
    let sellers = distribution(&period_rows, semantic::VENDEDOR, &fields, None);
    let team = team_performance(&sellers);

    // === CATEGORIES / SUPPLIERS ===
    let categories = distribution(&period_rows, semantic::CATEGORIA, &fields, None);
    let suppliers = distribution(&period_rows, semantic::FORNECEDOR, &fields, None);

    // === PRODUCTS (curva ABC) ===
    let products = group_and_aggregate(&period_rows, semantic::PRODUTO, &fields, None);
    let product_abc = classify_abc(&rank(products.as_slice(), products.total_value()));
    let abc = abc_summary(&product_abc);

    let alerts: Vec<_> = [
        concentration_alert(&sellers, semantic::VENDEDOR),
        concentration_alert(&categories, semantic::CATEGORIA),
    ]
    .into_iter()
    .flatten()
    .collect();

    let timeline = bucket_by_period(
        &period_rows,
        semantic::DATA,
        None,
        &fields,
        request.granularity,
        request.fill_gaps,
    );

    let scope = SalesScope::compute(rows, &fields, request.period);
    let indicators = IndicatorRegistry::new().compute(&ids::all(), &scope);

    tracing::info!(
        "sales overview: period={:?}, rows={}/{}, sellers={}, categories={}, products={}",
        request.period,
        period_rows.len(),
        rows.len(),
        sellers.len(),
        categories.len(),
        product_abc.len()
    );

    SalesOverviewResponse {
        period: request.period,
        period_label: request.period.display_name().to_string(),
        window,
        row_count: period_rows.len(),
        total_revenue,
        seller_ranking: truncated(sellers, request.top_n),
        category_distribution: truncated(categories, request.top_n),
        supplier_distribution: truncated(suppliers, request.top_n),
        product_abc,
        abc_summary: abc,
        team_performance: team,
        alerts,
        timeline,
        indicators,
    }
}

/// Keep the first `n` ranked entries; percentages stay relative to the full total
fn truncated<T>(mut entries: Vec<T>, n: usize) -> Vec<T> {
    entries.truncate(n);
    entries
}
