use contracts::shared::analytics::{StockItem, StockReport, StockStatus};
use contracts::shared::dataset::Row;
use std::collections::HashMap;

use crate::shared::fields::{semantic, FieldResolver};
use crate::shared::numeric::finite_or_zero;

pub fn stock_status(quantity: f64, low_stock_threshold: f64) -> StockStatus {
    if quantity <= 0.0 {
        StockStatus::OutOfStock
    } else if quantity < low_stock_threshold {
        StockStatus::Low
    } else {
        StockStatus::Adequate
    }
}

/// Stock position per product.
///
/// Quantities of the same product are summed (several warehouses or lots).
/// The unit cost is the first `custo` found for the product, falling back
/// to `valor`. Items come out by stock value, highest first; ties keep
/// first-seen order.
pub fn analyze_stock(rows: &[Row], fields: &FieldResolver, low_stock_threshold: f64) -> StockReport {
    let mut order: Vec<String> = Vec::new();
    let mut positions: HashMap<String, (f64, Option<f64>)> = HashMap::new();

    for row in rows {
        let Some(product) = fields.text(row, semantic::PRODUTO) else {
            continue;
        };
        let quantity = fields.number(row, semantic::ESTOQUE);
        let cost = fields
            .number_opt(row, semantic::CUSTO)
            .or_else(|| fields.number_opt(row, semantic::VALOR));

        let position = positions.entry(product.clone()).or_insert_with(|| {
            order.push(product);
            (0.0, None)
        });
        position.0 += quantity;
        if position.1.is_none() {
            position.1 = cost;
        }
    }

    let mut items: Vec<StockItem> = order
        .into_iter()
        .map(|product| {
            let (quantity, cost) = positions.get(&product).copied().unwrap_or((0.0, None));
            let unit_cost = cost.unwrap_or(0.0);
            let status = stock_status(quantity, low_stock_threshold);
            StockItem {
                stock_value: if quantity > 0.0 {
                    finite_or_zero(quantity * unit_cost)
                } else {
                    0.0
                },
                status,
                status_label: status.label().to_string(),
                product,
                quantity,
                unit_cost,
            }
        })
        .collect();
    items.sort_by(|a, b| b.stock_value.total_cmp(&a.stock_value));

    let mut report = StockReport {
        total_stock_value: items.iter().fold(0.0, |acc, i| acc + i.stock_value),
        total_quantity: items.iter().fold(0.0, |acc, i| acc + i.quantity.max(0.0)),
        ..Default::default()
    };
    for item in &items {
        match item.status {
            StockStatus::OutOfStock => report.out_of_stock_count += 1,
            StockStatus::Low => report.low_stock_count += 1,
            StockStatus::Adequate => report.adequate_count += 1,
        }
    }
    report.items = items;

    tracing::debug!(
        "analyze_stock: products={}, out={}, low={}",
        report.items.len(),
        report.out_of_stock_count,
        report.low_stock_count
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::dataset::FieldMapping;

    fn item(product: &str, stock: &str, cost: &str) -> Row {
        Row::new()
            .with("Produto", product)
            .with("Estoque", stock)
            .with("Custo", cost)
    }

    #[test]
    fn test_stock_status_thresholds() {
        assert_eq!(stock_status(0.0, 10.0), StockStatus::OutOfStock);
        assert_eq!(stock_status(-2.0, 10.0), StockStatus::OutOfStock);
        assert_eq!(stock_status(9.0, 10.0), StockStatus::Low);
        assert_eq!(stock_status(10.0, 10.0), StockStatus::Adequate);
    }

    #[test]
    fn test_stock_report() {
        let rows = vec![
            item("Camiseta", "20", "15,00"),
            item("Boné", "3", "40,00"),
            item("Camiseta", "5", "99,00"),
            item("Meia", "0", "5,00"),
            item("", "100", "1,00"),
        ];
        let mapping = FieldMapping::new();
        let fields = FieldResolver::with_builtin(&mapping);

        let report = analyze_stock(&rows, &fields, 10.0);

        assert_eq!(report.items.len(), 3);
        assert_eq!(report.items[0].product, "Camiseta");
        assert_eq!(report.items[0].quantity, 25.0);
        assert_eq!(report.items[0].unit_cost, 15.0);
        assert_eq!(report.items[0].stock_value, 375.0);
        assert_eq!(report.items[1].product, "Boné");
        assert_eq!(report.items[1].status, StockStatus::Low);
        assert_eq!(report.items[1].status_label, "Estoque baixo");
        assert_eq!(report.items[2].status, StockStatus::OutOfStock);
        assert_eq!(report.items[2].status_label, "Sem estoque");
        assert_eq!(report.items[2].stock_value, 0.0);

        assert_eq!(report.total_stock_value, 495.0);
        assert_eq!(report.total_quantity, 28.0);
        assert_eq!(report.out_of_stock_count, 1);
        assert_eq!(report.low_stock_count, 1);
        assert_eq!(report.adequate_count, 1);
    }

    #[test]
    fn test_cost_falls_back_to_value() {
        let rows = vec![Row::new()
            .with("Produto", "Caneca")
            .with("Estoque", 12.0)
            .with("Valor", "R$ 8,50")];
        let mapping = FieldMapping::new();
        let fields = FieldResolver::with_builtin(&mapping);

        let report = analyze_stock(&rows, &fields, 10.0);
        assert_eq!(report.items[0].unit_cost, 8.5);
        assert_eq!(report.items[0].stock_value, 102.0);
        assert_eq!(report.items[0].status, StockStatus::Adequate);
    }

    #[test]
    fn test_overflowing_stock_value_sorts_as_zero() {
        let rows = vec![
            Row::new()
                .with("Produto", "Granel")
                .with("Estoque", 1e200)
                .with("Custo", 1e200),
            item("Caneca", "2", "10"),
            item("Prato", "1", "10"),
        ];
        let mapping = FieldMapping::new();
        let fields = FieldResolver::with_builtin(&mapping);

        let report = analyze_stock(&rows, &fields, 1.0);

        let products: Vec<&str> = report.items.iter().map(|i| i.product.as_str()).collect();
        assert_eq!(products, vec!["Caneca", "Prato", "Granel"]);
        assert_eq!(report.items[2].stock_value, 0.0);
        assert_eq!(report.total_stock_value, 30.0);
    }

    #[test]
    fn test_empty_stock() {
        let mapping = FieldMapping::new();
        let fields = FieldResolver::with_builtin(&mapping);
        assert_eq!(analyze_stock(&[], &fields, 10.0), StockReport::default());
    }
}
