use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    OutOfStock,
    Low,
    Adequate,
}

impl StockStatus {
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "Sem estoque",
            StockStatus::Low => "Estoque baixo",
            StockStatus::Adequate => "Estoque adequado",
        }
    }
}

/// Stock position of one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    pub product: String,
    pub quantity: f64,
    pub unit_cost: f64,
    pub stock_value: f64,
    pub status: StockStatus,
    /// pt-BR text of `status`
    pub status_label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockReport {
    /// Ordered by stock value, highest first.
    pub items: Vec<StockItem>,
    pub total_stock_value: f64,
    pub total_quantity: f64,
    pub out_of_stock_count: usize,
    pub low_stock_count: usize,
    pub adequate_count: usize,
}
