use contracts::shared::indicators::*;

/// Well-known indicator IDs (constants to avoid typos).
pub mod ids {
    use super::*;

    pub fn sales_revenue() -> IndicatorId {
        IndicatorId::new("sales_revenue")
    }
    pub fn sales_count() -> IndicatorId {
        IndicatorId::new("sales_count")
    }
    pub fn sales_avg_ticket() -> IndicatorId {
        IndicatorId::new("sales_avg_ticket")
    }
    pub fn sales_quantity() -> IndicatorId {
        IndicatorId::new("sales_quantity")
    }

    pub fn all() -> Vec<IndicatorId> {
        vec![
            sales_revenue(),
            sales_count(),
            sales_avg_ticket(),
            sales_quantity(),
        ]
    }
}

fn money() -> ValueFormat {
    ValueFormat::Money {
        currency: "R$".into(),
    }
}

/// pt-BR labels and formats of every KPI, in [`ids::all`] order.
pub fn build_catalog() -> IndicatorCatalog {
    let indicators = vec![
        IndicatorDefinition {
            id: ids::sales_revenue(),
            label: "Faturamento".into(),
            short_label: None,
            format: money(),
            description: "Soma do campo valor no período".into(),
        },
        IndicatorDefinition {
            id: ids::sales_count(),
            label: "Vendas".into(),
            short_label: None,
            format: ValueFormat::Integer,
            description: "Quantidade de linhas de venda no período".into(),
        },
        IndicatorDefinition {
            id: ids::sales_avg_ticket(),
            label: "Ticket médio".into(),
            short_label: Some("Ticket".into()),
            format: money(),
            description: "Faturamento / Vendas".into(),
        },
        IndicatorDefinition {
            id: ids::sales_quantity(),
            label: "Itens vendidos".into(),
            short_label: Some("Itens".into()),
            format: ValueFormat::Number { decimals: 0 },
            description: "Soma de quantidade (1 por linha quando ausente)".into(),
        },
    ];

    IndicatorCatalog { indicators }
}
