use contracts::shared::dataset::{FieldMapping, RawValue, Row};
use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::numeric::{clean_numeric, parse_numeric};

/// Well-known semantic field names (constants to avoid typos).
pub mod semantic {
    pub const VALOR: &str = "valor";
    pub const VENDEDOR: &str = "vendedor";
    pub const CATEGORIA: &str = "categoria";
    pub const PRODUTO: &str = "produto";
    pub const FORNECEDOR: &str = "fornecedor";
    pub const QUANTIDADE: &str = "quantidade";
    pub const DATA: &str = "data";
    pub const ESTOQUE: &str = "estoque";
    pub const CUSTO: &str = "custo";
    pub const CLIENTE: &str = "cliente";
}

/// Column names tried, in order, when the user mapping does not resolve a field.
const BUILTIN_ALIASES: &[(&str, &[&str])] = &[
    (
        semantic::VALOR,
        &[
            "valor", "VALOR", "Valor", "total", "TOTAL", "Total", "preco", "PRECO", "Preco",
            "preço", "Preço", "valor_total", "Valor Total", "faturamento", "Faturamento",
            "receita", "Receita", "value", "amount",
        ],
    ),
    (
        semantic::VENDEDOR,
        &[
            "vendedor", "VENDEDOR", "Vendedor", "vendedora", "Vendedora", "consultor",
            "Consultor", "atendente", "Atendente", "seller", "salesperson",
        ],
    ),
    (
        semantic::CATEGORIA,
        &[
            "categoria", "CATEGORIA", "Categoria", "grupo", "Grupo", "departamento",
            "Departamento", "category", "Category",
        ],
    ),
    (
        semantic::PRODUTO,
        &[
            "produto", "PRODUTO", "Produto", "descricao", "descrição", "Descrição", "item",
            "Item", "sku", "SKU", "product", "Product",
        ],
    ),
    (
        semantic::FORNECEDOR,
        &[
            "fornecedor", "FORNECEDOR", "Fornecedor", "marca", "Marca", "fabricante",
            "Fabricante", "supplier", "Supplier", "brand",
        ],
    ),
    (
        semantic::QUANTIDADE,
        &[
            "quantidade", "QUANTIDADE", "Quantidade", "qtd", "QTD", "Qtd", "qtde", "Qtde",
            "quantity", "Quantity",
        ],
    ),
    (
        semantic::DATA,
        &[
            "data", "DATA", "Data", "data_venda", "Data Venda", "Data da Venda", "dia", "Dia",
            "date", "Date",
        ],
    ),
    (
        semantic::ESTOQUE,
        &["estoque", "ESTOQUE", "Estoque", "saldo", "Saldo", "stock", "Stock"],
    ),
    (
        semantic::CUSTO,
        &[
            "custo", "CUSTO", "Custo", "preco_custo", "Preço de Custo", "custo_unitario",
            "cost", "Cost",
        ],
    ),
    (
        semantic::CLIENTE,
        &["cliente", "CLIENTE", "Cliente", "customer", "Customer"],
    ),
];

static BUILTIN: Lazy<FieldAliases> = Lazy::new(|| FieldAliases {
    table: BUILTIN_ALIASES
        .iter()
        .map(|(name, aliases)| {
            (
                name.to_string(),
                aliases.iter().map(|a| a.to_string()).collect(),
            )
        })
        .collect(),
});

/// Immutable alias table: semantic field -> ordered fallback column names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldAliases {
    table: HashMap<String, Vec<String>>,
}

impl FieldAliases {
    /// Built once per process from [`BUILTIN_ALIASES`].
    pub fn builtin() -> &'static FieldAliases {
        &BUILTIN
    }

    pub fn aliases(&self, semantic: &str) -> &[String] {
        self.table.get(semantic).map(Vec::as_slice).unwrap_or(&[])
    }

    /// New table with `extra` aliases appended after the existing ones.
    /// Duplicates are ignored, so the earlier position wins.
    pub fn with_extra(&self, extra: &HashMap<String, Vec<String>>) -> FieldAliases {
        let mut table = self.table.clone();
        for (name, aliases) in extra {
            let list = table.entry(name.clone()).or_default();
            for alias in aliases {
                if !list.contains(alias) {
                    list.push(alias.clone());
                }
            }
        }
        FieldAliases { table }
    }
}

/// Resolve a semantic field in a row.
///
/// The mapped column wins when present; otherwise the aliases are tried in
/// order with an exact, case-sensitive key match. `Null` cells count as absent.
pub fn resolve_field<'r>(
    row: &'r Row,
    semantic: &str,
    mapping: &FieldMapping,
    aliases: &FieldAliases,
) -> Option<&'r RawValue> {
    let present = |column: &str| row.get(column).filter(|v| !v.is_null());

    if let Some(value) = mapping.column(semantic).and_then(present) {
        return Some(value);
    }

    aliases
        .aliases(semantic)
        .iter()
        .find_map(|alias| present(alias.as_str()))
}

/// Text form of a cell for use as a grouping key. Empty keys are `None`.
pub fn key_text(value: &RawValue) -> Option<String> {
    let text = match value {
        RawValue::Text(s) => s.trim().to_string(),
        RawValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
        RawValue::Number(n) => n.to_string(),
        RawValue::Null => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// A field mapping paired with the alias table used for fallback lookups.
#[derive(Debug, Clone, Copy)]
pub struct FieldResolver<'a> {
    pub mapping: &'a FieldMapping,
    pub aliases: &'a FieldAliases,
}

impl<'a> FieldResolver<'a> {
    pub fn new(mapping: &'a FieldMapping, aliases: &'a FieldAliases) -> Self {
        Self { mapping, aliases }
    }

    /// Resolver over the built-in aliases.
    pub fn with_builtin(mapping: &'a FieldMapping) -> Self {
        Self::new(mapping, FieldAliases::builtin())
    }

    pub fn resolve<'r>(&self, row: &'r Row, semantic: &str) -> Option<&'r RawValue> {
        resolve_field(row, semantic, self.mapping, self.aliases)
    }

    pub fn text(&self, row: &Row, semantic: &str) -> Option<String> {
        self.resolve(row, semantic).and_then(key_text)
    }

    pub fn number(&self, row: &Row, semantic: &str) -> f64 {
        clean_numeric(self.resolve(row, semantic))
    }

    pub fn number_opt(&self, row: &Row, semantic: &str) -> Option<f64> {
        parse_numeric(self.resolve(row, semantic))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_wins_over_aliases() {
        let row: Row = [("Total Venda", "10,00"), ("valor", "99")].into_iter().collect();
        let mapping = FieldMapping::new().with("valor", "Total Venda");

        let value = resolve_field(&row, "valor", &mapping, FieldAliases::builtin());
        assert_eq!(value, Some(&RawValue::from("10,00")));
    }

    #[test]
    fn test_alias_fallback_in_order() {
        let row: Row = [("TOTAL", "5"), ("Valor", "7")].into_iter().collect();
        let mapping = FieldMapping::new();

        // "Valor" comes before "TOTAL" in the alias list
        let value = resolve_field(&row, "valor", &mapping, FieldAliases::builtin());
        assert_eq!(value, Some(&RawValue::from("7")));
    }

    #[test]
    fn test_mapped_column_missing_falls_back() {
        let row: Row = [("Vendedor", "Ana")].into_iter().collect();
        let mapping = FieldMapping::new().with("vendedor", "Consultor Responsável");

        let value = resolve_field(&row, "vendedor", &mapping, FieldAliases::builtin());
        assert_eq!(value, Some(&RawValue::from("Ana")));
    }

    #[test]
    fn test_alias_match_is_case_sensitive() {
        let row: Row = [("vAlOr", "5")].into_iter().collect();
        let value = resolve_field(&row, "valor", &FieldMapping::new(), FieldAliases::builtin());
        assert_eq!(value, None);
    }

    #[test]
    fn test_null_cell_counts_as_absent() {
        let row = Row::new().with("Valor", RawValue::Null).with("total", 3.0);
        let value = resolve_field(&row, "valor", &FieldMapping::new(), FieldAliases::builtin());
        assert_eq!(value, Some(&RawValue::Number(3.0)));
    }

    #[test]
    fn test_unknown_semantic_name() {
        let row: Row = [("x", "1")].into_iter().collect();
        let value = resolve_field(&row, "margem", &FieldMapping::new(), FieldAliases::builtin());
        assert_eq!(value, None);
    }

    #[test]
    fn test_with_extra_does_not_touch_builtin() {
        let extra = HashMap::from([(
            "vendedor".to_string(),
            vec!["Representante".to_string(), "vendedor".to_string()],
        )]);
        let aliases = FieldAliases::builtin().with_extra(&extra);

        assert_eq!(aliases.aliases("vendedor")[0], "vendedor");
        assert_eq!(aliases.aliases("vendedor").last().map(String::as_str), Some("Representante"));
        assert!(!FieldAliases::builtin()
            .aliases("vendedor")
            .contains(&"Representante".to_string()));
    }

    #[test]
    fn test_key_text() {
        assert_eq!(key_text(&RawValue::from("  Ana ")), Some("Ana".to_string()));
        assert_eq!(key_text(&RawValue::from("   ")), None);
        assert_eq!(key_text(&RawValue::Number(42.0)), Some("42".to_string()));
        assert_eq!(key_text(&RawValue::Number(1.5)), Some("1.5".to_string()));
        assert_eq!(key_text(&RawValue::Null), None);
    }
}
