use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Raw cell value of an uploaded spreadsheet row.
///
/// Deserialized untagged, so a decoded JSON row such as
/// `{"Valor": "1.234,56", "Qtd": 2, "Obs": null}` maps directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
    Null,
}

impl RawValue {
    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        RawValue::Number(n as f64)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(RawValue::Null)
    }
}

/// One row of caller-owned tabular data: column name -> raw value.
///
/// Column names are arbitrary (any casing, any language); semantic access goes
/// through the field resolver in the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    pub values: HashMap<String, RawValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value stored under the exact column name (case-sensitive).
    pub fn get(&self, column: &str) -> Option<&RawValue> {
        self.values.get(column)
    }

    pub fn with(mut self, column: &str, value: impl Into<RawValue>) -> Self {
        self.values.insert(column.to_string(), value.into());
        self
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<RawValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Semantic field name (e.g. "valor", "vendedor") -> actual column name.
///
/// Produced by the column-mapping step of the upload flow; read-only during
/// a computation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMapping {
    pub columns: HashMap<String, String>,
}

impl FieldMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Column mapped to a semantic field, if the user mapped it.
    pub fn column(&self, semantic: &str) -> Option<&str> {
        self.columns.get(semantic).map(String::as_str)
    }

    pub fn with(mut self, semantic: &str, column: &str) -> Self {
        self.columns.insert(semantic.to_string(), column.to_string());
        self
    }

    /// Adds the entries of `fallback` for semantic fields not mapped here.
    pub fn with_fallback(mut self, fallback: &FieldMapping) -> Self {
        for (semantic, column) in &fallback.columns {
            self.columns
                .entry(semantic.clone())
                .or_insert_with(|| column.clone());
        }
        self
    }
}

impl<K, V> FromIterator<(K, V)> for FieldMapping
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_fallback_keeps_own_entries() {
        let own = FieldMapping::new().with("valor", "Total");
        let fallback = FieldMapping::new().with("valor", "Preço").with("data", "Dia");

        let merged = own.with_fallback(&fallback);

        assert_eq!(merged.column("valor"), Some("Total"));
        assert_eq!(merged.column("data"), Some("Dia"));
    }

    #[test]
    fn test_row_deserializes_mixed_values() {
        let json = r#"{"Vendedor": "Ana", "Valor": "1.234,56", "Qtd": 2, "Obs": null}"#;
        let row: Row = serde_json::from_str(json).unwrap();

        assert_eq!(row.get("Vendedor"), Some(&RawValue::Text("Ana".into())));
        assert_eq!(row.get("Valor"), Some(&RawValue::Text("1.234,56".into())));
        assert_eq!(row.get("Qtd"), Some(&RawValue::Number(2.0)));
        assert_eq!(row.get("Obs"), Some(&RawValue::Null));
        assert_eq!(row.get("vendedor"), None);
    }

    #[test]
    fn test_field_mapping_is_a_plain_object() {
        let json = r#"{"valor": "Total Venda", "vendedor": "Consultor"}"#;
        let mapping: FieldMapping = serde_json::from_str(json).unwrap();

        assert_eq!(mapping.column("valor"), Some("Total Venda"));
        assert_eq!(mapping.column("data"), None);
    }

    #[test]
    fn test_option_into_raw_value() {
        let none: Option<f64> = None;
        assert_eq!(RawValue::from(none), RawValue::Null);
        assert_eq!(RawValue::from(Some("x")), RawValue::Text("x".into()));
    }
}
