use contracts::shared::analytics::AggregateGroup;
use contracts::shared::dataset::Row;
use std::borrow::Borrow;
use std::collections::HashMap;

use crate::shared::fields::{semantic, FieldResolver};

/// Groups of one aggregation pass, kept in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct AggregateGroups {
    groups: Vec<AggregateGroup>,
    index: HashMap<String, usize>,
}

impl AggregateGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group for `key`, created at the end of the order on first sight.
    pub fn entry(&mut self, key: &str) -> &mut AggregateGroup {
        let idx = match self.index.get(key) {
            Some(&idx) => idx,
            None => {
                self.groups.push(AggregateGroup::new(key));
                self.index.insert(key.to_string(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        &mut self.groups[idx]
    }

    pub fn get(&self, key: &str) -> Option<&AggregateGroup> {
        self.index.get(key).map(|&idx| &self.groups[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &AggregateGroup> {
        self.groups.iter()
    }

    pub fn as_slice(&self) -> &[AggregateGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Sum of `total_value` over every group, `0.0` when there is none.
    pub fn total_value(&self) -> f64 {
        self.groups.iter().fold(0.0, |acc, g| acc + g.total_value)
    }

    pub fn into_vec(self) -> Vec<AggregateGroup> {
        self.groups
    }
}

/// Group rows by a semantic dimension and accumulate value, row count and
/// units per group.
///
/// Rows without a group key are skipped, never bucketed as "unknown".
/// `value_field` defaults to `"valor"`. A row without a quantity counts as
/// one unit.
pub fn group_and_aggregate<R: Borrow<Row>>(
    rows: &[R],
    group_field: &str,
    fields: &FieldResolver,
    value_field: Option<&str>,
) -> AggregateGroups {
    let value_field = value_field.unwrap_or(semantic::VALOR);
    let mut groups = AggregateGroups::new();
    let mut skipped = 0usize;

    for row in rows {
        let row: &Row = row.borrow();
        let Some(key) = fields.text(row, group_field) else {
            skipped += 1;
            continue;
        };

        let value = fields.number(row, value_field);
        let quantity = fields.number_opt(row, semantic::QUANTIDADE).unwrap_or(1.0);

        let group = groups.entry(&key);
        group.total_value += value;
        group.count += 1;
        group.total_quantity += quantity;
    }

    tracing::debug!(
        "group_and_aggregate by '{}': rows={}, skipped={}, groups={}",
        group_field,
        rows.len(),
        skipped,
        groups.len()
    );

    groups
}

/// Sum of a numeric field over all rows (missing values count as 0).
pub fn sum_field<R: Borrow<Row>>(rows: &[R], field: &str, fields: &FieldResolver) -> f64 {
    rows.iter()
        .fold(0.0, |acc, row| acc + fields.number(row.borrow(), field))
}
