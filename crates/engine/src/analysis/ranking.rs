use contracts::shared::analytics::{
    AbcClass, AbcEntry, AbcSummary, AggregateGroup, ConcentrationAlert, RankedEntry,
};
use contracts::shared::dataset::Row;
use std::borrow::Borrow;

use super::grouping::group_and_aggregate;
use crate::shared::fields::FieldResolver;
use crate::shared::format::{format_currency, format_percent};
use crate::shared::numeric::finite_or_zero;

/// Share above which a single entry raises an "alta dependência" alert.
pub const CONCENTRATION_ALERT_PERCENT: f64 = 40.0;
/// Cumulative share limits of the A and B classes.
pub const ABC_A_LIMIT: f64 = 80.0;
pub const ABC_B_LIMIT: f64 = 95.0;

/// Share of `value` in `total` as a percentage, 0 when the total is not positive.
pub fn percentage_of(value: f64, total: f64) -> f64 {
    if total > 0.0 {
        value / total * 100.0
    } else {
        0.0
    }
}

/// Rank groups by total value, highest first.
///
/// Equal values keep their input (first-seen) order and still get distinct,
/// sequential ranks: 1, 2, 3, ... never 1, 2, 2, 4. Non-finite totals rank
/// as 0.
pub fn rank(groups: &[AggregateGroup], total_value: f64) -> Vec<RankedEntry> {
    let mut sorted: Vec<(&AggregateGroup, f64)> = groups
        .iter()
        .map(|g| (g, finite_or_zero(g.total_value) + 0.0))
        .collect();
    // sort_by is stable; `+ 0.0` above folds -0.0 so it ties with 0.0
    sorted.sort_by(|a, b| b.1.total_cmp(&a.1));

    sorted
        .into_iter()
        .enumerate()
        .map(|(idx, (group, value))| RankedEntry {
            key: group.key.clone(),
            value,
            percentage: percentage_of(value, total_value),
            rank: idx as u32 + 1,
        })
        .collect()
}

/// First `n` entries of the full ranking.
///
/// Percentages stay relative to the total of *all* groups, not of the kept
/// subset.
pub fn top_n(groups: &[AggregateGroup], n: usize) -> Vec<RankedEntry> {
    let total = groups
        .iter()
        .fold(0.0, |acc, g| acc + finite_or_zero(g.total_value));
    let mut ranked = rank(groups, total);
    ranked.truncate(n);
    ranked
}

/// Group rows by `dimension` and rank the groups over their own total
/// (seller ranking, category or supplier distribution).
pub fn distribution<R: Borrow<Row>>(
    rows: &[R],
    dimension: &str,
    fields: &FieldResolver,
    value_field: Option<&str>,
) -> Vec<RankedEntry> {
    let groups = group_and_aggregate(rows, dimension, fields, value_field);
    rank(groups.as_slice(), groups.total_value())
}

/// Alert when the leading entry holds more than
/// [`CONCENTRATION_ALERT_PERCENT`] of the total.
pub fn concentration_alert(entries: &[RankedEntry], dimension: &str) -> Option<ConcentrationAlert> {
    let leader = entries.first()?;
    if leader.percentage <= CONCENTRATION_ALERT_PERCENT {
        return None;
    }

    Some(ConcentrationAlert {
        dimension: dimension.to_string(),
        key: leader.key.clone(),
        percentage: leader.percentage,
        message: format!(
            "Alta dependência: {} \"{}\" concentra {} do faturamento ({})",
            dimension_label(dimension),
            leader.key,
            format_percent(leader.percentage),
            format_currency(leader.value)
        ),
    })
}

fn dimension_label(dimension: &str) -> String {
    let mut chars = dimension.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// ABC (Pareto) classification of a full ranking.
///
/// An entry is `A` while the cumulative share *before* it is below 80%,
/// `B` below 95%, `C` after that, so the leader is always `A`. Without a
/// positive total every entry is `C`.
pub fn classify_abc(entries: &[RankedEntry]) -> Vec<AbcEntry> {
    let has_total = entries.iter().map(|e| e.percentage).sum::<f64>() > 0.0;
    let mut cumulative = 0.0;

    entries
        .iter()
        .map(|entry| {
            let class = if !has_total {
                AbcClass::C
            } else if cumulative < ABC_A_LIMIT {
                AbcClass::A
            } else if cumulative < ABC_B_LIMIT {
                AbcClass::B
            } else {
                AbcClass::C
            };
            cumulative += entry.percentage;

            AbcEntry {
                entry: entry.clone(),
                cumulative_percentage: cumulative,
                class,
            }
        })
        .collect()
}

pub fn abc_summary(entries: &[AbcEntry]) -> AbcSummary {
    let mut summary = AbcSummary::default();
    for e in entries {
        match e.class {
            AbcClass::A => {
                summary.a_count += 1;
                summary.a_value += e.entry.value;
            }
            AbcClass::B => {
                summary.b_count += 1;
                summary.b_value += e.entry.value;
            }
            AbcClass::C => {
                summary.c_count += 1;
                summary.c_value += e.entry.value;
            }
        }
    }
    summary
}
