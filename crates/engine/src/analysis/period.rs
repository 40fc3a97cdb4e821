use chrono::{Datelike, Duration, Months, NaiveDate};
use contracts::shared::analytics::{AnalysisPeriod, Granularity, PeriodBucket, PeriodWindow};
use contracts::shared::dataset::Row;
use std::borrow::Borrow;
use std::collections::BTreeMap;

use crate::shared::dates::parse_date;
use crate::shared::fields::{semantic, FieldResolver};

/// Spans up to this many days are bucketed per day under `Granularity::Auto`.
pub const AUTO_DAILY_MAX_SPAN_DAYS: i64 = 31;

/// Date of a row, `None` when missing or unparsable.
pub fn row_date(row: &Row, date_field: &str, fields: &FieldResolver) -> Option<NaiveDate> {
    fields.resolve(row, date_field).and_then(parse_date)
}

/// Latest valid date in the dataset.
pub fn max_date<R: Borrow<Row>>(
    rows: &[R],
    date_field: &str,
    fields: &FieldResolver,
) -> Option<NaiveDate> {
    rows.iter()
        .filter_map(|row| row_date(row.borrow(), date_field, fields))
        .max()
}

/// Window of `period` ending at `anchor`: `[anchor - n months + 1 day, anchor]`.
pub fn period_window(anchor: NaiveDate, period: AnalysisPeriod) -> Option<PeriodWindow> {
    let months = period.months()?;
    let from = anchor.checked_sub_months(Months::new(months))?.succ_opt()?;
    Some(PeriodWindow { from, to: anchor })
}

/// The comparable window right before `window`: both bounds shifted back by
/// the period length (month ends are clamped).
pub fn previous_window(window: &PeriodWindow, period: AnalysisPeriod) -> Option<PeriodWindow> {
    let months = Months::new(period.months()?);
    let from = window.from.checked_sub_months(months)?;
    let to = window
        .to
        .checked_sub_months(months)?
        .min(window.from.pred_opt()?);
    Some(PeriodWindow { from, to })
}

/// Window of `period` anchored on the dataset's own latest date.
pub fn dataset_window<R: Borrow<Row>>(
    rows: &[R],
    date_field: &str,
    fields: &FieldResolver,
    period: AnalysisPeriod,
) -> Option<PeriodWindow> {
    period_window(max_date(rows, date_field, fields)?, period)
}

/// Rows of the latest `period` of the dataset.
///
/// With `All` every row is kept, undated ones included. Any other period
/// keeps only rows whose date falls in the anchored window.
pub fn filter_by_period<'a, R: Borrow<Row>>(
    rows: &'a [R],
    date_field: &str,
    fields: &FieldResolver,
    period: AnalysisPeriod,
) -> Vec<&'a Row> {
    if period == AnalysisPeriod::All {
        return rows.iter().map(<R as Borrow<Row>>::borrow).collect();
    }

    let Some(window) = dataset_window(rows, date_field, fields, period) else {
        tracing::debug!("filter_by_period: no dated rows, nothing in {:?}", period);
        return Vec::new();
    };

    filter_by_window(rows, date_field, fields, &window)
}

/// Rows dated inside `window` (inclusive).
pub fn filter_by_window<'a, R: Borrow<Row>>(
    rows: &'a [R],
    date_field: &str,
    fields: &FieldResolver,
    window: &PeriodWindow,
) -> Vec<&'a Row> {
    let kept: Vec<&Row> = rows
        .iter()
        .map(<R as Borrow<Row>>::borrow)
        .filter(|row| {
            row_date(row, date_field, fields)
                .map(|d| window.contains(d))
                .unwrap_or(false)
        })
        .collect();

    tracing::debug!(
        "filter_by_window {}..{}: kept {} of {} rows",
        window.from,
        window.to,
        kept.len(),
        rows.len()
    );

    kept
}

/// `Auto` resolved against the dated span; other values pass through.
pub fn resolve_granularity(granularity: Granularity, first: NaiveDate, last: NaiveDate) -> Granularity {
    match granularity {
        Granularity::Auto => {
            if (last - first).num_days() <= AUTO_DAILY_MAX_SPAN_DAYS {
                Granularity::Day
            } else {
                Granularity::Month
            }
        }
        other => other,
    }
}

/// Sum `value_field` per calendar bucket, oldest first.
///
/// Undated rows are skipped. Periods without rows are absent unless
/// `fill_gaps` is set, in which case they appear with value 0.
pub fn bucket_by_period<R: Borrow<Row>>(
    rows: &[R],
    date_field: &str,
    value_field: Option<&str>,
    fields: &FieldResolver,
    granularity: Granularity,
    fill_gaps: bool,
) -> Vec<PeriodBucket> {
    let value_field = value_field.unwrap_or(semantic::VALOR);
    let dated: Vec<(NaiveDate, f64)> = rows
        .iter()
        .filter_map(|row| {
            let row: &Row = row.borrow();
            let date = row_date(row, date_field, fields)?;
            Some((date, fields.number(row, value_field)))
        })
        .collect();

    let (Some(first), Some(last)) = (
        dated.iter().map(|(d, _)| *d).min(),
        dated.iter().map(|(d, _)| *d).max(),
    ) else {
        return Vec::new();
    };
    let granularity = resolve_granularity(granularity, first, last);

    let mut buckets: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for (date, value) in dated {
        *buckets.entry(bucket_start(date, granularity)).or_insert(0.0) += value;
    }

    if fill_gaps {
        let end = bucket_start(last, granularity);
        let mut cursor = bucket_start(first, granularity);
        while cursor < end {
            buckets.entry(cursor).or_insert(0.0);
            match next_bucket(cursor, granularity) {
                Some(next) => cursor = next,
                None => break,
            }
        }
    }

    buckets
        .into_iter()
        .map(|(start, value)| PeriodBucket {
            period_label: bucket_label(start, granularity),
            value,
        })
        .collect()
}

fn bucket_start(date: NaiveDate, granularity: Granularity) -> NaiveDate {
    match granularity {
        Granularity::Day | Granularity::Auto => date,
        Granularity::Week => date - Duration::days(date.weekday().num_days_from_monday() as i64),
        Granularity::Month => date.with_day(1).unwrap_or(date),
    }
}

fn next_bucket(start: NaiveDate, granularity: Granularity) -> Option<NaiveDate> {
    match granularity {
        Granularity::Day | Granularity::Auto => start.succ_opt(),
        Granularity::Week => start.checked_add_signed(Duration::days(7)),
        Granularity::Month => start.checked_add_months(Months::new(1)),
    }
}

fn bucket_label(start: NaiveDate, granularity: Granularity) -> String {
    match granularity {
        Granularity::Day | Granularity::Auto => start.format("%Y-%m-%d").to_string(),
        Granularity::Week => {
            let week = start.iso_week();
            format!("{}-W{:02}", week.year(), week.week())
        }
        Granularity::Month => start.format("%Y-%m").to_string(),
    }
}
