use chrono::{Duration, NaiveDate};
use contracts::shared::dataset::RawValue;

/// Spreadsheet day 0 (serial dates count days from here).
fn spreadsheet_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or(NaiveDate::MIN)
}

/// Serial numbers outside this range are not treated as dates (≈1954..2119).
const SERIAL_MIN: f64 = 20_000.0;
const SERIAL_MAX: f64 = 80_000.0;

const TEXT_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d.%m.%Y", "%d-%m-%Y", "%Y/%m/%d"];

/// Parse a calendar date from a raw cell.
///
/// Accepts ISO dates (optionally followed by a time part), Brazilian
/// `DD/MM/YYYY`, `DD.MM.YYYY`, `DD-MM-YYYY`, and spreadsheet serial numbers.
pub fn parse_date(value: &RawValue) -> Option<NaiveDate> {
    match value {
        RawValue::Number(n) => from_serial(*n),
        RawValue::Text(s) => parse_date_str(s),
        RawValue::Null => None,
    }
}

pub fn parse_date_str(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(n) = s.parse::<f64>() {
        return from_serial(n);
    }

    // "2024-03-05T10:00:00Z", "05/03/2024 10:00"
    let head = s.split(|c: char| c == 'T' || c == ' ').next().unwrap_or(s);

    TEXT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(head, fmt).ok())
}

fn from_serial(n: f64) -> Option<NaiveDate> {
    if !(SERIAL_MIN..=SERIAL_MAX).contains(&n) {
        return None;
    }
    spreadsheet_epoch().checked_add_signed(Duration::days(n.floor() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_text_formats() {
        assert_eq!(parse_date_str("2024-03-05"), Some(ymd(2024, 3, 5)));
        assert_eq!(parse_date_str("2024-03-05T10:15:00Z"), Some(ymd(2024, 3, 5)));
        assert_eq!(parse_date_str("05/03/2024"), Some(ymd(2024, 3, 5)));
        assert_eq!(parse_date_str("05/03/2024 18:40"), Some(ymd(2024, 3, 5)));
        assert_eq!(parse_date_str("05.03.2024"), Some(ymd(2024, 3, 5)));
        assert_eq!(parse_date_str("05-03-2024"), Some(ymd(2024, 3, 5)));
        assert_eq!(parse_date_str(" 2024/03/05 "), Some(ymd(2024, 3, 5)));
    }

    #[test]
    fn test_spreadsheet_serial() {
        assert_eq!(parse_date(&RawValue::Number(45292.0)), Some(ymd(2024, 1, 1)));
        assert_eq!(parse_date(&RawValue::Number(45292.75)), Some(ymd(2024, 1, 1)));
        assert_eq!(parse_date_str("45292"), Some(ymd(2024, 1, 1)));
    }

    #[test]
    fn test_unparsable() {
        assert_eq!(parse_date_str(""), None);
        assert_eq!(parse_date_str("ontem"), None);
        assert_eq!(parse_date_str("31/02/2024"), None);
        assert_eq!(parse_date(&RawValue::Number(2024.0)), None);
        assert_eq!(parse_date(&RawValue::Null), None);
    }
}
