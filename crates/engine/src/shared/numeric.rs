use contracts::shared::dataset::RawValue;

/// Convert a raw cell into a number. Never fails: missing or unparsable
/// input is 0.
///
/// # Examples
/// ```
/// use contracts::shared::dataset::RawValue;
/// use engine::shared::numeric::clean_numeric;
/// assert_eq!(clean_numeric(Some(&RawValue::from("1.234,56"))), 1234.56);
/// assert_eq!(clean_numeric(None), 0.0);
/// ```
pub fn clean_numeric(raw: Option<&RawValue>) -> f64 {
    parse_numeric(raw).unwrap_or(0.0)
}

/// Like [`clean_numeric`] but keeps "missing" apart from a real zero:
/// `None` for a null/absent cell or text without any digit.
pub fn parse_numeric(raw: Option<&RawValue>) -> Option<f64> {
    match raw? {
        RawValue::Number(n) => Some(finite_or_zero(*n)),
        RawValue::Text(s) => parse_numeric_str(s),
        RawValue::Null => None,
    }
}

/// Parse a locale-formatted number ("R$ 1.234,56", "1234.56", "-12,5").
///
/// Everything except digits, `,`, `.` and `-` is dropped. The last `,` or `.`
/// is the decimal separator; every other separator is a grouping mark.
pub fn parse_numeric_str(s: &str) -> Option<f64> {
    let kept: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();

    // Leading '-' is the sign; a later '-' ends the number (parseFloat-style prefix).
    let (negative, body) = match kept.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, kept.as_str()),
    };
    let body = match body.find('-') {
        Some(pos) => &body[..pos],
        None => body,
    };

    if !body.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let normalized = match body.rfind(|c: char| c == ',' || c == '.') {
        Some(pos) => {
            let int_part: String = body[..pos].chars().filter(char::is_ascii_digit).collect();
            let frac_part = &body[pos + 1..];
            format!("{}.{}", if int_part.is_empty() { "0" } else { &int_part }, frac_part)
        }
        None => body.to_string(),
    };

    let value = normalized.trim_end_matches('.').parse::<f64>().ok()?;
    let value = finite_or_zero(value);
    Some(if negative { -value } else { value })
}

/// `n` itself, or 0 for NaN and infinities.
pub fn finite_or_zero(n: f64) -> f64 {
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> RawValue {
        RawValue::from(s)
    }

    #[test]
    fn test_pt_br_and_plain_formats() {
        assert_eq!(clean_numeric(Some(&text("1.234,56"))), 1234.56);
        assert_eq!(clean_numeric(Some(&text("1234.56"))), 1234.56);
        assert_eq!(clean_numeric(Some(&text("1,234.56"))), 1234.56);
        assert_eq!(clean_numeric(Some(&text("R$ 45.280,00"))), 45280.0);
        assert_eq!(clean_numeric(Some(&text("1.234.567,8"))), 1234567.8);
        assert_eq!(clean_numeric(Some(&text("  300 "))), 300.0);
    }

    #[test]
    fn test_numbers_pass_through() {
        assert_eq!(clean_numeric(Some(&RawValue::Number(-12.5))), -12.5);
        assert_eq!(clean_numeric(Some(&RawValue::Number(0.0))), 0.0);
        assert_eq!(clean_numeric(Some(&RawValue::Number(f64::NAN))), 0.0);
    }

    #[test]
    fn test_missing_and_garbage_are_zero() {
        assert_eq!(clean_numeric(None), 0.0);
        assert_eq!(clean_numeric(Some(&RawValue::Null)), 0.0);
        assert_eq!(clean_numeric(Some(&text(""))), 0.0);
        assert_eq!(clean_numeric(Some(&text("n/a"))), 0.0);
        assert_eq!(clean_numeric(Some(&text("R$ -"))), 0.0);
        assert_eq!(clean_numeric(Some(&text("..,"))), 0.0);
    }

    #[test]
    fn test_negative_values_are_kept() {
        assert_eq!(clean_numeric(Some(&text("-1.234,50"))), -1234.5);
        assert_eq!(clean_numeric(Some(&text("R$ -45,00"))), -45.0);
    }

    #[test]
    fn test_inner_minus_ends_number() {
        assert_eq!(clean_numeric(Some(&text("2024-01-05"))), 2024.0);
    }

    #[test]
    fn test_edge_separators() {
        assert_eq!(clean_numeric(Some(&text(",5"))), 0.5);
        assert_eq!(clean_numeric(Some(&text("12,"))), 12.0);
    }

    #[test]
    fn test_parse_numeric_keeps_missing_apart_from_zero() {
        assert_eq!(parse_numeric(None), None);
        assert_eq!(parse_numeric(Some(&RawValue::Null)), None);
        assert_eq!(parse_numeric(Some(&text("abc"))), None);
        assert_eq!(parse_numeric(Some(&text("0"))), Some(0.0));
        assert_eq!(parse_numeric(Some(&RawValue::Number(0.0))), Some(0.0));
    }
}
