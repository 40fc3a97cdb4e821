/// Integer with `.` as the thousands separator (pt-BR).
///
/// # Examples
/// ```
/// use engine::shared::format::format_number;
/// assert_eq!(format_number(1234567), "1.234.567");
/// assert_eq!(format_number(42), "42");
/// ```
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// pt-BR money: `R$ 1.234,56`, negative as `-R$ 12,50`.
pub fn format_currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{}R$ {},{:02}",
        sign,
        format_number((cents / 100) as usize),
        cents % 100
    )
}

/// pt-BR percentage with one decimal: `45,3%`.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value).replace('.', ",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1.000");
        assert_eq!(format_number(1234567890), "1.234.567.890");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "R$ 0,00");
        assert_eq!(format_currency(1234.56), "R$ 1.234,56");
        assert_eq!(format_currency(45280.0), "R$ 45.280,00");
        assert_eq!(format_currency(-12.5), "-R$ 12,50");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(45.3), "45,3%");
        assert_eq!(format_percent(40.0), "40,0%");
        assert_eq!(format_percent(7.04), "7,0%");
    }
}
