use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Relative analysis window, anchored on the latest date of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnalysisPeriod {
    #[serde(rename = "month")]
    Month,
    #[serde(rename = "3months")]
    ThreeMonths,
    #[serde(rename = "6months")]
    SixMonths,
    #[serde(rename = "year")]
    Year,
    #[serde(rename = "all")]
    #[default]
    All,
}

impl AnalysisPeriod {
    /// Window length in months, `None` for `All`.
    pub fn months(&self) -> Option<u32> {
        match self {
            AnalysisPeriod::Month => Some(1),
            AnalysisPeriod::ThreeMonths => Some(3),
            AnalysisPeriod::SixMonths => Some(6),
            AnalysisPeriod::Year => Some(12),
            AnalysisPeriod::All => None,
        }
    }

    /// pt-BR name used in report headers.
    pub fn display_name(&self) -> &'static str {
        match self {
            AnalysisPeriod::Month => "Último mês",
            AnalysisPeriod::ThreeMonths => "Últimos 3 meses",
            AnalysisPeriod::SixMonths => "Últimos 6 meses",
            AnalysisPeriod::Year => "Último ano",
            AnalysisPeriod::All => "Todo o período",
        }
    }
}

/// Calendar bucket size of a time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Day,
    Week,
    Month,
    /// Day for spans up to 31 days, month otherwise.
    #[default]
    Auto,
}

/// One point of a time series, ordered chronologically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodBucket {
    pub period_label: String,
    pub value: f64,
}

/// Inclusive date range of an anchored period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl PeriodWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_wire_names() {
        let p: AnalysisPeriod = serde_json::from_str(r#""3months""#).unwrap();
        assert_eq!(p, AnalysisPeriod::ThreeMonths);
        assert_eq!(serde_json::to_string(&AnalysisPeriod::All).unwrap(), r#""all""#);
        assert_eq!(AnalysisPeriod::Year.months(), Some(12));
        assert_eq!(AnalysisPeriod::All.months(), None);
    }
}
