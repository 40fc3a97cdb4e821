use contracts::dashboards::d400_sales_overview::SalesOverviewRequest;
use contracts::shared::analytics::{AnalysisPeriod, Granularity};
use contracts::shared::dataset::FieldMapping;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use super::error::{EngineError, Result};
use super::fields::FieldAliases;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub report: ReportConfig,
    /// Extra column names per semantic field, appended to the built-in aliases
    #[serde(default)]
    pub aliases: HashMap<String, Vec<String>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportConfig {
    pub top_n: usize,
    pub low_stock_threshold: f64,
    pub default_period: AnalysisPeriod,
    pub granularity: Granularity,
    #[serde(default)]
    pub fill_gaps: bool,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[report]
top_n = 10
low_stock_threshold = 10
default_period = "all"
granularity = "auto"
fill_gaps = false

[aliases]
"#;

impl Config {
    pub fn parse(contents: &str) -> Result<Config> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn embedded() -> Result<Config> {
        Self::parse(DEFAULT_CONFIG)
    }

    fn validate(&self) -> Result<()> {
        if self.report.top_n == 0 {
            return Err(EngineError::InvalidSetting(
                "report.top_n must be at least 1".into(),
            ));
        }
        let threshold = self.report.low_stock_threshold;
        if threshold.is_nan() || threshold < 0.0 {
            return Err(EngineError::InvalidSetting(
                "report.low_stock_threshold must be a non-negative number".into(),
            ));
        }
        Ok(())
    }

    /// Built-in aliases extended with the `[aliases]` table.
    pub fn field_aliases(&self) -> FieldAliases {
        if self.aliases.is_empty() {
            FieldAliases::builtin().clone()
        } else {
            FieldAliases::builtin().with_extra(&self.aliases)
        }
    }

    /// Sales overview options for a dataset that did not bring its own.
    pub fn default_request(&self, field_mapping: FieldMapping) -> SalesOverviewRequest {
        SalesOverviewRequest {
            field_mapping,
            period: self.report.default_period,
            top_n: self.report.top_n,
            granularity: self.report.granularity,
            fill_gaps: self.report.fill_gaps,
        }
    }
}

/// Load configuration from a config.toml file
///
/// Search order:
/// 1. Next to the executable
/// 2. Falls back to embedded default config
pub fn load_config() -> Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                return load_config_from(&config_path);
            } else {
                tracing::debug!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    Config::embedded()
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    tracing::info!("Loading config from: {}", path.display());
    let contents = std::fs::read_to_string(path)?;
    Config::parse(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = Config::embedded().unwrap();
        assert_eq!(config.report.top_n, 10);
        assert_eq!(config.report.low_stock_threshold, 10.0);
        assert_eq!(config.report.default_period, AnalysisPeriod::All);
        assert_eq!(config.report.granularity, Granularity::Auto);
        assert!(config.aliases.is_empty());
    }

    #[test]
    fn test_custom_config_with_aliases() {
        let config = Config::parse(
            r#"
            [report]
            top_n = 5
            low_stock_threshold = 3.5
            default_period = "3months"
            granularity = "month"

            [aliases]
            vendedor = ["Representante"]
            "#,
        )
        .unwrap();

        assert_eq!(config.report.top_n, 5);
        assert!(!config.report.fill_gaps);
        assert_eq!(config.report.default_period, AnalysisPeriod::ThreeMonths);

        let aliases = config.field_aliases();
        assert!(aliases.aliases("vendedor").contains(&"Representante".to_string()));

        let request = config.default_request(FieldMapping::new());
        assert_eq!(request.top_n, 5);
        assert_eq!(request.granularity, Granularity::Month);
    }

    #[test]
    fn test_example_config_parses() {
        let config = Config::parse(include_str!("../../config.example.toml")).unwrap();
        assert_eq!(config.aliases["valor"], vec!["Valor Líquido".to_string()]);
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let zero_top = Config::parse(
            r#"
            [report]
            top_n = 0
            low_stock_threshold = 10
            default_period = "all"
            granularity = "auto"
            "#,
        );
        assert!(matches!(zero_top, Err(EngineError::InvalidSetting(_))));

        let bad_period = Config::parse(
            r#"
            [report]
            top_n = 3
            low_stock_threshold = 10
            default_period = "week"
            granularity = "auto"
            "#,
        );
        assert!(matches!(bad_period, Err(EngineError::Config(_))));
    }
}
