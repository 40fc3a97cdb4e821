use serde::{Deserialize, Serialize};

use super::ranking::RankedEntry;

/// Descriptive statistics over a set of values. Every field is finite; an
/// empty input yields all zeros.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatSummary {
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// `std_dev / mean * 100`, 0 when the mean is not positive.
    pub coefficient_of_variation: f64,
    pub min: f64,
    pub max: f64,
    pub total: f64,
    pub count: usize,
}

/// Team dispersion classification by coefficient of variation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispersionLevel {
    /// CoV below 25%.
    Homogeneous,
    /// CoV from 25% to 50%.
    Moderate,
    /// CoV above 50%.
    High,
}

impl DispersionLevel {
    pub const MODERATE_FROM: f64 = 25.0;
    pub const HIGH_ABOVE: f64 = 50.0;

    pub fn from_coefficient(cov: f64) -> Self {
        if cov < Self::MODERATE_FROM {
            DispersionLevel::Homogeneous
        } else if cov <= Self::HIGH_ABOVE {
            DispersionLevel::Moderate
        } else {
            DispersionLevel::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DispersionLevel::Homogeneous => "Equipe homogênea",
            DispersionLevel::Moderate => "Dispersão moderada",
            DispersionLevel::High => "Alta dispersão",
        }
    }
}

/// Gap between the first and the last entry of a ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingSpread {
    pub leader: RankedEntry,
    pub trailer: RankedEntry,
    pub absolute_gap: f64,
    /// Gap relative to the trailer's value, 0 when the trailer is 0.
    pub relative_gap_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamPerformance {
    pub summary: StatSummary,
    pub dispersion: DispersionLevel,
    pub dispersion_label: String,
    pub spread: Option<RankingSpread>,
}
