use contracts::shared::analytics::{
    DispersionLevel, RankedEntry, RankingSpread, StatSummary, TeamPerformance,
};

/// Descriptive statistics with population standard deviation.
///
/// Empty input gives an all-zero summary (no NaN, no infinities).
pub fn summarize(values: &[f64]) -> StatSummary {
    if values.is_empty() {
        return StatSummary::default();
    }

    let count = values.len();
    let total = values.iter().fold(0.0, |acc, v| acc + v);
    let mean = total / count as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;
    let std_dev = variance.sqrt();
    let coefficient_of_variation = if mean > 0.0 {
        std_dev / mean * 100.0
    } else {
        0.0
    };
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    StatSummary {
        mean,
        std_dev,
        coefficient_of_variation,
        min,
        max,
        total,
        count,
    }
}

/// Gap between the first and the last entry of a ranking.
pub fn ranking_spread(entries: &[RankedEntry]) -> Option<RankingSpread> {
    let leader = entries.first()?;
    let trailer = entries.last()?;
    let absolute_gap = leader.value - trailer.value;
    let relative_gap_percent = if trailer.value > 0.0 {
        absolute_gap / trailer.value * 100.0
    } else {
        0.0
    };

    Some(RankingSpread {
        leader: leader.clone(),
        trailer: trailer.clone(),
        absolute_gap,
        relative_gap_percent,
    })
}

/// Team dispersion over a full seller ranking.
pub fn team_performance(entries: &[RankedEntry]) -> TeamPerformance {
    let values: Vec<f64> = entries.iter().map(|e| e.value).collect();
    let summary = summarize(&values);
    let dispersion = DispersionLevel::from_coefficient(summary.coefficient_of_variation);

    TeamPerformance {
        dispersion,
        dispersion_label: dispersion.label().to_string(),
        spread: ranking_spread(entries),
        summary,
    }
}
