//! Recent-trend detection over a visible rolling series: mean of the last
//! five entries against mean of the first five. On series shorter than ten
//! entries the two ends overlap.

use serde::{Deserialize, Serialize};

use super::rolling::RollingMetrics;

/// Entries averaged at each end of the series.
pub const TREND_SPAN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improving,
    Declining,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Trend {
    /// Fewer than two data points.
    InsufficientData,
    Computed {
        direction: TrendDirection,
        /// recent_mean - early_mean
        delta: f64,
        early_mean: f64,
        recent_mean: f64,
    },
}

impl Trend {
    pub fn direction(&self) -> Option<TrendDirection> {
        match self {
            Trend::InsufficientData => None,
            Trend::Computed { direction, .. } => Some(*direction),
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn detect_trend(values: &[f64]) -> Trend {
    if values.len() < 2 {
        return Trend::InsufficientData;
    }
    let span = TREND_SPAN.min(values.len());
    let early_mean = mean(&values[..span]);
    let recent_mean = mean(&values[values.len() - span..]);
    let delta = recent_mean - early_mean;

    let direction = if delta > 0.0 {
        TrendDirection::Improving
    } else if delta < 0.0 {
        TrendDirection::Declining
    } else {
        TrendDirection::Stable
    };

    Trend::Computed {
        direction,
        delta,
        early_mean,
        recent_mean,
    }
}

/// Which column of a rolling series to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum RollingMetric {
    Pdo,
    CorsiPct,
    FenwickPct,
    XgPct,
    PointsPerGame,
}

impl RollingMetric {
    pub const ALL: [RollingMetric; 5] = [
        RollingMetric::Pdo,
        RollingMetric::CorsiPct,
        RollingMetric::FenwickPct,
        RollingMetric::XgPct,
        RollingMetric::PointsPerGame,
    ];

    pub fn value(&self, entry: &RollingMetrics) -> Option<f64> {
        match self {
            RollingMetric::Pdo => entry.pdo,
            RollingMetric::CorsiPct => entry.corsi_pct,
            RollingMetric::FenwickPct => entry.fenwick_pct,
            RollingMetric::XgPct => entry.xg_pct,
            RollingMetric::PointsPerGame => Some(entry.points_per_game),
        }
    }
}

/// Trend of one metric; entries where it is undefined are skipped.
pub fn metric_trend(series: &[RollingMetrics], metric: RollingMetric) -> Trend {
    let values: Vec<f64> = series.iter().filter_map(|entry| metric.value(entry)).collect();
    detect_trend(&values)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricTrend {
    pub metric: RollingMetric,
    pub trend: Trend,
}

pub fn all_metric_trends(series: &[RollingMetrics]) -> Vec<MetricTrend> {
    RollingMetric::ALL
        .iter()
        .map(|&metric| MetricTrend {
            metric,
            trend: metric_trend(series, metric),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_insufficient_data() {
        assert_eq!(detect_trend(&[]), Trend::InsufficientData);
        assert_eq!(detect_trend(&[50.0]), Trend::InsufficientData);
    }

    #[test]
    fn test_short_series_ends_cover_everything() {
        // Both ends span the whole series.
        let trend = detect_trend(&[48.0, 52.0]);
        assert_eq!(trend.direction(), Some(TrendDirection::Stable));
        if let Trend::Computed { delta, early_mean, recent_mean, .. } = trend {
            assert_eq!(delta, 0.0);
            assert_eq!(early_mean, 50.0);
            assert_eq!(recent_mean, 50.0);
        }
    }

    #[test]
    fn test_six_entries_overlap_in_the_middle() {
        // First five average 4.0, last five 4.2.
        match detect_trend(&[0.0, 10.0, 10.0, 0.0, 0.0, 1.0]) {
            Trend::Computed { direction, early_mean, recent_mean, .. } => {
                assert_eq!(early_mean, 4.0);
                assert!((recent_mean - 4.2).abs() < 1e-12);
                assert_eq!(direction, TrendDirection::Improving);
            }
            other => panic!("expected computed trend, got {:?}", other),
        }
    }

    #[test]
    fn test_uses_first_and_last_five() {
        // First five average 1, last five average 3, middle ignored.
        let values = [1.0, 1.0, 1.0, 1.0, 1.0, 100.0, 3.0, 3.0, 3.0, 3.0, 3.0];
        match detect_trend(&values) {
            Trend::Computed { delta, early_mean, recent_mean, direction } => {
                assert_eq!(early_mean, 1.0);
                assert_eq!(recent_mean, 3.0);
                assert_eq!(delta, 2.0);
                assert_eq!(direction, TrendDirection::Improving);
            }
            other => panic!("expected computed trend, got {:?}", other),
        }
    }

    #[test]
    fn test_declining_and_stable() {
        assert_eq!(
            detect_trend(&[55.0, 54.0, 53.0, 52.0, 51.0, 50.0]).direction(),
            Some(TrendDirection::Declining)
        );
        assert_eq!(detect_trend(&[50.0, 50.0, 50.0]).direction(), Some(TrendDirection::Stable));
    }

    #[test]
    fn test_every_metric_reports() {
        let trends = all_metric_trends(&[]);
        assert_eq!(trends.len(), RollingMetric::iter().count());
        assert!(trends.iter().all(|t| t.trend == Trend::InsufficientData));
    }

    #[test]
    fn test_trend_serializes_with_status_tag() {
        let json = serde_json::to_value(Trend::InsufficientData).unwrap();
        assert_eq!(json["status"], "insufficient_data");
    }
}
