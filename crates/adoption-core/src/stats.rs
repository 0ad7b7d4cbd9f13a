use serde::{Deserialize, Serialize};

/// Confidence cut-offs reported as "predictions above threshold" counts.
pub const CONFIDENCE_THRESHOLDS: [f64; 3] = [0.9, 0.8, 0.7];

// ── Percentile helper ─────────────────────────────────────────────────────────

/// Compute the `p`-th percentile of a **sorted** slice using linear
/// interpolation between closest ranks.
///
/// Returns `0.0` for an empty slice.
pub fn percentile(sorted_data: &[f64], p: f64) -> f64 {
    if sorted_data.is_empty() {
        return 0.0;
    }
    let len = sorted_data.len();
    if len == 1 {
        return sorted_data[0];
    }
    let rank = (p / 100.0) * (len as f64 - 1.0);
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted_data[lo];
    }
    let frac = rank - lo as f64;
    sorted_data[lo] + frac * (sorted_data[hi] - sorted_data[lo])
}

// ── ConfidenceStats ───────────────────────────────────────────────────────────

/// Descriptive statistics over classifier confidence scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceStats {
    /// Number of non-null scores summarised.
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (n − 1); `None` with fewer than two scores.
    pub std_dev: Option<f64>,
    pub min: f64,
    pub max: f64,
    /// Scores strictly above 0.9.
    pub above_90: usize,
    /// Scores strictly above 0.8.
    pub above_80: usize,
    /// Scores strictly above 0.7.
    pub above_70: usize,
}

impl ConfidenceStats {
    /// Summarise `scores`, ignoring NaN values.
    ///
    /// Returns `None` when no finite score remains.
    pub fn from_scores(scores: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = scores.iter().copied().filter(|v| !v.is_nan()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;
        let std_dev = (count > 1).then(|| {
            let sum_sq: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            (sum_sq / (count as f64 - 1.0)).sqrt()
        });
        let above = |threshold: f64| sorted.iter().filter(|&&v| v > threshold).count();

        Some(Self {
            count,
            mean,
            median: percentile(&sorted, 50.0),
            std_dev,
            min: sorted[0],
            max: sorted[count - 1],
            above_90: above(CONFIDENCE_THRESHOLDS[0]),
            above_80: above(CONFIDENCE_THRESHOLDS[1]),
            above_70: above(CONFIDENCE_THRESHOLDS[2]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_percentile_empty() {
        assert_eq!(percentile(&[], 50.0), 0.0);
    }

    #[test]
    fn test_percentile_single() {
        assert_eq!(percentile(&[0.42], 50.0), 0.42);
    }

    #[test]
    fn test_percentile_median_even_interpolates() {
        assert!(approx(percentile(&[0.2, 0.4, 0.6, 0.8], 50.0), 0.5));
    }

    #[test]
    fn test_percentile_median_odd() {
        assert!(approx(percentile(&[0.1, 0.5, 0.9], 50.0), 0.5));
    }

    #[test]
    fn test_confidence_stats_known_values() {
        let stats = ConfidenceStats::from_scores(&[0.95, 0.85, 0.75, 0.65]).unwrap();
        assert_eq!(stats.count, 4);
        assert!(approx(stats.mean, 0.8));
        assert!(approx(stats.median, 0.8));
        assert!(approx(stats.min, 0.65));
        assert!(approx(stats.max, 0.95));
        // deviations ±0.05, ±0.15 → (2·0.0025 + 2·0.0225) / 3
        let expected_std = (0.05_f64 / 3.0).sqrt();
        assert!(approx(stats.std_dev.unwrap(), expected_std));
        assert_eq!(stats.above_90, 1);
        assert_eq!(stats.above_80, 2);
        assert_eq!(stats.above_70, 3);
    }

    #[test]
    fn test_confidence_thresholds_are_strict() {
        let stats = ConfidenceStats::from_scores(&[0.9, 0.8, 0.7]).unwrap();
        assert_eq!(stats.above_90, 0);
        assert_eq!(stats.above_80, 1);
        assert_eq!(stats.above_70, 2);
    }

    #[test]
    fn test_confidence_stats_single_value_has_no_std() {
        let stats = ConfidenceStats::from_scores(&[0.5]).unwrap();
        assert!(stats.std_dev.is_none());
        assert!(approx(stats.median, 0.5));
    }

    #[test]
    fn test_confidence_stats_ignores_nan() {
        let stats = ConfidenceStats::from_scores(&[f64::NAN, 0.2, 0.4]).unwrap();
        assert_eq!(stats.count, 2);
        assert!(approx(stats.mean, 0.3));
    }

    #[test]
    fn test_confidence_stats_empty() {
        assert!(ConfidenceStats::from_scores(&[]).is_none());
        assert!(ConfidenceStats::from_scores(&[f64::NAN]).is_none());
    }
}
