//! Elevation metrics derived from sampled profiles.

use serde::{Deserialize, Serialize};

/// Spacing assumed between consecutive elevation samples, in meters.
///
/// Sampling targets one sample per this many meters of route, so the
/// constant doubles as the grade denominator. Callers that want true
/// per-candidate spacing can pass `total_distance / (count - 1)` instead.
pub const DEFAULT_SAMPLE_SPACING: f64 = 100.0;

/// Bounds on how many elevation samples one candidate requests.
pub const MIN_SAMPLES: usize = 10;
pub const MAX_SAMPLES: usize = 100;

/// Aggregate gain/loss/grade figures for one elevation profile.
///
/// Gain and loss are rounded to whole meters, grades to one decimal place
/// of percent. `total_gain - total_loss` equals the net elevation change
/// between the first and last sample, up to rounding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElevationMetrics {
    pub total_gain: f64,
    pub total_loss: f64,
    pub max_grade: f64,
    pub average_grade: f64,
}

/// Derives metrics from an ordered elevation profile.
///
/// Fewer than two samples define no slope and yield all-zero metrics.
/// NaN samples propagate per IEEE semantics; callers validate provider
/// output before invoking.
pub fn compute_metrics(samples: &[f64], sample_spacing: f64) -> ElevationMetrics {
    if samples.len() < 2 {
        return ElevationMetrics::default();
    }

    let mut total_gain = 0.0;
    let mut total_loss = 0.0;
    let mut max_grade: f64 = 0.0;
    let mut grade_sum = 0.0;

    for pair in samples.windows(2) {
        let diff = pair[1] - pair[0];
        if diff > 0.0 {
            total_gain += diff;
        } else {
            total_loss += -diff;
        }

        let grade = (diff / sample_spacing).abs() * 100.0;
        max_grade = max_grade.max(grade);
        grade_sum += grade;
    }

    let segments = (samples.len() - 1) as f64;
    ElevationMetrics {
        total_gain: total_gain.round(),
        total_loss: total_loss.round(),
        max_grade: round_tenth(max_grade),
        average_grade: round_tenth(grade_sum / segments),
    }
}

/// How many elevation samples to request for a candidate of the given
/// length: one per ~100 m, clamped to `[MIN_SAMPLES, MAX_SAMPLES]`.
pub fn sample_count_for(total_distance_m: f64) -> usize {
    let target = (total_distance_m / DEFAULT_SAMPLE_SPACING) as usize;
    target.clamp(MIN_SAMPLES, MAX_SAMPLES)
}

pub(crate) fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_profile_is_zero() {
        assert_eq!(compute_metrics(&[], 100.0), ElevationMetrics::default());
    }

    #[test]
    fn test_single_sample_is_zero() {
        assert_eq!(compute_metrics(&[42.0], 100.0), ElevationMetrics::default());
    }

    #[test]
    fn test_known_profile() {
        let metrics = compute_metrics(&[10.0, 20.0, 15.0, 15.0, 30.0], 100.0);
        assert_eq!(metrics.total_gain, 25.0);
        assert_eq!(metrics.total_loss, 5.0);
        assert_eq!(metrics.max_grade, 15.0);
        // grades: 10, 5, 0, 15 -> mean 7.5
        assert_eq!(metrics.average_grade, 7.5);
    }

    #[test]
    fn test_gain_minus_loss_matches_net_change() {
        let samples = [12.0, 18.5, 14.0, 22.0, 9.5, 31.0];
        let metrics = compute_metrics(&samples, 100.0);
        let net = samples[samples.len() - 1] - samples[0];
        assert!((metrics.total_gain - metrics.total_loss - net).abs() <= 1.0);
    }

    #[test]
    fn test_monotonic_has_no_loss() {
        let metrics = compute_metrics(&[0.0, 5.0, 9.0, 14.0], 100.0);
        assert_eq!(metrics.total_loss, 0.0);
        assert_eq!(metrics.total_gain, 14.0);
    }

    #[test]
    fn test_rounding() {
        let metrics = compute_metrics(&[0.0, 6.25], 100.0);
        assert_eq!(metrics.total_gain, 6.0);
        // 6.25% rounds half away from zero to 6.3
        assert_eq!(metrics.max_grade, 6.3);
    }

    #[test]
    fn test_nan_propagates() {
        let metrics = compute_metrics(&[0.0, f64::NAN, 5.0], 100.0);
        assert!(metrics.total_loss.is_nan() || metrics.total_gain.is_nan());
    }

    #[test]
    fn test_sample_count_clamping() {
        assert_eq!(sample_count_for(0.0), MIN_SAMPLES);
        assert_eq!(sample_count_for(450.0), MIN_SAMPLES);
        assert_eq!(sample_count_for(5_000.0), 50);
        assert_eq!(sample_count_for(1_000_000.0), MAX_SAMPLES);
    }
}
