//! Per-step elevation overlay.
//!
//! Maps a candidate's turn-by-turn steps onto the sampled elevation profile
//! of the whole route and annotates each step with its own gain and grade.

use serde::{Deserialize, Serialize};

use crate::metrics::{compute_metrics, round_tenth, ElevationMetrics};
use crate::path::Path;
use crate::traits::Step;

/// A step enriched with elevation figures.
///
/// `elevation` is the step's total gain in meters; grades are percentages
/// rounded to one decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedStep {
    pub instruction: String,
    pub path: Path,
    pub distance: f64,
    pub elevation: f64,
    pub grade: f64,
    pub max_grade: f64,
}

/// Annotates each step with metrics computed from the slice of the route
/// profile it covers.
///
/// A step's endpoints are located in `full_path` by exact coordinate
/// equality and the matched index range is projected onto the sample
/// sequence. A step whose endpoints do not appear in `full_path` gets
/// all-zero metrics; the mismatch is silent. Output preserves step count
/// and order.
pub fn annotate(
    steps: &[Step],
    full_path: &Path,
    elevations: &[f64],
    sample_spacing: f64,
) -> Vec<AnnotatedStep> {
    steps
        .iter()
        .map(|step| {
            let metrics = step_metrics(step, full_path, elevations, sample_spacing);
            let grade = if step.distance > 0.0 {
                round_tenth(metrics.total_gain / step.distance * 100.0)
            } else {
                0.0
            };

            AnnotatedStep {
                instruction: step.instruction.clone(),
                path: step.path.clone(),
                distance: step.distance,
                elevation: metrics.total_gain,
                grade,
                max_grade: metrics.max_grade,
            }
        })
        .collect()
}

/// Metrics for the profile slice covered by one step, or zeros when the
/// step's endpoints cannot be matched.
fn step_metrics(
    step: &Step,
    full_path: &Path,
    elevations: &[f64],
    sample_spacing: f64,
) -> ElevationMetrics {
    let (Some(start), Some(end)) = (step.path.first(), step.path.last()) else {
        return ElevationMetrics::default();
    };

    let points = full_path.points();
    if points.len() < 2 || elevations.len() < 2 {
        return ElevationMetrics::default();
    }

    let Some(start_idx) = points.iter().position(|p| p == start) else {
        return ElevationMetrics::default();
    };
    let Some(end_idx) = points.iter().rposition(|p| p == end) else {
        return ElevationMetrics::default();
    };
    if end_idx < start_idx {
        return ElevationMetrics::default();
    }

    // The profile is sampled more coarsely than the geometry, so project
    // the geometry index range onto the sample index range.
    let last_point = points.len() - 1;
    let last_sample = elevations.len() - 1;
    let lo = start_idx * last_sample / last_point;
    let hi = end_idx * last_sample / last_point;

    compute_metrics(&elevations[lo..=hi], sample_spacing)
}
