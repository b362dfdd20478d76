//! Open Topo Data HTTP adapter for elevation sampling.

use serde::Deserialize;

use crate::haversine;
use crate::path::{GeoPoint, Path};
use crate::traits::{ElevationError, ElevationProvider};

#[derive(Debug, Clone)]
pub struct OpenTopoConfig {
    pub base_url: String,
    /// Elevation dataset name, e.g. "ned10m" for the continental US.
    pub dataset: String,
    pub timeout_secs: u64,
}

impl Default for OpenTopoConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.opentopodata.org".to_string(),
            dataset: "ned10m".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpenTopoClient {
    config: OpenTopoConfig,
    client: reqwest::blocking::Client,
}

impl OpenTopoClient {
    pub fn new(config: OpenTopoConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl ElevationProvider for OpenTopoClient {
    /// Resamples the path to `sample_count` evenly spaced positions and
    /// queries their elevations in one batch.
    ///
    /// Positions with no coverage in the dataset come back as NaN; callers
    /// decide how to treat them.
    fn sample_along_path(&self, path: &Path, sample_count: usize) -> Result<Vec<f64>, ElevationError> {
        let positions = resample(path, sample_count)
            .ok_or_else(|| ElevationError::Provider("cannot sample an empty path".to_string()))?;

        let locations = positions
            .iter()
            .map(|p| format!("{:.6},{:.6}", p.lat, p.lng))
            .collect::<Vec<_>>()
            .join("|");

        let url = format!("{}/v1/{}", self.config.base_url, self.config.dataset);
        let body = self
            .client
            .get(url)
            .query(&[("locations", locations.as_str())])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OpenTopoResponse>())?;

        if body.results.len() != positions.len() {
            return Err(ElevationError::Provider(format!(
                "expected {} results, got {}",
                positions.len(),
                body.results.len()
            )));
        }

        Ok(body
            .results
            .into_iter()
            .map(|r| r.elevation.unwrap_or(f64::NAN))
            .collect())
    }
}

/// Evenly spaced positions along the path by linear interpolation over
/// cumulative great-circle distance. `None` for an empty path.
fn resample(path: &Path, sample_count: usize) -> Option<Vec<GeoPoint>> {
    let points = path.points();
    let first = *points.first()?;
    if sample_count == 0 {
        return Some(Vec::new());
    }
    if points.len() == 1 || sample_count == 1 {
        return Some(vec![first; sample_count]);
    }

    let cumulative = haversine::cumulative_m(points);
    let total = *cumulative.last()?;
    if total == 0.0 {
        return Some(vec![first; sample_count]);
    }

    let mut positions = Vec::with_capacity(sample_count);
    let mut segment = 0;
    for i in 0..sample_count {
        let target = total * i as f64 / (sample_count - 1) as f64;
        while segment + 1 < cumulative.len() - 1 && cumulative[segment + 1] < target {
            segment += 1;
        }

        let seg_start = cumulative[segment];
        let seg_end = cumulative[segment + 1];
        let t = if seg_end > seg_start {
            ((target - seg_start) / (seg_end - seg_start)).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let a = points[segment];
        let b = points[segment + 1];
        positions.push(GeoPoint::new(
            a.lat + (b.lat - a.lat) * t,
            a.lng + (b.lng - a.lng) * t,
        ));
    }

    Some(positions)
}

#[derive(Debug, Deserialize)]
struct OpenTopoResponse {
    results: Vec<OpenTopoResult>,
}

#[derive(Debug, Deserialize)]
struct OpenTopoResult {
    elevation: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resample_endpoints_and_count() {
        let path = Path::new(vec![
            GeoPoint::new(37.00, -122.00),
            GeoPoint::new(37.01, -122.00),
            GeoPoint::new(37.02, -122.00),
        ]);
        let positions = resample(&path, 5).unwrap();

        assert_eq!(positions.len(), 5);
        assert_eq!(positions[0], GeoPoint::new(37.00, -122.00));
        let last = positions[4];
        assert!((last.lat - 37.02).abs() < 1e-9);
        assert!((last.lng + 122.00).abs() < 1e-9);
    }

    #[test]
    fn test_resample_is_monotonic_along_travel() {
        let path = Path::new(vec![
            GeoPoint::new(37.00, -122.00),
            GeoPoint::new(37.04, -122.00),
        ]);
        let positions = resample(&path, 10).unwrap();
        for pair in positions.windows(2) {
            assert!(pair[1].lat >= pair[0].lat);
        }
    }

    #[test]
    fn test_resample_single_point_path() {
        let path = Path::new(vec![GeoPoint::new(37.0, -122.0)]);
        let positions = resample(&path, 3).unwrap();
        assert_eq!(positions, vec![GeoPoint::new(37.0, -122.0); 3]);
    }

    #[test]
    fn test_resample_empty_path() {
        assert!(resample(&Path::new(vec![]), 3).is_none());
    }
}
