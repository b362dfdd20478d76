//! Geographic path representation for route geometries.
//!
//! A path stores decoded latitude/longitude points directly. Any compact
//! polyline encoding happens at the provider boundary, not in the core.

use serde::{Deserialize, Serialize};

/// A single geographic coordinate.
///
/// Compared by exact value equality; step sub-paths are matched against the
/// parent route geometry with this comparison, so both must come from the
/// same provider response at the same precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// An ordered sequence of points defining the direction of travel.
///
/// Immutable once produced by a routing provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    points: Vec<GeoPoint>,
}

impl Path {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<GeoPoint> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&GeoPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&GeoPoint> {
        self.points.last()
    }
}
