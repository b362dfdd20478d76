//! Great-circle distance helpers.
//!
//! Used to derive elevation sampling positions along a route geometry.
//! Ignores roads and altitude, which is accurate enough for picking sample
//! locations a few dozen meters apart.

use crate::path::GeoPoint;

/// Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance between two points in meters.
pub fn distance_m(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_M * c
}

/// Cumulative distance in meters from the first point to each point.
///
/// Returns one entry per input point; the first entry is 0. Empty input
/// yields an empty vector.
pub fn cumulative_m(points: &[GeoPoint]) -> Vec<f64> {
    let mut cumulative = Vec::with_capacity(points.len());
    let mut total = 0.0;
    for (i, point) in points.iter().enumerate() {
        if i > 0 {
            total += distance_m(points[i - 1], *point);
        }
        cumulative.push(total);
    }
    cumulative
}
