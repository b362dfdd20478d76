//! Core collaborator traits for the route planner.
//!
//! These are intentionally minimal. The planner is agnostic to how a
//! provider geocodes, routes, or samples elevation; concrete adapters live
//! in their own modules and tests supply hand-rolled mocks.

use std::fmt;
use std::time::SystemTime;

use crate::path::{GeoPoint, Path};

/// Request parameters for one candidate route.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteParams {
    pub avoid_highways: bool,
    pub avoid_ferries: bool,
    /// Intermediate points the candidate must pass through, in order.
    pub waypoints: Vec<GeoPoint>,
    /// Optional region hint; adapters that cannot use it ignore it.
    pub region: Option<String>,
}

/// One turn-by-turn instruction of a candidate route.
///
/// The sub-path is a contiguous slice of the parent candidate's geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub instruction: String,
    pub path: Path,
    /// Step length in meters.
    pub distance: f64,
}

/// One fully realized candidate returned by a routing provider.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteLeg {
    pub path: Path,
    pub steps: Vec<Step>,
    /// Total length in meters.
    pub total_distance: f64,
}

/// Resolves free-text addresses to coordinates.
pub trait Geocoder {
    fn resolve(&self, address: &str, region_hint: &str) -> Result<GeoPoint, GeocodeError>;
}

/// Computes one candidate route between two coordinates.
pub trait RoutingProvider {
    fn route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        params: &RouteParams,
    ) -> Result<RouteLeg, RouteError>;
}

/// Samples elevations at evenly spaced positions along a path.
pub trait ElevationProvider {
    /// Returns exactly `sample_count` elevations in meters, ordered along
    /// the direction of travel.
    fn sample_along_path(&self, path: &Path, sample_count: usize) -> Result<Vec<f64>, ElevationError>;
}

/// Time source for cache freshness, injectable for deterministic tests.
pub trait Clock {
    fn now(&self) -> SystemTime;
}

/// Wall-clock time source used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

#[derive(Debug)]
pub enum GeocodeError {
    /// The address cannot be resolved within the region hint.
    NotFound(String),
    Provider(String),
}

#[derive(Debug)]
pub enum RouteError {
    /// No path satisfies the requested constraints.
    NoRoute,
    Provider(String),
}

#[derive(Debug)]
pub enum ElevationError {
    Provider(String),
}

impl From<reqwest::Error> for GeocodeError {
    fn from(err: reqwest::Error) -> Self {
        GeocodeError::Provider(err.to_string())
    }
}

impl From<reqwest::Error> for RouteError {
    fn from(err: reqwest::Error) -> Self {
        RouteError::Provider(err.to_string())
    }
}

impl From<reqwest::Error> for ElevationError {
    fn from(err: reqwest::Error) -> Self {
        ElevationError::Provider(err.to_string())
    }
}

/// Query-level failures surfaced to the caller.
///
/// Per-variant and default-route provider failures are absorbed inside the
/// engine and never appear here unless they leave the result set empty.
#[derive(Debug, PartialEq, Eq)]
pub enum PlanError {
    /// Geocoding failed for the named endpoint; fatal, no partial results.
    AddressNotFound(String),
    /// Every candidate request failed; the result list would be empty.
    NoRoutesFound,
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::AddressNotFound(address) => {
                write!(f, "address not found: {}", address)
            }
            PlanError::NoRoutesFound => write!(f, "no routes found"),
        }
    }
}

impl std::error::Error for PlanError {}
