//! OSRM HTTP adapter for candidate route requests.

use serde::Deserialize;

use crate::path::{GeoPoint, Path};
use crate::traits::{RouteError, RouteLeg, RouteParams, RoutingProvider, Step};

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    /// Routing profile the server was built with, e.g. "bike".
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "bike".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl RoutingProvider for OsrmClient {
    /// Requests one route through the given waypoints.
    ///
    /// The region hint in `params` has no OSRM equivalent and is ignored;
    /// the exclusions map onto OSRM's `exclude` classes.
    fn route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        params: &RouteParams,
    ) -> Result<RouteLeg, RouteError> {
        let mut coords = Vec::with_capacity(params.waypoints.len() + 2);
        coords.push(origin);
        coords.extend_from_slice(&params.waypoints);
        coords.push(destination);

        let coord_list = coords
            .iter()
            .map(|p| format!("{:.6},{:.6}", p.lng, p.lat))
            .collect::<Vec<_>>()
            .join(";");

        let mut exclude = Vec::new();
        if params.avoid_highways {
            exclude.push("motorway");
        }
        if params.avoid_ferries {
            exclude.push("ferry");
        }

        let mut url = format!(
            "{}/route/v1/{}/{}?steps=true&geometries=geojson&overview=full",
            self.config.base_url, self.config.profile, coord_list
        );
        if !exclude.is_empty() {
            url.push_str("&exclude=");
            url.push_str(&exclude.join(","));
        }

        let body = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OsrmRouteResponse>())?;

        if body.code != "Ok" {
            return Err(RouteError::NoRoute);
        }
        let route = body.routes.into_iter().next().ok_or(RouteError::NoRoute)?;

        let path = Path::new(geometry_points(&route.geometry));
        let steps = route
            .legs
            .iter()
            .flat_map(|leg| leg.steps.iter())
            .map(|step| Step {
                instruction: instruction_text(step),
                path: Path::new(geometry_points(&step.geometry)),
                distance: step.distance,
            })
            .collect();

        Ok(RouteLeg {
            path,
            steps,
            total_distance: route.distance,
        })
    }
}

fn geometry_points(geometry: &OsrmGeometry) -> Vec<GeoPoint> {
    geometry
        .coordinates
        .iter()
        .map(|c| GeoPoint::new(c[1], c[0]))
        .collect()
}

fn instruction_text(step: &OsrmStep) -> String {
    let action = match step.maneuver.modifier.as_deref() {
        Some(modifier) => format!("{} {}", step.maneuver.kind, modifier),
        None => step.maneuver.kind.clone(),
    };
    if step.name.is_empty() {
        action
    } else {
        format!("{} onto {}", action, step.name)
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    geometry: OsrmGeometry,
    legs: Vec<OsrmLeg>,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
struct OsrmLeg {
    steps: Vec<OsrmStep>,
}

#[derive(Debug, Deserialize)]
struct OsrmStep {
    distance: f64,
    #[serde(default)]
    name: String,
    maneuver: OsrmManeuver,
    geometry: OsrmGeometry,
}

#[derive(Debug, Deserialize)]
struct OsrmManeuver {
    #[serde(rename = "type")]
    kind: String,
    modifier: Option<String>,
}
