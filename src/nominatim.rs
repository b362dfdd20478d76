//! Nominatim HTTP adapter for address resolution.

use serde::Deserialize;

use crate::path::GeoPoint;
use crate::traits::{GeocodeError, Geocoder};

#[derive(Debug, Clone)]
pub struct NominatimConfig {
    pub base_url: String,
    /// Sent as the User-Agent header; Nominatim's usage policy requires an
    /// identifying value.
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: "ride-planner".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NominatimClient {
    config: NominatimConfig,
    client: reqwest::blocking::Client,
}

impl NominatimClient {
    pub fn new(config: NominatimConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl Geocoder for NominatimClient {
    /// Resolves an address, qualified by the region hint, to the first
    /// search hit.
    fn resolve(&self, address: &str, region_hint: &str) -> Result<GeoPoint, GeocodeError> {
        let query = if region_hint.is_empty() {
            address.to_string()
        } else {
            format!("{}, {}", address, region_hint)
        };

        let url = format!("{}/search", self.config.base_url);
        let hits = self
            .client
            .get(url)
            .query(&[("q", query.as_str()), ("format", "json"), ("limit", "1")])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<Vec<NominatimHit>>())?;

        let hit = hits
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NotFound(address.to_string()))?;

        // Nominatim serializes coordinates as strings.
        let lat = hit
            .lat
            .parse::<f64>()
            .map_err(|err| GeocodeError::Provider(err.to_string()))?;
        let lng = hit
            .lon
            .parse::<f64>()
            .map_err(|err| GeocodeError::Provider(err.to_string()))?;

        Ok(GeoPoint::new(lat, lng))
    }
}

#[derive(Debug, Deserialize)]
struct NominatimHit {
    lat: String,
    lon: String,
}
