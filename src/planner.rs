//! Planner boundary surface: address pair in, scored route options out.

use std::time::Duration;

use tracing::debug;

use crate::aggregator;
use crate::cache::{ResultCache, DEFAULT_TTL};
use crate::strategy::{sf_strategies, RouteOption, SelectorOptions, StrategyConfig};
use crate::traits::{Clock, ElevationProvider, Geocoder, PlanError, RoutingProvider, SystemClock};

#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Freshness window for cached result sets.
    pub ttl: Duration,
    /// Region hint passed to the geocoder for both endpoints.
    pub region_hint: String,
    pub selector: SelectorOptions,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            region_hint: "San Francisco, CA, US".to_string(),
            selector: SelectorOptions::default(),
        }
    }
}

/// Owns the collaborators, strategy table, and result cache for one
/// deployment of the engine.
pub struct Planner<G, R, E, C: Clock> {
    geocoder: G,
    routing: R,
    elevation: E,
    strategies: Vec<StrategyConfig>,
    cache: ResultCache<C>,
    config: PlannerConfig,
}

impl<G, R, E> Planner<G, R, E, SystemClock> {
    /// Planner with the canonical San Francisco strategies and wall-clock
    /// cache freshness.
    pub fn new(geocoder: G, routing: R, elevation: E, config: PlannerConfig) -> Self {
        Self::with_clock(geocoder, routing, elevation, sf_strategies(), config, SystemClock)
    }
}

impl<G, R, E, C: Clock> Planner<G, R, E, C> {
    /// Planner with an explicit strategy table and time source; tests use
    /// this to control cache aging deterministically.
    pub fn with_clock(
        geocoder: G,
        routing: R,
        elevation: E,
        strategies: Vec<StrategyConfig>,
        config: PlannerConfig,
        clock: C,
    ) -> Self {
        let cache = ResultCache::new(config.ttl, clock);
        Self {
            geocoder,
            routing,
            elevation,
            strategies,
            cache,
            config,
        }
    }
}

impl<G, R, E, C> Planner<G, R, E, C>
where
    G: Geocoder + Sync,
    R: RoutingProvider + Sync,
    E: ElevationProvider + Sync,
    C: Clock + Sync,
{
    /// Resolves both addresses, evaluates every configured route, and
    /// returns the ordered option list: default route first, then one
    /// winner per strategy in table order.
    ///
    /// Repeat queries for the same normalized address pair inside the TTL
    /// window are served from cache without any provider calls. Geocoding
    /// failure for either endpoint is fatal and reported with the failing
    /// address; an empty candidate set is `NoRoutesFound`.
    pub fn find_routes(&self, start: &str, end: &str) -> Result<Vec<RouteOption>, PlanError> {
        if let Some(routes) = self.cache.get(start, end) {
            return Ok(routes);
        }
        debug!("cache miss for ({}, {})", start, end);

        let (origin, destination) = rayon::join(
            || self.geocoder.resolve(start, &self.config.region_hint),
            || self.geocoder.resolve(end, &self.config.region_hint),
        );
        let origin = origin.map_err(|_| PlanError::AddressNotFound(start.to_string()))?;
        let destination = destination.map_err(|_| PlanError::AddressNotFound(end.to_string()))?;

        let routes = aggregator::find_routes(
            origin,
            destination,
            &self.strategies,
            &self.routing,
            &self.elevation,
            &self.config.selector,
        )?;

        self.cache.put(start, end, routes.clone());
        Ok(routes)
    }
}
