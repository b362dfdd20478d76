//! Assembles the full result list: default route plus strategy winners.

use rayon::prelude::*;
use tracing::warn;

use crate::path::GeoPoint;
use crate::strategy::{self, RouteOption, SelectorOptions, StrategyConfig};
use crate::traits::{ElevationProvider, PlanError, RouteParams, RoutingProvider};

/// Evaluates the default route and every configured strategy between two
/// coordinates.
///
/// The default candidate is scored first; its total gain becomes the
/// baseline for `MatchBaseline` strategies (0 when it fails, and the
/// failure is absorbed). Strategies run concurrently but the output keeps
/// strategy-list order, default first. An empty concatenation is an
/// explicit `NoRoutesFound` failure, never an empty success.
pub fn find_routes<R, E>(
    origin: GeoPoint,
    destination: GeoPoint,
    strategies: &[StrategyConfig],
    routing: &R,
    elevation: &E,
    options: &SelectorOptions,
) -> Result<Vec<RouteOption>, PlanError>
where
    R: RoutingProvider + Sync,
    E: ElevationProvider + Sync,
{
    let default_option = evaluate_default(origin, destination, routing, elevation, options);
    let baseline_gain = default_option
        .as_ref()
        .map_or(0.0, |option| option.metrics.total_gain);

    let winners: Vec<Option<RouteOption>> = strategies
        .par_iter()
        .map(|config| {
            strategy::evaluate(
                origin,
                destination,
                config,
                baseline_gain,
                routing,
                elevation,
                options,
            )
        })
        .collect();

    let routes: Vec<RouteOption> = default_option
        .into_iter()
        .chain(winners.into_iter().flatten())
        .collect();

    if routes.is_empty() {
        return Err(PlanError::NoRoutesFound);
    }
    Ok(routes)
}

/// Scores the unmodified direct route with cycling exclusions.
fn evaluate_default<R, E>(
    origin: GeoPoint,
    destination: GeoPoint,
    routing: &R,
    elevation: &E,
    options: &SelectorOptions,
) -> Option<RouteOption>
where
    R: RoutingProvider,
    E: ElevationProvider,
{
    let params = RouteParams {
        avoid_highways: true,
        avoid_ferries: true,
        waypoints: Vec::new(),
        region: None,
    };

    let candidate = match strategy::score_candidate(
        origin,
        destination,
        &params,
        routing,
        elevation,
        options.sample_spacing,
    ) {
        Ok(candidate) => candidate,
        Err(err) => {
            warn!("default route skipped: {:?}", err);
            return None;
        }
    };

    Some(strategy::build_option(
        "default",
        "Standard Route",
        "Direct cycling route",
        candidate,
        options.sample_spacing,
    ))
}
