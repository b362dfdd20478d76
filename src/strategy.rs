//! Named route strategies and the per-strategy candidate search.
//!
//! A strategy is domain data: an objective plus a waypoint list from which
//! request variants are generated. The selector tries variants in order,
//! scores each candidate on its elevation profile, and stops greedily at
//! the first one adopted as best.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::metrics::{compute_metrics, sample_count_for, ElevationMetrics, DEFAULT_SAMPLE_SPACING};
use crate::path::{GeoPoint, Path};
use crate::steps::{annotate, AnnotatedStep};
use crate::traits::{
    ElevationError, ElevationProvider, RouteError, RouteLeg, RouteParams, RoutingProvider,
};

/// Selection rule a strategy optimizes for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    /// Minimize total elevation gain.
    Minimize,
    /// Minimize the absolute difference to a baseline gain.
    MatchBaseline,
}

/// One named strategy: identity, objective, and the waypoints its request
/// variants are built from.
#[derive(Debug, Clone)]
pub struct StrategyConfig {
    pub id: String,
    pub name: String,
    pub description: String,
    pub objective: Objective,
    pub waypoints: Vec<GeoPoint>,
    pub region: Option<String>,
}

impl StrategyConfig {
    /// Request variants in evaluation order.
    ///
    /// With two or more waypoints this produces the canonical four: each of
    /// the first two waypoints alone, both jointly, and both jointly with
    /// the region hint. Fewer waypoints degrade to the combinations that
    /// remain; no waypoints yield the single unconstrained request.
    pub fn variants(&self) -> Vec<RouteParams> {
        let base = RouteParams {
            avoid_highways: true,
            avoid_ferries: true,
            waypoints: Vec::new(),
            region: None,
        };

        match self.waypoints.len() {
            0 => vec![base],
            1 => {
                let first = self.waypoints[0];
                vec![
                    RouteParams {
                        waypoints: vec![first],
                        ..base.clone()
                    },
                    RouteParams {
                        waypoints: vec![first],
                        region: self.region.clone(),
                        ..base
                    },
                ]
            }
            _ => {
                let first = self.waypoints[0];
                let second = self.waypoints[1];
                vec![
                    RouteParams {
                        waypoints: vec![first],
                        ..base.clone()
                    },
                    RouteParams {
                        waypoints: vec![second],
                        ..base.clone()
                    },
                    RouteParams {
                        waypoints: vec![first, second],
                        ..base.clone()
                    },
                    RouteParams {
                        waypoints: vec![first, second],
                        region: self.region.clone(),
                        ..base
                    },
                ]
            }
        }
    }
}

/// Tunables for the variant search.
#[derive(Debug, Clone)]
pub struct SelectorOptions {
    /// Maximum number of variants evaluated per strategy.
    pub search_depth: usize,
    /// Stop at the first variant adopted as best. Matches the reference
    /// behavior; set false for an exhaustive search over `search_depth`.
    pub early_exit: bool,
    /// Grade denominator passed to metric computation, in meters.
    pub sample_spacing: f64,
}

impl Default for SelectorOptions {
    fn default() -> Self {
        Self {
            search_depth: 4,
            early_exit: true,
            sample_spacing: DEFAULT_SAMPLE_SPACING,
        }
    }
}

/// One scored, fully annotated candidate. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteOption {
    pub id: String,
    pub name: String,
    pub description: String,
    pub path: Path,
    pub steps: Vec<AnnotatedStep>,
    pub metrics: ElevationMetrics,
    pub total_distance: f64,
}

/// One routed and elevation-scored candidate, before annotation.
pub(crate) struct ScoredCandidate {
    pub leg: RouteLeg,
    pub samples: Vec<f64>,
    pub metrics: ElevationMetrics,
}

/// Why one candidate request produced no scored candidate.
#[derive(Debug)]
pub(crate) enum CandidateError {
    Routing(RouteError),
    Elevation(ElevationError),
}

/// Requests one candidate and scores its elevation profile.
///
/// This is the shared route→sample→score sequence behind both the default
/// route and every strategy variant; failures at either stage come back as
/// an error for the caller to absorb.
pub(crate) fn score_candidate<R, E>(
    origin: GeoPoint,
    destination: GeoPoint,
    params: &RouteParams,
    routing: &R,
    elevation: &E,
    sample_spacing: f64,
) -> Result<ScoredCandidate, CandidateError>
where
    R: RoutingProvider,
    E: ElevationProvider,
{
    let leg = routing
        .route(origin, destination, params)
        .map_err(CandidateError::Routing)?;

    let count = sample_count_for(leg.total_distance);
    let samples = elevation
        .sample_along_path(&leg.path, count)
        .map_err(CandidateError::Elevation)?;

    let metrics = compute_metrics(&samples, sample_spacing);
    Ok(ScoredCandidate {
        leg,
        samples,
        metrics,
    })
}

/// Builds the annotated result for an accepted candidate.
pub(crate) fn build_option(
    strategy_id: &str,
    name: &str,
    description: &str,
    candidate: ScoredCandidate,
    sample_spacing: f64,
) -> RouteOption {
    let ScoredCandidate {
        leg,
        samples,
        metrics,
    } = candidate;
    let steps = annotate(&leg.steps, &leg.path, &samples, sample_spacing);
    RouteOption {
        id: strategy_id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        path: leg.path,
        steps,
        metrics,
        total_distance: leg.total_distance,
    }
}

/// Evaluates one strategy and returns its winning candidate, if any.
///
/// Variants run in strict listed order; a variant's provider failure is
/// absorbed and the search continues with the next one. A strategy where
/// every variant fails contributes nothing.
pub fn evaluate<R, E>(
    origin: GeoPoint,
    destination: GeoPoint,
    strategy: &StrategyConfig,
    baseline_gain: f64,
    routing: &R,
    elevation: &E,
    options: &SelectorOptions,
) -> Option<RouteOption>
where
    R: RoutingProvider,
    E: ElevationProvider,
{
    let mut best: Option<(f64, ScoredCandidate)> = None;

    for (variant_idx, params) in strategy
        .variants()
        .into_iter()
        .take(options.search_depth)
        .enumerate()
    {
        let candidate = match score_candidate(
            origin,
            destination,
            &params,
            routing,
            elevation,
            options.sample_spacing,
        ) {
            Ok(candidate) => candidate,
            Err(err) => {
                warn!(
                    "strategy {} variant {} skipped: {:?}",
                    strategy.id, variant_idx, err
                );
                continue;
            }
        };

        let score = match strategy.objective {
            Objective::Minimize => candidate.metrics.total_gain,
            Objective::MatchBaseline => (candidate.metrics.total_gain - baseline_gain).abs(),
        };

        let adopted = best.as_ref().is_none_or(|(best_score, _)| score < *best_score);
        if adopted {
            debug!(
                "strategy {} adopted variant {} with score {}",
                strategy.id, variant_idx, score
            );
            best = Some((score, candidate));
            if options.early_exit {
                break;
            }
        }
    }

    let (_, candidate) = best?;
    Some(build_option(
        &strategy.id,
        &strategy.name,
        &strategy.description,
        candidate,
        options.sample_spacing,
    ))
}

/// The canonical San Francisco strategy set, in output order.
///
/// Waypoint coordinates are domain data, not algorithm; swap this table out
/// to retarget the planner at another city.
pub fn sf_strategies() -> Vec<StrategyConfig> {
    let region = Some("San Francisco, CA, US".to_string());
    vec![
        StrategyConfig {
            id: "minimum-elevation".to_string(),
            name: "Minimum Elevation".to_string(),
            description: "Flattest available route, detouring through low-lying areas".to_string(),
            objective: Objective::Minimize,
            waypoints: vec![
                // Mission District and the Embarcadero, both near sea level
                GeoPoint::new(37.7599, -122.4148),
                GeoPoint::new(37.7955, -122.3937),
            ],
            region: region.clone(),
        },
        StrategyConfig {
            id: "balanced-route".to_string(),
            name: "Balanced Route".to_string(),
            description: "Moderate climbing, close to the direct route's gain".to_string(),
            objective: Objective::MatchBaseline,
            waypoints: vec![
                // The Panhandle and Dolores Park
                GeoPoint::new(37.7725, -122.4469),
                GeoPoint::new(37.7596, -122.4269),
            ],
            region: region.clone(),
        },
        StrategyConfig {
            id: "scenic-route".to_string(),
            name: "Scenic Route".to_string(),
            description: "Detours through Golden Gate Park and the Presidio".to_string(),
            objective: Objective::MatchBaseline,
            waypoints: vec![
                GeoPoint::new(37.7694, -122.4862),
                GeoPoint::new(37.7989, -122.4662),
            ],
            region,
        },
    ]
}
