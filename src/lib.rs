//! ride-planner core
//!
//! Elevation-aware route comparison for cyclists: generates several
//! geometrically distinct candidates between two addresses, scores each on
//! gain/loss/grade, picks a winner per strategy, and caches the result set.

pub mod aggregator;
pub mod cache;
pub mod haversine;
pub mod metrics;
pub mod nominatim;
pub mod opentopo;
pub mod osrm;
pub mod osrm_data;
pub mod path;
pub mod planner;
pub mod steps;
pub mod strategy;
pub mod traits;
