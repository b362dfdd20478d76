//! Live OSRM integration test for the cycling route adapter.
//!
//! Downloads and preprocesses a small Geofabrik extract on first run, then
//! serves it from a reused container. Requires docker.

use std::env;

use testcontainers::core::{IntoContainerPort, Mount};
use testcontainers::runners::SyncRunner;
use testcontainers::{Container, GenericImage, ImageExt, ReuseDirective, TestcontainersError};

use ride_planner::osrm::{OsrmClient, OsrmConfig};
use ride_planner::osrm_data::{GeofabrikRegion, OsrmDataset, OsrmDatasetConfig};
use ride_planner::path::GeoPoint;
use ride_planner::traits::{RouteParams, RoutingProvider};

fn osrm_container() -> Result<(Container<GenericImage>, String), TestcontainersError> {
    let data_root = env::var("OSRM_DATA_DIR").unwrap_or_else(|_| "osrm-data".to_string());
    let region = GeofabrikRegion::new("north-america/us/nevada");
    let config = OsrmDatasetConfig::new(region, data_root);
    let dataset = OsrmDataset::ensure(&config)
        .map_err(|err| TestcontainersError::other(format!("OSRM prep failed: {:?}", err)))?;
    let mtime = std::fs::metadata(dataset.osrm_base.with_extension("osrm.partition"))
        .ok()
        .and_then(|meta| meta.modified().ok())
        .and_then(|time| time.duration_since(std::time::SystemTime::UNIX_EPOCH).ok())
        .map(|duration| duration.as_secs())
        .unwrap_or(0);
    let container_name = format!("osrm-nevada-bicycle-{}", mtime);

    let image = GenericImage::new("osrm/osrm-backend", "latest")
        .with_exposed_port(5000.tcp())
        .with_mount(Mount::bind_mount(
            dataset.data_dir.to_string_lossy().to_string(),
            "/data",
        ))
        .with_cmd(vec![
            "osrm-routed",
            "--algorithm",
            "mld",
            "/data/nevada-latest.osrm",
        ])
        .with_container_name(container_name)
        .with_startup_timeout(std::time::Duration::from_secs(30))
        .with_reuse(ReuseDirective::Always);

    let container = image.start()?;
    let port = container.get_host_port_ipv4(5000.tcp())?;
    let base_url = format!("http://127.0.0.1:{}", port);

    Ok((container, base_url))
}

#[test]
fn osrm_returns_cycling_route_with_steps() {
    let (container, base_url) = osrm_container().expect("start OSRM container");

    let config = OsrmConfig {
        base_url,
        profile: "bike".to_string(),
        timeout_secs: 10,
    };
    let client = OsrmClient::new(config).expect("build OSRM client");

    // Two points in central Las Vegas.
    let origin = GeoPoint::new(36.1147, -115.1728);
    let destination = GeoPoint::new(36.1215, -115.1739);
    let params = RouteParams {
        avoid_highways: true,
        avoid_ferries: true,
        waypoints: vec![],
        region: None,
    };

    let leg = {
        let start = std::time::Instant::now();
        let mut last = None;
        while start.elapsed() < std::time::Duration::from_secs(15) {
            match client.route(origin, destination, &params) {
                Ok(leg) => {
                    last = Some(leg);
                    break;
                }
                Err(_) => std::thread::sleep(std::time::Duration::from_millis(500)),
            }
        }
        last.expect("OSRM did not serve a route in time")
    };

    assert!(leg.total_distance > 0.0);
    assert!(leg.path.len() >= 2);
    assert!(!leg.steps.is_empty());

    // Step geometry comes from the same response as the overview geometry,
    // so step endpoints must match route points exactly.
    let first_step_start = leg.steps[0].path.first().copied().unwrap();
    assert!(leg.path.points().contains(&first_step_start));

    drop(container);
}

#[test]
fn osrm_waypoint_detour_is_no_shorter() {
    let (container, base_url) = osrm_container().expect("start OSRM container");

    let client = OsrmClient::new(OsrmConfig {
        base_url,
        profile: "bike".to_string(),
        timeout_secs: 10,
    })
    .expect("build OSRM client");

    let origin = GeoPoint::new(36.1147, -115.1728);
    let destination = GeoPoint::new(36.1215, -115.1739);
    let direct = RouteParams {
        avoid_highways: true,
        avoid_ferries: true,
        waypoints: vec![],
        region: None,
    };
    let detour = RouteParams {
        waypoints: vec![GeoPoint::new(36.1727, -115.1580)],
        ..direct.clone()
    };

    let direct_leg = client
        .route(origin, destination, &direct)
        .expect("direct route");
    let detour_leg = client
        .route(origin, destination, &detour)
        .expect("detour route");

    assert!(detour_leg.total_distance >= direct_leg.total_distance);

    drop(container);
}
