//! OSRM driving-route client.
//!
//! One request per trip selection: pickup and drop-off are sent
//! longitude-first (the OSRM coordinate order) with full GeoJSON geometry
//! requested, and only the first route candidate is consumed. The raw
//! payload is turned into a [`Route`] by a pure parser so the conversion is
//! testable without a live endpoint.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::geo::GeoPoint;

/// Public OSRM demo endpoint used when no override is configured.
pub const DEFAULT_OSRM_ENDPOINT: &str = "https://router.project-osrm.org";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A driving route between two points, geometry latitude-first.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub waypoints: Vec<GeoPoint>,
    pub distance_m: f64,
    pub duration_secs: f64,
}

/// Errors encountered while fetching or decoding a route.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("route request failed: {0}")]
    Http(reqwest::Error),
    #[error("malformed routing response: {0}")]
    Json(reqwest::Error),
    #[error("routing service answered with code {0:?}")]
    Api(String),
    #[error("no route candidates returned")]
    NoRoute,
}

#[derive(Deserialize)]
pub(crate) struct OsrmRouteResponse {
    pub(crate) code: String,
    pub(crate) routes: Option<Vec<OsrmRoute>>,
}

#[derive(Deserialize)]
pub(crate) struct OsrmRoute {
    /// Metres.
    pub(crate) distance: f64,
    /// Seconds.
    pub(crate) duration: f64,
    pub(crate) geometry: OsrmGeometry,
}

#[derive(Deserialize)]
pub(crate) struct OsrmGeometry {
    /// `[lng, lat]` pairs.
    pub(crate) coordinates: Vec<[f64; 2]>,
}

/// Thin HTTP client for the OSRM `/route` service.
#[derive(Debug, Clone)]
pub struct OsrmRouteClient {
    client: Client,
    endpoint: String,
}

impl OsrmRouteClient {
    /// Create a client for the given endpoint (e.g. the public OSRM demo
    /// server, or a local instance on `http://localhost:5000`).
    pub fn new(endpoint: &str) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build OSRM client");
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the driving route from `from` to `to` with full geometry.
    pub fn route(&self, from: GeoPoint, to: GeoPoint) -> Result<Route, RouteError> {
        let url = format!(
            "{}/route/v1/driving/{},{};{},{}?overview=full&geometries=geojson",
            self.endpoint, from.lng, from.lat, to.lng, to.lat,
        );
        tracing::debug!(%url, "requesting driving route");

        let response = self.client.get(&url).send().map_err(RouteError::Http)?;
        let parsed: OsrmRouteResponse = response.json().map_err(RouteError::Json)?;
        parse_route_response(parsed)
    }
}

/// Convert the raw OSRM payload into a [`Route`], taking the first candidate
/// and swapping its lng-first pairs to lat-first.
pub(crate) fn parse_route_response(response: OsrmRouteResponse) -> Result<Route, RouteError> {
    if response.code != "Ok" {
        return Err(RouteError::Api(response.code));
    }
    let route = response
        .routes
        .and_then(|routes| routes.into_iter().next())
        .ok_or(RouteError::NoRoute)?;

    let waypoints = route
        .geometry
        .coordinates
        .into_iter()
        .map(|[lng, lat]| GeoPoint { lat, lng })
        .collect();

    Ok(Route {
        waypoints,
        distance_m: route.distance,
        duration_secs: route.duration,
    })
}
