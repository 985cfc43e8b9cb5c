//! Application state and the map click controller.

pub mod map_tiles;
pub mod route_fetch;

use std::time::Instant;

use bevy_ecs::prelude::{Schedule, With, World};

use taxi_core::ecs::{GeoPosition, PlacementMode, Taxi, TripSelection};
use taxi_core::geo::{format_coord, GeoBounds, GeoPoint};
use taxi_core::routing::{OsrmRouteClient, Route, RouteError, DEFAULT_OSRM_ENDPOINT};
use taxi_core::scenario::{build_fleet, fleet_schedule};

use crate::ui::constants::{
    DEFAULT_TILE_TEMPLATE, FLEET_TICK, INITIAL_ZOOM, MAP_CENTER, PLACEHOLDER_TEXT,
    ROUTE_ERROR_TEXT, ROUTE_PENDING_TEXT,
};
use crate::ui::utils::{format_distance_text, format_duration_text};
use self::map_tiles::MapTileState;
use self::route_fetch::RouteFetchState;

/// Startup configuration (CLI-provided endpoints).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub router_endpoint: String,
    pub tile_template: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            router_endpoint: DEFAULT_OSRM_ENDPOINT.to_string(),
            tile_template: DEFAULT_TILE_TEMPLATE.to_string(),
        }
    }
}

/// Current map viewport: center coordinate plus slippy zoom level.
#[derive(Debug, Clone, Copy)]
pub struct MapViewport {
    pub center: GeoPoint,
    pub zoom: u8,
}

/// Main application state. All mutation happens on the UI thread; the only
/// background work (route and tile fetches) comes back over channels.
pub struct TaxiMapApp {
    pub world: World,
    pub schedule: Schedule,
    pub viewport: MapViewport,
    pub route_client: OsrmRouteClient,
    pub route_fetch: RouteFetchState,
    pub map_tiles: MapTileState,
    /// Last successfully drawn route geometry; kept on fetch failure.
    pub route_line: Option<Vec<GeoPoint>>,
    /// Route bounds the map view should zoom to on its next frame.
    pub pending_fit: Option<GeoBounds>,
    /// Which marker's popup label is open (the most recently placed one).
    pub open_popup: Option<PlacementMode>,
    pub pickup_text: String,
    pub dropoff_text: String,
    pub distance_text: String,
    pub duration_text: String,
    pub status_text: String,
    last_tick: Option<Instant>,
}

impl TaxiMapApp {
    pub fn new(config: AppConfig) -> Self {
        let mut world = World::new();
        build_fleet(&mut world);
        Self {
            world,
            schedule: fleet_schedule(),
            viewport: MapViewport {
                center: MAP_CENTER,
                zoom: INITIAL_ZOOM,
            },
            route_client: OsrmRouteClient::new(&config.router_endpoint),
            route_fetch: RouteFetchState::new(),
            map_tiles: MapTileState::new(&config.tile_template),
            route_line: None,
            pending_fit: None,
            open_popup: None,
            pickup_text: PLACEHOLDER_TEXT.to_string(),
            dropoff_text: PLACEHOLDER_TEXT.to_string(),
            distance_text: PLACEHOLDER_TEXT.to_string(),
            duration_text: PLACEHOLDER_TEXT.to_string(),
            status_text: String::new(),
            last_tick: None,
        }
    }

    pub fn mode(&self) -> PlacementMode {
        *self.world.resource::<PlacementMode>()
    }

    /// Switch the placement mode (the mode buttons call this).
    pub fn set_mode(&mut self, mode: PlacementMode) {
        *self.world.resource_mut::<PlacementMode>() = mode;
    }

    pub fn selection(&self) -> TripSelection {
        *self.world.resource::<TripSelection>()
    }

    /// Map click controller: place/replace the marker for the current mode,
    /// open its popup, update the readout, advance the mode, and kick off a
    /// route fetch once both endpoints exist.
    pub fn handle_map_click(&mut self, point: GeoPoint) {
        let mode = self.mode();
        let next_mode = self.world.resource_mut::<TripSelection>().place(mode, point);
        match mode {
            PlacementMode::Pickup => self.pickup_text = format_coord(point),
            PlacementMode::Dropoff => self.dropoff_text = format_coord(point),
        }
        self.open_popup = Some(mode);
        self.set_mode(next_mode);
        self.request_route();
    }

    /// Fire-and-forget route fetch; a no-op until both endpoints are placed.
    pub fn request_route(&mut self) {
        let Some((from, to)) = self.selection().endpoints() else {
            return;
        };
        self.route_fetch.dispatch(self.route_client.clone(), from, to);
        self.status_text = ROUTE_PENDING_TEXT.to_string();
    }

    /// Apply the freshest finished fetch, if any.
    pub fn drain_route_results(&mut self) {
        if let Some(result) = self.route_fetch.drain_latest() {
            self.status_text.clear();
            self.apply_route_outcome(result.outcome);
        }
    }

    /// Success replaces the polyline and readouts and schedules a viewport
    /// fit; failure keeps the previous polyline and only flips the readouts
    /// to the error indicators.
    pub(crate) fn apply_route_outcome(&mut self, outcome: Result<Route, RouteError>) {
        match outcome {
            Ok(route) => {
                self.distance_text = format_distance_text(route.distance_m);
                self.duration_text = format_duration_text(route.duration_secs);
                self.pending_fit = GeoBounds::enclosing(&route.waypoints);
                self.route_line = Some(route.waypoints);
            }
            Err(_) => {
                self.distance_text = ROUTE_ERROR_TEXT.to_string();
                self.duration_text = PLACEHOLDER_TEXT.to_string();
            }
        }
    }

    /// Run the fleet schedule once per elapsed second, catching up when
    /// frames were delayed, so trajectories depend only on wall-clock ticks.
    pub fn advance_fleet(&mut self) {
        let now = Instant::now();
        let last = self.last_tick.get_or_insert(now);
        while now.duration_since(*last) >= FLEET_TICK {
            self.schedule.run(&mut self.world);
            *last += FLEET_TICK;
        }
    }

    /// Current fleet positions for the map view.
    pub fn taxi_positions(&mut self) -> Vec<GeoPoint> {
        let mut query = self.world.query_filtered::<&GeoPosition, With<Taxi>>();
        query.iter(&self.world).map(|position| position.0).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_app() -> TaxiMapApp {
        // Unroutable endpoint: dispatched fetches fail fast and are ignored.
        TaxiMapApp::new(AppConfig {
            router_endpoint: "http://127.0.0.1:9".to_string(),
            ..AppConfig::default()
        })
    }

    #[test]
    fn first_click_places_pickup_and_advances_to_dropoff() {
        let mut app = offline_app();
        assert_eq!(app.mode(), PlacementMode::Pickup);

        app.handle_map_click(GeoPoint::new(43.34, 52.85));

        assert_eq!(app.mode(), PlacementMode::Dropoff);
        assert_eq!(app.pickup_text, "43.34000, 52.85000");
        assert_eq!(app.open_popup, Some(PlacementMode::Pickup));
        assert!(app.selection().dropoff.is_none());
        // Incomplete selection: nothing was dispatched.
        assert_eq!(app.route_fetch.latest_request_id(), 0);
    }

    #[test]
    fn second_click_completes_the_selection_and_dispatches_a_fetch() {
        let mut app = offline_app();
        app.handle_map_click(GeoPoint::new(43.34, 52.85));
        app.handle_map_click(GeoPoint::new(43.33, 52.87));

        assert_eq!(app.mode(), PlacementMode::Dropoff);
        assert!(app.selection().endpoints().is_some());
        assert_eq!(app.route_fetch.latest_request_id(), 1);
        assert_eq!(app.status_text, ROUTE_PENDING_TEXT);

        // Re-clicking keeps replacing the drop-off marker.
        app.handle_map_click(GeoPoint::new(43.335, 52.88));
        assert_eq!(app.selection().dropoff, Some(GeoPoint::new(43.335, 52.88)));
        assert_eq!(app.route_fetch.latest_request_id(), 2);
    }

    #[test]
    fn reselecting_pickup_mode_replaces_the_pickup_marker() {
        let mut app = offline_app();
        app.handle_map_click(GeoPoint::new(43.34, 52.85));
        app.set_mode(PlacementMode::Pickup);
        app.handle_map_click(GeoPoint::new(43.35, 52.86));

        assert_eq!(app.selection().pickup, Some(GeoPoint::new(43.35, 52.86)));
        assert!(app.selection().dropoff.is_none());
    }

    #[test]
    fn successful_route_updates_readouts_line_and_fit() {
        let mut app = offline_app();
        app.apply_route_outcome(Ok(Route {
            waypoints: vec![GeoPoint::new(43.3438, 52.8505), GeoPoint::new(43.3344, 52.8718)],
            distance_m: 12345.0,
            duration_secs: 930.0,
        }));

        assert_eq!(app.distance_text, "12.3 км");
        assert_eq!(app.duration_text, "16 мин");
        assert_eq!(app.route_line.as_ref().map(Vec::len), Some(2));
        assert!(app.pending_fit.is_some());
    }

    #[test]
    fn failed_route_keeps_the_previous_line_and_shows_the_error_indicators() {
        let mut app = offline_app();
        app.apply_route_outcome(Ok(Route {
            waypoints: vec![GeoPoint::new(43.3438, 52.8505), GeoPoint::new(43.3344, 52.8718)],
            distance_m: 5000.0,
            duration_secs: 600.0,
        }));
        let line_before = app.route_line.clone();

        app.apply_route_outcome(Err(RouteError::NoRoute));

        assert_eq!(app.route_line, line_before);
        assert_eq!(app.distance_text, ROUTE_ERROR_TEXT);
        assert_eq!(app.duration_text, PLACEHOLDER_TEXT);
    }
}
