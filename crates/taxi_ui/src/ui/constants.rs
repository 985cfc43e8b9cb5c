//! Fixed UI parameters: map defaults, styling and the localized strings
//! carried over from the product UI (Kazakh).

use std::time::Duration;

use eframe::egui::Color32;
use taxi_core::geo::GeoPoint;

/// Initial map view.
pub const MAP_CENTER: GeoPoint = GeoPoint::new(43.34116, 52.86192);
pub const INITIAL_ZOOM: u8 = 13;

/// Tile-server zoom ceiling.
pub const MAX_ZOOM: u8 = 17;
pub const MIN_ZOOM: u8 = 1;

/// Raster tile source and its attribution.
pub const DEFAULT_TILE_TEMPLATE: &str = "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png";
pub const TILE_SUBDOMAINS: [&str; 3] = ["a", "b", "c"];
pub const MAP_ATTRIBUTION: &str = "© OpenStreetMap contributors, SRTM | OpenTopoMap";

/// Route line styling.
pub const ROUTE_COLOR: Color32 = Color32::from_rgb(79, 140, 255);
pub const ROUTE_OPACITY: f32 = 0.95;
pub const ROUTE_STROKE_WIDTH: f32 = 6.0;

/// Viewport padding when fitting the route, in pixels per side.
pub const FIT_PADDING: f32 = 40.0;

/// Fleet animation period.
pub const FLEET_TICK: Duration = Duration::from_secs(1);

/// Marker and fleet colors.
pub const PICKUP_COLOR: Color32 = Color32::from_rgb(46, 160, 67);
pub const DROPOFF_COLOR: Color32 = Color32::from_rgb(214, 69, 69);
pub const TAXI_COLOR: Color32 = Color32::from_rgb(255, 196, 0);

/// Localized UI strings.
pub const PICKUP_POPUP_LABEL: &str = "Алу адресі";
pub const DROPOFF_POPUP_LABEL: &str = "Баратын жер";
pub const ROUTE_ERROR_TEXT: &str = "Маршрутты есептеу сәтсіз";
pub const ROUTE_PENDING_TEXT: &str = "Маршрут есептелуде…";
pub const PLACEHOLDER_TEXT: &str = "—";
