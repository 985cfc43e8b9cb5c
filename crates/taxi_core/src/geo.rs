//! Geographic primitives shared by the fleet simulation, the routing
//! client and the UI readouts.

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Axis-aligned geographic bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lng_min: f64,
    pub lng_max: f64,
}

impl GeoBounds {
    pub const fn new(lat_min: f64, lat_max: f64, lng_min: f64, lng_max: f64) -> Self {
        Self {
            lat_min,
            lat_max,
            lng_min,
            lng_max,
        }
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        point.lat >= self.lat_min
            && point.lat <= self.lat_max
            && point.lng >= self.lng_min
            && point.lng <= self.lng_max
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint {
            lat: 0.5 * (self.lat_min + self.lat_max),
            lng: 0.5 * (self.lng_min + self.lng_max),
        }
    }

    /// Smallest box covering all `points`; `None` when the slice is empty.
    pub fn enclosing(points: &[GeoPoint]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Self::new(first.lat, first.lat, first.lng, first.lng);
        for point in &points[1..] {
            bounds.lat_min = bounds.lat_min.min(point.lat);
            bounds.lat_max = bounds.lat_max.max(point.lat);
            bounds.lng_min = bounds.lng_min.min(point.lng);
            bounds.lng_max = bounds.lng_max.max(point.lng);
        }
        Some(bounds)
    }
}

/// Fixed-precision display form used by the coordinate readouts:
/// five decimals per axis, comma-space separated.
pub fn format_coord(point: GeoPoint) -> String {
    format!("{:.5}, {:.5}", point.lat, point.lng)
}
