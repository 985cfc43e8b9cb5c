//! Bounded-reflection motion for the simulated fleet.
//!
//! A step advances a position by its velocity; when an axis leaves the box,
//! the velocity component is negated and applied twice, which reflects the
//! vehicle and corrects the overshoot in one move. Axes reflect
//! independently, so a corner hit flips both components in the same tick.

use crate::ecs::Velocity;
use crate::geo::{GeoBounds, GeoPoint};

/// Advance `position` by `velocity` for one tick, reflecting at `bounds`.
pub fn reflect_step(position: GeoPoint, velocity: Velocity, bounds: &GeoBounds) -> (GeoPoint, Velocity) {
    let mut lat = position.lat + velocity.d_lat;
    let mut lng = position.lng + velocity.d_lng;
    let mut d_lat = velocity.d_lat;
    let mut d_lng = velocity.d_lng;

    if lat < bounds.lat_min || lat > bounds.lat_max {
        d_lat = -d_lat;
        lat += d_lat * 2.0;
    }

    if lng < bounds.lng_min || lng > bounds.lng_max {
        d_lng = -d_lng;
        lng += d_lng * 2.0;
    }

    (GeoPoint { lat, lng }, Velocity { d_lat, d_lng })
}
