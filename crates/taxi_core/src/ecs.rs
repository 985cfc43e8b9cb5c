use bevy_ecs::prelude::{Component, Resource};

use crate::geo::{GeoBounds, GeoPoint};

/// Which trip endpoint the next map click places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Resource)]
pub enum PlacementMode {
    #[default]
    Pickup,
    Dropoff,
}

/// The currently selected trip endpoints. At most one coordinate per role
/// exists at any time; placing a new one replaces the previous.
#[derive(Debug, Clone, Copy, Default, Resource)]
pub struct TripSelection {
    pub pickup: Option<GeoPoint>,
    pub dropoff: Option<GeoPoint>,
}

impl TripSelection {
    /// Place the marker for `mode` and return the mode that should be active
    /// afterwards: a pickup placement advances to drop-off so the common
    /// two-click flow needs no extra toggle, a drop-off placement stays put.
    pub fn place(&mut self, mode: PlacementMode, point: GeoPoint) -> PlacementMode {
        match mode {
            PlacementMode::Pickup => self.pickup = Some(point),
            PlacementMode::Dropoff => self.dropoff = Some(point),
        }
        PlacementMode::Dropoff
    }

    /// Both endpoints, pickup first, once the selection is complete.
    pub fn endpoints(&self) -> Option<(GeoPoint, GeoPoint)> {
        Some((self.pickup?, self.dropoff?))
    }
}

/// Marker component for simulated fleet vehicles.
#[derive(Debug, Clone, Copy, Component)]
pub struct Taxi;

/// Precise geographic position of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct GeoPosition(pub GeoPoint);

/// Per-tick movement deltas in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct Velocity {
    pub d_lat: f64,
    pub d_lng: f64,
}

/// Box the simulated fleet bounces inside; shared read-only by the
/// movement system.
#[derive(Debug, Clone, Copy, Resource)]
pub struct FleetBounds(pub GeoBounds);
