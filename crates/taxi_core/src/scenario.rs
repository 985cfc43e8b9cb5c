//! Demo scenario: fixed fleet data, world construction and the per-tick
//! schedule.

use bevy_ecs::prelude::{Schedule, World};

use crate::ecs::{FleetBounds, GeoPosition, PlacementMode, Taxi, TripSelection, Velocity};
use crate::geo::{GeoBounds, GeoPoint};
use crate::systems::movement::fleet_movement_system;

/// Box the simulated fleet bounces inside.
pub const FLEET_BOUNDS: GeoBounds = GeoBounds::new(43.327, 43.356, 52.835, 52.89);

/// Initial position and per-tick velocity for each simulated taxi.
const TAXI_SPAWNS: [(GeoPoint, Velocity); 5] = [
    (
        GeoPoint::new(43.3438, 52.8505),
        Velocity {
            d_lat: 0.00016,
            d_lng: 0.0001,
        },
    ),
    (
        GeoPoint::new(43.3344, 52.8718),
        Velocity {
            d_lat: 0.0001,
            d_lng: -0.00015,
        },
    ),
    (
        GeoPoint::new(43.3491, 52.8784),
        Velocity {
            d_lat: -0.00014,
            d_lng: 0.00008,
        },
    ),
    (
        GeoPoint::new(43.3385, 52.8409),
        Velocity {
            d_lat: 0.00012,
            d_lng: 0.00012,
        },
    ),
    (
        GeoPoint::new(43.3475, 52.861),
        Velocity {
            d_lat: -0.0001,
            d_lng: -0.00009,
        },
    ),
];

/// Number of simulated taxis spawned by [`build_fleet`].
pub const FLEET_SIZE: usize = TAXI_SPAWNS.len();

/// Insert the demo resources and spawn the fixed fleet into `world`.
/// Placement starts in pickup mode with an empty trip selection.
pub fn build_fleet(world: &mut World) {
    world.insert_resource(PlacementMode::default());
    world.insert_resource(TripSelection::default());
    world.insert_resource(FleetBounds(FLEET_BOUNDS));
    for (position, velocity) in TAXI_SPAWNS {
        world.spawn((Taxi, GeoPosition(position), velocity));
    }
}

/// Per-tick schedule: one movement pass over the fleet.
pub fn fleet_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(fleet_movement_system);
    schedule
}
