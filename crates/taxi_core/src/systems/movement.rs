//! Movement system: advances every fleet vehicle one tick and reflects it
//! at the shared bounds.

use bevy_ecs::prelude::{Query, Res, With};

use crate::ecs::{FleetBounds, GeoPosition, Taxi, Velocity};
use crate::motion::reflect_step;

pub fn fleet_movement_system(
    bounds: Res<FleetBounds>,
    mut taxis: Query<(&mut GeoPosition, &mut Velocity), With<Taxi>>,
) {
    for (mut position, mut velocity) in taxis.iter_mut() {
        let (next_position, next_velocity) = reflect_step(position.0, *velocity, &bounds.0);
        position.0 = next_position;
        *velocity = next_velocity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::prelude::{Schedule, World};

    use crate::geo::{GeoBounds, GeoPoint};

    const BOUNDS: GeoBounds = GeoBounds::new(43.327, 43.356, 52.835, 52.89);

    fn setup_world() -> (World, Schedule) {
        let mut world = World::new();
        world.insert_resource(FleetBounds(BOUNDS));
        let mut schedule = Schedule::default();
        schedule.add_systems(fleet_movement_system);
        (world, schedule)
    }

    #[test]
    fn taxi_near_the_edge_is_reflected() {
        let (mut world, mut schedule) = setup_world();
        let taxi = world
            .spawn((
                Taxi,
                GeoPosition(GeoPoint::new(BOUNDS.lat_max - 0.00005, 52.86)),
                Velocity {
                    d_lat: 0.0001,
                    d_lng: 0.0,
                },
            ))
            .id();

        schedule.run(&mut world);

        let position = world.entity(taxi).get::<GeoPosition>().expect("position");
        let velocity = world.entity(taxi).get::<Velocity>().expect("velocity");
        assert!(position.0.lat <= BOUNDS.lat_max);
        assert_eq!(velocity.d_lat, -0.0001);
    }

    #[test]
    fn entities_without_the_taxi_tag_are_untouched() {
        let (mut world, mut schedule) = setup_world();
        let bystander = world
            .spawn((
                GeoPosition(GeoPoint::new(43.34, 52.86)),
                Velocity {
                    d_lat: 0.0001,
                    d_lng: 0.0001,
                },
            ))
            .id();

        schedule.run(&mut world);

        let position = world.entity(bystander).get::<GeoPosition>().expect("position");
        assert_eq!(position.0, GeoPoint::new(43.34, 52.86));
    }
}
