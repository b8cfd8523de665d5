//! Latest-position selection through the tracking service.

#![allow(clippy::unwrap_used)]

use shiptrack_core::Role;
use shiptrack_integration_tests::{World, at};
use shiptrack_server::services::TrackingService;

#[tokio::test]
async fn newer_ping_wins_even_when_recorded_first() {
    let world = World::new();
    let customer = world.user("Asha", Role::Customer);
    let s = world.shipment("TRK-L", customer.user_id).await;

    // t2 arrives before t1.
    world.ping(s.id, 20, 19.10, 72.90);
    world.ping(s.id, 10, 19.00, 72.80);

    let positions = TrackingService::new(&world.store)
        .latest_positions(&customer)
        .await
        .unwrap();

    assert_eq!(positions.len(), 1);
    assert_eq!(positions[0].tracking_number, "TRK-L");
    assert!((positions[0].latitude - 19.10).abs() < f64::EPSILON);
    assert!((positions[0].longitude - 72.90).abs() < f64::EPSILON);
    assert_eq!(positions[0].timestamp, at(20));
}

#[tokio::test]
async fn equal_timestamps_resolve_to_last_insert() {
    let world = World::new();
    let customer = world.user("Asha", Role::Customer);
    let s = world.shipment("TRK-EQ", customer.user_id).await;

    world.ping(s.id, 5, 1.0, 1.0);
    world.ping(s.id, 5, 2.0, 2.0);
    world.ping(s.id, 5, 3.0, 3.0);

    let service = TrackingService::new(&world.store);
    for _ in 0..3 {
        let positions = service.latest_positions(&world.manager).await.unwrap();
        assert!((positions[0].latitude - 3.0).abs() < f64::EPSILON);
    }
}

#[tokio::test]
async fn shipments_without_pings_are_omitted() {
    let world = World::new();
    let customer = world.user("Asha", Role::Customer);
    let quiet = world.shipment("TRK-QUIET", customer.user_id).await;
    let moving = world.shipment("TRK-MOVING", customer.user_id).await;
    world.ping(moving.id, 0, 13.0, 77.6);

    let service = TrackingService::new(&world.store);
    let positions = service.latest_positions(&customer).await.unwrap();
    assert_eq!(positions.len(), 1);
    assert_eq!(positions[0].shipment_id, moving.id);
    assert!(
        service
            .shipment_position(&customer, quiet.id)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn map_position_lacks_coordinates_the_rows_lack() {
    let world = World::new();
    let customer = world.user("Asha", Role::Customer);
    let s = world.shipment("TRK-NOCOORD", customer.user_id).await;
    world.ping(s.id, 0, 28.5, 77.1);

    let positions = TrackingService::new(&world.store)
        .shipment_position(&customer, s.id)
        .await
        .unwrap();

    assert_eq!(positions.len(), 1);
    assert_eq!(positions[0].destination_latitude, None);
    assert_eq!(positions[0].warehouse_latitude, None);
}
