//! Status updates and driver assignment across roles.

#![allow(clippy::unwrap_used)]

use shiptrack_core::{Role, ShipmentStatus};
use shiptrack_integration_tests::World;
use shiptrack_server::services::{ShipmentDraft, ShipmentError, ShipmentService};

#[tokio::test]
async fn only_the_assigned_driver_moves_a_shipment() {
    let world = World::new();
    let customer = world.user("Asha", Role::Customer);
    let assigned = world.user("Ravi", Role::Driver);
    let stranger = world.user("Sunil", Role::Driver);
    let s = world.shipment("TRK-D", customer.user_id).await;
    let service = ShipmentService::new(&world.store);

    service
        .assign_driver(&world.manager, s.id, assigned.user_id)
        .await
        .unwrap();

    let err = service
        .update_status(&stranger, s.id, "delivered")
        .await
        .unwrap_err();
    assert!(matches!(err, ShipmentError::Forbidden));
    assert_eq!(world.store.shipment(s.id).unwrap().status, ShipmentStatus::Pending);

    service
        .update_status(&assigned, s.id, "delivered")
        .await
        .unwrap();
    assert_eq!(
        world.store.shipment(s.id).unwrap().status,
        ShipmentStatus::Delivered
    );
}

#[tokio::test]
async fn reassignment_moves_update_rights() {
    let world = World::new();
    let customer = world.user("Asha", Role::Customer);
    let first = world.user("Ravi", Role::Driver);
    let second = world.user("Sunil", Role::Driver);
    let s = world.shipment("TRK-R", customer.user_id).await;
    let service = ShipmentService::new(&world.store);

    service.assign_driver(&world.manager, s.id, first.user_id).await.unwrap();
    service.assign_driver(&world.manager, s.id, second.user_id).await.unwrap();
    assert_eq!(world.store.shipment(s.id).unwrap().driver_id, Some(second.user_id));

    let err = service.update_status(&first, s.id, "in_transit").await.unwrap_err();
    assert!(matches!(err, ShipmentError::Forbidden));
    service.update_status(&second, s.id, "in_transit").await.unwrap();
}

#[tokio::test]
async fn assigning_a_non_driver_leaves_driver_unchanged() {
    let world = World::new();
    let customer = world.user("Asha", Role::Customer);
    let driver = world.user("Ravi", Role::Driver);
    let s = world.shipment("TRK-N", customer.user_id).await;
    let service = ShipmentService::new(&world.store);
    service.assign_driver(&world.manager, s.id, driver.user_id).await.unwrap();

    for not_a_driver in [customer.user_id, world.manager.user_id] {
        let err = service
            .assign_driver(&world.manager, s.id, not_a_driver)
            .await
            .unwrap_err();
        assert!(matches!(err, ShipmentError::InvalidDriver(id) if id == not_a_driver));
    }
    assert_eq!(world.store.shipment(s.id).unwrap().driver_id, Some(driver.user_id));
}

#[tokio::test]
async fn invalid_status_never_touches_storage() {
    let world = World::new();
    let customer = world.user("Asha", Role::Customer);
    let s = world.shipment("TRK-I", customer.user_id).await;
    let service = ShipmentService::new(&world.store);

    for bad in ["", "DELIVERED", "in transit", "returned"] {
        let err = service
            .update_status(&world.manager, s.id, bad)
            .await
            .unwrap_err();
        assert!(matches!(err, ShipmentError::InvalidStatus(_)), "{bad:?}");
    }
    assert_eq!(world.store.shipment(s.id).unwrap().status, ShipmentStatus::Pending);
}

#[tokio::test]
async fn delivered_and_cancelled_are_not_terminal() {
    let world = World::new();
    let customer = world.user("Asha", Role::Customer);
    let s = world.shipment("TRK-T", customer.user_id).await;
    let service = ShipmentService::new(&world.store);

    service.update_status(&world.manager, s.id, "cancelled").await.unwrap();
    service.update_status(&world.manager, s.id, "pending").await.unwrap();
    service.update_status(&world.manager, s.id, "delivered").await.unwrap();
    service.update_status(&world.manager, s.id, "in_transit").await.unwrap();

    assert_eq!(
        world.store.shipment(s.id).unwrap().status,
        ShipmentStatus::InTransit
    );
}

#[tokio::test]
async fn created_shipment_is_visible_to_its_customer() {
    let world = World::new();
    let customer = world.user("Asha", Role::Customer);
    let service = ShipmentService::new(&world.store);

    let created = service
        .create(
            &world.manager,
            ShipmentDraft {
                tracking_number: Some("  TRK-NEW  ".to_owned()),
                origin_warehouse_id: Some(world.warehouse),
                destination_address: Some("Park Street, Kolkata".to_owned()),
                destination_latitude: Some(22.5535),
                destination_longitude: Some(88.3525),
                customer_id: Some(customer.user_id),
            },
        )
        .await
        .unwrap();

    assert_eq!(created.tracking_number, "TRK-NEW");
    assert_eq!(created.status, ShipmentStatus::Pending);
    assert_eq!(created.driver_id, None);

    let mine = service.get(&customer, created.id).await.unwrap();
    assert_eq!(mine, vec![created]);
}
