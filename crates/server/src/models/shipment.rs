//! Shipment domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use shiptrack_core::{Coordinates, ShipmentId, ShipmentStatus, UserId, WarehouseId};

/// A shipment row.
///
/// `id`, `tracking_number`, `origin_warehouse_id`, `customer_id` and
/// `created_at` never change after insert. Only `status` and `driver_id` are
/// mutable, and only through the lifecycle service.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Shipment {
    pub id: ShipmentId,
    pub tracking_number: String,
    pub origin_warehouse_id: WarehouseId,
    pub destination_address: String,
    pub destination_latitude: Option<f64>,
    pub destination_longitude: Option<f64>,
    pub customer_id: UserId,
    pub status: ShipmentStatus,
    pub driver_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

/// Validated input for inserting a shipment.
///
/// Status and driver are not part of the input: every shipment starts
/// `pending` and unassigned.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShipment {
    pub tracking_number: String,
    pub origin_warehouse_id: WarehouseId,
    pub destination_address: String,
    pub destination: Option<Coordinates>,
    pub customer_id: UserId,
}
