//! Position tracking types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use shiptrack_core::{PositionSample, ShipmentId};

/// One stored position ping.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct PositionEvent {
    pub id: i64,
    pub shipment_id: ShipmentId,
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: DateTime<Utc>,
}

impl PositionSample for PositionEvent {
    fn shipment_id(&self) -> ShipmentId {
        self.shipment_id
    }

    fn recorded_at(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn sequence(&self) -> i64 {
        self.id
    }
}

/// Most recent known position of a shipment.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct LatestPosition {
    pub shipment_id: ShipmentId,
    pub tracking_number: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: DateTime<Utc>,
}

/// Most recent position of one shipment plus the static points a map
/// overlay needs: the destination and the origin warehouse.
///
/// Static coordinates are `None` when the shipment or warehouse lacks them.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct ShipmentMapPosition {
    pub shipment_id: ShipmentId,
    pub tracking_number: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: DateTime<Utc>,
    pub destination_latitude: Option<f64>,
    pub destination_longitude: Option<f64>,
    pub warehouse_latitude: Option<f64>,
    pub warehouse_longitude: Option<f64>,
}
