//! Warehouse domain type.

use serde::Serialize;

use shiptrack_core::WarehouseId;

/// An origin hub. Coordinates are optional; hubs without them are simply
/// left off the map.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Warehouse {
    pub id: WarehouseId,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}
