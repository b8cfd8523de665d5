//! In-process implementation of the shipment and position stores.
//!
//! Mirrors the Postgres repositories closely enough to drive the services in
//! tests: unique tracking numbers, foreign keys on insert, `DISTINCT ON`
//! latest-position selection, and guarded status writes.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use shiptrack_core::{
    Coordinates, Email, Role, ShipmentFilter, ShipmentId, ShipmentStatus, UserId, WarehouseId,
    latest_per_shipment,
};

use super::{PositionLog, RepositoryError, ShipmentStore};
use crate::models::{
    LatestPosition, NewShipment, PositionEvent, Shipment, ShipmentMapPosition, User, Warehouse,
};

#[derive(Debug, Default)]
struct State {
    users: BTreeMap<UserId, User>,
    warehouses: BTreeMap<WarehouseId, Warehouse>,
    shipments: BTreeMap<ShipmentId, Shipment>,
    events: Vec<PositionEvent>,
    next_id: i64,
}

impl State {
    const fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Thread-safe in-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a user with a generated email address.
    pub fn add_user(&self, name: &str, role: Role) -> UserId {
        let mut state = self.write();
        let id = UserId::new(state.next_id());
        let email = Email::parse(&format!("user{id}@example.com"))
            .unwrap_or_else(|_| unreachable!("generated address is well formed"));
        state.users.insert(
            id,
            User {
                id,
                name: name.to_owned(),
                email,
                role,
                created_at: Utc::now(),
            },
        );
        id
    }

    /// Add a warehouse.
    pub fn add_warehouse(&self, name: &str, location: Option<Coordinates>) -> WarehouseId {
        let mut state = self.write();
        let id = WarehouseId::new(state.next_id());
        state.warehouses.insert(
            id,
            Warehouse {
                id,
                name: name.to_owned(),
                latitude: location.map(|c| c.latitude),
                longitude: location.map(|c| c.longitude),
            },
        );
        id
    }

    /// Append a position ping, as the telemetry writer would.
    pub fn record_position(
        &self,
        shipment_id: ShipmentId,
        latitude: f64,
        longitude: f64,
        timestamp: DateTime<Utc>,
    ) -> i64 {
        let mut state = self.write();
        let id = state.next_id();
        state.events.push(PositionEvent {
            id,
            shipment_id,
            latitude,
            longitude,
            timestamp,
        });
        id
    }

    /// Snapshot of a single shipment row.
    #[must_use]
    pub fn shipment(&self, id: ShipmentId) -> Option<Shipment> {
        self.read().shipments.get(&id).cloned()
    }

    fn latest_events<'a>(
        state: &'a State,
        filter: &ShipmentFilter,
    ) -> Vec<(PositionEvent, &'a Shipment)> {
        let visible = state.events.iter().filter(|e| {
            state
                .shipments
                .get(&e.shipment_id)
                .is_some_and(|s| filter.matches(s.id, s.customer_id))
        });

        latest_per_shipment(visible.cloned())
            .into_iter()
            .filter_map(|e| {
                let shipment = state.shipments.get(&e.shipment_id)?;
                Some((e, shipment))
            })
            .collect()
    }
}

#[async_trait]
impl ShipmentStore for MemoryStore {
    async fn insert_shipment(&self, new: &NewShipment) -> Result<Shipment, RepositoryError> {
        let mut state = self.write();

        if state
            .shipments
            .values()
            .any(|s| s.tracking_number == new.tracking_number)
        {
            return Err(RepositoryError::Conflict(
                "shipment already exists".to_owned(),
            ));
        }
        if !state.warehouses.contains_key(&new.origin_warehouse_id) {
            return Err(RepositoryError::Conflict(
                "shipment references a missing row (shipments_origin_warehouse_id_fkey)"
                    .to_owned(),
            ));
        }
        if !state.users.contains_key(&new.customer_id) {
            return Err(RepositoryError::Conflict(
                "shipment references a missing row (shipments_customer_id_fkey)".to_owned(),
            ));
        }

        let id = ShipmentId::new(state.next_id());
        let shipment = Shipment {
            id,
            tracking_number: new.tracking_number.clone(),
            origin_warehouse_id: new.origin_warehouse_id,
            destination_address: new.destination_address.clone(),
            destination_latitude: new.destination.map(|c| c.latitude),
            destination_longitude: new.destination.map(|c| c.longitude),
            customer_id: new.customer_id,
            status: ShipmentStatus::Pending,
            driver_id: None,
            created_at: Utc::now(),
        };
        state.shipments.insert(id, shipment.clone());
        Ok(shipment)
    }

    async fn find_shipments(
        &self,
        filter: &ShipmentFilter,
    ) -> Result<Vec<Shipment>, RepositoryError> {
        Ok(self
            .read()
            .shipments
            .values()
            .filter(|s| filter.matches(s.id, s.customer_id))
            .cloned()
            .collect())
    }

    async fn assigned_driver(
        &self,
        id: ShipmentId,
    ) -> Result<Option<Option<UserId>>, RepositoryError> {
        Ok(self.read().shipments.get(&id).map(|s| s.driver_id))
    }

    async fn set_status(
        &self,
        id: ShipmentId,
        status: ShipmentStatus,
        assigned_to: Option<UserId>,
    ) -> Result<u64, RepositoryError> {
        let mut state = self.write();
        let Some(shipment) = state.shipments.get_mut(&id) else {
            return Ok(0);
        };
        if assigned_to.is_some() && shipment.driver_id != assigned_to {
            return Ok(0);
        }
        shipment.status = status;
        Ok(1)
    }

    async fn set_driver(&self, id: ShipmentId, driver_id: UserId) -> Result<u64, RepositoryError> {
        let mut state = self.write();
        match state.shipments.get_mut(&id) {
            Some(shipment) => {
                shipment.driver_id = Some(driver_id);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn is_driver(&self, user_id: UserId) -> Result<bool, RepositoryError> {
        Ok(self
            .read()
            .users
            .get(&user_id)
            .is_some_and(|u| u.role == Role::Driver))
    }
}

#[async_trait]
impl PositionLog for MemoryStore {
    async fn latest_positions(
        &self,
        filter: &ShipmentFilter,
    ) -> Result<Vec<LatestPosition>, RepositoryError> {
        let state = self.read();
        Ok(Self::latest_events(&state, filter)
            .into_iter()
            .map(|(e, s)| LatestPosition {
                shipment_id: e.shipment_id,
                tracking_number: s.tracking_number.clone(),
                latitude: e.latitude,
                longitude: e.longitude,
                timestamp: e.timestamp,
            })
            .collect())
    }

    async fn latest_map_positions(
        &self,
        filter: &ShipmentFilter,
    ) -> Result<Vec<ShipmentMapPosition>, RepositoryError> {
        let state = self.read();
        Ok(Self::latest_events(&state, filter)
            .into_iter()
            .map(|(e, s)| {
                let warehouse = state.warehouses.get(&s.origin_warehouse_id);
                ShipmentMapPosition {
                    shipment_id: e.shipment_id,
                    tracking_number: s.tracking_number.clone(),
                    latitude: e.latitude,
                    longitude: e.longitude,
                    timestamp: e.timestamp,
                    destination_latitude: s.destination_latitude,
                    destination_longitude: s.destination_longitude,
                    warehouse_latitude: warehouse.and_then(|w| w.latitude),
                    warehouse_longitude: warehouse.and_then(|w| w.longitude),
                }
            })
            .collect())
    }
}
