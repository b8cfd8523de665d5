//! Shipment lifecycle: create, read, status updates and driver assignment.
//!
//! Role gates come from [`Role::permits`](shiptrack_core::Role::permits) and
//! read scoping from [`scope_filter`]. Status may move between any two
//! values; `delivered` and `cancelled` are not terminal.

use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;

use shiptrack_core::{
    CoordinateError, Coordinates, Identity, Operation, ParseEnumError, ReadScope, ShipmentId,
    ShipmentStatus, StatusWrite, UserId, WarehouseId, scope_filter,
};

use crate::db::{RepositoryError, ShipmentStore};
use crate::models::{NewShipment, Shipment};

/// Errors from lifecycle operations.
#[derive(Debug, Error)]
pub enum ShipmentError {
    /// Required input missing or malformed.
    #[error("{0}")]
    Validation(String),

    /// Caller's role or ownership does not allow the operation.
    #[error("forbidden")]
    Forbidden,

    /// The shipment does not exist.
    #[error("shipment not found")]
    NotFound,

    /// Status string outside the fixed set.
    #[error("invalid status: {}", .0.value())]
    InvalidStatus(#[from] ParseEnumError),

    /// Assignment target is not an existing driver.
    #[error("user {0} is not a driver")]
    InvalidDriver(UserId),

    /// Storage failure, including constraint violations on insert.
    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}

impl From<CoordinateError> for ShipmentError {
    fn from(err: CoordinateError) -> Self {
        Self::Validation(format!("invalid destination: {err}"))
    }
}

/// Shipment creation request as received from a client.
///
/// Missing fields are reported by [`ShipmentDraft::validate`], not by serde.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShipmentDraft {
    pub tracking_number: Option<String>,
    pub origin_warehouse_id: Option<WarehouseId>,
    pub destination_address: Option<String>,
    pub destination_latitude: Option<f64>,
    pub destination_longitude: Option<f64>,
    pub customer_id: Option<UserId>,
}

impl ShipmentDraft {
    /// Check required fields and coordinates.
    ///
    /// # Errors
    ///
    /// Returns `ShipmentError::Validation` naming the first problem found.
    pub fn validate(self) -> Result<NewShipment, ShipmentError> {
        let tracking_number = required_text(self.tracking_number, "tracking_number")?;
        let origin_warehouse_id = self
            .origin_warehouse_id
            .ok_or_else(|| missing("origin_warehouse_id"))?;
        let destination_address = required_text(self.destination_address, "destination_address")?;
        let customer_id = self.customer_id.ok_or_else(|| missing("customer_id"))?;
        let destination =
            Coordinates::from_pair(self.destination_latitude, self.destination_longitude)?;

        Ok(NewShipment {
            tracking_number,
            origin_warehouse_id,
            destination_address,
            destination,
            customer_id,
        })
    }
}

fn missing(field: &str) -> ShipmentError {
    ShipmentError::Validation(format!("{field} is required"))
}

fn required_text(value: Option<String>, field: &str) -> Result<String, ShipmentError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_owned()),
        _ => Err(missing(field)),
    }
}

/// Lifecycle operations over any [`ShipmentStore`].
pub struct ShipmentService<'a> {
    store: &'a dyn ShipmentStore,
}

impl<'a> ShipmentService<'a> {
    #[must_use]
    pub const fn new(store: &'a dyn ShipmentStore) -> Self {
        Self { store }
    }

    /// Create a shipment as `pending` with no driver.
    ///
    /// # Errors
    ///
    /// - `Forbidden` unless the caller is a manager.
    /// - `Validation` for missing fields or bad coordinates.
    /// - `Storage` for duplicate tracking numbers or unknown references.
    #[instrument(skip(self, draft), fields(user_id = %caller.user_id, role = %caller.role))]
    pub async fn create(
        &self,
        caller: &Identity,
        draft: ShipmentDraft,
    ) -> Result<Shipment, ShipmentError> {
        if !caller.may(Operation::CreateShipment) {
            return Err(ShipmentError::Forbidden);
        }
        let new = draft.validate()?;
        let shipment = self.store.insert_shipment(&new).await?;

        tracing::info!(
            shipment_id = %shipment.id,
            tracking_number = %shipment.tracking_number,
            "Shipment created"
        );
        Ok(shipment)
    }

    /// Shipments visible to the caller.
    ///
    /// # Errors
    ///
    /// Returns `ShipmentError::Storage` if the read fails.
    pub async fn list(&self, caller: &Identity) -> Result<Vec<Shipment>, ShipmentError> {
        let filter = scope_filter(caller, ReadScope::All);
        Ok(self.store.find_shipments(&filter).await?)
    }

    /// One shipment, if visible to the caller.
    ///
    /// An invisible or missing shipment yields an empty list, so the response
    /// does not reveal whether the ID exists.
    ///
    /// # Errors
    ///
    /// Returns `ShipmentError::Storage` if the read fails.
    pub async fn get(
        &self,
        caller: &Identity,
        id: ShipmentId,
    ) -> Result<Vec<Shipment>, ShipmentError> {
        let filter = scope_filter(caller, ReadScope::One(id));
        Ok(self.store.find_shipments(&filter).await?)
    }

    /// Change a shipment's status.
    ///
    /// # Errors
    ///
    /// - `InvalidStatus` if `status` is not a known value; checked before
    ///   anything else.
    /// - `Forbidden` for customers, and for drivers not assigned to the
    ///   shipment.
    /// - `NotFound` if the shipment does not exist.
    #[instrument(skip(self), fields(user_id = %caller.user_id, role = %caller.role))]
    pub async fn update_status(
        &self,
        caller: &Identity,
        id: ShipmentId,
        status: &str,
    ) -> Result<ShipmentStatus, ShipmentError> {
        let status: ShipmentStatus = status.parse()?;

        let assigned_to = match caller.status_write() {
            StatusWrite::Denied => return Err(ShipmentError::Forbidden),
            StatusWrite::Unconditional => None,
            StatusWrite::AssignedTo(driver) => Some(driver),
        };

        let changed = self.store.set_status(id, status, assigned_to).await?;
        if changed == 0 {
            return Err(match assigned_to {
                // A guarded write that missed: tell absent apart from not ours.
                Some(_) => match self.store.assigned_driver(id).await? {
                    None => ShipmentError::NotFound,
                    Some(_) => ShipmentError::Forbidden,
                },
                None => ShipmentError::NotFound,
            });
        }

        tracing::info!(shipment_id = %id, %status, "Shipment status updated");
        Ok(status)
    }

    /// Assign (or reassign) a driver.
    ///
    /// # Errors
    ///
    /// - `Forbidden` unless the caller is a manager.
    /// - `InvalidDriver` if `driver_id` is not a user with the driver role.
    /// - `NotFound` if the update touched no shipment.
    #[instrument(skip(self), fields(user_id = %caller.user_id, role = %caller.role))]
    pub async fn assign_driver(
        &self,
        caller: &Identity,
        id: ShipmentId,
        driver_id: UserId,
    ) -> Result<(), ShipmentError> {
        if !caller.may(Operation::AssignDriver) {
            return Err(ShipmentError::Forbidden);
        }
        if !self.store.is_driver(driver_id).await? {
            return Err(ShipmentError::InvalidDriver(driver_id));
        }
        if self.store.set_driver(id, driver_id).await? == 0 {
            return Err(ShipmentError::NotFound);
        }

        tracing::info!(shipment_id = %id, driver_id = %driver_id, "Driver assigned");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shiptrack_core::Role;

    use super::*;
    use crate::db::MemoryStore;

    struct Fixture {
        store: MemoryStore,
        manager: Identity,
        driver: Identity,
        other_driver: Identity,
        customer: Identity,
        warehouse: WarehouseId,
    }

    fn fixture() -> Fixture {
        let store = MemoryStore::new();
        let manager = Identity::new(store.add_user("Meera", Role::Manager), Role::Manager);
        let driver = Identity::new(store.add_user("Ravi", Role::Driver), Role::Driver);
        let other_driver = Identity::new(store.add_user("Sunil", Role::Driver), Role::Driver);
        let customer = Identity::new(store.add_user("Asha", Role::Customer), Role::Customer);
        let warehouse = store.add_warehouse("Delhi Hub", None);
        Fixture {
            store,
            manager,
            driver,
            other_driver,
            customer,
            warehouse,
        }
    }

    fn draft(f: &Fixture, tracking: &str) -> ShipmentDraft {
        ShipmentDraft {
            tracking_number: Some(tracking.to_owned()),
            origin_warehouse_id: Some(f.warehouse),
            destination_address: Some("221B Park Street, Kolkata".to_owned()),
            destination_latitude: None,
            destination_longitude: None,
            customer_id: Some(f.customer.user_id),
        }
    }

    async fn created(f: &Fixture, tracking: &str) -> Shipment {
        ShipmentService::new(&f.store)
            .create(&f.manager, draft(f, tracking))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_starts_pending_and_unassigned() {
        let f = fixture();
        let shipment = created(&f, "TRK-100").await;
        assert_eq!(shipment.status, ShipmentStatus::Pending);
        assert_eq!(shipment.driver_id, None);
        assert_eq!(shipment.customer_id, f.customer.user_id);
    }

    #[tokio::test]
    async fn test_create_requires_manager() {
        let f = fixture();
        let service = ShipmentService::new(&f.store);
        for caller in [f.driver, f.customer] {
            let err = service.create(&caller, draft(&f, "TRK-1")).await.unwrap_err();
            assert!(matches!(err, ShipmentError::Forbidden));
        }
    }

    #[tokio::test]
    async fn test_create_rejects_blank_and_missing_fields() {
        let f = fixture();
        let service = ShipmentService::new(&f.store);

        let mut blank = draft(&f, "   ");
        let err = service.create(&f.manager, blank.clone()).await.unwrap_err();
        assert!(matches!(err, ShipmentError::Validation(ref m) if m.contains("tracking_number")));

        blank.tracking_number = Some("TRK-2".to_owned());
        blank.customer_id = None;
        let err = service.create(&f.manager, blank).await.unwrap_err();
        assert!(matches!(err, ShipmentError::Validation(ref m) if m.contains("customer_id")));
    }

    #[tokio::test]
    async fn test_create_rejects_half_a_destination() {
        let f = fixture();
        let mut d = draft(&f, "TRK-3");
        d.destination_latitude = Some(22.57);
        let err = ShipmentService::new(&f.store)
            .create(&f.manager, d)
            .await
            .unwrap_err();
        assert!(matches!(err, ShipmentError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_duplicate_tracking_number_is_storage_error() {
        let f = fixture();
        created(&f, "TRK-4").await;
        let err = ShipmentService::new(&f.store)
            .create(&f.manager, draft(&f, "TRK-4"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ShipmentError::Storage(RepositoryError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_status_is_checked_first() {
        let f = fixture();
        let shipment = created(&f, "TRK-5").await;
        let service = ShipmentService::new(&f.store);

        // Even a customer, who could never update, gets InvalidStatus.
        let err = service
            .update_status(&f.customer, shipment.id, "lost")
            .await
            .unwrap_err();
        assert!(matches!(err, ShipmentError::InvalidStatus(_)));
        assert_eq!(
            f.store.shipment(shipment.id).unwrap().status,
            ShipmentStatus::Pending
        );
    }

    #[tokio::test]
    async fn test_customer_cannot_update_status() {
        let f = fixture();
        let shipment = created(&f, "TRK-6").await;
        let err = ShipmentService::new(&f.store)
            .update_status(&f.customer, shipment.id, "delivered")
            .await
            .unwrap_err();
        assert!(matches!(err, ShipmentError::Forbidden));
    }

    #[tokio::test]
    async fn test_driver_updates_only_assigned_shipments() {
        let f = fixture();
        let shipment = created(&f, "TRK-7").await;
        let service = ShipmentService::new(&f.store);

        // Unassigned: nobody owns it yet.
        let err = service
            .update_status(&f.driver, shipment.id, "in_transit")
            .await
            .unwrap_err();
        assert!(matches!(err, ShipmentError::Forbidden));

        service
            .assign_driver(&f.manager, shipment.id, f.driver.user_id)
            .await
            .unwrap();

        let err = service
            .update_status(&f.other_driver, shipment.id, "delivered")
            .await
            .unwrap_err();
        assert!(matches!(err, ShipmentError::Forbidden));
        assert_eq!(
            f.store.shipment(shipment.id).unwrap().status,
            ShipmentStatus::Pending
        );

        let status = service
            .update_status(&f.driver, shipment.id, "in_transit")
            .await
            .unwrap();
        assert_eq!(status, ShipmentStatus::InTransit);
        assert_eq!(
            f.store.shipment(shipment.id).unwrap().status,
            ShipmentStatus::InTransit
        );
    }

    #[tokio::test]
    async fn test_driver_update_of_missing_shipment_is_not_found() {
        let f = fixture();
        let err = ShipmentService::new(&f.store)
            .update_status(&f.driver, ShipmentId::new(404), "delivered")
            .await
            .unwrap_err();
        assert!(matches!(err, ShipmentError::NotFound));
    }

    #[tokio::test]
    async fn test_manager_update_of_missing_shipment_is_not_found() {
        let f = fixture();
        let err = ShipmentService::new(&f.store)
            .update_status(&f.manager, ShipmentId::new(404), "in_transit")
            .await
            .unwrap_err();
        assert!(matches!(err, ShipmentError::NotFound));
    }

    #[tokio::test]
    async fn test_terminal_looking_statuses_can_be_left() {
        let f = fixture();
        let shipment = created(&f, "TRK-8").await;
        let service = ShipmentService::new(&f.store);

        for next in ["delivered", "pending", "cancelled", "in_transit"] {
            service
                .update_status(&f.manager, shipment.id, next)
                .await
                .unwrap();
        }
        assert_eq!(
            f.store.shipment(shipment.id).unwrap().status,
            ShipmentStatus::InTransit
        );
    }

    #[tokio::test]
    async fn test_assign_rejects_non_driver() {
        let f = fixture();
        let shipment = created(&f, "TRK-9").await;
        let err = ShipmentService::new(&f.store)
            .assign_driver(&f.manager, shipment.id, f.customer.user_id)
            .await
            .unwrap_err();
        assert!(matches!(err, ShipmentError::InvalidDriver(_)));
        assert_eq!(f.store.shipment(shipment.id).unwrap().driver_id, None);
    }

    #[tokio::test]
    async fn test_assign_checks_driver_before_shipment() {
        let f = fixture();
        let service = ShipmentService::new(&f.store);
        let missing = ShipmentId::new(9_999);

        let err = service
            .assign_driver(&f.manager, missing, f.customer.user_id)
            .await
            .unwrap_err();
        assert!(matches!(err, ShipmentError::InvalidDriver(_)));

        let err = service
            .assign_driver(&f.manager, missing, f.driver.user_id)
            .await
            .unwrap_err();
        assert!(matches!(err, ShipmentError::NotFound));
    }

    #[tokio::test]
    async fn test_assign_requires_manager() {
        let f = fixture();
        let shipment = created(&f, "TRK-10").await;
        let err = ShipmentService::new(&f.store)
            .assign_driver(&f.driver, shipment.id, f.driver.user_id)
            .await
            .unwrap_err();
        assert!(matches!(err, ShipmentError::Forbidden));
    }

    #[tokio::test]
    async fn test_get_hides_other_customers_shipments() {
        let f = fixture();
        let shipment = created(&f, "TRK-11").await;
        let stranger = Identity::new(f.store.add_user("Kabir", Role::Customer), Role::Customer);
        let service = ShipmentService::new(&f.store);

        assert!(service.get(&stranger, shipment.id).await.unwrap().is_empty());
        assert!(service.list(&stranger).await.unwrap().is_empty());
        assert_eq!(service.get(&f.customer, shipment.id).await.unwrap().len(), 1);
        assert_eq!(service.get(&f.driver, shipment.id).await.unwrap().len(), 1);
    }
}
