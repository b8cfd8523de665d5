//! Shipment repository.
//!
//! Runtime `query_as` queries; rows map through `sqlx::FromRow` on the models.

use async_trait::async_trait;
use sqlx::PgPool;

use shiptrack_core::{ShipmentFilter, ShipmentId, ShipmentStatus, UserId};

use super::{RepositoryError, ShipmentStore};
use crate::models::{NewShipment, Shipment};

/// Repository for shipment database operations.
pub struct ShipmentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ShipmentRepository<'a> {
    /// Create a new shipment repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShipmentStore for ShipmentRepository<'_> {
    async fn insert_shipment(&self, new: &NewShipment) -> Result<Shipment, RepositoryError> {
        let (latitude, longitude) = match new.destination {
            Some(c) => (Some(c.latitude), Some(c.longitude)),
            None => (None, None),
        };

        sqlx::query_as::<_, Shipment>(
            r"
            INSERT INTO shipments (
                tracking_number, origin_warehouse_id, destination_address,
                destination_latitude, destination_longitude, customer_id, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, 'pending')
            RETURNING id, tracking_number, origin_warehouse_id, destination_address,
                      destination_latitude, destination_longitude, customer_id,
                      status, driver_id, created_at
            ",
        )
        .bind(&new.tracking_number)
        .bind(new.origin_warehouse_id)
        .bind(&new.destination_address)
        .bind(latitude)
        .bind(longitude)
        .bind(new.customer_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_insert(e, "shipment"))
    }

    async fn find_shipments(
        &self,
        filter: &ShipmentFilter,
    ) -> Result<Vec<Shipment>, RepositoryError> {
        let rows = sqlx::query_as::<_, Shipment>(
            r"
            SELECT id, tracking_number, origin_warehouse_id, destination_address,
                   destination_latitude, destination_longitude, customer_id,
                   status, driver_id, created_at
            FROM shipments
            WHERE ($1::BIGINT IS NULL OR customer_id = $1)
              AND ($2::BIGINT IS NULL OR id = $2)
            ORDER BY id
            ",
        )
        .bind(filter.customer_id)
        .bind(filter.shipment_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    async fn assigned_driver(
        &self,
        id: ShipmentId,
    ) -> Result<Option<Option<UserId>>, RepositoryError> {
        let driver = sqlx::query_scalar::<_, Option<UserId>>(
            "SELECT driver_id FROM shipments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(driver)
    }

    async fn set_status(
        &self,
        id: ShipmentId,
        status: ShipmentStatus,
        assigned_to: Option<UserId>,
    ) -> Result<u64, RepositoryError> {
        // Ownership check and write are a single statement.
        let result = sqlx::query(
            r"
            UPDATE shipments
            SET status = $2
            WHERE id = $1
              AND ($3::BIGINT IS NULL OR driver_id = $3)
            ",
        )
        .bind(id)
        .bind(status)
        .bind(assigned_to)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn set_driver(&self, id: ShipmentId, driver_id: UserId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("UPDATE shipments SET driver_id = $2 WHERE id = $1")
            .bind(id)
            .bind(driver_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn is_driver(&self, user_id: UserId) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM users WHERE id = $1 AND role = 'driver')",
        )
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }
}
