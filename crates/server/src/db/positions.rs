//! Position event queries.
//!
//! `DISTINCT ON (shipment_id)` with `ORDER BY shipment_id, "timestamp" DESC,
//! id DESC` keeps exactly the newest ping per shipment, ties going to the
//! later insert. The visibility filter sits in the `WHERE` clause, so rows a
//! caller may not see are never read.

use async_trait::async_trait;
use sqlx::PgPool;

use shiptrack_core::ShipmentFilter;

use super::{PositionLog, RepositoryError};
use crate::models::{LatestPosition, ShipmentMapPosition};

/// Repository over the `shipment_events` log.
pub struct PositionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PositionRepository<'a> {
    /// Create a new position repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PositionLog for PositionRepository<'_> {
    async fn latest_positions(
        &self,
        filter: &ShipmentFilter,
    ) -> Result<Vec<LatestPosition>, RepositoryError> {
        let rows = sqlx::query_as::<_, LatestPosition>(
            r#"
            SELECT DISTINCT ON (e.shipment_id)
                   e.shipment_id, s.tracking_number,
                   e.latitude, e.longitude, e."timestamp"
            FROM shipment_events e
            JOIN shipments s ON s.id = e.shipment_id
            WHERE ($1::BIGINT IS NULL OR s.customer_id = $1)
              AND ($2::BIGINT IS NULL OR s.id = $2)
            ORDER BY e.shipment_id, e."timestamp" DESC, e.id DESC
            "#,
        )
        .bind(filter.customer_id)
        .bind(filter.shipment_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    async fn latest_map_positions(
        &self,
        filter: &ShipmentFilter,
    ) -> Result<Vec<ShipmentMapPosition>, RepositoryError> {
        let rows = sqlx::query_as::<_, ShipmentMapPosition>(
            r#"
            SELECT DISTINCT ON (e.shipment_id)
                   e.shipment_id, s.tracking_number,
                   e.latitude, e.longitude, e."timestamp",
                   s.destination_latitude, s.destination_longitude,
                   w.latitude AS warehouse_latitude,
                   w.longitude AS warehouse_longitude
            FROM shipment_events e
            JOIN shipments s ON s.id = e.shipment_id
            LEFT JOIN warehouses w ON w.id = s.origin_warehouse_id
            WHERE ($1::BIGINT IS NULL OR s.customer_id = $1)
              AND ($2::BIGINT IS NULL OR s.id = $2)
            ORDER BY e.shipment_id, e."timestamp" DESC, e.id DESC
            "#,
        )
        .bind(filter.customer_id)
        .bind(filter.shipment_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
