//! Warehouse repository.

use sqlx::PgPool;

use shiptrack_core::Coordinates;

use super::RepositoryError;
use crate::models::Warehouse;

/// Repository for warehouse database operations.
pub struct WarehouseRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WarehouseRepository<'a> {
    /// Create a new warehouse repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All warehouses, ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Warehouse>, RepositoryError> {
        let rows = sqlx::query_as::<_, Warehouse>(
            "SELECT id, name, latitude, longitude FROM warehouses ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Number of warehouses.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM warehouses")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Insert a warehouse.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        name: &str,
        location: Option<Coordinates>,
    ) -> Result<Warehouse, RepositoryError> {
        let row = sqlx::query_as::<_, Warehouse>(
            r"
            INSERT INTO warehouses (name, latitude, longitude)
            VALUES ($1, $2, $3)
            RETURNING id, name, latitude, longitude
            ",
        )
        .bind(name)
        .bind(location.map(|c| c.latitude))
        .bind(location.map(|c| c.longitude))
        .fetch_one(self.pool)
        .await?;

        Ok(row)
    }
}
