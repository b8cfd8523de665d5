//! Database operations for the tracking `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `users` - Managers, drivers and customers (Argon2id password hashes)
//! - `warehouses` - Origin hubs with optional coordinates
//! - `shipments` - Shipment rows; status and driver are the only mutable columns
//! - `shipment_events` - Append-only position pings
//! - `tower_sessions.session` - Session storage
//!
//! # Stores
//!
//! The lifecycle and tracking services talk to storage through the
//! [`ShipmentStore`] and [`PositionLog`] traits. [`ShipmentRepository`] and
//! [`PositionRepository`] implement them over a `PgPool`;
//! `memory::MemoryStore` implements both in process for tests (`test-util`
//! feature).
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p shiptrack-cli -- migrate
//! ```

#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod positions;
pub mod shipments;
pub mod users;
pub mod warehouses;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use shiptrack_core::{ShipmentFilter, ShipmentId, ShipmentStatus, UserId};

use crate::models::{LatestPosition, NewShipment, Shipment, ShipmentMapPosition};

#[cfg(any(test, feature = "test-util"))]
pub use memory::MemoryStore;
pub use positions::PositionRepository;
pub use shipments::ShipmentRepository;
pub use users::UserRepository;
pub use warehouses::WarehouseRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (unique tracking number, unknown foreign key).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Classify an insert failure, turning constraint violations into `Conflict`.
    pub(crate) fn from_insert(err: sqlx::Error, what: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = err
            && db_err.is_unique_violation()
        {
            return Self::Conflict(format!("{what} already exists"));
        }
        if let sqlx::Error::Database(ref db_err) = err
            && db_err.is_foreign_key_violation()
        {
            return Self::Conflict(format!(
                "{what} references a missing row ({})",
                db_err.constraint().unwrap_or("unknown constraint")
            ));
        }
        Self::Database(err)
    }
}

/// Persistent shipment rows plus the read-only user lookup that assignment
/// needs.
///
/// Every write is a single statement; callers get last-write-wins semantics
/// from the store and no further coordination.
#[async_trait]
pub trait ShipmentStore: Send + Sync {
    /// Insert a shipment as `pending` with no driver.
    ///
    /// Constraint violations surface as `RepositoryError::Conflict`.
    async fn insert_shipment(&self, new: &NewShipment) -> Result<Shipment, RepositoryError>;

    /// All shipments matching `filter`, ordered by ID.
    async fn find_shipments(&self, filter: &ShipmentFilter)
    -> Result<Vec<Shipment>, RepositoryError>;

    /// The assigned driver of a shipment.
    ///
    /// Returns `None` when the shipment does not exist and `Some(None)` when
    /// it exists without a driver.
    async fn assigned_driver(
        &self,
        id: ShipmentId,
    ) -> Result<Option<Option<UserId>>, RepositoryError>;

    /// Set the status, optionally only while `driver_id` equals `assigned_to`.
    ///
    /// Returns the number of rows changed.
    async fn set_status(
        &self,
        id: ShipmentId,
        status: ShipmentStatus,
        assigned_to: Option<UserId>,
    ) -> Result<u64, RepositoryError>;

    /// Overwrite the assigned driver. Returns the number of rows changed.
    async fn set_driver(&self, id: ShipmentId, driver_id: UserId) -> Result<u64, RepositoryError>;

    /// Whether `user_id` is an existing user with the driver role.
    async fn is_driver(&self, user_id: UserId) -> Result<bool, RepositoryError>;
}

/// Read side of the position event log.
#[async_trait]
pub trait PositionLog: Send + Sync {
    /// Newest ping per shipment matching `filter`, ordered by shipment ID.
    async fn latest_positions(
        &self,
        filter: &ShipmentFilter,
    ) -> Result<Vec<LatestPosition>, RepositoryError>;

    /// Like [`PositionLog::latest_positions`], joined with destination and
    /// origin-warehouse coordinates.
    async fn latest_map_positions(
        &self,
        filter: &ShipmentFilter,
    ) -> Result<Vec<ShipmentMapPosition>, RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
