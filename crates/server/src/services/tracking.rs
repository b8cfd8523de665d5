//! Latest-position lookups.

use shiptrack_core::{Identity, ReadScope, ShipmentId, scope_filter};

use crate::db::{PositionLog, RepositoryError};
use crate::models::{LatestPosition, ShipmentMapPosition};

/// Resolves the newest known position of the shipments a caller may see.
///
/// Customers asking about a shipment they do not own get an empty result,
/// the same as for a shipment with no pings.
pub struct TrackingService<'a> {
    log: &'a dyn PositionLog,
}

impl<'a> TrackingService<'a> {
    #[must_use]
    pub const fn new(log: &'a dyn PositionLog) -> Self {
        Self { log }
    }

    /// Latest position of every visible shipment that has at least one ping.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the read fails.
    pub async fn latest_positions(
        &self,
        caller: &Identity,
    ) -> Result<Vec<LatestPosition>, RepositoryError> {
        let filter = scope_filter(caller, ReadScope::All);
        self.log.latest_positions(&filter).await
    }

    /// Latest position of one shipment with its map context.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the read fails.
    pub async fn shipment_position(
        &self,
        caller: &Identity,
        id: ShipmentId,
    ) -> Result<Vec<ShipmentMapPosition>, RepositoryError> {
        let filter = scope_filter(caller, ReadScope::One(id));
        self.log.latest_map_positions(&filter).await
    }
}
