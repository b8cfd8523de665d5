//! Latest-position endpoints.

use axum::{
    Json,
    extract::{Path, State},
};

use shiptrack_core::ShipmentId;

use crate::db::PositionRepository;
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::{LatestPosition, ShipmentMapPosition};
use crate::services::TrackingService;
use crate::state::AppState;

/// `GET /api/getShipmentCoordinates`
pub async fn latest_positions(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<LatestPosition>>> {
    let repo = PositionRepository::new(state.pool());
    let positions = TrackingService::new(&repo)
        .latest_positions(&user.identity())
        .await?;
    Ok(Json(positions))
}

/// `GET /api/getShipmentCoordinatesById/{id}`
pub async fn shipment_position(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<ShipmentId>,
) -> Result<Json<Vec<ShipmentMapPosition>>> {
    let repo = PositionRepository::new(state.pool());
    let positions = TrackingService::new(&repo)
        .shipment_position(&user.identity(), id)
        .await?;
    Ok(Json(positions))
}
