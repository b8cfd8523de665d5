//! Shipment lifecycle endpoints.
//!
//! Role and ownership checks live in [`ShipmentService`]; handlers only
//! translate between HTTP and the service.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};

use shiptrack_core::{ShipmentId, UserId};

use crate::db::ShipmentRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::Shipment;
use crate::services::{ShipmentDraft, ShipmentService};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    /// Missing counts as an invalid status.
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct DriverAssignment {
    pub driver: Option<UserId>,
}

/// `POST /api/shipments`
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(draft): Json<ShipmentDraft>,
) -> Result<(StatusCode, Json<Shipment>)> {
    let repo = ShipmentRepository::new(state.pool());
    let shipment = ShipmentService::new(&repo)
        .create(&user.identity(), draft)
        .await?;

    Ok((StatusCode::CREATED, Json(shipment)))
}

/// `GET /api/shipments`
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<Shipment>>> {
    let repo = ShipmentRepository::new(state.pool());
    let shipments = ShipmentService::new(&repo).list(&user.identity()).await?;
    Ok(Json(shipments))
}

/// `GET /api/getShipments/{id}`
///
/// Responds with an array holding zero or one shipment.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<ShipmentId>,
) -> Result<Json<Vec<Shipment>>> {
    let repo = ShipmentRepository::new(state.pool());
    let shipments = ShipmentService::new(&repo)
        .get(&user.identity(), id)
        .await?;
    Ok(Json(shipments))
}

/// `PUT /api/shipments/{id}/status`
pub async fn update_status(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<ShipmentId>,
    Json(body): Json<StatusUpdate>,
) -> Result<Json<Value>> {
    let repo = ShipmentRepository::new(state.pool());
    let status = ShipmentService::new(&repo)
        .update_status(&user.identity(), id, &body.status)
        .await?;

    Ok(Json(json!({
        "message": "Shipment status updated",
        "status": status,
    })))
}

/// `PUT /api/shipments/{id}/assign`
pub async fn assign_driver(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<ShipmentId>,
    Json(body): Json<DriverAssignment>,
) -> Result<Json<Value>> {
    let driver = body
        .driver
        .ok_or_else(|| AppError::BadRequest("driver is required".to_string()))?;

    let repo = ShipmentRepository::new(state.pool());
    ShipmentService::new(&repo)
        .assign_driver(&user.identity(), id, driver)
        .await?;

    Ok(Json(json!({ "message": "Driver assigned" })))
}
