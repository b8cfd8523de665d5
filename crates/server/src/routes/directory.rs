//! Reference data for the dashboards: warehouses, drivers and customers.

use axum::{Json, extract::State};

use shiptrack_core::{Operation, Role};

use crate::db::{UserRepository, WarehouseRepository};
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::{UserSummary, Warehouse};
use crate::state::AppState;

/// `GET /api/getWarehouses` (managers and drivers)
pub async fn warehouses(
    State(state): State<AppState>,
    auth: RequireAuth,
) -> Result<Json<Vec<Warehouse>>> {
    auth.authorize(Operation::ListWarehouses)?;
    let warehouses = WarehouseRepository::new(state.pool()).list().await?;
    Ok(Json(warehouses))
}

/// `GET /api/getDrivers` (managers)
pub async fn drivers(
    State(state): State<AppState>,
    auth: RequireAuth,
) -> Result<Json<Vec<UserSummary>>> {
    auth.authorize(Operation::ListDrivers)?;
    let drivers = UserRepository::new(state.pool())
        .list_by_role(Role::Driver)
        .await?;
    Ok(Json(drivers))
}

/// `GET /api/getCustomers` (managers)
pub async fn customers(
    State(state): State<AppState>,
    auth: RequireAuth,
) -> Result<Json<Vec<UserSummary>>> {
    auth.authorize(Operation::ListCustomers)?;
    let customers = UserRepository::new(state.pool())
        .list_by_role(Role::Customer)
        .await?;
    Ok(Json(customers))
}
