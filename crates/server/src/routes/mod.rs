//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! # Auth
//! POST /auth/register                          - Create a customer or driver account
//! POST /auth/login                             - Start a session
//! POST /auth/logout                            - End the session
//!
//! # API (session required)
//! GET  /api/me                                 - Logged-in user
//! POST /api/shipments                          - Create shipment (manager)
//! GET  /api/shipments                          - Visible shipments
//! GET  /api/getShipments/{id}                  - One visible shipment, as an array
//! PUT  /api/shipments/{id}/status              - Update status (manager, assigned driver)
//! PUT  /api/shipments/{id}/assign              - Assign driver (manager)
//! GET  /api/getShipmentCoordinates             - Latest position per visible shipment
//! GET  /api/getShipmentCoordinatesById/{id}    - Latest position with map context
//! GET  /api/getWarehouses                      - Warehouses (manager, driver)
//! GET  /api/getDrivers                         - Drivers (manager)
//! GET  /api/getCustomers                       - Customers (manager)
//! ```
//!
//! Health endpoints are mounted by [`crate::app`].

pub mod auth;
pub mod directory;
pub mod shipments;
pub mod tracking;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(auth::me))
        .route("/shipments", get(shipments::list).post(shipments::create))
        .route("/getShipments/{id}", get(shipments::show))
        .route("/shipments/{id}/status", put(shipments::update_status))
        .route("/shipments/{id}/assign", put(shipments::assign_driver))
        .route("/getShipmentCoordinates", get(tracking::latest_positions))
        .route(
            "/getShipmentCoordinatesById/{id}",
            get(tracking::shipment_position),
        )
        .route("/getWarehouses", get(directory::warehouses))
        .route("/getDrivers", get(directory::drivers))
        .route("/getCustomers", get(directory::customers))
}

/// Create all routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/api", api_routes())
}
