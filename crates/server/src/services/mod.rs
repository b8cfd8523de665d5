//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Account registration and password login
//! - `shipments` - Shipment lifecycle (create, read, status, assignment)
//! - `tracking` - Latest-position lookups

pub mod auth;
pub mod shipments;
pub mod tracking;

pub use auth::{AuthError, AuthService};
pub use shipments::{ShipmentDraft, ShipmentError, ShipmentService};
pub use tracking::TrackingService;
