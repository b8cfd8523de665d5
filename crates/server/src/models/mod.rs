//! Domain models for the tracking service.
//!
//! These are the shapes rows take once they leave a repository, and the
//! shapes serialized back to API clients.

pub mod session;
pub mod shipment;
pub mod tracking;
pub mod user;
pub mod warehouse;

pub use session::{CurrentUser, keys as session_keys};
pub use shipment::{NewShipment, Shipment};
pub use tracking::{LatestPosition, PositionEvent, ShipmentMapPosition};
pub use user::{User, UserSummary};
pub use warehouse::Warehouse;
