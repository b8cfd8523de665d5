//! Shiptrack Core - Shared domain types and visibility rules.
//!
//! This crate provides the pieces of the shipment tracking domain that do not
//! touch I/O:
//! - `server` - Axum REST backend (repositories, services, routes)
//! - `cli` - Command-line tools for migrations, seeding and user management
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no database access,
//! no HTTP. Every decision about *who may see or change what* lives here so
//! that the Postgres repositories and the in-memory test store apply exactly
//! the same rules.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, roles, shipment statuses, emails, coordinates
//! - [`policy`] - Caller identity, role gates and row-level visibility filters
//! - [`tracking`] - Latest-position selection over a position event series

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod policy;
pub mod tracking;
pub mod types;

pub use policy::*;
pub use tracking::{PositionSample, latest_per_shipment};
pub use types::*;
