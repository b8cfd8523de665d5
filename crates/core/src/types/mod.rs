//! Core types for Shiptrack.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod geo;
pub mod id;
pub mod status;

pub use email::{Email, EmailError};
pub use geo::{CoordinateError, Coordinates};
pub use id::*;
pub use status::*;
