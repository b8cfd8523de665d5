//! Role and status enums.
//!
//! Both enums are stored as Postgres enum types (`user_role`,
//! `shipment_status`) and travel over the wire as `snake_case` strings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A string did not name a known enum variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind}: {value}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }

    /// The rejected input.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Role of an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "user_role", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Creates shipments, assigns drivers, sees everything.
    Manager,
    /// Reads everything, updates status of shipments assigned to them.
    Driver,
    /// Reads only the shipments they own.
    Customer,
}

impl Role {
    /// All roles, in declaration order.
    pub const ALL: [Self; 3] = [Self::Manager, Self::Driver, Self::Customer];

    /// The wire/database name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manager => "manager",
            Self::Driver => "driver",
            Self::Customer => "customer",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manager" => Ok(Self::Manager),
            "driver" => Ok(Self::Driver),
            "customer" => Ok(Self::Customer),
            _ => Err(ParseEnumError::new("role", s)),
        }
    }
}

/// Shipment lifecycle status.
///
/// The lifecycle is a flat set: any status may follow any other, and
/// neither `Delivered` nor `Cancelled` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "shipment_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    #[default]
    Pending,
    InTransit,
    Delivered,
    Cancelled,
}

impl ShipmentStatus {
    /// Every accepted status value.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::InTransit,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// The wire/database name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InTransit => "in_transit",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ShipmentStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("status", s))
    }
}
