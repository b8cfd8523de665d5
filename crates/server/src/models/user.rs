//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use shiptrack_core::{Email, Role, UserId};

/// A registered user of any role.
///
/// The password hash is never part of this type; it is only read by the
/// login path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Directory entry returned by the driver and customer listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub email: Email,
}
