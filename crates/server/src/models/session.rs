//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use shiptrack_core::{Email, Identity, Role, UserId};

use super::User;

/// Session-stored user identity.
///
/// Written once at login; the role is trusted for the lifetime of the
/// session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// User's email address.
    pub email: Email,
    /// Role granted at registration.
    pub role: Role,
}

impl CurrentUser {
    /// The `{user_id, role}` pair the core policy works with.
    #[must_use]
    pub const fn identity(&self) -> Identity {
        Identity::new(self.id, self.role)
    }
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}
