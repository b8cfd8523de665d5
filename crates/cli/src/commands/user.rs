//! User provisioning.
//!
//! The only way to create managers; self-registration over HTTP is limited
//! to customers and drivers.

use sqlx::PgPool;

use shiptrack_core::Role;
use shiptrack_server::services::AuthService;

use super::CommandError;

/// Create a user with the given role.
///
/// # Errors
///
/// Returns `CommandError::Auth` for invalid input or a duplicate email.
pub async fn create(
    pool: &PgPool,
    name: &str,
    email: &str,
    role: Role,
    password: &str,
) -> Result<(), CommandError> {
    let user = AuthService::new(pool)
        .create_user(name, email, password, role)
        .await?;

    tracing::info!(
        id = %user.id,
        email = %user.email,
        role = %user.role,
        "User created"
    );
    Ok(())
}
