//! Authentication extractor and session helpers.
//!
//! The session stores a [`CurrentUser`] written at login. Its role is the one
//! every policy decision for the request is made with.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use shiptrack_core::{Identity, Operation};

use crate::error::AppError;
use crate::models::{CurrentUser, session_keys};

/// Extractor that requires a logged-in user.
///
/// Rejects with `401 {"error": "Login required"}` when the session is
/// missing or holds no user.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", user.name)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

impl RequireAuth {
    /// The caller's identity, if their role permits `op`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Forbidden` when the role gate rejects the operation.
    pub fn authorize(&self, op: Operation) -> Result<Identity, AppError> {
        let identity = self.0.identity();
        if identity.may(op) {
            Ok(identity)
        } else {
            tracing::debug!(
                user_id = %identity.user_id,
                role = %identity.role,
                ?op,
                "Role gate rejected request"
            );
            Err(AppError::Forbidden)
        }
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let unauthorized = || AppError::Unauthorized("Login required".to_string());

        // Set by SessionManagerLayer
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or_else(unauthorized)?;

        let user: CurrentUser = session
            .get(session_keys::CURRENT_USER)
            .await
            .ok()
            .flatten()
            .ok_or_else(unauthorized)?;

        Ok(Self(user))
    }
}

/// Store the logged-in user in the session.
///
/// The session ID is cycled first so a pre-login session cannot be reused.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Clear the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}
