//! Account registration, login and logout.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;

use shiptrack_core::Role;

use crate::db::UserRepository;
use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{RequireAuth, clear_current_user, set_current_user};
use crate::models::{CurrentUser, User};
use crate::services::AuthService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Defaults to customer.
    #[serde(default)]
    pub role: Option<Role>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Create a customer or driver account.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<User>)> {
    let role = req.role.unwrap_or(Role::Customer);
    let user = AuthService::new(state.pool())
        .register(&req.name, &req.email, &req.password, role)
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Verify credentials and start a session.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<LoginRequest>,
) -> Result<Json<CurrentUser>> {
    let user = match AuthService::new(state.pool())
        .login(&req.email, &req.password)
        .await
    {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(error = %e, "Login failed");
            return Err(e.into());
        }
    };

    let current = CurrentUser::from(&user);
    set_current_user(&session, &current)
        .await
        .map_err(|e| AppError::Internal(format!("failed to store session: {e}")))?;
    set_sentry_user(&current.id, Some(current.email.as_str()));

    tracing::info!(user_id = %current.id, role = %current.role, "User logged in");
    Ok(Json(current))
}

/// End the session.
pub async fn logout(session: Session) -> impl IntoResponse {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {}", e);
    }
    clear_sentry_user();

    Json(json!({ "message": "Logged out" }))
}

/// The logged-in user's account, re-read from the database.
///
/// Returns 404 once the account behind a live session has been removed.
pub async fn me(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
) -> Result<Json<User>> {
    let user = UserRepository::new(state.pool())
        .get_by_id(current.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}
