// ============================================================================
// Session Auth API - Session Auth Handlers
// File: crates/sauth-api/src/handlers/auth_session.rs
// ============================================================================
//! Session login and logout

use axum::{
    extract::{rejection::FormRejection, State},
    http::{header::SET_COOKIE, HeaderMap, HeaderName},
    Form, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use sauth_core::domain::UserView;
use sauth_core::DomainError;

use crate::middleware::session_cookie;
use crate::response::ApiError;
use crate::state::AppState;

/// Login form fields
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login handler - POST /api/v1/auth_session/login
///
/// An unreadable body is treated like an empty form.
pub async fn login(
    State(state): State<AppState>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<([(HeaderName, String); 1], Json<UserView>), ApiError> {
    let form = form.map(|Form(form)| form).unwrap_or_default();

    let email = form
        .email
        .filter(|email| !email.is_empty())
        .ok_or_else(|| ApiError::BadRequest("email missing".to_string()))?;
    let password = form
        .password
        .filter(|password| !password.is_empty())
        .ok_or_else(|| ApiError::BadRequest("password missing".to_string()))?;

    let result = state
        .auth
        .login(&email, &password)
        .await
        .map_err(|e| match e {
            DomainError::UserNotFound => ApiError::NotFound("no user found for this email".to_string()),
            DomainError::InvalidCredentials => ApiError::Unauthorized("wrong password".to_string()),
            other => other.into(),
        })?;

    let cookie = format!("{}={}; Path=/", state.auth.session_name(), result.session_id);

    Ok(([(SET_COOKIE, cookie)], Json(result.user.to_json())))
}

/// Logout handler - DELETE /api/v1/auth_session/logout
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let session_id = session_cookie(&headers, state.auth.session_name());
    if !state.auth.destroy_session(session_id.as_deref()).await? {
        return Err(ApiError::not_found());
    }

    info!("Logged out");
    Ok(Json(json!({})))
}
