// ============================================================================
// Session Auth API - Authentication Middleware
// File: crates/sauth-api/src/middleware/auth.rs
// ============================================================================
//! Gatekeeper for `/api/v1`: resolves the session cookie to a user before
//! protected handlers run.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{
        header::{AUTHORIZATION, COOKIE},
        request::Parts,
        HeaderMap,
    },
    middleware::Next,
    response::Response,
};
use glob::Pattern;
use tracing::{debug, warn};

use sauth_core::domain::User;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user attached to the request by [`auth_middleware`]
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(ApiError::not_found)
    }
}

/// Value of the session cookie, if the request carries one
pub fn session_cookie(headers: &HeaderMap, session_name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|cookie| cookie.trim().split_once('='))
        .find(|(name, _)| *name == session_name)
        .map(|(_, value)| value.trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}

/// Whether `path` needs an authenticated user.
///
/// Paths are compared with a trailing `/`; excluded entries match exactly or
/// as glob patterns (`/api/v1/auth_session/*`).
pub fn require_auth(path: Option<&str>, excluded_paths: &[String]) -> bool {
    let Some(path) = path else {
        return true;
    };
    if excluded_paths.is_empty() {
        return true;
    }

    let normalized = if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{}/", path)
    };

    !excluded_paths.iter().any(|excluded| {
        *excluded == normalized
            || Pattern::new(excluded)
                .map(|pattern| pattern.matches(&normalized))
                .unwrap_or(false)
    })
}

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = request.uri().path().to_string();
    if !require_auth(Some(&path), &state.excluded_paths) {
        return Ok(next.run(request).await);
    }

    let session_id = session_cookie(request.headers(), state.auth.session_name());
    let has_authorization = request.headers().contains_key(AUTHORIZATION);
    if session_id.is_none() && !has_authorization {
        warn!("Unauthenticated request to {}", path);
        return Err(ApiError::Unauthorized("Unauthorized".to_string()));
    }

    let user = state
        .auth
        .current_user(session_id.as_deref())
        .await?
        .ok_or_else(|| {
            warn!("No user behind the credentials presented for {}", path);
            ApiError::Forbidden("Forbidden".to_string())
        })?;

    debug!("Request to {} authenticated as {}", path, user.id);
    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}
