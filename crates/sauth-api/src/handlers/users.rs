//! User endpoints

use axum::Json;

use sauth_core::domain::UserView;

use crate::middleware::CurrentUser;

/// GET /api/v1/users/me
pub async fn me(CurrentUser(user): CurrentUser) -> Json<UserView> {
    Json(user.to_json())
}
