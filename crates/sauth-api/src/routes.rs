//! Router assembly

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower::Layer;
use tower_http::{
    normalize_path::{NormalizePath, NormalizePathLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};

use sauth_shared::constants::API_PREFIX;

use crate::handlers::{auth_session, index, users};
use crate::middleware::auth_middleware;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/status", get(index::status))
        .route("/unauthorized", get(index::unauthorized))
        .route("/forbidden", get(index::forbidden))
        .route("/auth_session/login", post(auth_session::login))
        .route("/auth_session/logout", delete(auth_session::logout))
        .route("/users/me", get(users::me));

    Router::new()
        .nest(API_PREFIX, api_routes)
        .fallback(index::not_found)
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
}

/// Router that also accepts every route with a trailing slash.
pub fn create_app(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(create_router(state))
}
