//! # Session Auth API
//! 
//! HTTP handlers, middleware, and error responses.

pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;

pub use response::ApiError;
pub use routes::{create_app, create_router};
pub use state::AppState;
