//! Domain services (business logic)

pub mod session_auth_service;

pub use session_auth_service::{LoginResult, SessionAuthService};
