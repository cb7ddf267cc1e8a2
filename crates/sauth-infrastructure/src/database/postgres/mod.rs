//! PostgreSQL repository implementations

pub mod user_repo_impl;
pub mod user_session_repo_impl;

pub use user_repo_impl::PgUserRepository;
pub use user_session_repo_impl::PgUserSessionRepository;
