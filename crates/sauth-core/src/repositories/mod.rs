//! Repository traits (ports)

pub mod user_repository;
pub mod user_session_repository;

pub use user_repository::{UserFilter, UserRepository};
pub use user_session_repository::{SessionFilter, UserSessionRepository};

#[cfg(test)]
pub use user_repository::MockUserRepository;
#[cfg(test)]
pub use user_session_repository::MockUserSessionRepository;
