//! Flat-file adapters

pub mod json_store;
pub mod user_repo_impl;
pub mod user_session_repo_impl;

pub use json_store::{JsonFileStore, StoredRecord};
pub use user_repo_impl::FileUserRepository;
pub use user_session_repo_impl::FileUserSessionRepository;
