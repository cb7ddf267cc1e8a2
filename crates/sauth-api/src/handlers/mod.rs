//! HTTP handlers

pub mod auth_session;
pub mod index;
pub mod users;
