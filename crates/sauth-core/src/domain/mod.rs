//! # Session Auth Core - Domain Module
//! 
//! Domain entities for session authentication.

pub mod user;
pub mod user_session;

pub use user::{User, UserView};
pub use user_session::UserSession;
