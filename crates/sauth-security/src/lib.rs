//! # Session Auth Security
//! 
//! Security utilities: password verification and session id generation.

pub mod password;
pub mod session;

pub use password::PasswordService;
pub use session::{SessionIdGenerator, UuidSessionIdGenerator};
