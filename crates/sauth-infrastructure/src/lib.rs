//! # Session Auth Infrastructure
//! 
//! Record store implementations (adapters): JSON flat files and PostgreSQL.

pub mod database;
pub mod file;
pub mod repositories;

pub use database::{create_pool, run_migrations, PgUserRepository, PgUserSessionRepository};
pub use file::{FileUserRepository, FileUserSessionRepository, JsonFileStore};
pub use repositories::{Repositories, StorageError};
