//! Repository wiring for the configured storage backend

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use sauth_core::error::DomainError;
use sauth_core::repositories::{UserRepository, UserSessionRepository};
use sauth_shared::config::{StorageBackend, StorageSettings};

use crate::database::{create_pool, run_migrations, PgUserRepository, PgUserSessionRepository};
use crate::file::{FileUserRepository, FileUserSessionRepository};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage.database_url is required for the postgres backend")]
    MissingDatabaseUrl,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Session and user stores shared by the service
#[derive(Clone)]
pub struct Repositories {
    pub sessions: Arc<dyn UserSessionRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl Repositories {
    pub async fn connect(settings: &StorageSettings) -> Result<Self, StorageError> {
        match settings.backend {
            StorageBackend::File => {
                info!("Using flat-file storage in {}", settings.data_dir);
                Ok(Self {
                    sessions: Arc::new(FileUserSessionRepository::open(&settings.data_dir).await?),
                    users: Arc::new(FileUserRepository::open(&settings.data_dir).await?),
                })
            }
            StorageBackend::Postgres => {
                let url = settings
                    .database_url
                    .as_deref()
                    .ok_or(StorageError::MissingDatabaseUrl)?;
                let pool = create_pool(url, settings.max_connections).await?;
                run_migrations(&pool).await?;
                info!("PostgreSQL storage ready");
                Ok(Self {
                    sessions: Arc::new(PgUserSessionRepository::new(pool.clone())),
                    users: Arc::new(PgUserRepository::new(pool)),
                })
            }
        }
    }
}
