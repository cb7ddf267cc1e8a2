// ============================================================================
// Session Auth Infrastructure - Flat-File User Session Repository
// File: crates/sauth-infrastructure/src/file/user_session_repo_impl.rs
// ============================================================================

use std::path::Path;

use async_trait::async_trait;

use sauth_core::domain::UserSession;
use sauth_core::error::DomainError;
use sauth_core::repositories::{SessionFilter, UserSessionRepository};

use super::json_store::JsonFileStore;

pub struct FileUserSessionRepository {
    store: JsonFileStore<UserSession>,
}

impl FileUserSessionRepository {
    pub async fn open(data_dir: impl AsRef<Path>) -> Result<Self, DomainError> {
        Ok(Self { store: JsonFileStore::open(data_dir).await? })
    }

    pub fn store(&self) -> &JsonFileStore<UserSession> {
        &self.store
    }
}

#[async_trait]
impl UserSessionRepository for FileUserSessionRepository {
    async fn reload(&self) -> Result<(), DomainError> {
        self.store.load_from_file().await
    }

    async fn search(&self, filter: &SessionFilter) -> Result<Vec<UserSession>, DomainError> {
        self.store.search(|s| filter.matches(s)).await
    }

    async fn save(&self, session: &UserSession) -> Result<(), DomainError> {
        self.store.save(session).await
    }

    async fn remove(&self, session: &UserSession) -> Result<(), DomainError> {
        self.store.remove(&session.id).await
    }
}
