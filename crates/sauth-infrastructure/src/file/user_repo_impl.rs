// ============================================================================
// Session Auth Infrastructure - Flat-File User Repository
// File: crates/sauth-infrastructure/src/file/user_repo_impl.rs
// ============================================================================

use std::path::Path;

use async_trait::async_trait;

use sauth_core::domain::User;
use sauth_core::error::DomainError;
use sauth_core::repositories::{UserFilter, UserRepository};

use super::json_store::JsonFileStore;

/// Users are maintained outside this service, so every read goes back to disk.
pub struct FileUserRepository {
    store: JsonFileStore<User>,
}

impl FileUserRepository {
    pub async fn open(data_dir: impl AsRef<Path>) -> Result<Self, DomainError> {
        Ok(Self { store: JsonFileStore::open(data_dir).await? })
    }
}

#[async_trait]
impl UserRepository for FileUserRepository {
    async fn search(&self, filter: &UserFilter) -> Result<Vec<User>, DomainError> {
        self.store.load_from_file().await?;
        self.store.search(|u| filter.matches(u)).await
    }

    async fn get(&self, id: &str) -> Result<Option<User>, DomainError> {
        self.store.load_from_file().await?;
        self.store.get(id).await
    }

    async fn save(&self, user: &User) -> Result<(), DomainError> {
        self.store.save(user).await
    }
}
