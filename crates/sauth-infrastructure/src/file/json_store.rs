// ============================================================================
// Session Auth Infrastructure - JSON Flat-File Store
// File: crates/sauth-infrastructure/src/file/json_store.rs
// ============================================================================
//! One JSON object per record type, keyed by record id, stored at
//! `<data_dir>/.db_<Type>.json`.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, error};

use sauth_core::domain::{User, UserSession};
use sauth_core::error::DomainError;

/// Entity that can live in a [`JsonFileStore`].
pub trait StoredRecord: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Type name used in the file name
    const TYPE_NAME: &'static str;

    fn record_id(&self) -> &str;
    fn created_at(&self) -> DateTime<Utc>;
}

impl StoredRecord for UserSession {
    const TYPE_NAME: &'static str = "UserSession";

    fn record_id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl StoredRecord for User {
    const TYPE_NAME: &'static str = "User";

    fn record_id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

type Records<T> = BTreeMap<String, T>;

/// Flat-file record store.
///
/// Reads are served from the copy loaded by the last [`JsonFileStore::load_from_file`].
/// Writes reload the file, apply the change and replace the file atomically
/// while holding the store lock, so writers in this process never lose each
/// other's updates.
pub struct JsonFileStore<T: StoredRecord> {
    path: PathBuf,
    records: Mutex<Records<T>>,
}

impl<T: StoredRecord> JsonFileStore<T> {
    /// Open the store under `data_dir`, loading whatever is already on disk.
    pub async fn open(data_dir: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = data_dir.as_ref().join(format!(".db_{}.json", T::TYPE_NAME));
        let records = read_records(&path).await?;
        debug!("Opened {} with {} records", path.display(), records.len());
        Ok(Self {
            path,
            records: Mutex::new(records),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load_from_file(&self) -> Result<(), DomainError> {
        let mut records = self.records.lock().await;
        *records = read_records(&self.path).await?;
        Ok(())
    }

    /// Records matching `predicate`, oldest first; same-second records by id.
    pub async fn search<F>(&self, predicate: F) -> Result<Vec<T>, DomainError>
    where
        F: Fn(&T) -> bool,
    {
        let records = self.records.lock().await;
        let mut found: Vec<T> = records.values().filter(|r| predicate(r)).cloned().collect();
        found.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.record_id().cmp(b.record_id()))
        });
        Ok(found)
    }

    pub async fn get(&self, id: &str) -> Result<Option<T>, DomainError> {
        let records = self.records.lock().await;
        Ok(records.get(id).cloned())
    }

    pub async fn count(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn save(&self, record: &T) -> Result<(), DomainError> {
        let mut records = self.records.lock().await;
        let mut on_disk = read_records(&self.path).await?;
        on_disk.insert(record.record_id().to_string(), record.clone());
        write_records(&self.path, &on_disk).await?;
        *records = on_disk;
        Ok(())
    }

    /// Remove a record by id; removing an unknown id is not an error.
    pub async fn remove(&self, id: &str) -> Result<(), DomainError> {
        let mut records = self.records.lock().await;
        let mut on_disk = read_records(&self.path).await?;
        if on_disk.remove(id).is_some() {
            write_records(&self.path, &on_disk).await?;
        }
        *records = on_disk;
        Ok(())
    }
}

async fn read_records<T: StoredRecord>(path: &Path) -> Result<Records<T>, DomainError> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Records::new()),
        Err(e) => {
            error!("Failed to read {}: {}", path.display(), e);
            return Err(DomainError::StorageError(e.to_string()));
        }
    };

    if raw.trim().is_empty() {
        return Ok(Records::new());
    }

    serde_json::from_str(&raw).map_err(|e| {
        error!("Corrupt record file {}: {}", path.display(), e);
        DomainError::StorageError(e.to_string())
    })
}

async fn write_records<T: StoredRecord>(path: &Path, records: &Records<T>) -> Result<(), DomainError> {
    let storage_err = |e: std::io::Error| {
        error!("Failed to write {}: {}", path.display(), e);
        DomainError::StorageError(e.to_string())
    };

    let body = serde_json::to_vec(records).map_err(|e| DomainError::StorageError(e.to_string()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(storage_err)?;
    }

    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, body).await.map_err(storage_err)?;
    tokio::fs::rename(&tmp, path).await.map_err(storage_err)?;
    Ok(())
}
