//! Key-value store: the sole persistence mechanism
//!
//! Backends implement [`KeyValueStore`] over raw JSON strings. Registries
//! never touch a backend directly; they go through [`Store`], which adds the
//! typed `get(key, default)` / `set(key, value)` contract, batched commits,
//! the artificial latency, and failure injection, and through [`Collection`],
//! the typed whole-collection repository built on top of it.

mod collection;
mod memory;
#[cfg(feature = "sqlx")]
mod sqlite;

pub mod keys;

pub use collection::{Collection, Record};
pub use memory::MemoryStore;
#[cfg(feature = "sqlx")]
pub use sqlite::SqliteStore;

use crate::{Error, Result};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Raw persistence backend: named JSON blobs, whole-value replacement
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the blob stored under `key`
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the blob stored under `key`
    async fn write(&self, key: &str, value: String) -> Result<()>;

    /// Replace several blobs at once: either every entry lands or none does
    async fn write_many(&self, entries: &[(String, String)]) -> Result<()>;
}

/// Serialized values staged for one all-or-nothing commit
#[derive(Debug, Default)]
pub struct WriteBatch {
    entries: Vec<(String, String)>,
}

impl WriteBatch {
    /// Stage `value` under `key`; a later put for the same key wins
    pub fn put<T>(&mut self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let raw = serde_json::to_string(value)?;
        self.entries.retain(|(k, _)| k != key);
        self.entries.push((key.to_string(), raw));
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Typed handle over a backend
///
/// Cheap to clone; clones share the backend and the failure switch.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn KeyValueStore>,
    latency: Duration,
    fail_writes: Arc<AtomicBool>,
}

impl Store {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            latency: Duration::ZERO,
            fail_writes: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Fresh in-memory store without latency
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Delay inserted before every read and write
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Make every subsequent write fail with [`Error::SimulatedFailure`]
    pub fn inject_write_failure(&self, enabled: bool) {
        if enabled {
            warn!("Store write failure injection enabled");
        }
        self.fail_writes.store(enabled, Ordering::SeqCst);
    }

    /// Return the value stored under `key`, or store and return `default`
    pub async fn get<T>(&self, key: &str, default: T) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
    {
        self.delay().await;
        match self.backend.read(key).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => {
                debug!("Key '{}' absent, storing default", key);
                self.write_raw(key, &default).await?;
                Ok(default)
            }
        }
    }

    /// Serialize and store `value` under `key`, replacing any prior value
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        self.delay().await;
        self.write_raw(key, value).await
    }

    /// Write every staged entry in one backend call
    pub async fn commit(&self, batch: WriteBatch) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }
        self.delay().await;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::SimulatedFailure);
        }
        debug!("Committing batch of {} keys", batch.entries.len());
        self.backend.write_many(&batch.entries).await
    }

    /// True when `key` holds a value
    pub async fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.backend.read(key).await?.is_some())
    }

    async fn write_raw<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::SimulatedFailure);
        }
        let raw = serde_json::to_string(value)?;
        self.backend.write(key, raw).await
    }

    async fn delay(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_absent_stores_default() {
        let store = Store::in_memory();
        let value: Vec<String> = store.get("k", vec!["a".to_string()]).await.unwrap();
        assert_eq!(value, vec!["a"]);
        assert!(store.contains("k").await.unwrap());

        // Default is not used once a value exists
        let again: Vec<String> = store.get("k", Vec::new()).await.unwrap();
        assert_eq!(again, vec!["a"]);
    }

    #[tokio::test]
    async fn test_set_replaces_in_full() {
        let store = Store::in_memory();
        store.set("k", &vec![1, 2, 3]).await.unwrap();
        store.set("k", &vec![4]).await.unwrap();
        let value: Vec<i32> = store.get("k", Vec::new()).await.unwrap();
        assert_eq!(value, vec![4]);
    }

    #[tokio::test]
    async fn test_injected_failure_leaves_value() {
        let store = Store::in_memory();
        store.set("k", &1).await.unwrap();
        store.inject_write_failure(true);
        assert!(matches!(store.set("k", &2).await, Err(Error::SimulatedFailure)));
        store.inject_write_failure(false);
        let value: i32 = store.get("k", 0).await.unwrap();
        assert_eq!(value, 1);
    }

    #[tokio::test]
    async fn test_batch_commits_every_key() {
        let store = Store::in_memory();
        store.set("a", &1).await.unwrap();

        let mut batch = WriteBatch::default();
        batch.put("a", &2).unwrap();
        batch.put("b", &vec!["x"]).unwrap();
        batch.put("a", &3).unwrap();
        store.commit(batch).await.unwrap();

        let a: i32 = store.get("a", 0).await.unwrap();
        let b: Vec<String> = store.get("b", Vec::new()).await.unwrap();
        assert_eq!(a, 3);
        assert_eq!(b, vec!["x"]);
    }

    #[tokio::test]
    async fn test_injected_failure_rejects_whole_batch() {
        let store = Store::in_memory();
        store.inject_write_failure(true);
        let mut batch = WriteBatch::default();
        batch.put("a", &1).unwrap();
        batch.put("b", &2).unwrap();
        assert!(matches!(store.commit(batch).await, Err(Error::SimulatedFailure)));
        store.inject_write_failure(false);

        assert!(!store.contains("a").await.unwrap());
        assert!(!store.contains("b").await.unwrap());
    }

    #[tokio::test]
    async fn test_corrupt_blob_is_an_error() {
        let backend = Arc::new(MemoryStore::new());
        backend.write("k", "not json".to_string()).await.unwrap();
        let store = Store::new(backend);
        let result: Result<Vec<i32>> = store.get("k", Vec::new()).await;
        assert!(matches!(result, Err(Error::Serialization(_))));
    }
}
