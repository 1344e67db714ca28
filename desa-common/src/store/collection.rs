//! Typed repository over one stored collection
//!
//! A collection is a JSON array persisted under one key. Every mutation reads
//! the whole array, changes it in memory and writes the whole array back.

use super::{Store, WriteBatch};
use crate::{Error, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;

/// An entity with a string identity
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Human-readable entity name used in NotFound messages
    const KIND: &'static str;

    fn id(&self) -> &str;
}

/// Typed access to the collection stored under `key`
#[derive(Clone)]
pub struct Collection<T> {
    store: Store,
    key: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Record> Collection<T> {
    pub fn new(store: Store, key: &'static str) -> Self {
        Self {
            store,
            key,
            _marker: PhantomData,
        }
    }

    /// Entire collection in stored order
    pub async fn all(&self) -> Result<Vec<T>> {
        self.store.get(self.key, Vec::new()).await
    }

    pub async fn find(&self, id: &str) -> Result<Option<T>> {
        Ok(self.all().await?.into_iter().find(|r| r.id() == id))
    }

    /// Like [`find`](Self::find) but absent is [`Error::NotFound`]
    pub async fn get(&self, id: &str) -> Result<T> {
        self.find(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("{} {}", T::KIND, id)))
    }

    /// Replace the whole collection
    pub async fn save_all(&self, records: &[T]) -> Result<()> {
        self.store.set(self.key, records).await
    }

    /// Stage the whole collection into `batch` instead of writing it now
    pub fn stage(&self, batch: &mut WriteBatch, records: &[T]) -> Result<()> {
        batch.put(self.key, records)
    }

    /// Add a record at the front (newest first)
    pub async fn prepend(&self, record: T) -> Result<T> {
        let mut records = self.all().await?;
        records.insert(0, record.clone());
        self.save_all(&records).await?;
        Ok(record)
    }

    /// Add a record at the end
    pub async fn append(&self, record: T) -> Result<T> {
        let mut records = self.all().await?;
        records.push(record.clone());
        self.save_all(&records).await?;
        Ok(record)
    }

    /// Replace the record with the same id; absent is [`Error::NotFound`]
    pub async fn replace(&self, record: T) -> Result<T> {
        let mut records = self.all().await?;
        let slot = records
            .iter_mut()
            .find(|r| r.id() == record.id())
            .ok_or_else(|| Error::not_found(format!("{} {}", T::KIND, record.id())))?;
        *slot = record.clone();
        self.save_all(&records).await?;
        Ok(record)
    }

    /// Remove the record with `id`, returning it; absent is [`Error::NotFound`]
    pub async fn remove(&self, id: &str) -> Result<T> {
        let mut records = self.all().await?;
        let index = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| Error::not_found(format!("{} {}", T::KIND, id)))?;
        let removed = records.remove(index);
        self.save_all(&records).await?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: String,
        n: i32,
    }

    impl Record for Item {
        const KIND: &'static str = "Item";

        fn id(&self) -> &str {
            &self.id
        }
    }

    fn item(id: &str, n: i32) -> Item {
        Item { id: id.to_string(), n }
    }

    #[tokio::test]
    async fn test_prepend_and_append_order() {
        let items = Collection::<Item>::new(Store::in_memory(), "items");
        items.append(item("a", 1)).await.unwrap();
        items.prepend(item("b", 2)).await.unwrap();
        items.append(item("c", 3)).await.unwrap();
        let ids: Vec<String> = items.all().await.unwrap().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_replace_and_remove() {
        let items = Collection::<Item>::new(Store::in_memory(), "items");
        items.append(item("a", 1)).await.unwrap();
        items.replace(item("a", 5)).await.unwrap();
        assert_eq!(items.get("a").await.unwrap().n, 5);

        assert!(matches!(items.replace(item("z", 0)).await, Err(Error::NotFound(_))));
        assert!(matches!(items.remove("z").await, Err(Error::NotFound(_))));

        assert_eq!(items.remove("a").await.unwrap().n, 5);
        assert!(items.all().await.unwrap().is_empty());
    }
}
