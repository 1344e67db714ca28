//! Resident registry
//!
//! Owns the authoritative copy of each resident. Deleting a resident also
//! drops their document set.

use super::{ActivityLog, WriteLock};
use crate::ids;
use crate::models::{Adminduk, Warga, WargaInput};
use crate::store::{keys, Collection, Store, WriteBatch};
use crate::{Error, Result};
use tracing::info;

#[derive(Clone)]
pub struct WargaRegistry {
    store: Store,
    warga: Collection<Warga>,
    adminduk: Collection<Adminduk>,
    log: ActivityLog,
    lock: WriteLock,
}

impl WargaRegistry {
    pub(crate) fn new(store: &Store, log: ActivityLog, lock: WriteLock) -> Self {
        Self {
            store: store.clone(),
            warga: Collection::new(store.clone(), keys::WARGA),
            adminduk: Collection::new(store.clone(), keys::ADMINDUK),
            log,
            lock,
        }
    }

    pub async fn list(&self) -> Result<Vec<Warga>> {
        self.warga.all().await
    }

    pub async fn get(&self, id: &str) -> Result<Warga> {
        self.warga.get(id).await
    }

    pub async fn find_by_nik(&self, nik: &str) -> Result<Option<Warga>> {
        Ok(self.warga.all().await?.into_iter().find(|w| w.nik == nik))
    }

    /// Register a new resident with no aid eligibility
    pub async fn add(&self, input: WargaInput) -> Result<Warga> {
        input.validate()?;
        let _guard = self.lock.lock().await;

        let warga = self
            .warga
            .append(Warga::from_input(ids::mint("warga"), input))
            .await?;

        info!("Added warga {} ({})", warga.id, warga.nama);
        self.log
            .record(format!("Menambahkan warga baru: {}", warga.nama))
            .await;
        Ok(warga)
    }

    /// Replace a resident in full
    pub async fn update(&self, id: &str, mut warga: Warga) -> Result<Warga> {
        warga.id = id.to_string();
        warga.validate()?;
        let _guard = self.lock.lock().await;

        let warga = self.warga.replace(warga).await?;

        info!("Updated warga {}", warga.id);
        self.log
            .record(format!("Memperbarui data warga: {}", warga.nama))
            .await;
        Ok(warga)
    }

    /// Remove a resident together with their document set
    pub async fn delete(&self, id: &str) -> Result<Warga> {
        let _guard = self.lock.lock().await;

        let mut warga = self.warga.all().await?;
        let index = warga
            .iter()
            .position(|w| w.id == id)
            .ok_or_else(|| Error::not_found(format!("Warga {}", id)))?;
        let removed = warga.remove(index);

        let mut sets = self.adminduk.all().await?;
        let before = sets.len();
        sets.retain(|a| a.id != id);

        let mut batch = WriteBatch::default();
        self.warga.stage(&mut batch, &warga)?;
        if sets.len() != before {
            self.adminduk.stage(&mut batch, &sets)?;
        }
        self.store.commit(batch).await?;

        info!("Deleted warga {}", id);
        self.log
            .record(format!("Menghapus warga: {}", removed.nama))
            .await;
        Ok(removed)
    }
}
