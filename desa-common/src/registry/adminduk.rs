//! Per-resident document sets

use super::{ActivityLog, WriteLock};
use crate::models::{Adminduk, Dokumen, JenisDokumen, Warga};
use crate::store::{keys, Collection, Store};
use crate::Result;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AdmindukRegistry {
    adminduk: Collection<Adminduk>,
    warga: Collection<Warga>,
    log: ActivityLog,
    lock: WriteLock,
}

impl AdmindukRegistry {
    pub(crate) fn new(store: &Store, log: ActivityLog, lock: WriteLock) -> Self {
        Self {
            adminduk: Collection::new(store.clone(), keys::ADMINDUK),
            warga: Collection::new(store.clone(), keys::WARGA),
            log,
            lock,
        }
    }

    /// Every document set, creating an empty one for residents without any
    pub async fn list(&self) -> Result<Vec<Adminduk>> {
        let _guard = self.lock.lock().await;

        let warga = self.warga.all().await?;
        let mut sets = self.adminduk.all().await?;
        let missing: Vec<Adminduk> = warga
            .iter()
            .filter(|w| !sets.iter().any(|a| a.id == w.id))
            .map(|w| Adminduk::kosong(w.id.clone()))
            .collect();

        if !missing.is_empty() {
            info!("Created {} empty document sets", missing.len());
            sets.extend(missing);
            self.adminduk.save_all(&sets).await?;
        }
        Ok(sets)
    }

    /// Store a document in one slot, replacing what was there
    pub async fn upload(
        &self,
        warga_id: &str,
        jenis: JenisDokumen,
        dokumen: Dokumen,
    ) -> Result<Adminduk> {
        dokumen.validate()?;
        let _guard = self.lock.lock().await;

        let warga = self.warga.get(warga_id).await?;
        let mut sets = self.adminduk.all().await?;
        let index = match sets.iter().position(|a| a.id == warga_id) {
            Some(index) => index,
            None => {
                sets.push(Adminduk::kosong(warga_id));
                sets.len() - 1
            }
        };
        *sets[index].slot_mut(jenis) = Some(dokumen);
        let updated = sets[index].clone();
        self.adminduk.save_all(&sets).await?;

        info!("Uploaded {} for warga {}", jenis, warga_id);
        self.log
            .record(format!(
                "Mengunggah dokumen '{}' untuk warga {}",
                jenis, warga.nama
            ))
            .await;
        Ok(updated)
    }

    /// Empty one slot; a resident without a document set is left alone
    pub async fn remove(&self, warga_id: &str, jenis: JenisDokumen) -> Result<Option<Adminduk>> {
        let _guard = self.lock.lock().await;

        let mut sets = self.adminduk.all().await?;
        let Some(set) = sets.iter_mut().find(|a| a.id == warga_id) else {
            warn!("No document set for warga {}, nothing to delete", warga_id);
            return Ok(None);
        };
        *set.slot_mut(jenis) = None;
        let updated = set.clone();
        self.adminduk.save_all(&sets).await?;

        info!("Deleted {} of warga {}", jenis, warga_id);
        let nama = match self.warga.find(warga_id).await {
            Ok(Some(w)) => w.nama,
            _ => "N/A".to_string(),
        };
        self.log
            .record(format!("Menghapus dokumen '{}' milik warga {}", jenis, nama))
            .await;
        Ok(Some(updated))
    }
}
