//! Small-business directory

use super::{ActivityLog, WriteLock};
use crate::ids;
use crate::models::{Umkm, UmkmInput};
use crate::store::{keys, Collection, Store};
use crate::Result;
use tracing::info;

#[derive(Clone)]
pub struct UmkmRegistry {
    umkm: Collection<Umkm>,
    log: ActivityLog,
    lock: WriteLock,
}

impl UmkmRegistry {
    pub(crate) fn new(store: &Store, log: ActivityLog, lock: WriteLock) -> Self {
        Self {
            umkm: Collection::new(store.clone(), keys::UMKM),
            log,
            lock,
        }
    }

    pub async fn list(&self) -> Result<Vec<Umkm>> {
        self.umkm.all().await
    }

    pub async fn add(&self, input: UmkmInput) -> Result<Umkm> {
        input.validate()?;
        let _guard = self.lock.lock().await;

        let umkm = self
            .umkm
            .prepend(Umkm::from_input(ids::mint("umkm"), input))
            .await?;

        info!("Added umkm {}", umkm.id);
        self.log
            .record(format!("Menambahkan UMKM baru: \"{}\"", umkm.nama_usaha))
            .await;
        Ok(umkm)
    }

    pub async fn update(&self, id: &str, mut umkm: Umkm) -> Result<Umkm> {
        umkm.id = id.to_string();
        umkm.validate()?;
        let _guard = self.lock.lock().await;

        let umkm = self.umkm.replace(umkm).await?;

        info!("Updated umkm {}", umkm.id);
        self.log
            .record(format!("Memperbarui data UMKM: \"{}\"", umkm.nama_usaha))
            .await;
        Ok(umkm)
    }

    pub async fn delete(&self, id: &str) -> Result<Umkm> {
        let _guard = self.lock.lock().await;

        let removed = self.umkm.remove(id).await?;

        info!("Deleted umkm {}", id);
        self.log
            .record(format!("Menghapus UMKM: \"{}\"", removed.nama_usaha))
            .await;
        Ok(removed)
    }
}
