//! Announcements

use super::{ActivityLog, WriteLock};
use crate::ids;
use crate::models::{Pengumuman, PengumumanInput};
use crate::store::{keys, Collection, Store};
use crate::time::now_rfc3339;
use crate::Result;
use tracing::info;

#[derive(Clone)]
pub struct PengumumanRegistry {
    pengumuman: Collection<Pengumuman>,
    log: ActivityLog,
    lock: WriteLock,
}

impl PengumumanRegistry {
    pub(crate) fn new(store: &Store, log: ActivityLog, lock: WriteLock) -> Self {
        Self {
            pengumuman: Collection::new(store.clone(), keys::PENGUMUMAN),
            log,
            lock,
        }
    }

    pub async fn list(&self) -> Result<Vec<Pengumuman>> {
        self.pengumuman.all().await
    }

    /// Publish now
    pub async fn add(&self, input: PengumumanInput) -> Result<Pengumuman> {
        input.validate()?;
        let _guard = self.lock.lock().await;

        let pengumuman = self
            .pengumuman
            .prepend(Pengumuman {
                id: ids::mint("pengumuman"),
                judul: input.judul,
                isi: input.isi,
                tanggal: now_rfc3339(),
            })
            .await?;

        info!("Published pengumuman {}", pengumuman.id);
        self.log
            .record(format!("Menerbitkan pengumuman baru: \"{}\"", pengumuman.judul))
            .await;
        Ok(pengumuman)
    }

    /// Change title and body; the publication date stays
    pub async fn update(&self, id: &str, input: PengumumanInput) -> Result<Pengumuman> {
        input.validate()?;
        let _guard = self.lock.lock().await;

        let mut pengumuman = self.pengumuman.get(id).await?;
        pengumuman.judul = input.judul;
        pengumuman.isi = input.isi;
        let pengumuman = self.pengumuman.replace(pengumuman).await?;

        info!("Updated pengumuman {}", pengumuman.id);
        self.log
            .record(format!("Memperbarui pengumuman: \"{}\"", pengumuman.judul))
            .await;
        Ok(pengumuman)
    }

    pub async fn delete(&self, id: &str) -> Result<Pengumuman> {
        let _guard = self.lock.lock().await;

        let removed = self.pengumuman.remove(id).await?;

        info!("Deleted pengumuman {}", id);
        self.log
            .record(format!("Menghapus pengumuman: \"{}\"", removed.judul))
            .await;
        Ok(removed)
    }
}
