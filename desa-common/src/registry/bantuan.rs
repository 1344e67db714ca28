//! Social-aid disbursements and yearly targets

use super::{ActivityLog, WriteLock};
use crate::ids;
use crate::models::{Bantuan, BantuanInput, RingkasanBantuan, TargetBantuan, Warga};
use crate::store::{keys, Collection, Store};
use crate::{Error, Result};
use std::collections::HashSet;
use tracing::info;

#[derive(Clone)]
pub struct BantuanRegistry {
    store: Store,
    bantuan: Collection<Bantuan>,
    warga: Collection<Warga>,
    log: ActivityLog,
    lock: WriteLock,
}

impl BantuanRegistry {
    pub(crate) fn new(store: &Store, log: ActivityLog, lock: WriteLock) -> Self {
        Self {
            store: store.clone(),
            bantuan: Collection::new(store.clone(), keys::BANTUAN),
            warga: Collection::new(store.clone(), keys::WARGA),
            log,
            lock,
        }
    }

    pub async fn list(&self) -> Result<Vec<Bantuan>> {
        self.bantuan.all().await
    }

    pub async fn add(&self, input: BantuanInput) -> Result<Bantuan> {
        input.validate()?;
        let _guard = self.lock.lock().await;

        let bantuan = self
            .bantuan
            .prepend(Bantuan::from_input(ids::mint("bantuan"), input))
            .await?;

        info!("Added bantuan {} for warga {}", bantuan.id, bantuan.warga_id);
        let penerima = self.nama_penerima(&bantuan.warga_id).await;
        self.log
            .record(format!("Menyalurkan bantuan {} kepada {}", bantuan.jenis, penerima))
            .await;
        Ok(bantuan)
    }

    pub async fn update(&self, id: &str, mut bantuan: Bantuan) -> Result<Bantuan> {
        bantuan.id = id.to_string();
        bantuan.validate()?;
        let _guard = self.lock.lock().await;

        let bantuan = self.bantuan.replace(bantuan).await?;

        info!("Updated bantuan {}", bantuan.id);
        let penerima = self.nama_penerima(&bantuan.warga_id).await;
        self.log
            .record(format!(
                "Memperbarui data bantuan {} untuk {}",
                bantuan.jenis, penerima
            ))
            .await;
        Ok(bantuan)
    }

    pub async fn delete(&self, id: &str) -> Result<Bantuan> {
        let _guard = self.lock.lock().await;

        let removed = self.bantuan.remove(id).await?;

        info!("Deleted bantuan {}", id);
        let penerima = self.nama_penerima(&removed.warga_id).await;
        self.log
            .record(format!(
                "Menghapus data bantuan {} untuk {}",
                removed.jenis, penerima
            ))
            .await;
        Ok(removed)
    }

    pub async fn targets(&self) -> Result<Vec<TargetBantuan>> {
        self.store.get(keys::TARGET_BANTUAN, Vec::new()).await
    }

    /// Insert or replace the target for `target.tahun`
    pub async fn set_target(&self, target: TargetBantuan) -> Result<TargetBantuan> {
        let _guard = self.lock.lock().await;

        let mut targets = self.targets().await?;
        match targets.iter_mut().find(|t| t.tahun == target.tahun) {
            Some(existing) => *existing = target.clone(),
            None => targets.push(target.clone()),
        }
        self.store.set(keys::TARGET_BANTUAN, &targets).await?;

        info!("Set bantuan target for {}", target.tahun);
        self.log
            .record(format!("Memperbarui target bantuan tahun {}.", target.tahun))
            .await;
        Ok(target)
    }

    /// Disbursements of one year against that year's target
    pub async fn ringkasan(&self, tahun: i32) -> Result<RingkasanBantuan> {
        let bantuan: Vec<Bantuan> = self
            .bantuan
            .all()
            .await?
            .into_iter()
            .filter(|b| b.tahun == tahun)
            .collect();
        let penerima: HashSet<&str> = bantuan.iter().map(|b| b.warga_id.as_str()).collect();
        let total_nominal = bantuan
            .iter()
            .try_fold(0i64, |total, b| total.checked_add(b.nominal))
            .ok_or_else(|| {
                Error::validation(format!(
                    "total nominal bantuan tahun {} melampaui batas",
                    tahun
                ))
            })?;
        let target = self.targets().await?.into_iter().find(|t| t.tahun == tahun);

        Ok(RingkasanBantuan {
            tahun,
            jumlah_penyaluran: bantuan.len(),
            total_nominal,
            jumlah_penerima: penerima.len(),
            target,
        })
    }

    async fn nama_penerima(&self, warga_id: &str) -> String {
        match self.warga.find(warga_id).await {
            Ok(Some(w)) => w.nama,
            _ => "N/A".to_string(),
        }
    }
}
