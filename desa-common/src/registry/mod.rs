//! Registries: every read and mutation of the stored collections
//!
//! Each registry owns a narrow, typed view of the collections it touches.
//! Mutations share one write lock, so the read-modify-write sequence of one
//! operation never interleaves with another inside this process.

mod activity_log;
mod adminduk;
mod bantuan;
mod info_desa;
mod kartu_keluarga;
mod pengumuman;
mod permohonan;
mod umkm;
mod warga;

pub use activity_log::{ActivityLog, MAX_ENTRIES as MAX_LOG_ENTRIES, PENGGUNA};
pub use adminduk::AdmindukRegistry;
pub use bantuan::BantuanRegistry;
pub use info_desa::{InfoDesaRegistry, API_KEY_PREFIX};
pub use kartu_keluarga::KartuKeluargaRegistry;
pub use pengumuman::PengumumanRegistry;
pub use permohonan::PermohonanWorkflow;
pub use umkm::UmkmRegistry;
pub use warga::WargaRegistry;

use crate::models::{
    Adminduk, Bantuan, InfoDesa, KartuKeluarga, LogAktivitas, Pengumuman, Permohonan,
    PermohonanStatus, RingkasanBantuan, TargetBantuan, Umkm, Warga,
};
use crate::store::Store;
use crate::time::now;
use crate::Result;
use chrono::Datelike;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;

pub(crate) type WriteLock = Arc<Mutex<()>>;

/// Every registry over one store
#[derive(Clone)]
pub struct DesaService {
    store: Store,
    pub log: ActivityLog,
    pub warga: WargaRegistry,
    pub kartu_keluarga: KartuKeluargaRegistry,
    pub permohonan: PermohonanWorkflow,
    pub bantuan: BantuanRegistry,
    pub pengumuman: PengumumanRegistry,
    pub umkm: UmkmRegistry,
    pub adminduk: AdmindukRegistry,
    pub info_desa: InfoDesaRegistry,
}

/// Every collection at once, as the dashboard loads them
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub warga: Vec<Warga>,
    pub kartu_keluarga: Vec<KartuKeluarga>,
    pub bantuan: Vec<Bantuan>,
    pub target_bantuan: Vec<TargetBantuan>,
    pub pengumuman: Vec<Pengumuman>,
    pub permohonan: Vec<Permohonan>,
    pub info_desa: InfoDesa,
    pub log_aktivitas: Vec<LogAktivitas>,
    pub umkm: Vec<Umkm>,
    pub adminduk: Vec<Adminduk>,
}

/// Headline figures for the dashboard
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ringkasan {
    pub nama_desa: String,
    pub jumlah_warga: usize,
    pub jumlah_kartu_keluarga: usize,
    pub jumlah_dusun: usize,
    pub jumlah_umkm: usize,
    pub jumlah_pengumuman: usize,
    pub permohonan_menunggu: usize,
    pub bantuan_tahun_ini: RingkasanBantuan,
}

impl DesaService {
    pub fn new(store: Store) -> Self {
        let lock: WriteLock = Arc::new(Mutex::new(()));
        let log = ActivityLog::new(store.clone());

        Self {
            warga: WargaRegistry::new(&store, log.clone(), lock.clone()),
            kartu_keluarga: KartuKeluargaRegistry::new(&store, log.clone(), lock.clone()),
            permohonan: PermohonanWorkflow::new(&store, log.clone(), lock.clone()),
            bantuan: BantuanRegistry::new(&store, log.clone(), lock.clone()),
            pengumuman: PengumumanRegistry::new(&store, log.clone(), lock.clone()),
            umkm: UmkmRegistry::new(&store, log.clone(), lock.clone()),
            adminduk: AdmindukRegistry::new(&store, log.clone(), lock.clone()),
            info_desa: InfoDesaRegistry::new(&store, log.clone(), lock),
            log,
            store,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Full reload of every collection
    pub async fn snapshot(&self) -> Result<Snapshot> {
        Ok(Snapshot {
            warga: self.warga.list().await?,
            kartu_keluarga: self.kartu_keluarga.list().await?,
            bantuan: self.bantuan.list().await?,
            target_bantuan: self.bantuan.targets().await?,
            pengumuman: self.pengumuman.list().await?,
            permohonan: self.permohonan.list().await?,
            info_desa: self.info_desa.get().await?,
            log_aktivitas: self.log.list().await?,
            umkm: self.umkm.list().await?,
            adminduk: self.adminduk.list().await?,
        })
    }

    pub async fn ringkasan(&self) -> Result<Ringkasan> {
        let info = self.info_desa.get().await?;
        let permohonan_menunggu = self
            .permohonan
            .list()
            .await?
            .iter()
            .filter(|p| p.status == PermohonanStatus::Menunggu)
            .count();

        Ok(Ringkasan {
            jumlah_warga: self.warga.list().await?.len(),
            jumlah_kartu_keluarga: self.kartu_keluarga.list().await?.len(),
            jumlah_dusun: info.dusun.len(),
            jumlah_umkm: self.umkm.list().await?.len(),
            jumlah_pengumuman: self.pengumuman.list().await?.len(),
            permohonan_menunggu,
            bantuan_tahun_ini: self.bantuan.ringkasan(now().year()).await?,
            nama_desa: info.nama_desa,
        })
    }
}
