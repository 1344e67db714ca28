//! Village info singleton and its connection key

use super::{ActivityLog, WriteLock};
use crate::models::{InfoDesa, Warga};
use crate::store::{keys, Collection, Store, WriteBatch};
use crate::time::now_millis;
use crate::Result;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::collections::HashMap;
use tracing::info;

/// Prefix of every generated connection key
pub const API_KEY_PREFIX: &str = "desa_skm_";

#[derive(Clone)]
pub struct InfoDesaRegistry {
    store: Store,
    warga: Collection<Warga>,
    log: ActivityLog,
    lock: WriteLock,
}

impl InfoDesaRegistry {
    pub(crate) fn new(store: &Store, log: ActivityLog, lock: WriteLock) -> Self {
        Self {
            store: store.clone(),
            warga: Collection::new(store.clone(), keys::WARGA),
            log,
            lock,
        }
    }

    pub async fn get(&self) -> Result<InfoDesa> {
        self.store.get(keys::INFO_DESA, InfoDesa::default()).await
    }

    /// Replace the village info
    ///
    /// The stored API key is kept whatever the payload says. A hamlet whose
    /// name changed (matched by id) is renamed on every resident too, in the
    /// same commit as the info itself.
    pub async fn update(&self, info: InfoDesa) -> Result<InfoDesa> {
        info.validate()?;
        let _guard = self.lock.lock().await;

        let old = self.get().await?;
        let renamed: HashMap<String, String> = old
            .dusun
            .iter()
            .filter_map(|before| {
                info.dusun
                    .iter()
                    .find(|after| after.id == before.id && after.nama != before.nama)
                    .map(|after| (before.nama.clone(), after.nama.clone()))
            })
            .collect();

        let updated = InfoDesa {
            api_key: old.api_key,
            ..info
        };
        let mut batch = WriteBatch::default();
        batch.put(keys::INFO_DESA, &updated)?;

        let mut moved = 0;
        if !renamed.is_empty() {
            let mut warga = self.warga.all().await?;
            for w in warga.iter_mut() {
                if let Some(nama) = renamed.get(&w.dusun) {
                    w.dusun = nama.clone();
                    moved += 1;
                }
            }
            self.warga.stage(&mut batch, &warga)?;
        }
        self.store.commit(batch).await?;

        if !renamed.is_empty() {
            info!("Renamed {} dusun across {} residents", renamed.len(), moved);
        }

        self.log.record("Memperbarui informasi desa.").await;
        Ok(updated)
    }

    /// Issue a fresh connection key, replacing any existing one
    pub async fn generate_api_key(&self) -> Result<InfoDesa> {
        let _guard = self.lock.lock().await;

        let mut info = self.get().await?;
        info.api_key = Some(new_api_key());
        self.store.set(keys::INFO_DESA, &info).await?;

        info!("Generated new API key");
        self.log.record("Membuat Kode Koneksi (API Key) baru.").await;
        Ok(info)
    }

    pub async fn revoke_api_key(&self) -> Result<InfoDesa> {
        let _guard = self.lock.lock().await;

        let mut info = self.get().await?;
        info.api_key = None;
        self.store.set(keys::INFO_DESA, &info).await?;

        info!("Revoked API key");
        self.log.record("Mencabut Kode Koneksi (API Key).").await;
        Ok(info)
    }
}

fn new_api_key() -> String {
    let random: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    format!("{}{}{}", API_KEY_PREFIX, random, to_base36(now_millis().unsigned_abs()))
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
