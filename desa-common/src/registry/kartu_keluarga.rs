//! Family-card registry and QR import reconciler
//!
//! The card ↔ resident relationship is stored on both sides: the card lists
//! `anggota_ids`, every member carries `kartu_keluarga_id`. Both sides are
//! updated here and nowhere else.

use super::{ActivityLog, WriteLock};
use crate::ids;
use crate::models::{KartuKeluarga, KkImport, KkImportOutcome, Warga};
use crate::store::{keys, Collection, Store, WriteBatch};
use crate::{Error, Result};
use tracing::{info, warn};

#[derive(Clone)]
pub struct KartuKeluargaRegistry {
    store: Store,
    kartu: Collection<KartuKeluarga>,
    warga: Collection<Warga>,
    log: ActivityLog,
    lock: WriteLock,
}

impl KartuKeluargaRegistry {
    pub(crate) fn new(store: &Store, log: ActivityLog, lock: WriteLock) -> Self {
        Self {
            store: store.clone(),
            kartu: Collection::new(store.clone(), keys::KARTU_KELUARGA),
            warga: Collection::new(store.clone(), keys::WARGA),
            log,
            lock,
        }
    }

    pub async fn list(&self) -> Result<Vec<KartuKeluarga>> {
        self.kartu.all().await
    }

    pub async fn get(&self, id: &str) -> Result<KartuKeluarga> {
        self.kartu.get(id).await
    }

    /// Residents listed on a card, in card order
    pub async fn anggota(&self, id: &str) -> Result<Vec<Warga>> {
        let kartu = self.kartu.get(id).await?;
        let warga = self.warga.all().await?;
        Ok(kartu
            .anggota_ids
            .iter()
            .filter_map(|wid| warga.iter().find(|w| &w.id == wid).cloned())
            .collect())
    }

    /// Integrate a scanned family card
    ///
    /// Members are matched to existing residents by NIK; unmatched members
    /// become new residents. The head must be one of the members. Nothing is
    /// written unless every check passes, and the card and its members are
    /// committed together.
    pub async fn import(&self, import: KkImport) -> Result<KkImportOutcome> {
        let _guard = self.lock.lock().await;

        let mut kartu = self.kartu.all().await?;
        if kartu.iter().any(|k| k.nomor_kk == import.nomor_kk) {
            return Err(Error::Duplicate(format!(
                "Kartu Keluarga dengan nomor {} sudah terdaftar.",
                import.nomor_kk
            )));
        }
        import.validate()?;

        let mut warga = self.warga.all().await?;
        let mut anggota_ids: Vec<String> = Vec::with_capacity(import.anggota.len());
        let mut warga_baru = 0;

        for payload in &import.anggota {
            let id = match warga.iter().find(|w| w.nik == payload.nik) {
                Some(existing) => existing.id.clone(),
                None => {
                    let created = Warga::from_input(ids::mint("warga"), payload.clone());
                    let id = created.id.clone();
                    warga.push(created);
                    warga_baru += 1;
                    id
                }
            };
            // Repeated NIKs in one card resolve to the same resident
            if !anggota_ids.contains(&id) {
                anggota_ids.push(id);
            }
        }

        let kepala = warga
            .iter()
            .find(|w| w.nik == import.kepala_keluarga.nik && anggota_ids.contains(&w.id))
            .ok_or_else(|| Error::HeadNotFound {
                nik: import.kepala_keluarga.nik.clone(),
            })?;
        let kepala_nama = kepala.nama.clone();

        let card = KartuKeluarga::new(
            ids::mint("kk"),
            &import,
            kepala.id.clone(),
            anggota_ids.clone(),
        );

        for w in warga.iter_mut().filter(|w| anggota_ids.contains(&w.id)) {
            if let Some(previous) = w.kartu_keluarga_id.as_deref() {
                warn!(
                    "Warga {} moves from kartu keluarga {} to {}",
                    w.id, previous, card.id
                );
            }
            w.kartu_keluarga_id = Some(card.id.clone());
        }

        kartu.insert(0, card.clone());
        let mut batch = WriteBatch::default();
        self.kartu.stage(&mut batch, &kartu)?;
        self.warga.stage(&mut batch, &warga)?;
        self.store.commit(batch).await?;

        info!(
            "Imported kartu keluarga {} ({} members, {} new residents)",
            card.nomor_kk,
            anggota_ids.len(),
            warga_baru
        );
        self.log
            .record(format!(
                "Menambahkan Kartu Keluarga baru dari QR ({}) an. {}.",
                card.nomor_kk, kepala_nama
            ))
            .await;

        let anggota = anggota_ids
            .iter()
            .filter_map(|id| warga.iter().find(|w| &w.id == id).cloned())
            .collect();

        Ok(KkImportOutcome {
            kartu_keluarga: card,
            anggota,
            warga_baru,
        })
    }

    /// Remove a card and clear the back-reference of every resident that
    /// points at it; the residents themselves stay
    pub async fn delete(&self, id: &str) -> Result<KartuKeluarga> {
        let _guard = self.lock.lock().await;

        let mut kartu = self.kartu.all().await?;
        let index = kartu
            .iter()
            .position(|k| k.id == id)
            .ok_or_else(|| Error::not_found(format!("Kartu Keluarga {}", id)))?;
        let removed = kartu.remove(index);

        let mut warga = self.warga.all().await?;
        let mut unlinked = 0;
        for w in warga
            .iter_mut()
            .filter(|w| w.kartu_keluarga_id.as_deref() == Some(id))
        {
            w.kartu_keluarga_id = None;
            unlinked += 1;
        }
        let mut batch = WriteBatch::default();
        self.kartu.stage(&mut batch, &kartu)?;
        if unlinked > 0 {
            self.warga.stage(&mut batch, &warga)?;
        }
        self.store.commit(batch).await?;

        info!(
            "Deleted kartu keluarga {} ({} residents unlinked)",
            removed.nomor_kk, unlinked
        );
        self.log
            .record(format!("Menghapus Kartu Keluarga: {}.", removed.nomor_kk))
            .await;
        Ok(removed)
    }
}
