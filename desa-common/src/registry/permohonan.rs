//! Change-request workflow
//!
//! A request proposes one new value for one text field of a resident. It is
//! created Menunggu and decided exactly once; approval writes the value onto
//! the resident if the resident still exists.

use super::{ActivityLog, WriteLock};
use crate::ids;
use crate::models::{Permohonan, PermohonanInput, PermohonanStatus, Warga};
use crate::store::{keys, Collection, Store, WriteBatch};
use crate::time::now_rfc3339;
use crate::{Error, Result};
use tracing::{info, warn};

#[derive(Clone)]
pub struct PermohonanWorkflow {
    store: Store,
    permohonan: Collection<Permohonan>,
    warga: Collection<Warga>,
    log: ActivityLog,
    lock: WriteLock,
}

impl PermohonanWorkflow {
    pub(crate) fn new(store: &Store, log: ActivityLog, lock: WriteLock) -> Self {
        Self {
            store: store.clone(),
            permohonan: Collection::new(store.clone(), keys::PERMOHONAN),
            warga: Collection::new(store.clone(), keys::WARGA),
            log,
            lock,
        }
    }

    pub async fn list(&self) -> Result<Vec<Permohonan>> {
        self.permohonan.all().await
    }

    pub async fn get(&self, id: &str) -> Result<Permohonan> {
        self.permohonan.get(id).await
    }

    /// File a new pending request, capturing the field's current value
    pub async fn submit(&self, input: PermohonanInput) -> Result<Permohonan> {
        input.field.validate(&input.data_baru)?;
        let _guard = self.lock.lock().await;

        let warga = self.warga.get(&input.warga_id).await?;
        let permohonan = Permohonan {
            id: ids::mint("permohonan"),
            warga_id: warga.id.clone(),
            warga_nama: warga.nama.clone(),
            field: input.field,
            data_lama: warga.field(input.field).to_string(),
            data_baru: input.data_baru,
            tanggal: now_rfc3339(),
            status: PermohonanStatus::Menunggu,
        };
        let permohonan = self.permohonan.prepend(permohonan).await?;

        info!(
            "Submitted permohonan {} for warga {} ({})",
            permohonan.id, permohonan.warga_id, permohonan.field
        );
        self.log
            .record(format!(
                "Menambahkan permohonan perubahan data untuk {}.",
                permohonan.warga_nama
            ))
            .await;
        Ok(permohonan)
    }

    /// Decide a pending request
    ///
    /// Approval overwrites the named field on the resident; a deleted resident
    /// is skipped and the request is still approved. The resident and the
    /// request are committed together. Deciding a request that is already
    /// decided fails and changes nothing.
    pub async fn set_status(&self, id: &str, status: PermohonanStatus) -> Result<Permohonan> {
        let _guard = self.lock.lock().await;

        let mut requests = self.permohonan.all().await?;
        let request = requests
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::NotFound(format!("Permohonan {}", id)))?;
        request.transition(status)?;
        let request = request.clone();

        let mut batch = WriteBatch::default();
        let mut applied = false;
        if status == PermohonanStatus::Disetujui {
            let mut warga = self.warga.all().await?;
            match warga.iter_mut().find(|w| w.id == request.warga_id) {
                Some(target) => {
                    target.set_field(request.field, &request.data_baru)?;
                    self.warga.stage(&mut batch, &warga)?;
                    applied = true;
                }
                None => warn!(
                    "Permohonan {} approved but warga {} no longer exists",
                    request.id, request.warga_id
                ),
            }
        }
        self.permohonan.stage(&mut batch, &requests)?;
        self.store.commit(batch).await?;

        if applied {
            info!(
                "Applied permohonan {}: warga {} {} = {:?}",
                request.id, request.warga_id, request.field, request.data_baru
            );
        }

        self.log
            .record(format!(
                "Memproses permohonan data untuk {} menjadi '{}'.",
                request.warga_nama, request.status
            ))
            .await;
        Ok(request)
    }
}
