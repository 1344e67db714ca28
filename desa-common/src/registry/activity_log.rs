//! Activity log recorder
//!
//! Newest entry first, never more than [`MAX_ENTRIES`] entries.

use crate::ids;
use crate::models::LogAktivitas;
use crate::store::{keys, Store};
use crate::time::now_rfc3339;
use crate::Result;
use tracing::{info, warn};

pub const MAX_ENTRIES: usize = 100;

/// Actor stamped on every entry (single admin role)
pub const PENGGUNA: &str = "admin";

#[derive(Clone)]
pub struct ActivityLog {
    store: Store,
}

impl ActivityLog {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Full log, newest first
    pub async fn list(&self) -> Result<Vec<LogAktivitas>> {
        self.store.get(keys::LOG_AKTIVITAS, Vec::new()).await
    }

    /// Prepend an entry and truncate to the newest [`MAX_ENTRIES`]
    pub async fn append(&self, aktivitas: impl Into<String>) -> Result<LogAktivitas> {
        let entry = LogAktivitas {
            id: ids::mint("log"),
            tanggal: now_rfc3339(),
            pengguna: PENGGUNA.to_string(),
            aktivitas: aktivitas.into(),
        };

        let mut logs = self.list().await?;
        logs.insert(0, entry.clone());
        logs.truncate(MAX_ENTRIES);
        self.store.set(keys::LOG_AKTIVITAS, &logs).await?;

        info!(target: "desa_common::aktivitas", "{}", entry.aktivitas);
        Ok(entry)
    }

    /// Append after a mutation has already been persisted
    ///
    /// The mutation stands even if the log write fails, so the failure is
    /// only reported.
    pub(crate) async fn record(&self, aktivitas: impl Into<String>) {
        if let Err(e) = self.append(aktivitas).await {
            warn!("Failed to record activity log entry: {}", e);
        }
    }
}
