//! Change requests (permohonan) and their status state machine

use super::warga::WargaField;
use crate::store::Record;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pending → {Disetujui, Ditolak}; both outcomes are terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermohonanStatus {
    Menunggu,
    Disetujui,
    Ditolak,
}

impl PermohonanStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            PermohonanStatus::Menunggu => "Menunggu",
            PermohonanStatus::Disetujui => "Disetujui",
            PermohonanStatus::Ditolak => "Ditolak",
        }
    }

    pub const fn is_terminal(self) -> bool {
        !matches!(self, PermohonanStatus::Menunggu)
    }

    /// Only Menunggu→Disetujui and Menunggu→Ditolak are legal
    pub const fn can_transition_to(self, to: PermohonanStatus) -> bool {
        matches!(
            (self, to),
            (PermohonanStatus::Menunggu, PermohonanStatus::Disetujui)
                | (PermohonanStatus::Menunggu, PermohonanStatus::Ditolak)
        )
    }
}

impl fmt::Display for PermohonanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permohonan {
    pub id: String,
    pub warga_id: String,
    /// Resident name at submission time
    pub warga_nama: String,
    pub field: WargaField,
    pub data_lama: String,
    pub data_baru: String,
    pub tanggal: String,
    pub status: PermohonanStatus,
}

impl Record for Permohonan {
    const KIND: &'static str = "Permohonan";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Permohonan {
    /// Move to `to`, rejecting any transition the state machine forbids
    pub fn transition(&mut self, to: PermohonanStatus) -> Result<()> {
        if !self.status.can_transition_to(to) {
            return Err(Error::InvalidTransition {
                id: self.id.clone(),
                from: self.status.to_string(),
                to: to.to_string(),
            });
        }
        self.status = to;
        Ok(())
    }
}

/// Submission payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermohonanInput {
    pub warga_id: String,
    pub field: WargaField,
    pub data_baru: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending() -> Permohonan {
        Permohonan {
            id: "permohonan-1".to_string(),
            warga_id: "warga-1".to_string(),
            warga_nama: "Budi".to_string(),
            field: WargaField::Pekerjaan,
            data_lama: "Petani".to_string(),
            data_baru: "Penjahit".to_string(),
            tanggal: "2024-05-20T09:00:00Z".to_string(),
            status: PermohonanStatus::Menunggu,
        }
    }

    #[test]
    fn test_pending_to_terminal() {
        let mut p = pending();
        p.transition(PermohonanStatus::Disetujui).unwrap();
        assert_eq!(p.status, PermohonanStatus::Disetujui);

        let mut p = pending();
        p.transition(PermohonanStatus::Ditolak).unwrap();
        assert_eq!(p.status, PermohonanStatus::Ditolak);
    }

    #[test]
    fn test_terminal_states_reject_every_transition() {
        for from in [PermohonanStatus::Disetujui, PermohonanStatus::Ditolak] {
            for to in [
                PermohonanStatus::Menunggu,
                PermohonanStatus::Disetujui,
                PermohonanStatus::Ditolak,
            ] {
                let mut p = pending();
                p.status = from;
                assert!(matches!(p.transition(to), Err(Error::InvalidTransition { .. })));
                assert_eq!(p.status, from);
            }
        }
    }

    #[test]
    fn test_pending_to_pending_rejected() {
        let mut p = pending();
        assert!(p.transition(PermohonanStatus::Menunggu).is_err());
    }

    #[test]
    fn test_status_serializes_as_stored_string() {
        let json = serde_json::to_value(pending()).unwrap();
        assert_eq!(json["status"], "Menunggu");
        assert_eq!(json["field"], "pekerjaan");
        assert_eq!(json["dataBaru"], "Penjahit");
    }
}
