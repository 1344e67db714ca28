//! Family card (kartu keluarga) records

use super::warga::{require, Warga, WargaInput};
use crate::store::Record;
use crate::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KartuKeluarga {
    pub id: String,
    #[serde(rename = "nomorKK")]
    pub nomor_kk: String,
    /// Always one of `anggota_ids`
    pub kepala_keluarga_id: String,
    pub alamat: String,
    pub anggota_ids: Vec<String>,
    pub tanggal_cetak: String,
}

impl Record for KartuKeluarga {
    const KIND: &'static str = "Kartu Keluarga";

    fn id(&self) -> &str {
        &self.id
    }
}

impl KartuKeluarga {
    pub fn new(
        id: String,
        import: &KkImport,
        kepala_keluarga_id: String,
        anggota_ids: Vec<String>,
    ) -> Self {
        Self {
            id,
            nomor_kk: import.nomor_kk.clone(),
            kepala_keluarga_id,
            alamat: import.alamat.clone(),
            anggota_ids,
            tanggal_cetak: import.tanggal_cetak.clone(),
        }
    }

    pub fn has_anggota(&self, warga_id: &str) -> bool {
        self.anggota_ids.iter().any(|id| id == warga_id)
    }
}

/// Family card as decoded from a scanned QR code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KkImport {
    #[serde(rename = "nomorKK")]
    pub nomor_kk: String,
    pub kepala_keluarga: WargaInput,
    pub anggota: Vec<WargaInput>,
    #[serde(default)]
    pub alamat: String,
    #[serde(default)]
    pub tanggal_cetak: String,
}

impl KkImport {
    /// Card number, head NIK and every member payload must be present
    pub fn validate(&self) -> Result<()> {
        require("nomorKK", &self.nomor_kk)?;
        require("nik kepala keluarga", &self.kepala_keluarga.nik)?;
        if self.anggota.is_empty() {
            return Err(crate::Error::validation("anggota tidak boleh kosong"));
        }
        self.anggota.iter().try_for_each(WargaInput::validate)
    }
}

/// Result of a successful import
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KkImportOutcome {
    pub kartu_keluarga: KartuKeluarga,
    /// Every member as persisted, back-reference included
    pub anggota: Vec<Warga>,
    /// How many members were new residents
    pub warga_baru: usize,
}
