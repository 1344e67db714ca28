//! Small-business (UMKM) directory entries

use super::warga::require;
use crate::store::Record;
use crate::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Umkm {
    pub id: String,
    pub nama_usaha: String,
    pub pemilik_id: String,
    pub jenis_usaha: String,
    pub deskripsi: String,
    /// Base64 data URL
    pub foto_url: String,
}

impl Record for Umkm {
    const KIND: &'static str = "UMKM";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UmkmInput {
    pub nama_usaha: String,
    #[serde(default)]
    pub pemilik_id: String,
    #[serde(default)]
    pub jenis_usaha: String,
    #[serde(default)]
    pub deskripsi: String,
    #[serde(default)]
    pub foto_url: String,
}

impl UmkmInput {
    pub fn validate(&self) -> Result<()> {
        require("namaUsaha", &self.nama_usaha)
    }
}

impl Umkm {
    pub fn from_input(id: String, input: UmkmInput) -> Self {
        Self {
            id,
            nama_usaha: input.nama_usaha,
            pemilik_id: input.pemilik_id,
            jenis_usaha: input.jenis_usaha,
            deskripsi: input.deskripsi,
            foto_url: input.foto_url,
        }
    }

    pub fn validate(&self) -> Result<()> {
        require("namaUsaha", &self.nama_usaha)
    }
}
