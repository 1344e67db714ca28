//! Announcements

use super::warga::require;
use crate::store::Record;
use crate::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pengumuman {
    pub id: String,
    pub judul: String,
    pub isi: String,
    /// Publication time, RFC 3339; kept across edits
    pub tanggal: String,
}

impl Record for Pengumuman {
    const KIND: &'static str = "Pengumuman";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PengumumanInput {
    pub judul: String,
    #[serde(default)]
    pub isi: String,
}

impl PengumumanInput {
    pub fn validate(&self) -> Result<()> {
        require("judul", &self.judul)
    }
}
