//! Village info singleton

use super::warga::require;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Hamlet; renames are matched by `id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dusun {
    pub id: String,
    pub nama: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoDesa {
    pub nama_desa: String,
    pub kepala_desa: String,
    pub dusun: Vec<Dusun>,
    /// Connection key for an external consumer; never interpreted here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl InfoDesa {
    pub fn validate(&self) -> Result<()> {
        require("namaDesa", &self.nama_desa)?;
        self.dusun.iter().try_for_each(|d| {
            require("id dusun", &d.id)?;
            require("nama dusun", &d.nama)
        })
    }
}
