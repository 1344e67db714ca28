//! Social-aid disbursements (bantuan) and yearly targets

use super::warga::require;
use crate::store::Record;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JenisBantuan {
    #[serde(rename = "BLT")]
    Blt,
    #[serde(rename = "PKH")]
    Pkh,
    #[serde(rename = "BPNT")]
    Bpnt,
    #[serde(rename = "KIS")]
    Kis,
    Lainnya,
}

impl fmt::Display for JenisBantuan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            JenisBantuan::Blt => "BLT",
            JenisBantuan::Pkh => "PKH",
            JenisBantuan::Bpnt => "BPNT",
            JenisBantuan::Kis => "KIS",
            JenisBantuan::Lainnya => "Lainnya",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bantuan {
    pub id: String,
    pub warga_id: String,
    pub jenis: JenisBantuan,
    pub tahun: i32,
    /// Rupiah
    pub nominal: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keterangan: Option<String>,
}

impl Record for Bantuan {
    const KIND: &'static str = "Bantuan";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Disbursement payload without identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BantuanInput {
    pub warga_id: String,
    pub jenis: JenisBantuan,
    pub tahun: i32,
    pub nominal: i64,
    #[serde(default)]
    pub keterangan: Option<String>,
}

impl BantuanInput {
    pub fn validate(&self) -> Result<()> {
        require("wargaId", &self.warga_id)?;
        validate_nominal(self.nominal)
    }
}

impl Bantuan {
    pub fn from_input(id: String, input: BantuanInput) -> Self {
        Self {
            id,
            warga_id: input.warga_id,
            jenis: input.jenis,
            tahun: input.tahun,
            nominal: input.nominal,
            keterangan: input.keterangan,
        }
    }

    pub fn validate(&self) -> Result<()> {
        require("wargaId", &self.warga_id)?;
        validate_nominal(self.nominal)
    }
}

fn validate_nominal(nominal: i64) -> Result<()> {
    if nominal < 0 {
        return Err(Error::validation("nominal tidak boleh negatif"));
    }
    Ok(())
}

/// Budget and recipient target for one year, keyed by `tahun`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetBantuan {
    pub tahun: i32,
    pub total_anggaran: i64,
    pub target_penerima: u32,
}

/// Realisation of one year's disbursements against its target
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RingkasanBantuan {
    pub tahun: i32,
    pub jumlah_penyaluran: usize,
    pub total_nominal: i64,
    /// Distinct recipients
    pub jumlah_penerima: usize,
    pub target: Option<TargetBantuan>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jenis_round_trips_stored_names() {
        let jenis: JenisBantuan = serde_json::from_str("\"BPNT\"").unwrap();
        assert_eq!(jenis, JenisBantuan::Bpnt);
        assert_eq!(serde_json::to_string(&JenisBantuan::Lainnya).unwrap(), "\"Lainnya\"");
    }

    #[test]
    fn test_input_requires_recipient() {
        let input = BantuanInput {
            warga_id: String::new(),
            jenis: JenisBantuan::Blt,
            tahun: 2024,
            nominal: 300_000,
            keterangan: None,
        };
        assert!(matches!(input.validate(), Err(Error::Validation(_))));
    }
}
