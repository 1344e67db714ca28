//! Per-resident administrative document sets (adminduk)

use super::warga::require;
use crate::store::Record;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upload limit for one document, measured on the decoded payload
pub const MAX_DOKUMEN_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JenisDokumen {
    Kk,
    Ktp,
    AktaLahir,
    Bpjs,
    Kip,
}

impl JenisDokumen {
    pub const ALL: [JenisDokumen; 5] = [
        JenisDokumen::Kk,
        JenisDokumen::Ktp,
        JenisDokumen::AktaLahir,
        JenisDokumen::Bpjs,
        JenisDokumen::Kip,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            JenisDokumen::Kk => "kk",
            JenisDokumen::Ktp => "ktp",
            JenisDokumen::AktaLahir => "aktaLahir",
            JenisDokumen::Bpjs => "bpjs",
            JenisDokumen::Kip => "kip",
        }
    }
}

impl fmt::Display for JenisDokumen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for JenisDokumen {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        JenisDokumen::ALL
            .into_iter()
            .find(|j| j.as_str() == s)
            .ok_or_else(|| Error::validation(format!("jenis dokumen '{}' tidak dikenal", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dokumen {
    pub file_name: String,
    /// `data:<mime>;base64,<payload>`
    pub data_url: String,
    pub uploaded_at: String,
}

impl Dokumen {
    pub fn validate(&self) -> Result<()> {
        require("fileName", &self.file_name)?;
        if !self.data_url.starts_with("data:") {
            return Err(Error::validation("dataUrl harus berupa data URL"));
        }
        let size = self.payload_len();
        if size > MAX_DOKUMEN_BYTES {
            return Err(Error::validation(format!(
                "Ukuran file terlalu besar ({} byte). Maksimal 5MB.",
                size
            )));
        }
        Ok(())
    }

    /// Decoded size of the payload, computed from its base64 length
    pub fn payload_len(&self) -> usize {
        let payload = self
            .data_url
            .split_once(',')
            .map(|(_, p)| p)
            .unwrap_or_default();
        if !self.data_url.contains(";base64,") {
            return payload.len();
        }
        let padding = payload.bytes().rev().take_while(|&b| b == b'=').count();
        (payload.len() / 4 * 3).saturating_sub(padding)
    }
}

/// Document slots of one resident; `id` is the resident id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Adminduk {
    pub id: String,
    #[serde(default)]
    pub kk: Option<Dokumen>,
    #[serde(default)]
    pub ktp: Option<Dokumen>,
    #[serde(default)]
    pub akta_lahir: Option<Dokumen>,
    #[serde(default)]
    pub bpjs: Option<Dokumen>,
    #[serde(default)]
    pub kip: Option<Dokumen>,
}

impl Record for Adminduk {
    const KIND: &'static str = "Dokumen warga";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Adminduk {
    /// Empty set for a resident
    pub fn kosong(warga_id: impl Into<String>) -> Self {
        Self {
            id: warga_id.into(),
            kk: None,
            ktp: None,
            akta_lahir: None,
            bpjs: None,
            kip: None,
        }
    }

    pub fn slot(&self, jenis: JenisDokumen) -> Option<&Dokumen> {
        match jenis {
            JenisDokumen::Kk => self.kk.as_ref(),
            JenisDokumen::Ktp => self.ktp.as_ref(),
            JenisDokumen::AktaLahir => self.akta_lahir.as_ref(),
            JenisDokumen::Bpjs => self.bpjs.as_ref(),
            JenisDokumen::Kip => self.kip.as_ref(),
        }
    }

    pub fn slot_mut(&mut self, jenis: JenisDokumen) -> &mut Option<Dokumen> {
        match jenis {
            JenisDokumen::Kk => &mut self.kk,
            JenisDokumen::Ktp => &mut self.ktp,
            JenisDokumen::AktaLahir => &mut self.akta_lahir,
            JenisDokumen::Bpjs => &mut self.bpjs,
            JenisDokumen::Kip => &mut self.kip,
        }
    }

    pub fn jumlah_dokumen(&self) -> usize {
        JenisDokumen::ALL
            .into_iter()
            .filter(|j| self.slot(*j).is_some())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dokumen(data_url: String) -> Dokumen {
        Dokumen {
            file_name: "KTP.jpg".to_string(),
            data_url,
            uploaded_at: "2024-05-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_payload_len_accounts_for_padding() {
        // "hello" → aGVsbG8=
        let d = dokumen("data:text/plain;base64,aGVsbG8=".to_string());
        assert_eq!(d.payload_len(), 5);
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_oversized_document_rejected() {
        let payload = "A".repeat((MAX_DOKUMEN_BYTES / 3 + 1) * 4);
        let d = dokumen(format!("data:application/pdf;base64,{}", payload));
        assert!(matches!(d.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_non_data_url_rejected() {
        assert!(dokumen("https://example.org/ktp.jpg".to_string()).validate().is_err());
    }

    #[test]
    fn test_empty_slots_serialize_as_null() {
        let json = serde_json::to_value(Adminduk::kosong("warga-1")).unwrap();
        assert!(json["aktaLahir"].is_null());
        assert!(json.get("kip").is_some());
    }

    #[test]
    fn test_jenis_from_str() {
        assert_eq!("aktaLahir".parse::<JenisDokumen>().unwrap(), JenisDokumen::AktaLahir);
        assert!("paspor".parse::<JenisDokumen>().is_err());
    }
}
