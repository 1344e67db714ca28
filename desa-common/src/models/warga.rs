//! Resident (warga) records

use crate::store::Record;
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Aid-program eligibility flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusBantuan {
    pub blt: bool,
    pub pkh: bool,
    pub lainnya: bool,
}

impl StatusBantuan {
    /// Ineligible for every program
    pub const fn tidak_ada() -> Self {
        Self {
            blt: false,
            pkh: false,
            lainnya: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warga {
    pub id: String,
    pub nama: String,
    pub nik: String,
    pub tempat_lahir: String,
    /// YYYY-MM-DD
    pub tanggal_lahir: String,
    pub pekerjaan: String,
    pub dusun: String,
    pub rt: String,
    pub rw: String,
    pub desa: String,
    pub kecamatan: String,
    pub kabupaten: String,
    pub provinsi: String,
    /// Back-reference to the family card listing this resident
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kartu_keluarga_id: Option<String>,
    #[serde(default)]
    pub bantuan: StatusBantuan,
}

impl Record for Warga {
    const KIND: &'static str = "Warga";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Resident payload without identity
///
/// Used by the add form and by family-card imports. Identity, family-card
/// back-reference and aid flags present in an imported payload are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WargaInput {
    pub nama: String,
    pub nik: String,
    pub tempat_lahir: String,
    pub tanggal_lahir: String,
    pub pekerjaan: String,
    pub dusun: String,
    pub rt: String,
    pub rw: String,
    pub desa: String,
    pub kecamatan: String,
    pub kabupaten: String,
    pub provinsi: String,
}

impl WargaInput {
    /// Name and NIK are required; a birth date, when given, must be YYYY-MM-DD
    pub fn validate(&self) -> Result<()> {
        require("nama", &self.nama)?;
        require("nik", &self.nik)?;
        validate_tanggal(&self.tanggal_lahir)
    }
}

impl Warga {
    /// New resident from a payload: no family card, no aid eligibility
    pub fn from_input(id: String, input: WargaInput) -> Self {
        Self {
            id,
            nama: input.nama,
            nik: input.nik,
            tempat_lahir: input.tempat_lahir,
            tanggal_lahir: input.tanggal_lahir,
            pekerjaan: input.pekerjaan,
            dusun: input.dusun,
            rt: input.rt,
            rw: input.rw,
            desa: input.desa,
            kecamatan: input.kecamatan,
            kabupaten: input.kabupaten,
            provinsi: input.provinsi,
            kartu_keluarga_id: None,
            bantuan: StatusBantuan::tidak_ada(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require("id", &self.id)?;
        require("nama", &self.nama)?;
        require("nik", &self.nik)?;
        validate_tanggal(&self.tanggal_lahir)
    }

    /// Current value of a text field
    pub fn field(&self, field: WargaField) -> &str {
        match field {
            WargaField::Nama => &self.nama,
            WargaField::Nik => &self.nik,
            WargaField::TempatLahir => &self.tempat_lahir,
            WargaField::TanggalLahir => &self.tanggal_lahir,
            WargaField::Pekerjaan => &self.pekerjaan,
            WargaField::Dusun => &self.dusun,
            WargaField::Rt => &self.rt,
            WargaField::Rw => &self.rw,
            WargaField::Desa => &self.desa,
            WargaField::Kecamatan => &self.kecamatan,
            WargaField::Kabupaten => &self.kabupaten,
            WargaField::Provinsi => &self.provinsi,
        }
    }

    /// Overwrite one text field, validating the new value for that field
    pub fn set_field(&mut self, field: WargaField, value: &str) -> Result<()> {
        field.validate(value)?;
        let slot = match field {
            WargaField::Nama => &mut self.nama,
            WargaField::Nik => &mut self.nik,
            WargaField::TempatLahir => &mut self.tempat_lahir,
            WargaField::TanggalLahir => &mut self.tanggal_lahir,
            WargaField::Pekerjaan => &mut self.pekerjaan,
            WargaField::Dusun => &mut self.dusun,
            WargaField::Rt => &mut self.rt,
            WargaField::Rw => &mut self.rw,
            WargaField::Desa => &mut self.desa,
            WargaField::Kecamatan => &mut self.kecamatan,
            WargaField::Kabupaten => &mut self.kabupaten,
            WargaField::Provinsi => &mut self.provinsi,
        };
        *slot = value.to_string();
        Ok(())
    }
}

/// Resident field a change request may target
///
/// Only the text fields are editable this way; identity, the family-card
/// back-reference and aid flags have their own operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WargaField {
    Nama,
    Nik,
    TempatLahir,
    TanggalLahir,
    Pekerjaan,
    Dusun,
    Rt,
    Rw,
    Desa,
    Kecamatan,
    Kabupaten,
    Provinsi,
}

impl WargaField {
    pub const fn as_str(self) -> &'static str {
        match self {
            WargaField::Nama => "nama",
            WargaField::Nik => "nik",
            WargaField::TempatLahir => "tempatLahir",
            WargaField::TanggalLahir => "tanggalLahir",
            WargaField::Pekerjaan => "pekerjaan",
            WargaField::Dusun => "dusun",
            WargaField::Rt => "rt",
            WargaField::Rw => "rw",
            WargaField::Desa => "desa",
            WargaField::Kecamatan => "kecamatan",
            WargaField::Kabupaten => "kabupaten",
            WargaField::Provinsi => "provinsi",
        }
    }

    /// Check a proposed value before it is stored or applied
    pub fn validate(self, value: &str) -> Result<()> {
        match self {
            WargaField::Nama | WargaField::Nik => require(self.as_str(), value),
            WargaField::TanggalLahir => validate_tanggal(value),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for WargaField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(format!("{} wajib diisi", field)));
    }
    Ok(())
}

fn validate_tanggal(value: &str) -> Result<()> {
    if value.is_empty() {
        return Ok(());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| Error::validation(format!("tanggal '{}' harus berformat YYYY-MM-DD", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(nama: &str, nik: &str) -> WargaInput {
        WargaInput {
            nama: nama.to_string(),
            nik: nik.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_from_input_defaults() {
        let w = Warga::from_input("warga-9".to_string(), input("Ani", "123"));
        assert_eq!(w.bantuan, StatusBantuan::tidak_ada());
        assert!(w.kartu_keluarga_id.is_none());
    }

    #[test]
    fn test_input_requires_nama_and_nik() {
        assert!(input("", "1").validate().is_err());
        assert!(input("Ani", "  ").validate().is_err());
        assert!(input("Ani", "1").validate().is_ok());
    }

    #[test]
    fn test_set_field_validates_date() {
        let mut w = Warga::from_input("w".to_string(), input("Ani", "1"));
        assert!(w.set_field(WargaField::TanggalLahir, "12/04/1985").is_err());
        w.set_field(WargaField::TanggalLahir, "1985-04-12").unwrap();
        assert_eq!(w.field(WargaField::TanggalLahir), "1985-04-12");
    }

    #[test]
    fn test_serialized_shape() {
        let mut w = Warga::from_input("w".to_string(), input("Ani", "1"));
        let json = serde_json::to_value(&w).unwrap();
        assert!(json.get("tempatLahir").is_some());
        assert!(json.get("kartuKeluargaId").is_none());

        w.kartu_keluarga_id = Some("kk-1".to_string());
        let json = serde_json::to_value(&w).unwrap();
        assert_eq!(json["kartuKeluargaId"], "kk-1");
    }

    #[test]
    fn test_import_payload_ignores_identity() {
        let payload = r#"{"id":"x","nama":"Ani","nik":"1","bantuan":{"blt":true,"pkh":true,"lainnya":true}}"#;
        let parsed: WargaInput = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed.nama, "Ani");
        assert_eq!(parsed.pekerjaan, "");
    }

    #[test]
    fn test_field_names_match_stored_keys() {
        let f: WargaField = serde_json::from_str("\"tempatLahir\"").unwrap();
        assert_eq!(f, WargaField::TempatLahir);
        assert_eq!(f.to_string(), "tempatLahir");
    }
}
